//! Shared fixtures for the unit tests: a grid-backed map, a scripted region
//! divider and a canned player roster.

#![allow(dead_code)]

use crate::{
    player::{CivilizationType, LeaderType, PlayerId, PlayerRegistry},
    region_divider::{PlotTags, RegionDivider},
    spatial::{
        BiomeType, Boundary, ContinentId, FeatureClassType, PlotIndex, ResourceType, SpatialQuery,
        TerrainType,
    },
    start_allocator::StartRegistry,
};

/// A flat square-grid map with per-tile vectors behind every query. The
/// distance metric is Chebyshev, so `plots_in_radius` is a clipped square.
pub struct FixtureMap {
    width: u32,
    height: u32,
    water: Vec<bool>,
    mountain: Vec<bool>,
    biome: Vec<BiomeType>,
    terrain: Vec<TerrainType>,
    feature_class: Vec<Option<FeatureClassType>>,
    resource: Vec<Option<ResourceType>>,
    continent: Vec<ContinentId>,
    river: Vec<bool>,
    navigable_river: Vec<bool>,
    lake: Vec<bool>,
    natural_wonder: Vec<bool>,
    ocean_access: Vec<bool>,
}

impl FixtureMap {
    /// An all-land map on continent 0, biome 0, terrain 0, nothing else set.
    pub fn land(width: u32, height: u32) -> Self {
        let tiles = (width * height) as usize;
        Self {
            width,
            height,
            water: vec![false; tiles],
            mountain: vec![false; tiles],
            biome: vec![BiomeType(0); tiles],
            terrain: vec![TerrainType(0); tiles],
            feature_class: vec![None; tiles],
            resource: vec![None; tiles],
            continent: vec![ContinentId(0); tiles],
            river: vec![false; tiles],
            navigable_river: vec![false; tiles],
            lake: vec![false; tiles],
            natural_wonder: vec![false; tiles],
            ocean_access: vec![false; tiles],
        }
    }

    fn at(&self, x: i32, y: i32) -> usize {
        PlotIndex::from_xy(x, y, self.width).0
    }

    pub fn set_water(&mut self, x: i32, y: i32) {
        let index = self.at(x, y);
        self.water[index] = true;
    }

    pub fn set_mountain(&mut self, x: i32, y: i32) {
        let index = self.at(x, y);
        self.mountain[index] = true;
    }

    pub fn set_biome(&mut self, x: i32, y: i32, biome: BiomeType) {
        let index = self.at(x, y);
        self.biome[index] = biome;
    }

    pub fn set_terrain(&mut self, x: i32, y: i32, terrain: TerrainType) {
        let index = self.at(x, y);
        self.terrain[index] = terrain;
    }

    pub fn set_feature_class(&mut self, x: i32, y: i32, feature_class: FeatureClassType) {
        let index = self.at(x, y);
        self.feature_class[index] = Some(feature_class);
    }

    pub fn set_resource(&mut self, x: i32, y: i32, resource: ResourceType) {
        let index = self.at(x, y);
        self.resource[index] = Some(resource);
    }

    pub fn set_continent(&mut self, x: i32, y: i32, continent: ContinentId) {
        let index = self.at(x, y);
        self.continent[index] = continent;
    }

    pub fn set_river(&mut self, x: i32, y: i32) {
        let index = self.at(x, y);
        self.river[index] = true;
    }

    pub fn set_navigable_river(&mut self, x: i32, y: i32) {
        let index = self.at(x, y);
        self.navigable_river[index] = true;
        self.river[index] = true;
    }

    pub fn set_lake(&mut self, x: i32, y: i32) {
        let index = self.at(x, y);
        self.lake[index] = true;
    }

    pub fn set_natural_wonder(&mut self, x: i32, y: i32) {
        let index = self.at(x, y);
        self.natural_wonder[index] = true;
    }

    pub fn set_ocean_access(&mut self, x: i32, y: i32) {
        let index = self.at(x, y);
        self.ocean_access[index] = true;
    }
}

impl SpatialQuery for FixtureMap {
    fn grid_width(&self) -> u32 {
        self.width
    }

    fn is_water(&self, x: i32, y: i32) -> bool {
        self.water[self.at(x, y)]
    }

    fn is_mountain(&self, x: i32, y: i32) -> bool {
        self.mountain[self.at(x, y)]
    }

    fn biome(&self, x: i32, y: i32) -> BiomeType {
        self.biome[self.at(x, y)]
    }

    fn terrain(&self, x: i32, y: i32) -> TerrainType {
        self.terrain[self.at(x, y)]
    }

    fn feature_class(&self, x: i32, y: i32) -> Option<FeatureClassType> {
        self.feature_class[self.at(x, y)]
    }

    fn resource(&self, x: i32, y: i32) -> Option<ResourceType> {
        self.resource[self.at(x, y)]
    }

    fn continent(&self, x: i32, y: i32) -> ContinentId {
        self.continent[self.at(x, y)]
    }

    fn is_river(&self, x: i32, y: i32) -> bool {
        self.river[self.at(x, y)]
    }

    fn is_navigable_river(&self, x: i32, y: i32) -> bool {
        self.navigable_river[self.at(x, y)]
    }

    fn is_lake(&self, x: i32, y: i32) -> bool {
        self.lake[self.at(x, y)]
    }

    fn is_natural_wonder(&self, x: i32, y: i32) -> bool {
        self.natural_wonder[self.at(x, y)]
    }

    fn has_ocean_access(&self, x: i32, y: i32) -> bool {
        self.ocean_access[self.at(x, y)]
    }

    fn plot_distance(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> i32 {
        (x1 - x2).abs().max((y1 - y2).abs())
    }

    fn plots_in_radius(&self, x: i32, y: i32, radius: u32) -> Vec<PlotIndex> {
        let radius = radius as i32;
        let mut plots = Vec::new();
        for py in (y - radius).max(0)..=(y + radius).min(self.height as i32 - 1) {
            for px in (x - radius).max(0)..=(x + radius).min(self.width as i32 - 1) {
                plots.push(PlotIndex::from_xy(px, py, self.width));
            }
        }
        plots
    }
}

/// One recorded `divide_into_regions` invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DivideCall {
    pub count: u32,
    pub min_major_fertility: i32,
    pub min_minor_fertility: i32,
    pub west_column: i32,
    pub east_column: i32,
    pub tag_filter: PlotTags,
}

/// A divider that records its calls and hands back pre-scripted regions.
pub struct FixtureDivider {
    width: u32,
    height: u32,
    fertility: Vec<i32>,
    pub scripted_regions: Vec<Boundary>,
    pub divide_calls: Vec<DivideCall>,
    pub reset_calls: usize,
}

impl FixtureDivider {
    pub fn uniform(width: u32, height: u32, fertility: i32) -> Self {
        Self {
            width,
            height,
            fertility: vec![fertility; (width * height) as usize],
            scripted_regions: Vec::new(),
            divide_calls: Vec::new(),
            reset_calls: 0,
        }
    }

    pub fn set_fertility(&mut self, x: i32, y: i32, fertility: i32) {
        self.fertility[PlotIndex::from_xy(x, y, self.width).0] = fertility;
    }
}

impl RegionDivider for FixtureDivider {
    fn reset(&mut self) {
        self.reset_calls += 1;
    }

    fn divide_into_regions(
        &mut self,
        count: u32,
        min_major_fertility: i32,
        min_minor_fertility: i32,
        west_column: i32,
        east_column: i32,
        tag_filter: PlotTags,
    ) {
        self.divide_calls.push(DivideCall {
            count,
            min_major_fertility,
            min_minor_fertility,
            west_column,
            east_column,
            tag_filter,
        });
    }

    fn region(&self, index: u32) -> Option<Boundary> {
        self.scripted_regions.get(index as usize).copied()
    }

    fn fertility(&self, x: i32, y: i32) -> i32 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0;
        }
        self.fertility[PlotIndex::from_xy(x, y, self.width).0]
    }
}

/// A canned roster: player ids `0..n`, civilization `i`, leader `100 + i`,
/// everyone AI unless flipped through `human`.
#[derive(Clone)]
pub struct FixturePlayers {
    pub ids: Vec<PlayerId>,
    pub human: Vec<bool>,
    pub civilization: Vec<CivilizationType>,
    pub leader: Vec<LeaderType>,
}

impl FixturePlayers {
    pub fn majors(count: usize) -> Self {
        Self {
            ids: (0..count).map(|index| PlayerId(index as i32)).collect(),
            human: vec![false; count],
            civilization: (0..count)
                .map(|index| CivilizationType(index as u32))
                .collect(),
            leader: (0..count)
                .map(|index| LeaderType(100 + index as u32))
                .collect(),
        }
    }

    fn position(&self, player: PlayerId) -> usize {
        self.ids
            .iter()
            .position(|&id| id == player)
            .unwrap_or_else(|| panic!("unknown player {}", player.0))
    }
}

impl PlayerRegistry for FixturePlayers {
    fn alive_major_ids(&self) -> &[PlayerId] {
        &self.ids
    }

    fn is_human(&self, player: PlayerId) -> bool {
        self.human[self.position(player)]
    }

    fn civilization(&self, player: PlayerId) -> CivilizationType {
        self.civilization[self.position(player)]
    }

    fn leader(&self, player: PlayerId) -> LeaderType {
        self.leader[self.position(player)]
    }
}

/// Captures every start the orchestrator reports.
#[derive(Default)]
pub struct RecordingRegistry {
    pub registered: Vec<(PlotIndex, PlayerId)>,
}

impl StartRegistry for RecordingRegistry {
    fn register_start(&mut self, plot: PlotIndex, player: PlayerId) {
        self.registered.push((plot, player));
    }
}
