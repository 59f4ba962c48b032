//! Tile-level plot selection.
//!
//! Candidates are scanned in row-major order and scored as fertility plus
//! start-bias, then scaled down when they crowd an earlier start. The
//! highest strictly-greater score wins, so scan order breaks ties toward the
//! south-west.

use enum_map::EnumMap;

use crate::{
    bias::{for_each_matching_row, BiasChannel},
    parameters::AllocatorParameters,
    player::PlayerId,
    spatial::{Boundary, ContinentId, OwnedTile, PlotIndex},
};

use super::StartAllocator;

const INVALID_PLOT_SCORE: f64 = -1.0;

impl StartAllocator<'_> {
    /// Picks the best start plot inside `region`, or `None` when no tile
    /// scores above zero.
    ///
    /// `num_found_earlier` is how many starts precede this one in the run;
    /// spacing against already-chosen plots applies only then, so the very
    /// first placement is never scaled.
    pub(crate) fn pick_start_plot(
        &self,
        region: &Boundary,
        num_found_earlier: usize,
        player: PlayerId,
        ignore_bias: bool,
    ) -> Option<PlotIndex> {
        self.pick_from_positions(
            region.tiles(),
            region.continent,
            num_found_earlier,
            player,
            ignore_bias,
        )
    }

    /// Like [`pick_start_plot`](Self::pick_start_plot) but over the tiles
    /// pre-assigned to `player` instead of a rectangle.
    pub(crate) fn pick_start_plot_from_tiles(
        &self,
        tiles: &[OwnedTile],
        num_found_earlier: usize,
        player: PlayerId,
        ignore_bias: bool,
    ) -> Option<PlotIndex> {
        self.pick_from_positions(
            tiles
                .iter()
                .filter(|tile| tile.player == player)
                .map(|tile| (tile.x, tile.y)),
            ContinentId::NONE,
            num_found_earlier,
            player,
            ignore_bias,
        )
    }

    fn pick_from_positions(
        &self,
        positions: impl Iterator<Item = (i32, i32)>,
        continent: ContinentId,
        num_found_earlier: usize,
        player: PlayerId,
        ignore_bias: bool,
    ) -> Option<PlotIndex> {
        let mut best_score = 0.0;
        let mut best_plot = None;
        for (x, y) in positions {
            // Bias never rescues a tile with no fertility of its own.
            let base = self.score_plot(x, y, continent);
            if base <= 0.0 {
                continue;
            }
            let mut score = base;
            if !ignore_bias {
                score += self.start_bias_score(x, y, player);
            }
            if num_found_earlier > 0 {
                score = self.scale_score_by_closest_start(score, x, y);
            }
            if score > best_score {
                best_score = score;
                best_plot = Some(PlotIndex::from_xy(x, y, self.map.grid_width()));
            }
        }
        best_plot
    }

    /// Base score of a candidate tile: its fertility, or
    /// [`INVALID_PLOT_SCORE`] for tiles no start may ever occupy.
    fn score_plot(&self, x: i32, y: i32, continent: ContinentId) -> f64 {
        if self.map.is_water(x, y) || self.map.is_mountain(x, y) {
            return INVALID_PLOT_SCORE;
        }
        if continent != ContinentId::NONE && self.map.continent(x, y) != continent {
            return INVALID_PLOT_SCORE;
        }
        self.divider.fertility(x, y) as f64
    }

    /// Scales a score by the distance to the closest already-chosen start:
    /// zero inside the required buffer, full beyond the desired buffer,
    /// linear in between.
    ///
    /// A desired buffer at or below the required buffer disables spacing
    /// outright; that is how hosts turn the mechanism off.
    fn scale_score_by_closest_start(&self, score: f64, x: i32, y: i32) -> f64 {
        let required = self.parameters.required_start_buffer;
        let desired = self.parameters.desired_start_buffer;
        if desired <= required {
            return score;
        }
        let distance = self.chosen.distance_to_closest(self.map, x, y);
        if distance >= desired {
            score
        } else if distance < required {
            0.0
        } else {
            score * (distance - required + 1) as f64 / (desired - required + 1) as f64
        }
    }

    /// Total start-bias contribution at a candidate tile.
    pub(crate) fn start_bias_score(&self, x: i32, y: i32, player: PlayerId) -> f64 {
        self.start_bias_breakdown(x, y, player)
            .values()
            .sum()
    }

    /// Per-channel start-bias contributions at a candidate tile.
    ///
    /// Biome, terrain, river and feature-class rows score every tile of the
    /// radius-3 neighborhood with reciprocal distance decay. Resource, lake
    /// and natural-wonder rows score flat per matching neighborhood tile.
    /// Coast rows look at the candidate tile alone.
    pub(crate) fn start_bias_breakdown(
        &self,
        x: i32,
        y: i32,
        player: PlayerId,
    ) -> EnumMap<BiasChannel, f64> {
        let civilization = self.players.civilization(player);
        let leader = self.players.leader(player);
        let table = self.bias_table;
        let mut breakdown: EnumMap<BiasChannel, f64> = EnumMap::default();

        for plot in self
            .map
            .plots_in_radius(x, y, AllocatorParameters::BIAS_RADIUS)
        {
            let (px, py) = plot.to_xy(self.map.grid_width());
            let decay = self.map.plot_distance(x, y, px, py).max(1) as f64;

            let biome = self.map.biome(px, py);
            for_each_matching_row(&table.biomes, civilization, leader, |&target, score| {
                if target == biome {
                    breakdown[BiasChannel::Biome] += score as f64 / decay;
                }
            });

            let terrain = self.map.terrain(px, py);
            for_each_matching_row(&table.terrains, civilization, leader, |&target, score| {
                if target == terrain {
                    breakdown[BiasChannel::Terrain] += score as f64 / decay;
                }
            });

            if self.map.is_river(px, py) {
                for_each_matching_row(&table.rivers, civilization, leader, |_, score| {
                    breakdown[BiasChannel::River] += score as f64 / decay;
                });
            }

            if let Some(feature_class) = self.map.feature_class(px, py) {
                for_each_matching_row(
                    &table.feature_classes,
                    civilization,
                    leader,
                    |&target, score| {
                        if target == feature_class {
                            breakdown[BiasChannel::FeatureClass] += score as f64 / decay;
                        }
                    },
                );
            }

            if let Some(resource) = self.map.resource(px, py) {
                for_each_matching_row(&table.resources, civilization, leader, |&target, score| {
                    if target == resource {
                        breakdown[BiasChannel::Resource] += score as f64;
                    }
                });
            }

            if self.map.is_lake(px, py) {
                for_each_matching_row(&table.lakes, civilization, leader, |_, score| {
                    breakdown[BiasChannel::Lake] += score as f64;
                });
            }

            if self.map.is_natural_wonder(px, py) {
                for_each_matching_row(&table.natural_wonders, civilization, leader, |_, score| {
                    breakdown[BiasChannel::NaturalWonder] += score as f64;
                });
            }
        }

        if self.map.has_ocean_access(x, y) {
            for_each_matching_row(&table.coasts, civilization, leader, |_, score| {
                breakdown[BiasChannel::Coast] += score as f64;
            });
        }

        breakdown
    }
}
