//! Map geometry types and the spatial-query port.
//!
//! The allocator never owns terrain. Everything it needs to know about the
//! map — water, mountains, biomes, distances, neighborhoods — is answered by
//! a host-provided [`SpatialQuery`] implementation. Tile content identifiers
//! ([`BiomeType`], [`TerrainType`], ...) are opaque ruleset ids; the
//! allocator only ever compares them for equality against bias-table targets.

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// Index of a plot in row-major order (`y * grid_width + x`).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct PlotIndex(pub usize);

impl PlotIndex {
    pub fn from_xy(x: i32, y: i32, grid_width: u32) -> Self {
        Self(y as usize * grid_width as usize + x as usize)
    }

    pub fn to_xy(self, grid_width: u32) -> (i32, i32) {
        let width = grid_width as usize;
        ((self.0 % width) as i32, (self.0 / width) as i32)
    }
}

/// Opaque biome id from the host ruleset.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BiomeType(pub u16);

/// Opaque terrain id from the host ruleset.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct TerrainType(pub u16);

/// Opaque feature-class id from the host ruleset.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FeatureClassType(pub u16);

/// Opaque resource id from the host ruleset.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ResourceType(pub u16);

/// Continent discriminator. [`ContinentId::NONE`] means "no constraint".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ContinentId(pub i32);

impl ContinentId {
    pub const NONE: Self = Self(-1);
}

/// An axis-aligned rectangle of tiles, optionally pinned to one continent.
///
/// All four edges are inclusive. Immutable once produced.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Boundary {
    pub west: i32,
    pub east: i32,
    pub south: i32,
    pub north: i32,
    pub continent: ContinentId,
}

impl Boundary {
    /// Iterates all tiles in row-major scan order: south row first, west
    /// column first within a row. Plot selection depends on this order for
    /// its first-encountered-wins tie rule.
    pub fn tiles(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (self.south..=self.north).flat_map(move |y| (self.west..=self.east).map(move |x| (x, y)))
    }

    /// Rectangle area used to rank fallback regions (larger first).
    pub fn area(&self) -> i64 {
        (self.east - self.west) as i64 * (self.north - self.south) as i64
    }

    /// Whether this rectangle overlaps the given column span.
    pub fn overlaps_columns(&self, west: i32, east: i32) -> bool {
        self.east > west && self.west < east
    }
}

/// A tile pre-assigned to one player, used by the tile-ownership allocation
/// mode which bypasses region partitioning entirely.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct OwnedTile {
    pub x: i32,
    pub y: i32,
    pub player: PlayerId,
}

/// Read-only spatial queries answered by the host map.
pub trait SpatialQuery {
    fn grid_width(&self) -> u32;

    fn is_water(&self, x: i32, y: i32) -> bool;

    fn is_mountain(&self, x: i32, y: i32) -> bool;

    fn biome(&self, x: i32, y: i32) -> BiomeType;

    fn terrain(&self, x: i32, y: i32) -> TerrainType;

    fn feature_class(&self, x: i32, y: i32) -> Option<FeatureClassType>;

    fn resource(&self, x: i32, y: i32) -> Option<ResourceType>;

    fn continent(&self, x: i32, y: i32) -> ContinentId;

    /// Any river on the tile, navigable or not.
    fn is_river(&self, x: i32, y: i32) -> bool;

    /// Navigable river channels only. Feeds the region-level river channel.
    fn is_navigable_river(&self, x: i32, y: i32) -> bool;

    fn is_lake(&self, x: i32, y: i32) -> bool;

    fn is_natural_wonder(&self, x: i32, y: i32) -> bool;

    /// Whether a settler on this tile can reach the ocean (coastal land or a
    /// navigable river mouth).
    fn has_ocean_access(&self, x: i32, y: i32) -> bool;

    /// Distance between two plots in the host's tile metric.
    fn plot_distance(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> i32;

    /// All plots within `radius` of `(x, y)`, including the center.
    fn plots_in_radius(&self, x: i32, y: i32, radius: u32) -> Vec<PlotIndex>;

    /// Maps a sector index of the two-hemisphere start grid to its tile
    /// rectangle.
    ///
    /// Sector indices `0..rows*cols` cover the west hemisphere, the rest the
    /// east hemisphere, row-major within each grid. Both hemispheres share
    /// the east boundary's row span and the west boundary's column span;
    /// the hemispheres are assumed equally sized. The produced boundary
    /// carries no continent constraint.
    ///
    /// Hosts with exotic projections may override this; the default performs
    /// plain rectangle subdivision.
    fn sector_boundary(
        &self,
        sector: usize,
        rows: u32,
        cols: u32,
        west: &Boundary,
        east: &Boundary,
    ) -> Boundary {
        if rows == 0 || cols == 0 {
            return Boundary {
                west: 0,
                east: 0,
                south: 0,
                north: 0,
                continent: ContinentId::NONE,
            };
        }

        let per_hemisphere = (rows * cols) as usize;
        let east_hemisphere = sector >= per_hemisphere;
        let local = if east_hemisphere {
            sector - per_hemisphere
        } else {
            sector
        };
        let row = local / cols as usize;
        let col = local % cols as usize;

        let sector_width = (west.east - west.west) as f64 / cols as f64;
        let sector_height = (east.north - east.south) as f64 / rows as f64;
        let x_origin = if east_hemisphere { east.west } else { west.west } as f64;

        Boundary {
            west: (x_origin + sector_width * col as f64).floor() as i32,
            east: (x_origin + sector_width * (col + 1) as f64).floor() as i32,
            south: (east.south as f64 + sector_height * row as f64).floor() as i32,
            north: (east.south as f64 + sector_height * (row + 1) as f64).floor() as i32,
            continent: ContinentId::NONE,
        }
    }
}
