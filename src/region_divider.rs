//! The legacy fertility-region divider port.
//!
//! When sector-based partitioning is unavailable or fails its viability gate,
//! the allocator falls back to an older scheme: an external service carves a
//! horizontal band of the map into balanced-fertility regions. The service is
//! opaque to this crate; only its call surface is modeled here.

use bitflags::bitflags;

use crate::spatial::Boundary;

bitflags! {
    /// Landmass tags used to filter which tiles the divider may claim.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct PlotTags: u32 {
        const LANDMASS_WEST = 1 << 0;
        const LANDMASS_EAST = 1 << 1;
    }
}

/// Divides map bands into balanced-fertility regions and scores tile
/// fertility. Stateful: `divide_into_regions` replaces the regions readable
/// through [`RegionDivider::region`].
pub trait RegionDivider {
    /// Clears any state left from a previous division.
    fn reset(&mut self);

    /// Divides the tiles in columns `[west_column, east_column]` carrying any
    /// of `tag_filter` into `count` regions of roughly equal fertility,
    /// subject to the given minimum-fertility thresholds.
    fn divide_into_regions(
        &mut self,
        count: u32,
        min_major_fertility: i32,
        min_minor_fertility: i32,
        west_column: i32,
        east_column: i32,
        tag_filter: PlotTags,
    );

    /// Region produced by the last division, by index.
    fn region(&self, index: u32) -> Option<Boundary>;

    /// Fertility score of one tile. This doubles as the base score of every
    /// candidate start plot.
    fn fertility(&self, x: i32, y: i32) -> i32;
}
