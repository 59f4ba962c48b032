//! Tunables for one allocation pass.

use serde::{Deserialize, Serialize};

/// Configuration consumed by [`StartAllocator`](crate::StartAllocator).
///
/// One value of this struct describes one allocation pass; nothing in it is
/// mutated by the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllocatorParameters {
    /// Master random seed. The same seed, player set and map state reproduce
    /// an identical plot assignment.
    pub seed: u64,
    /// No start may be placed strictly closer than this to an earlier start,
    /// in plot distance.
    pub required_start_buffer: i32,
    /// Starts between the required and desired buffers have their score
    /// scaled down linearly.
    ///
    /// When `desired_start_buffer <= required_start_buffer`, spacing
    /// enforcement is skipped entirely. That degenerate configuration is how
    /// hosts disable spacing; it is deliberately not treated as an error.
    pub desired_start_buffer: i32,
    /// Whether human players prefer the primary (more populated) hemisphere
    /// in the current era. Overridden when humans would overflow that
    /// hemisphere's quota.
    pub humans_primary_hemisphere: bool,
    /// Minimum fertility the legacy divider requires of a major region.
    pub min_major_fertility: i32,
    /// Minimum fertility the legacy divider requires of a minor region.
    pub min_minor_fertility: i32,
}

impl AllocatorParameters {
    /// Upper bound on competing major players, and therefore on candidate
    /// start regions per cohort.
    pub const MAX_MAJOR_CIVS: usize = 16;

    /// Neighborhood radius for tile-level bias scoring.
    pub const BIAS_RADIUS: u32 = 3;

    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            required_start_buffer: 9,
            desired_start_buffer: 14,
            humans_primary_hemisphere: true,
            min_major_fertility: 25,
            min_minor_fertility: 5,
        }
    }
}

impl Default for AllocatorParameters {
    fn default() -> Self {
        Self::new(0)
    }
}
