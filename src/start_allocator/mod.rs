//! The starting-position allocation engine.
//!
//! [`StartAllocator`] decides, once per game setup, which single tile becomes
//! each competing player's starting location. Its phase methods live one file
//! per phase in this module:
//! 1. [`choose_start_sectors`](StartAllocator::choose_start_sectors) picks
//!    eligible start sectors from a fixed combinatorial table.
//! 2. `partition_regions` turns sectors (or legacy fertility bands) into
//!    candidate regions.
//! 3. `group_players` splits the alive majors into homeland and distant
//!    cohorts.
//! 4. `assign_regions` greedily matches cohort players to regions by their
//!    declared biases.
//! 5. `pick_start_plot` selects the best tile inside a matched region,
//!    honoring spacing buffers against starts already placed.
//! 6. `orchestrate` sequences all of the above per game mode.
//!
//! The whole pass is synchronous and single-threaded; failures are modeled
//! as unset slots, never as an abort.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use log::warn;

use crate::{
    bias::BiasTable,
    parameters::AllocatorParameters,
    player::{MajorIndex, PlayerId, PlayerRegistry},
    random::NamedRng,
    region_divider::RegionDivider,
    spatial::{Boundary, PlotIndex, SpatialQuery},
};

mod assign_regions;
mod choose_start_sectors;
mod group_players;
mod orchestrate;
mod partition_regions;
mod pick_start_plot;

pub use choose_start_sectors::SectorMask;

/// Candidate start regions for one cohort. Never grows past the major-civ
/// cap: the sector table marks at most one sector per player.
pub(crate) type RegionList = ArrayVec<Boundary, { AllocatorParameters::MAX_MAJOR_CIVS }>;

/// Side-effect sink the orchestrator reports every accepted start into.
pub trait StartRegistry {
    fn register_start(&mut self, plot: PlotIndex, player: PlayerId);
}

/// The plots chosen so far in one allocation run.
///
/// One slot per alive major (by [`MajorIndex`]); a slot stays `None` until a
/// plot is accepted for that player. Spacing checks for later players query
/// this accumulator, so it is threaded through explicitly rather than living
/// in ambient state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChosenStarts {
    slots: Vec<Option<PlotIndex>>,
}

impl ChosenStarts {
    fn with_slots(count: usize) -> Self {
        Self {
            slots: vec![None; count],
        }
    }

    fn set(&mut self, major: MajorIndex, plot: PlotIndex) {
        self.slots[major.0] = Some(plot);
    }

    pub fn get(&self, major: MajorIndex) -> Option<PlotIndex> {
        self.slots.get(major.0).copied().flatten()
    }

    /// Every plot accepted so far, in slot order.
    pub fn plots(&self) -> impl Iterator<Item = PlotIndex> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }

    /// Distance from `(x, y)` to the closest accepted start, or `i32::MAX`
    /// when nothing has been placed yet.
    pub fn distance_to_closest(&self, map: &dyn SpatialQuery, x: i32, y: i32) -> i32 {
        let grid_width = map.grid_width();
        self.plots()
            .map(|plot| {
                let (start_x, start_y) = plot.to_xy(grid_width);
                map.plot_distance(x, y, start_x, start_y)
            })
            .min()
            .unwrap_or(i32::MAX)
    }

    /// Resolves slots to absolute player ids via the alive-majors ordering.
    fn to_player_map(&self, players: &dyn PlayerRegistry) -> BTreeMap<PlayerId, PlotIndex> {
        let alive = players.alive_major_ids();
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|plot| (alive[index], plot)))
            .collect()
    }
}

/// The allocation engine. Borrow the host's ports, call one of the
/// orchestrator entry points in [`orchestrate`](self), read the result.
///
/// All structures are created, consumed and discarded within one entry-point
/// call; only the [`StartRegistry`] side effects outlive the pass.
pub struct StartAllocator<'a> {
    map: &'a dyn SpatialQuery,
    divider: &'a mut dyn RegionDivider,
    players: &'a dyn PlayerRegistry,
    registry: &'a mut dyn StartRegistry,
    bias_table: &'a BiasTable,
    parameters: AllocatorParameters,
    rng: NamedRng,
    chosen: ChosenStarts,
}

impl<'a> StartAllocator<'a> {
    pub fn new(
        map: &'a dyn SpatialQuery,
        divider: &'a mut dyn RegionDivider,
        players: &'a dyn PlayerRegistry,
        registry: &'a mut dyn StartRegistry,
        bias_table: &'a BiasTable,
        parameters: AllocatorParameters,
    ) -> Self {
        let rng = NamedRng::new(parameters.seed);
        Self {
            map,
            divider,
            players,
            registry,
            bias_table,
            parameters,
            rng,
            chosen: ChosenStarts::default(),
        }
    }

    /// The accumulator of the most recent run.
    pub fn chosen_starts(&self) -> &ChosenStarts {
        &self.chosen
    }

    /// Number of majors an entry point will actually place: the quota, capped
    /// by how many majors are alive.
    fn placeable_majors(&self, max_majors: usize) -> usize {
        let alive = self.players.alive_major_ids().len();
        if max_majors > alive {
            warn!("{max_majors} starts requested but only {alive} majors are alive");
        }
        max_majors.min(alive)
    }

    fn reset_run(&mut self, slot_count: usize) {
        self.chosen = ChosenStarts::with_slots(slot_count);
    }
}
