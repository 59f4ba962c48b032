//! Entry points sequencing a whole allocation pass, one per game mode.

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::{
    player::{MajorIndex, PlayerId},
    region_divider::PlotTags,
    spatial::{Boundary, OwnedTile, PlotIndex},
};

use super::{RegionList, SectorMask, StartAllocator};

impl StartAllocator<'_> {
    /// Two-hemisphere allocation, the standard mode.
    ///
    /// Sector-based partitioning is used when a non-degenerate sector grid is
    /// supplied and every marked sector passes the viability probe; otherwise
    /// the pass falls back to the legacy fertility divider, one band per
    /// hemisphere. The more populated hemisphere hosts the homeland cohort.
    pub fn assign_start_positions(
        &mut self,
        num_players_west: u32,
        num_players_east: u32,
        west: &Boundary,
        east: &Boundary,
        rows: u32,
        cols: u32,
        sectors: &SectorMask,
    ) -> BTreeMap<PlayerId, PlotIndex> {
        let max_majors = self.placeable_majors((num_players_west + num_players_east) as usize);
        self.reset_run(max_majors);

        let east_bias = num_players_east > num_players_west;
        let num_humans = self.count_humans(max_majors);
        let (quota, humans_first) =
            self.homeland_quota(num_players_west, num_players_east, east_bias, num_humans);

        // The quota, not the region count, decides where the cohorts split;
        // a surplus region simply stays unclaimed.
        let num_homelands = (quota as usize).min(max_majors);

        let use_sectors = rows > 0
            && cols > 0
            && !sectors.is_empty()
            && self.check_start_sectors_viable(sectors, rows, cols, west, east);

        let (homeland_regions, distant_regions) = if use_sectors {
            self.sector_regions(sectors, rows, cols, west, east, east_bias)
        } else {
            info!("start sectors unavailable, partitioning by fertility");
            let num_distant = (max_majors - num_homelands) as u32;
            let (homeland_band, homeland_tag, distant_band, distant_tag) = if east_bias {
                (east, PlotTags::LANDMASS_EAST, west, PlotTags::LANDMASS_WEST)
            } else {
                (west, PlotTags::LANDMASS_WEST, east, PlotTags::LANDMASS_EAST)
            };
            let homeland = self.legacy_regions(
                num_homelands as u32,
                homeland_band.west,
                homeland_band.east,
                homeland_tag,
            );
            let distant = self.legacy_regions(
                num_distant,
                distant_band.west,
                distant_band.east,
                distant_tag,
            );
            (homeland, distant)
        };

        let (homeland, distant) = self.group_players(max_majors, num_homelands, humans_first);

        let assignment = self.assign_regions_by_bias(&homeland, &homeland_regions);
        self.place_cohort(&assignment, &homeland_regions, 0);
        let assignment = self.assign_regions_by_bias(&distant, &distant_regions);
        self.place_cohort(&assignment, &distant_regions, homeland.len());

        self.collect_result()
    }

    /// Allocation over pre-assigned tile ownership, one tile list per
    /// hemisphere. Each player's start is picked from their own tiles on
    /// their cohort's hemisphere, so no region partitioning or bias matching
    /// happens; cohort grouping decides the hemisphere and placement order.
    pub fn assign_start_positions_from_tiles(
        &mut self,
        num_players_west: u32,
        num_players_east: u32,
        west_tiles: &[OwnedTile],
        east_tiles: &[OwnedTile],
    ) -> BTreeMap<PlayerId, PlotIndex> {
        let max_majors = self.placeable_majors((num_players_west + num_players_east) as usize);
        self.reset_run(max_majors);

        // Equal player counts fall back to comparing hemisphere tile tallies.
        let east_bias = num_players_east > num_players_west
            || (num_players_east == num_players_west && east_tiles.len() > west_tiles.len());

        let num_humans = self.count_humans(max_majors);
        let (quota, humans_first) =
            self.homeland_quota(num_players_west, num_players_east, east_bias, num_humans);
        let num_homelands = (quota as usize).min(max_majors);
        let (homeland, distant) = self.group_players(max_majors, num_homelands, humans_first);

        let (homeland_tiles, distant_tiles) = if east_bias {
            (east_tiles, west_tiles)
        } else {
            (west_tiles, east_tiles)
        };
        self.place_cohort_from_tiles(&homeland, homeland_tiles);
        self.place_cohort_from_tiles(&distant, distant_tiles);

        self.collect_result()
    }

    /// Places one cohort onto its hemisphere's tile list. The spacing index
    /// restarts per cohort, so each hemisphere's first placement is
    /// unconstrained.
    fn place_cohort_from_tiles(&mut self, cohort: &[MajorIndex], tiles: &[OwnedTile]) {
        for (position, &major) in cohort.iter().enumerate() {
            let player = self.players.alive_major_ids()[major.0];
            let candidates = tiles.iter().filter(|tile| tile.player == player).count();
            debug!("player {} owns {candidates} candidate tiles", player.0);
            match self.pick_start_plot_from_tiles(tiles, position, player, false) {
                Some(plot) => self.accept_start(major, player, plot),
                None => warn!("no usable start among the tiles owned by player {}", player.0),
            }
        }
    }

    /// Single-landmass allocation. Everyone is one cohort; a player whose
    /// assigned region yields no plot retries across every region before
    /// being left unplaced.
    pub fn assign_single_continent_start_positions(
        &mut self,
        num_players: u32,
        landmass: &Boundary,
        rows: u32,
        cols: u32,
        sectors: &SectorMask,
        tag_filter: PlotTags,
    ) -> BTreeMap<PlayerId, PlotIndex> {
        let max_majors = self.placeable_majors(num_players as usize);
        self.reset_run(max_majors);

        let use_sectors = rows > 0
            && cols > 0
            && !sectors.is_empty()
            && self.check_start_sectors_viable(sectors, rows, cols, landmass, landmass);

        let regions = if use_sectors {
            let mut regions = RegionList::new();
            for sector in sectors.marked() {
                regions.push(
                    self.map
                        .sector_boundary(sector, rows, cols, landmass, landmass),
                );
            }
            regions
        } else {
            info!("start sectors unavailable, partitioning by fertility");
            let mut regions: RegionList = self
                .legacy_regions(max_majors as u32, landmass.west, landmass.east, tag_filter)
                .into_iter()
                .filter(|region| region.overlaps_columns(landmass.west, landmass.east))
                .collect();
            regions.sort_by_key(|region| std::cmp::Reverse(region.area()));
            regions.truncate(max_majors);
            if regions.len() < max_majors {
                warn!(
                    "only {} start regions for {max_majors} players",
                    regions.len()
                );
            }
            regions
        };

        let mut cohort: Vec<MajorIndex> = (0..max_majors).map(MajorIndex).collect();
        self.rng.shuffle(&mut cohort);

        let assignment = self.assign_regions_by_bias(&cohort, &regions);
        for (position, slot) in assignment.iter().enumerate() {
            let Some(major) = *slot else { continue };
            let player = self.players.alive_major_ids()[major.0];
            let plot = self
                .pick_start_plot(&regions[position], position, player, false)
                .or_else(|| {
                    regions
                        .iter()
                        .find_map(|region| self.pick_start_plot(region, position, player, false))
                });
            match plot {
                Some(plot) => self.accept_start(major, player, plot),
                None => warn!("no usable start plot anywhere for player {}", player.0),
            }
        }

        self.collect_result()
    }

    /// Places one cohort into its bias-assigned regions. `slots_before` is
    /// how many placements precede this cohort in the run, which feeds the
    /// spacing gate.
    fn place_cohort(
        &mut self,
        assignment: &[Option<MajorIndex>],
        regions: &[Boundary],
        slots_before: usize,
    ) {
        for (index, slot) in assignment.iter().enumerate() {
            let Some(major) = *slot else { continue };
            let player = self.players.alive_major_ids()[major.0];
            match self.pick_start_plot(&regions[index], slots_before + index, player, false) {
                Some(plot) => self.accept_start(major, player, plot),
                None => warn!(
                    "region {index} yielded no start plot for player {}",
                    player.0
                ),
            }
        }
    }

    fn accept_start(&mut self, major: MajorIndex, player: PlayerId, plot: PlotIndex) {
        let (x, y) = plot.to_xy(self.map.grid_width());
        info!("player {} starts at ({x}, {y})", player.0);
        self.chosen.set(major, plot);
        self.registry.register_start(plot, player);
    }

    fn collect_result(&self) -> BTreeMap<PlayerId, PlotIndex> {
        self.chosen.to_player_map(self.players)
    }
}
