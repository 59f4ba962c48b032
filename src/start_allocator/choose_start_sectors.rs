//! Start-sector configuration selection.
//!
//! A fixed combinatorial table maps per-hemisphere player counts to candidate
//! start-sector sets. Sector indices address a `rows x cols` grid per
//! hemisphere, row-major from the hemisphere's south-west cell; the mask
//! covers both hemispheres back to back, west first.

use log::warn;

use super::StartAllocator;

/// Which sectors of the two hemisphere grids are eligible start sectors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectorMask {
    flags: Vec<bool>,
}

impl SectorMask {
    pub fn from_flags(flags: Vec<bool>) -> Self {
        Self { flags }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn is_marked(&self, sector: usize) -> bool {
        self.flags.get(sector).copied().unwrap_or(false)
    }

    /// Indices of all marked sectors, ascending.
    pub fn marked(&self) -> impl Iterator<Item = usize> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(sector, &marked)| marked.then_some(sector))
    }
}

/// Candidate sector sets for one supported player-count pair. Within each
/// list, later sets sit closer to the equator by convention.
struct SectorConfigEntry {
    players_west: u32,
    players_east: u32,
    west: &'static [&'static [usize]],
    east: &'static [&'static [usize]],
}

const ONE_OF_SIX: &[&[usize]] = &[&[0], &[1], &[2], &[3], &[4], &[5]];
const TWO_OF_SIX: &[&[usize]] = &[&[0, 5], &[1, 4]];
const THREE_OF_SIX: &[&[usize]] = &[&[0, 3, 4], &[1, 2, 5]];
const TWO_OF_NINE: &[&[usize]] = &[&[0, 8], &[2, 6]];
const THREE_OF_NINE: &[&[usize]] = &[&[0, 2, 7], &[1, 6, 8]];
const THREE_MID_OF_NINE: &[&[usize]] = &[&[3, 5, 7], &[4, 6, 8]];
const FOUR_OF_NINE: &[&[usize]] = &[&[0, 2, 6, 8], &[1, 3, 5, 7]];
const FOUR_OF_TWELVE: &[&[usize]] = &[&[0, 2, 6, 8], &[3, 5, 9, 11]];
const FOUR_MID_OF_TWELVE: &[&[usize]] = &[&[1, 3, 5, 7], &[4, 6, 8, 10]];
const FIVE_OF_TWELVE: &[&[usize]] = &[&[0, 2, 6, 8, 10], &[1, 3, 5, 9, 11]];
const SIX_OF_TWELVE: &[&[usize]] = &[&[0, 2, 4, 6, 8, 10], &[1, 3, 5, 7, 9, 11]];
const FOUR_ALONE: &[&[usize]] = &[&[0, 2, 3, 5]];
const FIVE_ALONE: &[&[usize]] = &[&[0, 2, 3, 5, 6]];
const SIX_ALONE: &[&[usize]] = &[&[0, 2, 3, 5, 6, 8]];
const EIGHT_ALONE: &[&[usize]] = &[&[0, 2, 3, 5, 6, 8, 9, 11]];
const NONE: &[&[usize]] = &[&[]];

/// The supported `(west, east)` player-count pairs.
const SECTOR_CONFIG_TABLE: &[SectorConfigEntry] = &[
    entry(1, 3, ONE_OF_SIX, THREE_OF_SIX),
    entry(3, 1, THREE_OF_SIX, ONE_OF_SIX),
    entry(4, 0, FOUR_ALONE, NONE),
    entry(4, 2, FOUR_OF_NINE, TWO_OF_NINE),
    entry(2, 4, TWO_OF_NINE, FOUR_OF_NINE),
    entry(6, 0, SIX_ALONE, NONE),
    entry(5, 3, FIVE_OF_TWELVE, THREE_MID_OF_NINE),
    entry(3, 5, THREE_MID_OF_NINE, FIVE_OF_TWELVE),
    entry(6, 4, SIX_OF_TWELVE, FOUR_MID_OF_TWELVE),
    entry(4, 6, FOUR_MID_OF_TWELVE, SIX_OF_TWELVE),
    entry(2, 2, TWO_OF_SIX, TWO_OF_SIX),
    entry(3, 3, THREE_OF_NINE, THREE_OF_NINE),
    entry(4, 4, FOUR_OF_TWELVE, FOUR_OF_TWELVE),
    entry(5, 5, FIVE_OF_TWELVE, FIVE_OF_TWELVE),
    entry(6, 6, SIX_OF_TWELVE, SIX_OF_TWELVE),
    entry(8, 0, EIGHT_ALONE, NONE),
    entry(5, 0, FIVE_ALONE, NONE),
];

/// Used on a configuration mismatch: a generic one-per-sector west spread and
/// an even split east.
const FALLBACK_ENTRY: SectorConfigEntry = entry(0, 0, ONE_OF_SIX, &[&[0, 2, 4], &[1, 3, 5]]);

const fn entry(
    players_west: u32,
    players_east: u32,
    west: &'static [&'static [usize]],
    east: &'static [&'static [usize]],
) -> SectorConfigEntry {
    SectorConfigEntry {
        players_west,
        players_east,
        west,
        east,
    }
}

fn configs_for(players_west: u32, players_east: u32) -> Option<&'static SectorConfigEntry> {
    SECTOR_CONFIG_TABLE
        .iter()
        .find(|entry| entry.players_west == players_west && entry.players_east == players_east)
}

impl StartAllocator<'_> {
    /// Chooses which sectors of the `rows x cols` hemisphere grids are
    /// eligible start sectors.
    ///
    /// When humans outnumber the larger hemisphere's quota, the counts are
    /// first rebalanced to an even split so no human ends up without a
    /// homeland seat. With `prefer_equatorial` set, the last candidate set is
    /// taken deterministically (by convention the most equatorial one) and
    /// the RNG streams stay untouched; otherwise one uniform draw is made per
    /// hemisphere.
    pub fn choose_start_sectors(
        &mut self,
        num_players_west: u32,
        num_players_east: u32,
        rows: u32,
        cols: u32,
        prefer_equatorial: bool,
    ) -> SectorMask {
        let sectors_per_hemisphere = (rows * cols) as usize;
        let max_majors = num_players_west + num_players_east;

        let num_humans = self.count_humans(max_majors as usize);
        let (mut players_west, mut players_east) = (num_players_west, num_players_east);
        if num_humans > players_west.max(players_east) {
            players_west = max_majors / 2;
            players_east = max_majors - players_west;
        }

        let configs = configs_for(players_west, players_east).unwrap_or_else(|| {
            warn!(
                "no start sector configuration for {players_west} west / {players_east} east \
                 players, using the even-split fallback"
            );
            &FALLBACK_ENTRY
        });

        let mut flags = vec![false; sectors_per_hemisphere * 2];

        let west_config = if prefer_equatorial {
            configs.west.len() - 1
        } else {
            self.rng
                .index(configs.west.len() as u32, "West Continent Start Positions")
                as usize
        };
        for &sector in configs.west[west_config].iter().take(players_west as usize) {
            if sector < sectors_per_hemisphere {
                flags[sector] = true;
            }
        }

        let east_config = if prefer_equatorial {
            configs.east.len() - 1
        } else {
            self.rng
                .index(configs.east.len() as u32, "East Continent Start Positions")
                as usize
        };
        for &sector in configs.east[east_config].iter().take(players_east as usize) {
            if sector < sectors_per_hemisphere {
                flags[sectors_per_hemisphere + sector] = true;
            }
        }

        SectorMask::from_flags(flags)
    }
}
