//! Matching cohort players to candidate regions by declared start biases.
//!
//! Region-level matching only understands the coarse channels a rectangle can
//! express: biome composition, navigable river presence and natural wonders.
//! The finer channels wait for tile-level scoring.

use std::{cmp::Reverse, collections::HashMap};

use log::{debug, warn};

use crate::{
    bias::for_each_matching_row,
    player::MajorIndex,
    spatial::{BiomeType, Boundary},
};

use super::StartAllocator;

/// One player's region-level bias weights.
struct RegionBias {
    biomes: HashMap<BiomeType, i64>,
    navigable_river: i64,
    natural_wonder: i64,
    /// Sum of every weight. Players with a higher grand total pick regions
    /// earlier, so strong preferences are satisfied before indifferent
    /// players soak up the good rectangles.
    grand_total: i64,
}

/// Tile tallies of one candidate region.
struct RegionStats {
    biome_tiles: HashMap<BiomeType, i64>,
    navigable_river_tiles: i64,
    natural_wonder_tiles: i64,
}

/// How well a region suits a player: each weight times the matching tally.
fn region_fitness(bias: &RegionBias, stats: &RegionStats) -> i64 {
    let biome_score: i64 = bias
        .biomes
        .iter()
        .map(|(biome, weight)| weight * stats.biome_tiles.get(biome).copied().unwrap_or(0))
        .sum();
    biome_score
        + bias.navigable_river * stats.navigable_river_tiles
        + bias.natural_wonder * stats.natural_wonder_tiles
}

impl StartAllocator<'_> {
    fn region_bias_for(&self, major: MajorIndex) -> RegionBias {
        let player = self.players.alive_major_ids()[major.0];
        let civilization = self.players.civilization(player);
        let leader = self.players.leader(player);

        let mut biomes: HashMap<BiomeType, i64> = HashMap::new();
        for_each_matching_row(&self.bias_table.biomes, civilization, leader, |&biome, score| {
            *biomes.entry(biome).or_default() += score as i64;
        });

        // Navigable rivers are declared as terrain rows targeting the
        // ruleset's navigable river terrain.
        let mut navigable_river = 0i64;
        for_each_matching_row(
            &self.bias_table.terrains,
            civilization,
            leader,
            |&terrain, score| {
                if terrain == self.bias_table.navigable_river_terrain {
                    navigable_river += score as i64;
                }
            },
        );

        let mut natural_wonder = 0i64;
        for_each_matching_row(
            &self.bias_table.natural_wonders,
            civilization,
            leader,
            |_, score| {
                natural_wonder += score as i64;
            },
        );

        let grand_total =
            biomes.values().sum::<i64>() + navigable_river + natural_wonder;
        RegionBias {
            biomes,
            navigable_river,
            natural_wonder,
            grand_total,
        }
    }

    fn region_stats(&self, region: &Boundary) -> RegionStats {
        let mut stats = RegionStats {
            biome_tiles: HashMap::new(),
            navigable_river_tiles: 0,
            natural_wonder_tiles: 0,
        };
        for (x, y) in region.tiles() {
            *stats.biome_tiles.entry(self.map.biome(x, y)).or_default() += 1;
            if self.map.is_navigable_river(x, y) {
                stats.navigable_river_tiles += 1;
            }
            if self.map.is_natural_wonder(x, y) {
                stats.natural_wonder_tiles += 1;
            }
        }
        stats
    }

    /// Greedily assigns each cohort player a region, strongest grand-total
    /// bias first. Returns one slot per region, `None` where no player
    /// claimed it.
    ///
    /// The greedy pass is intentionally not an optimal matching: each player
    /// takes the best remaining region for them alone, ties going to the
    /// earliest region in list order.
    pub(crate) fn assign_regions_by_bias(
        &self,
        cohort: &[MajorIndex],
        regions: &[Boundary],
    ) -> Vec<Option<MajorIndex>> {
        let stats: Vec<RegionStats> = regions.iter().map(|region| self.region_stats(region)).collect();

        let mut order: Vec<(MajorIndex, RegionBias)> = cohort
            .iter()
            .map(|&major| (major, self.region_bias_for(major)))
            .collect();
        // Stable: equal grand totals keep their shuffled cohort order.
        order.sort_by_key(|(_, bias)| Reverse(bias.grand_total));

        let mut assignment: Vec<Option<MajorIndex>> = vec![None; regions.len()];
        for (major, bias) in &order {
            let mut best_score = -1i64;
            let mut best_region = None;
            for (index, region_stats) in stats.iter().enumerate() {
                if assignment[index].is_some() {
                    continue;
                }
                let score = region_fitness(bias, region_stats);
                if score > best_score {
                    best_score = score;
                    best_region = Some(index);
                }
            }
            match best_region {
                Some(index) => {
                    debug!(
                        "player slot {} takes region {index} with bias score {best_score}",
                        major.0
                    );
                    assignment[index] = Some(*major);
                }
                None => warn!("no region left for player slot {}", major.0),
            }
        }
        assignment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bias::{BiasRow, BiasTable},
        parameters::AllocatorParameters,
        player::{CivilizationType, LeaderType},
        spatial::ContinentId,
        start_allocator::StartAllocator,
        test_support::{FixtureDivider, FixtureMap, FixturePlayers, RecordingRegistry},
    };

    fn region(west: i32, east: i32) -> Boundary {
        Boundary {
            west,
            east,
            south: 0,
            north: 7,
            continent: ContinentId::NONE,
        }
    }

    fn biome_row(civilization: u32, biome: u16, score: i32) -> BiasRow<BiomeType> {
        BiasRow {
            civilization: Some(CivilizationType(civilization)),
            leader: None,
            target: BiomeType(biome),
            score,
        }
    }

    #[test]
    fn strong_bias_claims_the_matching_region() {
        let mut map = FixtureMap::land(16, 8);
        // Left half biome 1, right half biome 2.
        for y in 0..8 {
            for x in 0..16 {
                map.set_biome(x, y, BiomeType(if x < 8 { 1 } else { 2 }));
            }
        }
        let mut divider = FixtureDivider::uniform(16, 8, 10);
        // FixturePlayers assigns civilization i to major i.
        let players = FixturePlayers::majors(2);
        let mut registry = RecordingRegistry::default();
        let table = BiasTable {
            biomes: vec![biome_row(1, 2, 30)],
            ..BiasTable::default()
        };
        let allocator = StartAllocator::new(
            &map,
            &mut divider,
            &players,
            &mut registry,
            &table,
            AllocatorParameters::new(0),
        );

        let regions = [region(0, 7), region(8, 15)];
        // Cohort order puts the indifferent player first; the biased player
        // still wins the biome-2 region because it picks earlier.
        let assignment =
            allocator.assign_regions_by_bias(&[MajorIndex(0), MajorIndex(1)], &regions);
        assert_eq!(assignment, vec![Some(MajorIndex(0)), Some(MajorIndex(1))]);
    }

    #[test]
    fn indifferent_players_fill_regions_in_list_order() {
        let map = FixtureMap::land(16, 8);
        let mut divider = FixtureDivider::uniform(16, 8, 10);
        let players = FixturePlayers::majors(2);
        let mut registry = RecordingRegistry::default();
        let table = BiasTable::default();
        let allocator = StartAllocator::new(
            &map,
            &mut divider,
            &players,
            &mut registry,
            &table,
            AllocatorParameters::new(0),
        );

        let regions = [region(0, 7), region(8, 15)];
        let assignment =
            allocator.assign_regions_by_bias(&[MajorIndex(1), MajorIndex(0)], &regions);
        // All fitness scores are zero, so cohort order decides.
        assert_eq!(assignment, vec![Some(MajorIndex(1)), Some(MajorIndex(0))]);
    }

    #[test]
    fn leader_keyed_rows_count_toward_the_grand_total() {
        let mut map = FixtureMap::land(16, 8);
        for y in 0..8 {
            for x in 8..16 {
                map.set_biome(x, y, BiomeType(5));
            }
        }
        let mut divider = FixtureDivider::uniform(16, 8, 10);
        // FixturePlayers assigns leader 100 + i to major i.
        let players = FixturePlayers::majors(3);
        let mut registry = RecordingRegistry::default();
        let table = BiasTable {
            biomes: vec![BiasRow {
                civilization: None,
                leader: Some(LeaderType(102)),
                target: BiomeType(5),
                score: 25,
            }],
            ..BiasTable::default()
        };
        let allocator = StartAllocator::new(
            &map,
            &mut divider,
            &players,
            &mut registry,
            &table,
            AllocatorParameters::new(0),
        );

        let regions = [region(0, 7), region(8, 15)];
        let assignment = allocator
            .assign_regions_by_bias(&[MajorIndex(0), MajorIndex(1), MajorIndex(2)], &regions);
        // Player 2's leader bias wins the biome-5 region; one player is left
        // without a region.
        assert_eq!(assignment[1], Some(MajorIndex(2)));
        assert_eq!(assignment[0], Some(MajorIndex(0)));
    }

    #[test]
    fn surplus_players_leave_the_assignment_partial() {
        let map = FixtureMap::land(16, 8);
        let mut divider = FixtureDivider::uniform(16, 8, 10);
        let players = FixturePlayers::majors(3);
        let mut registry = RecordingRegistry::default();
        let table = BiasTable::default();
        let allocator = StartAllocator::new(
            &map,
            &mut divider,
            &players,
            &mut registry,
            &table,
            AllocatorParameters::new(0),
        );

        let regions = [region(0, 15)];
        let assignment = allocator
            .assign_regions_by_bias(&[MajorIndex(0), MajorIndex(1), MajorIndex(2)], &regions);
        assert_eq!(assignment, vec![Some(MajorIndex(0))]);
    }
}
