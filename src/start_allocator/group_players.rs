//! Cohort formation: splitting the alive majors into homeland and distant
//! groups.

use log::debug;

use crate::player::MajorIndex;

use super::StartAllocator;

impl StartAllocator<'_> {
    /// Humans among the first `max_majors` alive majors.
    pub(crate) fn count_humans(&self, max_majors: usize) -> u32 {
        let alive = self.players.alive_major_ids();
        (0..max_majors.min(alive.len()))
            .filter(|&index| self.players.is_human(alive[index]))
            .count() as u32
    }

    /// Homeland quota for this run.
    ///
    /// Returns `(quota, humans_first)`. The humans-prefer-primary policy is
    /// overridden when the preferred hemisphere cannot seat every human, in
    /// which case players split evenly (quota = floor of half the total).
    pub(crate) fn homeland_quota(
        &self,
        num_west: u32,
        num_east: u32,
        east_bias: bool,
        num_humans: u32,
    ) -> (u32, bool) {
        let preferred = if east_bias { num_east } else { num_west };
        let humans_first = self.parameters.humans_primary_hemisphere && preferred >= num_humans;
        let quota = if humans_first {
            preferred
        } else {
            (num_west + num_east) / 2
        };
        (quota, humans_first)
    }

    /// Splits the first `num_majors` alive majors into homeland and distant
    /// cohorts. Callers pass a count already capped to the alive-majors list.
    ///
    /// With `humans_first`, humans land in the homeland cohort ahead of any
    /// AI, AI players fill homeland up to the quota, and each cohort is
    /// shuffled independently (so human/AI segregation survives the shuffle).
    /// Otherwise everyone goes into one pool, shuffled once and split at the
    /// quota.
    pub(crate) fn group_players(
        &mut self,
        num_majors: usize,
        num_homelands: usize,
        humans_first: bool,
    ) -> (Vec<MajorIndex>, Vec<MajorIndex>) {
        let mut homeland = Vec::new();
        let mut distant = Vec::new();

        if humans_first {
            let alive = self.players.alive_major_ids();
            for index in 0..num_majors {
                if self.players.is_human(alive[index]) {
                    homeland.push(MajorIndex(index));
                }
            }
            for index in 0..num_majors {
                if !self.players.is_human(alive[index]) {
                    if homeland.len() < num_homelands {
                        homeland.push(MajorIndex(index));
                    } else {
                        distant.push(MajorIndex(index));
                    }
                }
            }
            self.rng.shuffle(&mut homeland);
            self.rng.shuffle(&mut distant);
        } else {
            let mut pool: Vec<MajorIndex> = (0..num_majors).map(MajorIndex).collect();
            self.rng.shuffle(&mut pool);
            for index in pool {
                if homeland.len() < num_homelands {
                    homeland.push(index);
                } else {
                    distant.push(index);
                }
            }
        }

        debug!(
            "grouped players: {} homeland, {} distant",
            homeland.len(),
            distant.len()
        );
        (homeland, distant)
    }
}
