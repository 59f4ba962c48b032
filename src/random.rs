//! Seeded, named-stream random number generation.
//!
//! Every randomized decision the allocator makes (sector-config draws, cohort
//! shuffles) goes through [`NamedRng`]. Each debug-stream name owns its own
//! [`StdRng`] derived from the master seed, so consuming numbers on one stream
//! never perturbs another and a fixed seed reproduces the whole allocation.

use std::collections::HashMap;

use rand::{Rng, SeedableRng, rngs::StdRng};

/// A master seed fanned out into independent, name-keyed random streams.
#[derive(Debug)]
pub struct NamedRng {
    seed: u64,
    streams: HashMap<String, StdRng>,
}

impl NamedRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            streams: HashMap::new(),
        }
    }

    /// Draws a uniform integer in `[0, bound)` from the given stream.
    ///
    /// Returns `0` when `bound` is `0`.
    pub fn index(&mut self, bound: u32, stream: &str) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.stream(stream).random_range(0..bound)
    }

    /// Fisher-Yates shuffle over the `"Array Shuffle"` stream.
    ///
    /// All cohort shuffles share this one stream, so the number of shuffled
    /// elements (not the call site) determines how many draws are consumed.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let mut remaining = items.len();
        while remaining > 0 {
            let chosen = self.index(remaining as u32, "Array Shuffle") as usize;
            remaining -= 1;
            items.swap(remaining, chosen);
        }
    }

    fn stream(&mut self, name: &str) -> &mut StdRng {
        let seed = self.seed;
        self.streams
            .entry(name.to_owned())
            .or_insert_with(|| StdRng::seed_from_u64(seed ^ fnv1a(name)))
    }
}

/// FNV-1a over the stream name. [`std::hash::DefaultHasher`] is not guaranteed
/// stable across releases, and stream derivation must never change for a seed.
fn fnv1a(text: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in text.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}
