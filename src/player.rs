//! Player identifiers and the player-registry port.
//!
//! The allocator juggles two kinds of player identifiers and they are easy to
//! mix up, so each gets its own type:
//! - [`PlayerId`] is the absolute id the host game knows a player by.
//! - [`MajorIndex`] is a position in the ordered alive-majors list; cohorts
//!   and start-slot accounting are built on it.
//!
//! Conversion always goes through [`PlayerRegistry::alive_major_ids`].

use serde::{Deserialize, Serialize};

/// Absolute player id, as assigned by the host game.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct PlayerId(pub i32);

/// Index into the ordered alive-majors list.
///
/// Not interchangeable with [`PlayerId`]: resolving one to the other requires
/// the alive-majors ordering.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct MajorIndex(pub usize);

/// Identifies a civilization kind in the host ruleset.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct CivilizationType(pub u32);

/// Identifies a leader kind in the host ruleset.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct LeaderType(pub u32);

/// Read-only view of the competing players.
///
/// The alive-majors ordering must be stable for the whole allocation pass;
/// determinism of the result depends on it.
pub trait PlayerRegistry {
    /// Ordered list of alive major players.
    fn alive_major_ids(&self) -> &[PlayerId];

    fn is_human(&self, player: PlayerId) -> bool;

    fn civilization(&self, player: PlayerId) -> CivilizationType;

    fn leader(&self, player: PlayerId) -> LeaderType;
}
