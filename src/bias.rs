//! Start-bias data: declared civilization/leader affinities.
//!
//! A [`BiasTable`] is a database-like bundle of eight row sets, one per bias
//! channel. Every row carries an optional civilization key, an optional
//! leader key, a channel-specific target and a score. A row applies to a
//! player when either key matches; [`for_each_matching_row`] is the one rule
//! evaluator shared by region-level and tile-level scoring, so the eight
//! channels cannot drift apart in how they match.

use enum_map::Enum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    player::{CivilizationType, LeaderType},
    spatial::{BiomeType, FeatureClassType, ResourceType, TerrainType},
};

/// One declared affinity: "this civilization (or this leader) likes `target`
/// this much".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BiasRow<T> {
    #[serde(default)]
    pub civilization: Option<CivilizationType>,
    #[serde(default)]
    pub leader: Option<LeaderType>,
    pub target: T,
    pub score: i32,
}

/// A bias row whose channel has no per-row target (rivers, coasts, lakes,
/// natural wonders). Serialized with `"target": null`.
pub type ScalarBiasRow = BiasRow<()>;

/// The eight per-tile bias channels.
#[derive(Enum, Clone, Copy, PartialEq, Eq, Debug)]
pub enum BiasChannel {
    Biome,
    Terrain,
    River,
    Coast,
    FeatureClass,
    Resource,
    Lake,
    NaturalWonder,
}

/// All declared start biases, grouped by channel.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BiasTable {
    pub biomes: Vec<BiasRow<BiomeType>>,
    pub terrains: Vec<BiasRow<TerrainType>>,
    pub rivers: Vec<ScalarBiasRow>,
    pub coasts: Vec<ScalarBiasRow>,
    pub feature_classes: Vec<BiasRow<FeatureClassType>>,
    pub resources: Vec<BiasRow<ResourceType>>,
    pub lakes: Vec<ScalarBiasRow>,
    pub natural_wonders: Vec<ScalarBiasRow>,
    /// Terrain id the host ruleset uses for navigable river channels.
    /// Terrain rows with this target feed the region-level river channel.
    pub navigable_river_terrain: TerrainType,
}

impl BiasTable {
    pub fn from_json(text: &str) -> Result<Self, BiasTableError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Debug, Error)]
pub enum BiasTableError {
    #[error("failed to parse start bias table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Runs `apply` for every row whose civilization key or leader key matches
/// the player. Rows with neither key never apply.
pub fn for_each_matching_row<'a, T>(
    rows: &'a [BiasRow<T>],
    civilization: CivilizationType,
    leader: LeaderType,
    mut apply: impl FnMut(&'a T, i32),
) {
    for row in rows {
        if row.civilization == Some(civilization) || row.leader == Some(leader) {
            apply(&row.target, row.score);
        }
    }
}
