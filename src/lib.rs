pub mod bias;
pub mod parameters;
pub mod player;
pub mod random;
pub mod region_divider;
pub mod spatial;
pub mod start_allocator;

#[cfg(test)]
pub(crate) mod test_support;

pub use bias::{BiasChannel, BiasRow, BiasTable, BiasTableError, ScalarBiasRow};
pub use parameters::AllocatorParameters;
pub use player::{CivilizationType, LeaderType, MajorIndex, PlayerId, PlayerRegistry};
pub use random::NamedRng;
pub use region_divider::{PlotTags, RegionDivider};
pub use spatial::{Boundary, ContinentId, OwnedTile, PlotIndex, SpatialQuery};
pub use start_allocator::{ChosenStarts, SectorMask, StartAllocator, StartRegistry};
