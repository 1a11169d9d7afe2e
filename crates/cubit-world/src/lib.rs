//! Voxel world: block grid, column heightmap, chunk invalidation and queries.
#![forbid(unsafe_code)]

pub mod chunk_coord;
pub mod dirty;
pub mod edit;
pub mod fill;
pub mod grid;
pub mod heightmap;
pub mod shade;
pub mod world;

pub use chunk_coord::{CHUNK_SIZE, ChunkCoord, affected_chunks};
pub use cubit_raycast::BlockHit;
pub use dirty::{ChunkListener, DirtySet};
pub use fill::{FlatSlab, STONE};
pub use grid::{AIR, BlockId, GridError, VoxelGrid, WorldDims};
pub use heightmap::{FULL_BRIGHT, HeightMap, SHADOWED};
pub use world::World;
