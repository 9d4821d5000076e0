//! Server-side voxel world model: sparse chunk index, compact wire codec,
//! face-visibility culling, and the per-type attribute registry.

pub mod cell;
pub mod chunk;
pub mod codec;
pub mod error;
pub mod events;
pub mod index;
pub mod registry;
pub mod visibility;
pub mod world;

pub use cell::{CELL_WIRE_BYTES, Cell, MAX_LIGHT_LEVEL};
pub use chunk::{CHUNK_SIZE, CHUNK_VOLUME, Chunk, cell_offset};
pub use codec::{CHUNK_WIRE_BYTES, WireError};
pub use error::WorldError;
pub use events::{ActiveCellChangedHook, ChunkChangedHook, WorldHooks};
pub use index::{ChunkIndex, chunk_coord_at};
pub use registry::{
    MAX_MODEL_DIM, MAX_MODEL_SIZE, MAX_OBJECT_TYPES, ObjectAttr, ObjectTypeRegistry,
};
pub use visibility::{
    ChunkNeighbors, compute_visibility, compute_visibility_with_neighbors, neighbor_cell,
    visible_count,
};
pub use world::World;
