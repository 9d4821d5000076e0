//! World error types.

/// Errors surfaced by the world model's range-checked paths.
///
/// Absence (a chunk or level that was never allocated) is *not* an error;
/// lookups return `Option` for that case.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// An object type id outside the fixed id space.
    #[error("object type id {0} outside the valid id space (0..4096)")]
    TypeIdOutOfRange(u16),

    /// A sub-voxel model dimension larger than the fixed maximum.
    #[error("model dimension {0} exceeds the maximum of 4")]
    ModelDimOutOfRange(u8),

    /// Type id 0 is reserved for air and must stay transparent and non-blocking.
    #[error("object type 0 is reserved for air and cannot be made opaque or blocking")]
    ReservedAirType,

    /// A chunk-local coordinate outside `[0, CHUNK_SIZE)`.
    #[error("chunk-local coordinate ({0}, {1}, {2}) outside [0, 12)")]
    CoordOutOfRange(i32, i32, i32),
}
