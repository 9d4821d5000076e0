//! Face-visibility culling over a single chunk.
//!
//! A cell is visible when at least one of its six face-adjacent neighbors
//! is transparent per the attribute registry. The default pass resolves
//! neighbors strictly within the chunk, falling back to a shared air
//! sentinel at the boundary so culling never triggers a cross-chunk load;
//! the seam-aware pass accepts already-loaded adjacent chunks and wraps
//! boundary coordinates into them instead.

use crate::cell::Cell;
use crate::chunk::{CHUNK_SIZE, CHUNK_VOLUME, Chunk, cell_offset, in_bounds};
use crate::registry::ObjectTypeRegistry;

/// Out-of-chunk neighbor stand-in: air, transparent, counts as exposed.
static SENTINEL_CELL: Cell = Cell {
    type_id: 0,
    light: 0,
    meta: 0,
    add: 0,
    visible: true,
};

/// Face-adjacent neighbor offsets in visibility check order:
/// +y, −y, −x, +x, −z, +z. The first transparent neighbor wins.
const FACE_NEIGHBORS: [(i32, i32, i32); 6] = [
    (0, 1, 0),
    (0, -1, 0),
    (-1, 0, 0),
    (1, 0, 0),
    (0, 0, -1),
    (0, 0, 1),
];

/// Already-loaded chunks adjacent to the one being culled. Any face left
/// `None` falls back to the air sentinel.
#[derive(Default, Clone, Copy)]
pub struct ChunkNeighbors<'a> {
    /// +y neighbor.
    pub above: Option<&'a Chunk>,
    /// −y neighbor.
    pub below: Option<&'a Chunk>,
    /// −x neighbor.
    pub left: Option<&'a Chunk>,
    /// +x neighbor.
    pub right: Option<&'a Chunk>,
    /// −z neighbor.
    pub front: Option<&'a Chunk>,
    /// +z neighbor.
    pub back: Option<&'a Chunk>,
}

impl<'a> ChunkNeighbors<'a> {
    /// Neighbor options in [`FACE_NEIGHBORS`] order.
    fn by_face(&self) -> [Option<&'a Chunk>; 6] {
        [
            self.above, self.below, self.left, self.right, self.front, self.back,
        ]
    }
}

/// Resolves the cell at a (possibly out-of-range) local coordinate.
///
/// In-range coordinates resolve within `chunk`. Out-of-range coordinates
/// wrap into `neighbor` when one is supplied; otherwise the shared air
/// sentinel is returned.
pub fn neighbor_cell<'a>(
    chunk: &'a Chunk,
    x: i32,
    y: i32,
    z: i32,
    neighbor: Option<&'a Chunk>,
) -> &'a Cell {
    if in_bounds(x, y, z) {
        return chunk.cell_fold(x, y, z);
    }
    match neighbor {
        Some(adjacent) => {
            let wrap = |c: i32| {
                if c < 0 {
                    c + CHUNK_SIZE
                } else if c >= CHUNK_SIZE {
                    c - CHUNK_SIZE
                } else {
                    c
                }
            };
            adjacent.cell_fold(wrap(x), wrap(y), wrap(z))
        }
        None => &SENTINEL_CELL,
    }
}

/// Computes per-cell visibility flags without touching the chunk.
pub(crate) fn visibility_flags(
    chunk: &Chunk,
    registry: &ObjectTypeRegistry,
    neighbors: &ChunkNeighbors<'_>,
) -> [bool; CHUNK_VOLUME] {
    let by_face = neighbors.by_face();
    let mut visible = [false; CHUNK_VOLUME];

    for z in 0..CHUNK_SIZE {
        for y in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                if chunk.cell_fold(x, y, z).is_air() {
                    continue;
                }
                for (&(dx, dy, dz), &adjacent) in FACE_NEIGHBORS.iter().zip(&by_face) {
                    let n = neighbor_cell(chunk, x + dx, y + dy, z + dz, adjacent);
                    if registry.is_transparent(n.type_id) {
                        visible[cell_offset(x, y, z)] = true;
                        break;
                    }
                }
            }
        }
    }
    visible
}

/// Recomputes the `visible` flag for every cell using chunk-local
/// neighbors only; out-of-chunk faces count as exposed (air sentinel).
pub fn compute_visibility(chunk: &mut Chunk, registry: &ObjectTypeRegistry) {
    compute_visibility_with_neighbors(chunk, registry, &ChunkNeighbors::default());
}

/// Recomputes the `visible` flag for every cell, wrapping boundary lookups
/// into the supplied adjacent chunks where present.
pub fn compute_visibility_with_neighbors(
    chunk: &mut Chunk,
    registry: &ObjectTypeRegistry,
    neighbors: &ChunkNeighbors<'_>,
) {
    let visible = visibility_flags(chunk, registry, neighbors);
    for (cell, flag) in chunk.cells_mut().iter_mut().zip(visible) {
        cell.visible = flag;
    }
}

/// Number of cells currently flagged visible.
pub fn visible_count(chunk: &Chunk) -> usize {
    chunk.cells().iter().filter(|c| c.visible).count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
