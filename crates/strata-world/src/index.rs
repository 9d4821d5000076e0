//! Sparse three-level chunk index keyed y → x → z.
//!
//! Each level is an ordered map from a signed chunk coordinate to the next
//! level; the innermost level owns the [`Chunk`] instances. Chunks are
//! allocated lazily on first allocating lookup and destroyed only by an
//! explicit [`purge`](ChunkIndex::purge). Enumeration walks occupied
//! coordinates in ascending (y, x, z) order, which the debug dump relies on.

use std::collections::BTreeMap;

use crate::chunk::{CHUNK_SIZE, Chunk};

type ZLevel = BTreeMap<i32, Chunk>;
type XLevel = BTreeMap<i32, ZLevel>;

/// The sparse world index. Exclusively owns every chunk it holds.
#[derive(Default)]
pub struct ChunkIndex {
    y: BTreeMap<i32, XLevel>,
}

impl ChunkIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the chunk at the given chunk-space coordinate, allocating any
    /// missing intermediate level and the chunk itself.
    ///
    /// Idempotent: repeated calls at the same coordinate return the same
    /// chunk instance.
    pub fn get_or_allocate(&mut self, x: i32, y: i32, z: i32) -> &mut Chunk {
        self.y
            .entry(y)
            .or_default()
            .entry(x)
            .or_default()
            .entry(z)
            .or_insert_with(|| Chunk::new(x, y, z))
    }

    /// Non-allocating lookup. `None` when any level or the chunk is absent.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<&Chunk> {
        self.y.get(&y)?.get(&x)?.get(&z)
    }

    /// Mutable non-allocating lookup.
    pub fn get_mut(&mut self, x: i32, y: i32, z: i32) -> Option<&mut Chunk> {
        self.y.get_mut(&y)?.get_mut(&x)?.get_mut(&z)
    }

    /// Removes and destroys the chunk at the given coordinate.
    ///
    /// Returns `true` if a chunk was removed; a no-op returning `false`
    /// when any intermediate level or the chunk itself is absent.
    pub fn purge(&mut self, x: i32, y: i32, z: i32) -> bool {
        let Some(xl) = self.y.get_mut(&y) else {
            return false;
        };
        let Some(zl) = xl.get_mut(&x) else {
            return false;
        };
        zl.remove(&z).is_some()
    }

    /// Maps continuous world coordinates to chunk space (divide by
    /// `CHUNK_SIZE`, floor) and defers to the integer lookup.
    ///
    /// With `allocate` set, missing levels and the chunk are created;
    /// otherwise absent chunks yield `None`.
    pub fn chunk_at(&mut self, fx: f64, fy: f64, fz: f64, allocate: bool) -> Option<&mut Chunk> {
        let (x, y, z) = chunk_coord_at(fx, fy, fz);
        if allocate {
            Some(self.get_or_allocate(x, y, z))
        } else {
            self.get_mut(x, y, z)
        }
    }

    /// Number of chunks currently held.
    pub fn len(&self) -> usize {
        self.y
            .values()
            .flat_map(|xl| xl.values())
            .map(|zl| zl.len())
            .sum()
    }

    /// Returns `true` if no chunk is held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over every occupied coordinate and its chunk in ascending
    /// (y, x, z) order.
    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32, i32), &Chunk)> {
        self.y.iter().flat_map(|(&y, xl)| {
            xl.iter()
                .flat_map(move |(&x, zl)| zl.iter().map(move |(&z, chunk)| ((x, y, z), chunk)))
        })
    }

    /// Logs every occupied coordinate in ascending level order.
    pub fn dump(&self) {
        tracing::info!("world index: {} chunk(s)", self.len());
        for ((x, y, z), chunk) in self.iter() {
            tracing::info!(
                "  [{} {} {}] dirty={}",
                x,
                y,
                z,
                chunk.is_dirty()
            );
        }
    }
}

/// Floors continuous world coordinates into a chunk-space coordinate.
pub fn chunk_coord_at(fx: f64, fy: f64, fz: f64) -> (i32, i32, i32) {
    let size = CHUNK_SIZE as f64;
    (
        (fx / size).floor() as i32,
        (fy / size).floor() as i32,
        (fz / size).floor() as i32,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    #[test]
    fn test_get_or_allocate_is_idempotent() {
        let mut index = ChunkIndex::new();
        index
            .get_or_allocate(1, -2, 3)
            .set_cell(0, 0, 0, Cell { type_id: 5, ..Cell::default() })
            .expect("set");
        // Second allocating lookup returns the same chunk, data intact.
        let again = index.get_or_allocate(1, -2, 3);
        assert_eq!(again.cell(0, 0, 0).expect("get").type_id, 5);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_get_never_allocated_returns_none() {
        let index = ChunkIndex::new();
        assert!(index.get(0, 0, 0).is_none());
        assert!(index.is_empty());
    }

    #[test]
    fn test_purge_then_get_returns_none() {
        let mut index = ChunkIndex::new();
        index.get_or_allocate(4, 5, 6);
        assert!(index.purge(4, 5, 6));
        assert!(index.get(4, 5, 6).is_none());
        // Purging again is a no-op.
        assert!(!index.purge(4, 5, 6));
    }

    #[test]
    fn test_purge_missing_levels_is_noop() {
        let mut index = ChunkIndex::new();
        index.get_or_allocate(0, 0, 0);
        assert!(!index.purge(0, 9, 0)); // missing y level
        assert!(!index.purge(9, 0, 0)); // missing x level
        assert!(!index.purge(0, 0, 9)); // missing chunk
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_chunk_coord_mapping_floors_negatives() {
        assert_eq!(chunk_coord_at(0.0, 0.0, 0.0), (0, 0, 0));
        assert_eq!(chunk_coord_at(11.9, 12.0, 23.9), (0, 1, 1));
        assert_eq!(chunk_coord_at(-0.1, -12.0, -12.1), (-1, -1, -2));
    }

    #[test]
    fn test_chunk_at_respects_allocate_flag() {
        let mut index = ChunkIndex::new();
        assert!(index.chunk_at(30.0, 5.0, -1.0, false).is_none());
        let coord = index
            .chunk_at(30.0, 5.0, -1.0, true)
            .expect("allocated")
            .coord();
        assert_eq!(coord, (2, 0, -1));
        assert!(index.chunk_at(30.0, 5.0, -1.0, false).is_some());
    }

    #[test]
    fn test_iter_enumerates_in_ascending_order() {
        let mut index = ChunkIndex::new();
        for &(x, y, z) in &[(2, 1, 0), (-3, 1, 5), (0, -7, 2), (-3, 1, -5)] {
            index.get_or_allocate(x, y, z);
        }
        let coords: Vec<_> = index.iter().map(|(c, _)| c).collect();
        assert_eq!(
            coords,
            vec![(0, -7, 2), (-3, 1, -5), (-3, 1, 5), (2, 1, 0)]
        );
    }

    #[test]
    fn test_chunks_carry_their_coordinate() {
        let mut index = ChunkIndex::new();
        assert_eq!(index.get_or_allocate(-1, 2, -3).coord(), (-1, 2, -3));
    }
}
