//! The owned world context.
//!
//! [`World`] ties the sparse chunk index, the object attribute registry,
//! and the host hooks into one explicitly owned value, so multiple
//! independent worlds can coexist in a process. All mutation happens on
//! one control thread; nothing here locks or blocks.

use crate::cell::Cell;
use crate::chunk::{CHUNK_SIZE, Chunk};
use crate::codec::WireError;
use crate::error::WorldError;
use crate::events::{ActiveCellChangedHook, ChunkChangedHook, WorldHooks};
use crate::index::ChunkIndex;
use crate::registry::ObjectTypeRegistry;
use crate::visibility;

/// Splits a world-space cell coordinate into chunk and local parts.
#[inline]
fn split_coord(w: i32) -> (i32, i32) {
    (w.div_euclid(CHUNK_SIZE), w.rem_euclid(CHUNK_SIZE))
}

/// One world: chunk index, attribute registry, and host hooks.
#[derive(Default)]
pub struct World {
    index: ChunkIndex,
    registry: ObjectTypeRegistry,
    hooks: WorldHooks,
}

impl World {
    /// Creates an empty world with a default registry (air only).
    pub fn new() -> Self {
        Self::default()
    }

    /// The chunk index.
    pub fn index(&self) -> &ChunkIndex {
        &self.index
    }

    /// Mutable access to the chunk index.
    pub fn index_mut(&mut self) -> &mut ChunkIndex {
        &mut self.index
    }

    /// The object attribute registry.
    pub fn registry(&self) -> &ObjectTypeRegistry {
        &self.registry
    }

    /// Mutable registry access, for the setup/config phase.
    pub fn registry_mut(&mut self) -> &mut ObjectTypeRegistry {
        &mut self.registry
    }

    /// Registers, replaces, or clears the chunk-changed hook.
    pub fn set_chunk_changed_hook(&mut self, hook: Option<ChunkChangedHook>) {
        self.hooks.set_chunk_changed(hook);
    }

    /// Registers, replaces, or clears the active-cell hook.
    pub fn set_active_cell_changed_hook(&mut self, hook: Option<ActiveCellChangedHook>) {
        self.hooks.set_active_cell_changed(hook);
    }

    /// Decodes a wire buffer into the chunk at the given chunk-space
    /// coordinate, allocating it if needed, and notifies the host.
    ///
    /// # Errors
    ///
    /// [`WireError::Truncated`] if the buffer is short; no notification is
    /// emitted and an already-present chunk keeps its previous content.
    pub fn load_chunk_data(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        data: &[u8],
    ) -> Result<(), WireError> {
        self.index.get_or_allocate(x, y, z).decode_cells(data)?;
        self.hooks.emit_chunk_changed(x, y, z);
        Ok(())
    }

    /// Encodes the chunk at the given chunk-space coordinate, or `None` if
    /// it was never allocated.
    pub fn chunk_data(&self, x: i32, y: i32, z: i32) -> Option<Vec<u8>> {
        self.index.get(x, y, z).map(Chunk::encode_cells)
    }

    /// Reads the cell at a world-space coordinate. `None` when the owning
    /// chunk is not loaded.
    pub fn cell(&self, wx: i32, wy: i32, wz: i32) -> Option<&Cell> {
        let (cx, lx) = split_coord(wx);
        let (cy, ly) = split_coord(wy);
        let (cz, lz) = split_coord(wz);
        self.index.get(cx, cy, cz)?.cell(lx, ly, lz).ok()
    }

    /// Mutable access to the cell at a world-space coordinate; marks the
    /// owning chunk dirty. `None` when the chunk is not loaded.
    pub fn cell_mut(&mut self, wx: i32, wy: i32, wz: i32) -> Option<&mut Cell> {
        let (cx, lx) = split_coord(wx);
        let (cy, ly) = split_coord(wy);
        let (cz, lz) = split_coord(wz);
        let chunk = self.index.get_mut(cx, cy, cz)?;
        chunk.mark_dirty();
        chunk.cell_mut(lx, ly, lz).ok()
    }

    /// Writes a cell at a world-space coordinate, allocating the chunk if
    /// needed. Equivalent to [`set_cell_with_extra`](Self::set_cell_with_extra)
    /// with no extra value.
    pub fn set_cell(&mut self, wx: i32, wy: i32, wz: i32, cell: Cell) -> bool {
        self.set_cell_with_extra(wx, wy, wz, cell, None)
    }

    /// Writes a cell at a world-space coordinate, allocating the chunk if
    /// needed. Returns `true` if the stored cell actually changed.
    ///
    /// When the old or new type is `active` in the registry, the
    /// active-cell hook fires with the new type id and `extra`.
    pub fn set_cell_with_extra(
        &mut self,
        wx: i32,
        wy: i32,
        wz: i32,
        cell: Cell,
        extra: Option<u32>,
    ) -> bool {
        let (cx, lx) = split_coord(wx);
        let (cy, ly) = split_coord(wy);
        let (cz, lz) = split_coord(wz);
        let chunk = self.index.get_or_allocate(cx, cy, cz);

        let Ok(current) = chunk.cell(lx, ly, lz) else {
            return false;
        };
        if *current == cell {
            return false;
        }
        let Ok(old) = chunk.set_cell(lx, ly, lz, cell) else {
            return false;
        };

        if self.registry.is_active(old.type_id) || self.registry.is_active(cell.type_id) {
            self.hooks
                .emit_active_cell_changed(wx, wy, wz, cell.type_id, extra);
        }
        true
    }

    /// Recomputes face visibility for the chunk at the given chunk-space
    /// coordinate. Returns `false` when the chunk is not loaded.
    pub fn compute_chunk_visibility(&mut self, x: i32, y: i32, z: i32) -> bool {
        let Self {
            index, registry, ..
        } = self;
        match index.get_mut(x, y, z) {
            Some(chunk) => {
                visibility::compute_visibility(chunk, registry);
                true
            }
            None => false,
        }
    }

    /// Recomputes face visibility for the chunk at the given chunk-space
    /// coordinate, sampling already-loaded adjacent chunks across the
    /// seams. Faces with no loaded neighbor fall back to the air sentinel.
    /// Returns `false` when the chunk itself is not loaded.
    pub fn compute_chunk_visibility_with_neighbors(&mut self, x: i32, y: i32, z: i32) -> bool {
        let flags = {
            let Some(chunk) = self.index.get(x, y, z) else {
                return false;
            };
            let neighbors = visibility::ChunkNeighbors {
                above: self.index.get(x, y + 1, z),
                below: self.index.get(x, y - 1, z),
                left: self.index.get(x - 1, y, z),
                right: self.index.get(x + 1, y, z),
                front: self.index.get(x, y, z - 1),
                back: self.index.get(x, y, z + 1),
            };
            visibility::visibility_flags(chunk, &self.registry, &neighbors)
        };
        let Some(chunk) = self.index.get_mut(x, y, z) else {
            return false;
        };
        for (cell, flag) in chunk.cells_mut().iter_mut().zip(flags) {
            cell.visible = flag;
        }
        true
    }

    /// Convenience for the setup phase; see [`ObjectTypeRegistry::set_type`].
    pub fn set_object_type(
        &mut self,
        id: u16,
        transparent: bool,
        blocking: bool,
        has_texture: bool,
        active: bool,
        uv: [f64; 4],
    ) -> Result<(), WorldError> {
        self.registry
            .set_type(id, transparent, blocking, has_texture, active, uv)
    }

    /// Convenience for the setup phase; see [`ObjectTypeRegistry::set_model`].
    pub fn set_object_model(&mut self, id: u16, dim: u8, blocks: &[u32]) -> Result<(), WorldError> {
        self.registry.set_model(id, dim, blocks)
    }

    /// Logs every occupied chunk coordinate in ascending order.
    pub fn dump(&self) {
        self.index.dump();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
