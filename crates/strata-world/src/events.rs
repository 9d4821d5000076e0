//! Host notification hooks.
//!
//! The world calls out synchronously through at most one registered hook
//! per kind; re-registration overwrites, and clearing to `None`
//! unregisters. Hooks must not mutate the world they were invoked from.

/// Invoked after a chunk's content changes (e.g. after decoding wire data),
/// with the chunk-space coordinate.
pub type ChunkChangedHook = Box<dyn FnMut(i32, i32, i32)>;

/// Invoked when a cell of an `active` object type changes state, with the
/// world-space cell coordinate, the new type id, and an optional extra
/// value supplied by the caller that made the change.
pub type ActiveCellChangedHook = Box<dyn FnMut(i32, i32, i32, u16, Option<u32>)>;

/// Registered host hooks. One slot per kind.
#[derive(Default)]
pub struct WorldHooks {
    chunk_changed: Option<ChunkChangedHook>,
    active_cell_changed: Option<ActiveCellChangedHook>,
}

impl WorldHooks {
    /// Registers, replaces, or (with `None`) clears the chunk-changed hook.
    pub fn set_chunk_changed(&mut self, hook: Option<ChunkChangedHook>) {
        self.chunk_changed = hook;
    }

    /// Registers, replaces, or (with `None`) clears the active-cell hook.
    pub fn set_active_cell_changed(&mut self, hook: Option<ActiveCellChangedHook>) {
        self.active_cell_changed = hook;
    }

    pub(crate) fn emit_chunk_changed(&mut self, x: i32, y: i32, z: i32) {
        if let Some(hook) = self.chunk_changed.as_mut() {
            hook(x, y, z);
        }
    }

    pub(crate) fn emit_active_cell_changed(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        type_id: u16,
        extra: Option<u32>,
    ) {
        if let Some(hook) = self.active_cell_changed.as_mut() {
            hook(x, y, z, type_id, extra);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_unregistered_hooks_are_silent() {
        let mut hooks = WorldHooks::default();
        hooks.emit_chunk_changed(0, 0, 0);
        hooks.emit_active_cell_changed(0, 0, 0, 1, None);
    }

    #[test]
    fn test_reregistration_overwrites() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = WorldHooks::default();

        let first = Rc::clone(&seen);
        hooks.set_chunk_changed(Some(Box::new(move |x, _, _| {
            first.borrow_mut().push(("first", x));
        })));
        let second = Rc::clone(&seen);
        hooks.set_chunk_changed(Some(Box::new(move |x, _, _| {
            second.borrow_mut().push(("second", x));
        })));

        hooks.emit_chunk_changed(7, 0, 0);
        assert_eq!(*seen.borrow(), vec![("second", 7)]);
    }

    #[test]
    fn test_clearing_unregisters() {
        let seen = Rc::new(RefCell::new(0u32));
        let mut hooks = WorldHooks::default();
        let counter = Rc::clone(&seen);
        hooks.set_active_cell_changed(Some(Box::new(move |_, _, _, _, _| {
            *counter.borrow_mut() += 1;
        })));

        hooks.emit_active_cell_changed(1, 2, 3, 4, Some(5));
        hooks.set_active_cell_changed(None);
        hooks.emit_active_cell_changed(1, 2, 3, 4, Some(5));
        assert_eq!(*seen.borrow(), 1);
    }
}
