//! Two-queue breadth-first light diffusion over a [`World`].
//!
//! The engine keeps two alternating bounded queues. A raise pass seeds the
//! active queue with changed cells and drains it one breadth level at a
//! time: the active queue is frozen, the visible prefix is processed, and
//! neighbor updates land behind the boundary for the next level. A removal
//! pass drains darkness from queue A while collecting the still-lit
//! frontier into queue B, then re-propagates from there.

use strata_world::{MAX_LIGHT_LEVEL, World};

use crate::queue::{LightError, LightItem, LightQueue};

/// Default maximum light radius in cells.
pub const DEFAULT_MAX_LIGHT_RADIUS: u32 = 12;

/// The six face-adjacent neighbor offsets, in enqueue order.
const NEIGHBORS_6: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Number of chunk volumes a single propagation pass may touch: the
/// radius expanded to a full 6-connected flood-fill envelope.
pub fn max_radius_chunk_volumes(max_radius: u32) -> usize {
    let span = 2 * (max_radius as usize + 1);
    6 * span * span * span
}

/// Per-queue item capacity for the given maximum light radius.
pub fn queue_capacity(max_radius: u32) -> usize {
    strata_world::CHUNK_VOLUME * max_radius_chunk_volumes(max_radius)
}

/// Selects which of the two work queues is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueId {
    /// The primary queue, selected by [`LightEngine::start_pass`].
    A,
    /// The secondary queue.
    B,
}

/// Counters for one propagation or removal pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LightStats {
    /// Cells whose light level was raised.
    pub updated: usize,
    /// Cells whose light level was zeroed (removal only).
    pub cleared: usize,
    /// Breadth levels drained.
    pub levels: usize,
}

/// The incremental light propagation engine.
pub struct LightEngine {
    queue_a: LightQueue,
    queue_b: LightQueue,
    active: QueueId,
}

impl LightEngine {
    /// Creates an engine sized for [`DEFAULT_MAX_LIGHT_RADIUS`].
    pub fn new() -> Self {
        Self::with_max_radius(DEFAULT_MAX_LIGHT_RADIUS)
    }

    /// Creates an engine whose queues are sized for the given maximum
    /// light radius in cells.
    pub fn with_max_radius(max_radius: u32) -> Self {
        let capacity = queue_capacity(max_radius);
        Self {
            queue_a: LightQueue::with_capacity(capacity),
            queue_b: LightQueue::with_capacity(capacity),
            active: QueueId::A,
        }
    }

    /// Begins a fresh propagation session: queue A becomes active and both
    /// queues are cleared.
    pub fn start_pass(&mut self) {
        self.queue_a.clear();
        self.queue_b.clear();
        self.active = QueueId::A;
    }

    /// Switches the active queue.
    pub fn select_queue(&mut self, id: QueueId) {
        self.active = id;
    }

    /// The currently active queue.
    pub fn active_queue(&self) -> QueueId {
        self.active
    }

    /// Appends one item to the active queue.
    pub fn enqueue(&mut self, x: i32, y: i32, z: i32, level: u8) -> Result<(), LightError> {
        self.active_mut().enqueue(LightItem { x, y, z, level })
    }

    /// Appends all six face-adjacent positions to the active queue.
    pub fn enqueue_neighbors(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        level: u8,
    ) -> Result<(), LightError> {
        for (dx, dy, dz) in NEIGHBORS_6 {
            self.enqueue(x + dx, y + dy, z + dz, level)?;
        }
        Ok(())
    }

    /// Pops the oldest visible item from the active queue.
    pub fn dequeue(&mut self) -> Option<LightItem> {
        self.active_mut().dequeue()
    }

    /// Marks the active queue's read boundary; see [`LightQueue::freeze`].
    pub fn freeze(&mut self) {
        self.active_mut().freeze();
    }

    /// Lifts the active queue's read boundary.
    pub fn thaw(&mut self) {
        self.active_mut().thaw();
    }

    /// Total items in the active queue, including frozen ones.
    pub fn active_len(&self) -> usize {
        match self.active {
            QueueId::A => self.queue_a.len(),
            QueueId::B => self.queue_b.len(),
        }
    }

    /// Returns `true` if the active queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.active_len() == 0
    }

    /// Seeds the active queue with the given cells and target levels, then
    /// drains the diffusion to completion.
    ///
    /// # Errors
    ///
    /// [`LightError::QueueOverflow`] if the flood fill outgrows the fixed
    /// queue capacity; the pass is aborted with cells updated so far kept.
    pub fn propagate(
        &mut self,
        world: &mut World,
        seeds: &[LightItem],
    ) -> Result<LightStats, LightError> {
        self.start_pass();
        for &seed in seeds {
            self.enqueue(seed.x, seed.y, seed.z, seed.level)?;
        }
        self.drain_raise(world)
    }

    /// Removes the light emitted from `(x, y, z)` and re-propagates from
    /// whatever other sources still reach the darkened region.
    ///
    /// Darkness spreads on queue A; cells sustained by another source are
    /// collected into queue B and drained as a raise pass afterwards.
    pub fn remove(
        &mut self,
        world: &mut World,
        x: i32,
        y: i32,
        z: i32,
    ) -> Result<LightStats, LightError> {
        let mut stats = LightStats::default();
        self.start_pass();

        let Some(cell) = world.cell(x, y, z) else {
            return Ok(stats);
        };
        let old_level = cell.light;
        if old_level == 0 {
            return Ok(stats);
        }

        if let Some(cell) = world.cell_mut(x, y, z) {
            cell.light = 0;
        }
        stats.cleared += 1;
        self.enqueue(x, y, z, old_level)?;

        while let Some(item) = self.dequeue() {
            for (dx, dy, dz) in NEIGHBORS_6 {
                let (nx, ny, nz) = (item.x + dx, item.y + dy, item.z + dz);
                let Some(neighbor) = world.cell(nx, ny, nz) else {
                    continue;
                };
                let neighbor_level = neighbor.light;
                if neighbor_level == 0 {
                    continue;
                }
                if neighbor_level < item.level {
                    // Lit from the removed source; darken and keep spreading.
                    if let Some(cell) = world.cell_mut(nx, ny, nz) {
                        cell.light = 0;
                    }
                    stats.cleared += 1;
                    self.enqueue(nx, ny, nz, neighbor_level)?;
                } else {
                    // Sustained by another source; relight from here later.
                    self.select_queue(QueueId::B);
                    self.enqueue(nx, ny, nz, neighbor_level)?;
                    self.select_queue(QueueId::A);
                }
            }
        }

        self.select_queue(QueueId::B);
        let relight = self.drain_raise(world)?;
        stats.updated = relight.updated;
        stats.levels = relight.levels;
        Ok(stats)
    }

    /// Drains the active queue one breadth level at a time.
    ///
    /// Each level is isolated with the freeze boundary: neighbor updates
    /// produced while draining level N land behind it and are only
    /// processed once level N is exhausted.
    fn drain_raise(&mut self, world: &mut World) -> Result<LightStats, LightError> {
        let mut stats = LightStats::default();

        while self.active_len() > 0 {
            self.freeze();
            while let Some(item) = self.dequeue() {
                let level = item.level.min(MAX_LIGHT_LEVEL);
                let Some(cell) = world.cell(item.x, item.y, item.z) else {
                    continue;
                };
                if !cell.is_air() && !world.registry().is_transparent(cell.type_id) {
                    // Opaque cells absorb light.
                    continue;
                }
                let current = cell.light;
                if current > level {
                    continue;
                }
                if current < level {
                    if let Some(cell) = world.cell_mut(item.x, item.y, item.z) {
                        cell.light = level;
                    }
                    stats.updated += 1;
                }
                // Expand on raise and on exact match (re-propagation seeds
                // arrive with the cell's current level).
                if level > 1 {
                    self.enqueue_neighbors(item.x, item.y, item.z, level - 1)?;
                }
            }
            self.thaw();
            stats.levels += 1;
        }

        tracing::debug!(
            updated = stats.updated,
            levels = stats.levels,
            "light drain complete"
        );
        Ok(stats)
    }

    fn active_mut(&mut self) -> &mut LightQueue {
        match self.active {
            QueueId::A => &mut self.queue_a,
            QueueId::B => &mut self.queue_b,
        }
    }
}

impl Default for LightEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use strata_world::Cell;

    /// World with all chunks in the ±1 cube allocated so light can cross
    /// chunk boundaries freely.
    fn open_world() -> World {
        let mut world = World::new();
        for y in -1..=1 {
            for x in -1..=1 {
                for z in -1..=1 {
                    world.index_mut().get_or_allocate(x, y, z);
                }
            }
        }
        world
    }

    fn seed(x: i32, y: i32, z: i32, level: u8) -> LightItem {
        LightItem { x, y, z, level }
    }

    #[test]
    fn test_start_pass_selects_queue_a_and_clears() {
        let mut engine = LightEngine::with_max_radius(1);
        engine.enqueue(0, 0, 0, 5).expect("enqueue");
        engine.select_queue(QueueId::B);
        engine.enqueue(1, 1, 1, 5).expect("enqueue");

        engine.start_pass();
        assert_eq!(engine.active_queue(), QueueId::A);
        assert!(engine.is_empty());
        engine.select_queue(QueueId::B);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_enqueue_dequeue_exact_tuple() {
        let mut engine = LightEngine::with_max_radius(1);
        engine.start_pass();
        engine.enqueue(0, 0, 0, 10).expect("enqueue");
        let item = engine.dequeue().expect("item");
        assert_eq!(item, seed(0, 0, 0, 10));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_queues_are_independent() {
        let mut engine = LightEngine::with_max_radius(1);
        engine.start_pass();
        engine.enqueue(1, 0, 0, 1).expect("enqueue");
        engine.select_queue(QueueId::B);
        assert!(engine.dequeue().is_none());
        engine.enqueue(2, 0, 0, 2).expect("enqueue");
        assert_eq!(engine.dequeue(), Some(seed(2, 0, 0, 2)));
        engine.select_queue(QueueId::A);
        assert_eq!(engine.dequeue(), Some(seed(1, 0, 0, 1)));
    }

    #[test]
    fn test_enqueue_neighbors_appends_all_six() {
        let mut engine = LightEngine::with_max_radius(1);
        engine.start_pass();
        engine.enqueue_neighbors(0, 0, 0, 7).expect("enqueue");
        let mut got = Vec::new();
        while let Some(item) = engine.dequeue() {
            got.push((item.x, item.y, item.z, item.level));
        }
        assert_eq!(
            got,
            vec![
                (1, 0, 0, 7),
                (-1, 0, 0, 7),
                (0, 1, 0, 7),
                (0, -1, 0, 7),
                (0, 0, 1, 7),
                (0, 0, -1, 7),
            ]
        );
    }

    #[test]
    fn test_propagation_decays_one_per_manhattan_step() {
        let mut world = open_world();
        let mut engine = LightEngine::new();
        let stats = engine
            .propagate(&mut world, &[seed(5, 5, 5, 15)])
            .expect("propagate");
        assert!(stats.updated > 0);

        // Along an axis: 15 − d, crossing into the +x neighbor chunk.
        for d in 0..=14 {
            let cell = world.cell(5 + d, 5, 5).expect("cell");
            assert_eq!(cell.light, (15 - d) as u8, "axis distance {d}");
        }
        assert_eq!(world.cell(20, 5, 5).expect("cell").light, 0);
        assert_eq!(world.cell(21, 5, 5).expect("cell").light, 0);

        // Along a mixed path the Manhattan distance governs.
        assert_eq!(world.cell(9, 9, 5).expect("cell").light, 15 - 8);
        assert_eq!(world.cell(5 + 7, 5 + 8, 5).expect("cell").light, 0);
    }

    #[test]
    fn test_levels_are_drained_breadth_first() {
        let mut world = open_world();
        let mut engine = LightEngine::new();
        let stats = engine
            .propagate(&mut world, &[seed(0, 0, 0, 3)])
            .expect("propagate");
        // Level 3 at the seed, 2 at distance 1, 1 at distance 2.
        assert_eq!(stats.levels, 3);
        assert_eq!(world.cell(0, 0, 0).expect("cell").light, 3);
        assert_eq!(world.cell(1, 0, 0).expect("cell").light, 2);
        assert_eq!(world.cell(2, 0, 0).expect("cell").light, 1);
        assert_eq!(world.cell(3, 0, 0).expect("cell").light, 0);
    }

    #[test]
    fn test_opaque_cells_absorb_light() {
        let mut world = open_world();
        world
            .registry_mut()
            .set_type(1, false, true, false, false, [0.0; 4])
            .expect("set_type");
        // A wall one step in front of the source.
        world.set_cell(7, 5, 5, Cell { type_id: 1, ..Cell::default() });

        let mut engine = LightEngine::new();
        engine
            .propagate(&mut world, &[seed(5, 5, 5, 15)])
            .expect("propagate");

        assert_eq!(world.cell(6, 5, 5).expect("cell").light, 14);
        // The wall itself stays dark.
        assert_eq!(world.cell(7, 5, 5).expect("cell").light, 0);
        // Directly behind the wall light arrives the long way round.
        let behind = world.cell(8, 5, 5).expect("cell").light;
        assert!(behind < 13, "behind wall got {behind}");
        assert!(behind > 0, "light should bend around the wall");
    }

    #[test]
    fn test_remove_darkens_single_source_fully() {
        let mut world = open_world();
        let mut engine = LightEngine::new();
        engine
            .propagate(&mut world, &[seed(5, 5, 5, 15)])
            .expect("propagate");
        assert_eq!(world.cell(6, 5, 5).expect("cell").light, 14);

        let stats = engine.remove(&mut world, 5, 5, 5).expect("remove");
        assert!(stats.cleared > 0);
        assert_eq!(world.cell(5, 5, 5).expect("cell").light, 0);
        assert_eq!(world.cell(6, 5, 5).expect("cell").light, 0);
        assert_eq!(world.cell(5, 9, 5).expect("cell").light, 0);
    }

    #[test]
    fn test_remove_relights_from_surviving_source() {
        let mut world = open_world();
        let mut engine = LightEngine::new();
        engine
            .propagate(&mut world, &[seed(2, 5, 5, 15), seed(8, 5, 5, 15)])
            .expect("propagate");

        engine.remove(&mut world, 2, 5, 5).expect("remove");

        // The surviving source at (8,5,5) relights the darkened region.
        assert_eq!(world.cell(8, 5, 5).expect("cell").light, 15);
        assert_eq!(world.cell(2, 5, 5).expect("cell").light, 15 - 6);
        assert_eq!(world.cell(0, 5, 5).expect("cell").light, 15 - 8);
    }

    #[test]
    fn test_propagation_skips_unloaded_chunks() {
        let mut world = World::new();
        world.index_mut().get_or_allocate(0, 0, 0);

        let mut engine = LightEngine::new();
        engine
            .propagate(&mut world, &[seed(5, 5, 5, 15)])
            .expect("propagate");

        // Light filled the loaded chunk but allocated nothing new.
        assert_eq!(world.index().len(), 1);
        assert_eq!(world.cell(11, 5, 5).expect("cell").light, 15 - 6);
        assert!(world.cell(12, 5, 5).is_none());
    }
}
