//! Bounded light-update queues and the breadth-first diffusion engine.

pub mod engine;
pub mod queue;

pub use engine::{
    DEFAULT_MAX_LIGHT_RADIUS, LightEngine, LightStats, QueueId, max_radius_chunk_volumes,
    queue_capacity,
};
pub use queue::{LightError, LightItem, LightQueue};
