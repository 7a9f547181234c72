//! Identifier generation effect.

use std::sync::Arc;
use uuid::Uuid;

/// Source of fresh, collision-resistant identifiers.
pub trait IdGenerator: Send + Sync {
    /// Produce a new UUID. Implementations must not repeat values within a
    /// session.
    fn next_uuid(&self) -> Uuid;
}

impl<G: IdGenerator + ?Sized> IdGenerator for Arc<G> {
    fn next_uuid(&self) -> Uuid {
        (**self).next_uuid()
    }
}

/// Production generator handing out random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl RandomIds {
    /// Create a new random id handler.
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for RandomIds {
    fn next_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}
