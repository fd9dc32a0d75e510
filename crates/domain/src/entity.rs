//! Entity contract - what every stored object must provide
//!
//! An Entity has an identity assigned by the store on creation.
//! Soft deletion is an optional capability, expressed statically through
//! `SOFT_DELETE` and the marker methods: types that keep the default
//! never carry deletion markers and are removed outright on delete.

use chrono::{DateTime, Utc};

/// Unique identifier for a stored entity
///
/// Ids are positive; `0` marks an entity that has not been stored yet.
pub type EntityId = u64;

/// Contract for everything a [`crate::repository::Repository`] can hold
pub trait Entity: Clone {
    /// Entity type name, used in error context
    const KIND: &'static str;

    /// Whether `delete` soft-deletes instead of removing
    const SOFT_DELETE: bool = false;

    fn id(&self) -> EntityId;

    /// Called by the store exactly once, on insert.
    /// The id is immutable afterwards.
    fn assign_id(&mut self, id: EntityId);

    fn is_deleted(&self) -> bool {
        false
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn mark_deleted(&mut self, _at: DateTime<Utc>) {}

    fn clear_deletion(&mut self) {}
}
