//! Repository trait - abstract storage for entities
//!
//! This trait defines what operations the domain needs from a store.
//! How they are implemented (in-memory today, anything else tomorrow) is
//! not our concern here. The API is deliberately synchronous: nothing in
//! this system performs real I/O, so nothing pretends to.
//!
//! Every operation validates its own preconditions. A store must be safe
//! to use regardless of caller discipline.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::entity::{Entity, EntityId};

/// Errors that can occur during store operations
///
/// One taxonomy regardless of entity type: the entity type name travels in
/// the variants instead of the type system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Caller supplied an out-of-contract value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Referenced entity does not exist
    #[error("{kind} with id {id} not found")]
    NotFound { kind: &'static str, id: EntityId },

    /// Any other failure inside a store operation, wrapped with entity-type
    /// and operation context
    #[error("Repository failure in {kind}::{operation}: {message}")]
    Repository {
        kind: &'static str,
        operation: &'static str,
        message: String,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Sort direction for [`Repository::find_sorted`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// One page of a paged query
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Entities on this page, at most `page_size` of them
    pub items: Vec<T>,
    /// Count of all entities passing the filter, before pagination
    pub total_count: usize,
    /// 1-indexed page number
    pub page: usize,
    /// Requested page size
    pub page_size: usize,
}

impl<T> Page<T> {
    /// Number of pages needed for `total_count` entities
    pub fn total_pages(&self) -> usize {
        self.total_count.div_ceil(self.page_size)
    }
}

/// Repository trait - uniform CRUD and query composition over one entity type
///
/// `find` is the composability primitive: every specialized per-entity query
/// is a predicate handed to it, not bespoke store code.
pub trait Repository<T: Entity> {
    /// Snapshot of all entities, in insertion order.
    /// Soft-deleted entities are included; callers filter explicitly.
    fn get_all(&self) -> StoreResult<Vec<T>>;

    /// First entity whose id matches, `None` if absent.
    /// Fails with `InvalidArgument` for id 0.
    fn get_by_id(&self, id: EntityId) -> StoreResult<Option<T>>;

    /// Store a new entity: assigns the next id, clears any soft-delete
    /// markers, appends, and returns the stored entity.
    fn add(&mut self, entity: T) -> StoreResult<T>;

    /// Replace the stored entity sharing this entity's id (full replacement,
    /// not a field merge). Fails with `NotFound` if no such entity exists.
    fn update(&mut self, entity: T) -> StoreResult<T>;

    /// Delete by id: soft-deletes (flag + timestamp) when the type supports
    /// it, removes outright otherwise. Fails with `NotFound` if absent.
    fn delete(&mut self, id: EntityId) -> StoreResult<()>;

    /// All entities satisfying the predicate, in insertion order
    fn find<P>(&self, predicate: P) -> StoreResult<Vec<T>>
    where
        P: Fn(&T) -> bool;

    /// Filter, then sort by a caller-supplied key.
    /// No stability promise beyond the standard library sort.
    fn find_sorted<P, K, O>(&self, predicate: P, key: K, order: SortOrder) -> StoreResult<Vec<T>>
    where
        P: Fn(&T) -> bool,
        K: Fn(&T) -> O,
        O: Ord;

    /// Filter, then keep at most `count` entities.
    /// Counts are `usize`: a negative count is unrepresentable.
    fn find_take<P>(&self, predicate: P, count: usize) -> StoreResult<Vec<T>>
    where
        P: Fn(&T) -> bool;

    /// Filter, then drop the first `count` entities
    fn find_skip<P>(&self, predicate: P, count: usize) -> StoreResult<Vec<T>>
    where
        P: Fn(&T) -> bool;

    /// Filter, then partition into groups by a caller-supplied key.
    /// Order within a group preserves filter order.
    fn find_grouped<P, K, G>(&self, predicate: P, key: K) -> StoreResult<BTreeMap<G, Vec<T>>>
    where
        P: Fn(&T) -> bool,
        K: Fn(&T) -> G,
        G: Ord;

    /// One page of the entities passing `filter`, with the pre-pagination
    /// total. `page` is 1-indexed; fails with `InvalidArgument` unless
    /// `page >= 1` and `page_size >= 1`.
    fn get_paged_filtered<P>(
        &self,
        page: usize,
        page_size: usize,
        filter: P,
    ) -> StoreResult<Page<T>>
    where
        P: Fn(&T) -> bool;

    /// One page over all entities
    fn get_paged(&self, page: usize, page_size: usize) -> StoreResult<Page<T>> {
        self.get_paged_filtered(page, page_size, |_| true)
    }

    /// Whether an entity with this id exists
    fn exists(&self, id: EntityId) -> StoreResult<bool> {
        Ok(self.get_by_id(id)?.is_some())
    }

    /// Count all entities, soft-deleted included
    fn count(&self) -> StoreResult<usize> {
        Ok(self.get_all()?.len())
    }

    /// Count entities that are not soft-deleted
    fn count_active(&self) -> StoreResult<usize> {
        Ok(self.get_all()?.iter().filter(|e| !e.is_deleted()).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_total_pages() {
        let page = Page::<u32> {
            items: vec![],
            total_count: 21,
            page: 1,
            page_size: 10,
        };
        assert_eq!(page.total_pages(), 3);

        let exact = Page::<u32> {
            items: vec![],
            total_count: 20,
            page: 1,
            page_size: 10,
        };
        assert_eq!(exact.total_pages(), 2);

        let empty = Page::<u32> {
            items: vec![],
            total_count: 0,
            page: 1,
            page_size: 10,
        };
        assert_eq!(empty.total_pages(), 0);
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::NotFound {
            kind: "Animal",
            id: 7,
        };
        assert_eq!(err.to_string(), "Animal with id 7 not found");

        let err = StoreError::Repository {
            kind: "Visit",
            operation: "update",
            message: "lock poisoned".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Repository failure in Visit::update: lock poisoned"
        );
    }
}
