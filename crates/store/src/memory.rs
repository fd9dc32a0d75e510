//! In-memory repository implementation
//!
//! One `MemoryStore` per entity type. The collection lives behind an
//! `Arc<RwLock<..>>`: cloning a store yields another handle onto the same
//! data, and every operation holds the lock for its whole read-modify-write
//! sequence, so a soft delete is never observable half-done.
//!
//! Ids are assigned here, from a counter under the same lock as the
//! collection, and are never reused - a soft-deleted entity keeps its id
//! forever.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::debug;

use domain::entity::{Entity, EntityId};
use domain::repository::{Page, Repository, SortOrder, StoreError, StoreResult};

struct Inner<T> {
    entries: Vec<T>,
    next_id: EntityId,
}

/// Generic in-memory store
///
/// Thread-safe handle; `Clone` shares the underlying collection.
pub struct MemoryStore<T: Entity> {
    inner: Arc<RwLock<Inner<T>>>,
}

impl<T: Entity> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                entries: Vec::new(),
                next_id: 1,
            })),
        }
    }

    fn read_guard(&self, operation: &'static str) -> StoreResult<RwLockReadGuard<'_, Inner<T>>> {
        self.inner.read().map_err(|_| StoreError::Repository {
            kind: T::KIND,
            operation,
            message: "failed to acquire read lock".to_string(),
        })
    }

    fn write_guard(&self, operation: &'static str) -> StoreResult<RwLockWriteGuard<'_, Inner<T>>> {
        self.inner.write().map_err(|_| StoreError::Repository {
            kind: T::KIND,
            operation,
            message: "failed to acquire write lock".to_string(),
        })
    }

    fn check_id(id: EntityId) -> StoreResult<()> {
        if id == 0 {
            return Err(StoreError::InvalidArgument(format!(
                "{} id must be positive",
                T::KIND
            )));
        }
        Ok(())
    }
}

impl<T: Entity> Repository<T> for MemoryStore<T> {
    fn get_all(&self) -> StoreResult<Vec<T>> {
        Ok(self.read_guard("get_all")?.entries.to_vec())
    }

    fn get_by_id(&self, id: EntityId) -> StoreResult<Option<T>> {
        Self::check_id(id)?;
        let inner = self.read_guard("get_by_id")?;
        Ok(inner.entries.iter().find(|e| e.id() == id).cloned())
    }

    fn add(&mut self, mut entity: T) -> StoreResult<T> {
        let mut inner = self.write_guard("add")?;

        let id = inner.next_id;
        inner.next_id += 1;
        entity.assign_id(id);
        if T::SOFT_DELETE {
            entity.clear_deletion();
        }

        inner.entries.push(entity.clone());
        debug!(kind = T::KIND, id, "entity added");
        Ok(entity)
    }

    fn update(&mut self, entity: T) -> StoreResult<T> {
        Self::check_id(entity.id())?;
        let mut inner = self.write_guard("update")?;

        let position = inner
            .entries
            .iter()
            .position(|e| e.id() == entity.id())
            .ok_or(StoreError::NotFound {
                kind: T::KIND,
                id: entity.id(),
            })?;

        inner.entries[position] = entity.clone();
        debug!(kind = T::KIND, id = entity.id(), "entity updated");
        Ok(entity)
    }

    fn delete(&mut self, id: EntityId) -> StoreResult<()> {
        Self::check_id(id)?;
        let mut inner = self.write_guard("delete")?;

        let position = inner
            .entries
            .iter()
            .position(|e| e.id() == id)
            .ok_or(StoreError::NotFound { kind: T::KIND, id })?;

        if T::SOFT_DELETE {
            inner.entries[position].mark_deleted(Utc::now());
            debug!(kind = T::KIND, id, "entity soft-deleted");
        } else {
            inner.entries.remove(position);
            debug!(kind = T::KIND, id, "entity removed");
        }
        Ok(())
    }

    fn find<P>(&self, predicate: P) -> StoreResult<Vec<T>>
    where
        P: Fn(&T) -> bool,
    {
        let inner = self.read_guard("find")?;
        Ok(inner
            .entries
            .iter()
            .filter(|e| predicate(e))
            .cloned()
            .collect())
    }

    fn find_sorted<P, K, O>(&self, predicate: P, key: K, order: SortOrder) -> StoreResult<Vec<T>>
    where
        P: Fn(&T) -> bool,
        K: Fn(&T) -> O,
        O: Ord,
    {
        let mut matches = self.find(predicate)?;
        match order {
            SortOrder::Ascending => matches.sort_by(|a, b| key(a).cmp(&key(b))),
            SortOrder::Descending => matches.sort_by(|a, b| key(b).cmp(&key(a))),
        }
        Ok(matches)
    }

    fn find_take<P>(&self, predicate: P, count: usize) -> StoreResult<Vec<T>>
    where
        P: Fn(&T) -> bool,
    {
        let inner = self.read_guard("find_take")?;
        Ok(inner
            .entries
            .iter()
            .filter(|e| predicate(e))
            .take(count)
            .cloned()
            .collect())
    }

    fn find_skip<P>(&self, predicate: P, count: usize) -> StoreResult<Vec<T>>
    where
        P: Fn(&T) -> bool,
    {
        let inner = self.read_guard("find_skip")?;
        Ok(inner
            .entries
            .iter()
            .filter(|e| predicate(e))
            .skip(count)
            .cloned()
            .collect())
    }

    fn find_grouped<P, K, G>(&self, predicate: P, key: K) -> StoreResult<BTreeMap<G, Vec<T>>>
    where
        P: Fn(&T) -> bool,
        K: Fn(&T) -> G,
        G: Ord,
    {
        let inner = self.read_guard("find_grouped")?;
        let mut groups: BTreeMap<G, Vec<T>> = BTreeMap::new();
        for entity in inner.entries.iter().filter(|e| predicate(e)) {
            groups.entry(key(entity)).or_default().push(entity.clone());
        }
        Ok(groups)
    }

    fn get_paged_filtered<P>(&self, page: usize, page_size: usize, filter: P) -> StoreResult<Page<T>>
    where
        P: Fn(&T) -> bool,
    {
        if page < 1 {
            return Err(StoreError::InvalidArgument(
                "page number is 1-indexed".to_string(),
            ));
        }
        if page_size < 1 {
            return Err(StoreError::InvalidArgument(
                "page size must be positive".to_string(),
            ));
        }

        let inner = self.read_guard("get_paged")?;
        let matches: Vec<&T> = inner.entries.iter().filter(|e| filter(e)).collect();
        let total_count = matches.len();
        let items = matches
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .cloned()
            .collect();

        Ok(Page {
            items,
            total_count,
            page,
            page_size,
        })
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.read_guard("count")?.entries.len())
    }

    fn count_active(&self) -> StoreResult<usize> {
        let inner = self.read_guard("count_active")?;
        Ok(inner.entries.iter().filter(|e| !e.is_deleted()).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain::model::animal::{Animal, AnimalStatus};
    use domain::model::visit::{Visit, VisitKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn animal(name: &str, species: &str) -> Animal {
        Animal::new(name, species, date(2026, 1, 10))
    }

    fn visit(animal_id: EntityId) -> Visit {
        use chrono::TimeZone;
        Visit::new(
            animal_id,
            VisitKind::Veterinary,
            Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap(),
            30,
        )
    }

    // ============== CRUD Tests ==============

    #[test]
    fn test_add_assigns_increasing_ids() {
        let mut store = MemoryStore::<Animal>::new();

        let first = store.add(animal("Rex", "Dog")).unwrap();
        let second = store.add(animal("Mia", "Cat")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_add_ignores_incoming_id_and_deletion_markers() {
        let mut store = MemoryStore::<Animal>::new();

        let mut tainted = animal("Rex", "Dog");
        tainted.id = 99;
        tainted.mark_deleted(Utc::now());

        let stored = store.add(tainted).unwrap();
        assert_eq!(stored.id, 1);
        assert!(!stored.is_deleted);
        assert!(stored.deleted_at.is_none());
    }

    #[test]
    fn test_round_trip() {
        let mut store = MemoryStore::<Animal>::new();

        let stored = store
            .add(animal("Rex", "Dog").with_breed("Beagle").with_weight_kg(12.5))
            .unwrap();
        let loaded = store.get_by_id(stored.id).unwrap().unwrap();

        assert_eq!(loaded, stored);
    }

    #[test]
    fn test_get_by_id_absent() {
        let store = MemoryStore::<Animal>::new();
        assert_eq!(store.get_by_id(42).unwrap(), None);
    }

    #[test]
    fn test_get_by_id_zero_is_invalid() {
        let store = MemoryStore::<Animal>::new();
        let result = store.get_by_id(0);
        assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut store = MemoryStore::<Animal>::new();

        let mut stored = store.add(animal("Rex", "Dog")).unwrap();
        store.add(animal("Mia", "Cat")).unwrap();

        stored.status = AnimalStatus::Adopted;
        store.update(stored.clone()).unwrap();

        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 2);
        // Position preserved, full record replaced
        assert_eq!(all[0].status, AnimalStatus::Adopted);
        assert_eq!(all[1].name, "Mia");
    }

    #[test]
    fn test_update_not_found_leaves_store_unchanged() {
        let mut store = MemoryStore::<Animal>::new();
        store.add(animal("Rex", "Dog")).unwrap();

        let mut ghost = animal("Ghost", "Cat");
        ghost.id = 42;
        let result = store.update(ghost);

        assert_eq!(
            result,
            Err(StoreError::NotFound {
                kind: "Animal",
                id: 42
            })
        );
        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Rex");
    }

    // ============== Soft Delete Tests ==============

    #[test]
    fn test_soft_delete_keeps_entity_flagged() {
        let mut store = MemoryStore::<Animal>::new();
        let stored = store.add(animal("Rex", "Dog")).unwrap();

        store.delete(stored.id).unwrap();

        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_deleted);
        assert!(all[0].deleted_at.is_some());
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.count_active().unwrap(), 0);
    }

    #[test]
    fn test_hard_delete_removes_entity() {
        let mut store = MemoryStore::<Visit>::new();
        let stored = store.add(visit(1)).unwrap();

        store.delete(stored.id).unwrap();

        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_delete_not_found() {
        let mut store = MemoryStore::<Animal>::new();
        let result = store.delete(42);
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_ids_not_reused_after_soft_delete() {
        let mut store = MemoryStore::<Animal>::new();

        let first = store.add(animal("Rex", "Dog")).unwrap();
        store.delete(first.id).unwrap();
        let second = store.add(animal("Mia", "Cat")).unwrap();

        assert_eq!(second.id, 2);
    }

    // ============== Query Tests ==============

    fn seeded_store() -> MemoryStore<Animal> {
        let mut store = MemoryStore::new();
        store.add(animal("Rex", "Dog").with_weight_kg(12.0)).unwrap();
        store.add(animal("Mia", "Cat").with_weight_kg(4.0)).unwrap();
        store.add(animal("Buddy", "Dog").with_weight_kg(30.0)).unwrap();
        store.add(animal("Luna", "Cat").with_weight_kg(3.5)).unwrap();
        store.add(animal("Coco", "Parrot").with_weight_kg(0.4)).unwrap();
        store
    }

    #[test]
    fn test_find_by_predicate() {
        let store = seeded_store();

        let dogs = store.find(|a| a.species == "Dog").unwrap();
        assert_eq!(dogs.len(), 2);
        assert_eq!(dogs[0].name, "Rex");
        assert_eq!(dogs[1].name, "Buddy");
    }

    #[test]
    fn test_find_sorted_both_orders() {
        let store = seeded_store();

        let ascending = store
            .find_sorted(|_| true, |a| a.name.clone(), SortOrder::Ascending)
            .unwrap();
        let names: Vec<&str> = ascending.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Buddy", "Coco", "Luna", "Mia", "Rex"]);

        let descending = store
            .find_sorted(|_| true, |a| a.name.clone(), SortOrder::Descending)
            .unwrap();
        let names: Vec<&str> = descending.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Rex", "Mia", "Luna", "Coco", "Buddy"]);
    }

    #[test]
    fn test_find_take_and_skip() {
        let store = seeded_store();

        let first_two = store.find_take(|_| true, 2).unwrap();
        assert_eq!(first_two.len(), 2);
        assert_eq!(first_two[0].name, "Rex");

        let rest = store.find_skip(|_| true, 2).unwrap();
        assert_eq!(rest.len(), 3);
        assert_eq!(rest[0].name, "Buddy");

        // Take more than available is not an error
        assert_eq!(store.find_take(|_| true, 100).unwrap().len(), 5);
        assert!(store.find_skip(|_| true, 100).unwrap().is_empty());
    }

    #[test]
    fn test_find_grouped_completeness() {
        let store = seeded_store();

        let groups = store
            .find_grouped(|_| true, |a| a.species.clone())
            .unwrap();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups["Dog"].len(), 2);
        assert_eq!(groups["Cat"].len(), 2);
        assert_eq!(groups["Parrot"].len(), 1);

        // Union of groups equals find(pred), nothing duplicated or dropped
        let total: usize = groups.values().map(|g| g.len()).sum();
        assert_eq!(total, store.find(|_| true).unwrap().len());

        // Order within a group preserves filter order
        assert_eq!(groups["Dog"][0].name, "Rex");
        assert_eq!(groups["Dog"][1].name, "Buddy");
    }

    // ============== Paging Tests ==============

    #[test]
    fn test_paging_bounds_and_reconstruction() {
        let store = seeded_store();
        let is_mammal = |a: &Animal| a.species != "Parrot";

        let mut collected = Vec::new();
        let mut page = 1;
        loop {
            let result = store.get_paged_filtered(page, 2, is_mammal).unwrap();
            assert_eq!(result.total_count, 4);
            assert!(result.items.len() <= 2);
            if result.items.is_empty() {
                break;
            }
            collected.extend(result.items);
            page += 1;
        }

        // Concatenated pages reconstruct the filtered sequence in order
        let expected = store.find(is_mammal).unwrap();
        assert_eq!(collected, expected);
    }

    #[test]
    fn test_paging_last_partial_page() {
        let store = seeded_store();

        let result = store.get_paged(3, 2).unwrap();
        assert_eq!(result.total_count, 5);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].name, "Coco");
        assert_eq!(result.total_pages(), 3);
    }

    #[test]
    fn test_paging_validates_arguments() {
        let store = seeded_store();

        assert!(matches!(
            store.get_paged(0, 10),
            Err(StoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.get_paged(1, 0),
            Err(StoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_paging_past_the_end_is_empty() {
        let store = seeded_store();
        let result = store.get_paged(10, 10).unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.total_count, 5);
    }

    // ============== Shared Handle Tests ==============

    #[test]
    fn test_cloned_handle_shares_state() {
        let mut store = MemoryStore::<Animal>::new();
        let reader = store.clone();

        store.add(animal("Rex", "Dog")).unwrap();

        assert_eq!(reader.count().unwrap(), 1);
    }

    #[test]
    fn test_exists() {
        let mut store = MemoryStore::<Animal>::new();
        let stored = store.add(animal("Rex", "Dog")).unwrap();

        assert!(store.exists(stored.id).unwrap());
        assert!(!store.exists(42).unwrap());
    }
}
