//! VisitService - scheduling and the visit state machine

use chrono::{DateTime, Utc};
use tracing::info;

use domain::entity::{Entity, EntityId};
use domain::model::animal::Animal;
use domain::model::visit::Visit;
use domain::repository::{Page, Repository, SortOrder};

use crate::error::{ServiceError, ServiceResult};

/// Visit service
pub struct VisitService<V, A>
where
    V: Repository<Visit>,
    A: Repository<Animal>,
{
    visits: V,
    animals: A,
}

impl<V, A> VisitService<V, A>
where
    V: Repository<Visit>,
    A: Repository<Animal>,
{
    pub fn new(visits: V, animals: A) -> Self {
        Self { visits, animals }
    }

    /// Book a new visit
    pub fn schedule(&mut self, visit: Visit) -> ServiceResult<Visit> {
        if !self.animals.exists(visit.animal_id)? {
            return Err(ServiceError::NotFound {
                kind: Animal::KIND,
                id: visit.animal_id,
            });
        }
        if visit.duration_minutes == 0 {
            return Err(ServiceError::InvalidArgument(
                "visit duration must be positive".to_string(),
            ));
        }
        if visit.planned_at <= Utc::now() {
            return Err(ServiceError::InvalidArgument(
                "visit must be planned in the future".to_string(),
            ));
        }

        let stored = self.visits.add(visit)?;
        info!(
            id = stored.id,
            animal_id = stored.animal_id,
            kind = %stored.kind,
            "visit scheduled"
        );
        Ok(stored)
    }

    /// Load one visit
    pub fn get(&self, id: EntityId) -> ServiceResult<Visit> {
        self.visits.get_by_id(id)?.ok_or(ServiceError::NotFound {
            kind: Visit::KIND,
            id,
        })
    }

    fn transition<F>(&mut self, id: EntityId, apply: F) -> ServiceResult<Visit>
    where
        F: FnOnce(&mut Visit) -> Result<(), domain::model::visit::VisitError>,
    {
        let mut visit = self.get(id)?;
        apply(&mut visit)?;
        let updated = self.visits.update(visit)?;
        info!(id, status = %updated.status, "visit transitioned");
        Ok(updated)
    }

    /// Confirm a scheduled or waitlisted visit
    pub fn confirm(&mut self, id: EntityId) -> ServiceResult<Visit> {
        self.transition(id, |v| v.confirm())
    }

    /// Move a scheduled visit to the waitlist
    pub fn waitlist(&mut self, id: EntityId) -> ServiceResult<Visit> {
        self.transition(id, |v| v.waitlist())
    }

    /// Mark a visit as completed; defaults the actual time to now
    pub fn complete(
        &mut self,
        id: EntityId,
        actual_at: Option<DateTime<Utc>>,
    ) -> ServiceResult<Visit> {
        let at = actual_at.unwrap_or_else(Utc::now);
        self.transition(id, |v| v.complete(at))
    }

    /// Cancel a visit that has not reached a terminal state
    pub fn cancel(&mut self, id: EntityId) -> ServiceResult<Visit> {
        self.transition(id, |v| v.cancel())
    }

    /// All visits for one animal, soonest planned first
    pub fn for_animal(&self, animal_id: EntityId) -> ServiceResult<Vec<Visit>> {
        Ok(self.visits.find_sorted(
            |v| v.animal_id == animal_id,
            |v| v.planned_at,
            SortOrder::Ascending,
        )?)
    }

    /// Upcoming visits for one animal, soonest first
    pub fn upcoming_for_animal(
        &self,
        animal_id: EntityId,
        now: DateTime<Utc>,
    ) -> ServiceResult<Vec<Visit>> {
        Ok(self.visits.find_sorted(
            |v| v.animal_id == animal_id && v.is_upcoming(now),
            |v| v.planned_at,
            SortOrder::Ascending,
        )?)
    }

    /// One page of all visits
    pub fn list_paged(&self, page: usize, page_size: usize) -> ServiceResult<Page<Visit>> {
        Ok(self.visits.get_paged(page, page_size)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use domain::model::visit::{VisitKind, VisitStatus};
    use store::MemoryStore;

    fn stores() -> (MemoryStore<Visit>, MemoryStore<Animal>, EntityId) {
        let visits = MemoryStore::new();
        let mut animals = MemoryStore::new();
        let stored = animals
            .add(Animal::new(
                "Rex",
                "Dog",
                NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            ))
            .unwrap();
        (visits, animals, stored.id)
    }

    fn soon() -> DateTime<Utc> {
        Utc::now() + Duration::days(7)
    }

    #[test]
    fn test_schedule_requires_existing_animal() {
        let (visits, animals, _) = stores();
        let mut service = VisitService::new(visits, animals);

        let result = service.schedule(Visit::new(42, VisitKind::Veterinary, soon(), 30));
        assert!(matches!(
            result,
            Err(ServiceError::NotFound { kind: "Animal", id: 42 })
        ));
    }

    #[test]
    fn test_schedule_rejects_past_date() {
        let (visits, animals, animal_id) = stores();
        let mut service = VisitService::new(visits, animals);

        let yesterday = Utc::now() - Duration::days(1);
        let result = service.schedule(Visit::new(animal_id, VisitKind::Veterinary, yesterday, 30));
        assert!(matches!(result, Err(ServiceError::InvalidArgument(_))));
    }

    #[test]
    fn test_schedule_rejects_zero_duration() {
        let (visits, animals, animal_id) = stores();
        let mut service = VisitService::new(visits, animals);

        let result = service.schedule(Visit::new(animal_id, VisitKind::Veterinary, soon(), 0));
        assert!(matches!(result, Err(ServiceError::InvalidArgument(_))));
    }

    #[test]
    fn test_full_visit_flow() {
        let (visits, animals, animal_id) = stores();
        let mut service = VisitService::new(visits, animals);

        let visit = service
            .schedule(Visit::new(animal_id, VisitKind::Veterinary, soon(), 30))
            .unwrap();

        let confirmed = service.confirm(visit.id).unwrap();
        assert_eq!(confirmed.status, VisitStatus::Confirmed);

        let completed = service.complete(visit.id, None).unwrap();
        assert_eq!(completed.status, VisitStatus::Completed);
        assert!(completed.actual_at.is_some());
    }

    #[test]
    fn test_invalid_transition_is_surfaced_and_state_kept() {
        let (visits, animals, animal_id) = stores();
        let mut service = VisitService::new(visits, animals);

        let visit = service
            .schedule(Visit::new(animal_id, VisitKind::Adoption, soon(), 45))
            .unwrap();
        service.cancel(visit.id).unwrap();

        let result = service.confirm(visit.id);
        assert!(matches!(result, Err(ServiceError::Transition(_))));

        // Store still holds the cancelled visit
        assert_eq!(service.get(visit.id).unwrap().status, VisitStatus::Cancelled);
    }

    #[test]
    fn test_upcoming_for_animal_ordering() {
        let (visits, animals, animal_id) = stores();
        let mut service = VisitService::new(visits, animals);

        let later = service
            .schedule(Visit::new(
                animal_id,
                VisitKind::Veterinary,
                Utc::now() + Duration::days(30),
                30,
            ))
            .unwrap();
        let sooner = service
            .schedule(Visit::new(
                animal_id,
                VisitKind::Grooming,
                Utc::now() + Duration::days(3),
                30,
            ))
            .unwrap();
        let cancelled = service
            .schedule(Visit::new(
                animal_id,
                VisitKind::Veterinary,
                Utc::now() + Duration::days(10),
                30,
            ))
            .unwrap();
        service.cancel(cancelled.id).unwrap();

        let upcoming = service.upcoming_for_animal(animal_id, Utc::now()).unwrap();
        let ids: Vec<EntityId> = upcoming.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![sooner.id, later.id]);
    }
}
