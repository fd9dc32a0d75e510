//! HealthRecordService - veterinary records per animal

use chrono::{NaiveDate, Utc};
use tracing::info;

use domain::entity::{Entity, EntityId};
use domain::model::animal::Animal;
use domain::model::health_record::HealthRecord;
use domain::repository::{Repository, SortOrder};

use crate::error::{ServiceError, ServiceResult};

/// Health record service
pub struct HealthRecordService<H, A>
where
    H: Repository<HealthRecord>,
    A: Repository<Animal>,
{
    records: H,
    animals: A,
}

impl<H, A> HealthRecordService<H, A>
where
    H: Repository<HealthRecord>,
    A: Repository<Animal>,
{
    pub fn new(records: H, animals: A) -> Self {
        Self { records, animals }
    }

    fn validate(&self, record: &HealthRecord) -> ServiceResult<()> {
        if !self.animals.exists(record.animal_id)? {
            return Err(ServiceError::NotFound {
                kind: Animal::KIND,
                id: record.animal_id,
            });
        }
        if record.recorded_at > Utc::now().date_naive() {
            return Err(ServiceError::InvalidArgument(
                "record date cannot be in the future".to_string(),
            ));
        }
        Ok(())
    }

    /// Store a new examination record
    pub fn record(&mut self, record: HealthRecord) -> ServiceResult<HealthRecord> {
        self.validate(&record)?;
        let stored = self.records.add(record)?;
        info!(
            id = stored.id,
            animal_id = stored.animal_id,
            "health record stored"
        );
        Ok(stored)
    }

    /// Load one record
    pub fn get(&self, id: EntityId) -> ServiceResult<HealthRecord> {
        self.records.get_by_id(id)?.ok_or(ServiceError::NotFound {
            kind: HealthRecord::KIND,
            id,
        })
    }

    /// Replace a record
    pub fn update(&mut self, record: HealthRecord) -> ServiceResult<HealthRecord> {
        self.validate(&record)?;
        Ok(self.records.update(record)?)
    }

    /// Remove a record outright (health records are not soft-deleted)
    pub fn remove(&mut self, id: EntityId) -> ServiceResult<()> {
        self.records.delete(id)?;
        Ok(())
    }

    /// All records for one animal, newest first
    pub fn for_animal(&self, animal_id: EntityId) -> ServiceResult<Vec<HealthRecord>> {
        Ok(self.records.find_sorted(
            |r| r.animal_id == animal_id,
            |r| r.recorded_at,
            SortOrder::Descending,
        )?)
    }

    /// Most recent record for one animal, if any
    pub fn latest_for_animal(&self, animal_id: EntityId) -> ServiceResult<Option<HealthRecord>> {
        Ok(self.for_animal(animal_id)?.into_iter().next())
    }

    /// Records whose next vaccination is due on or before `cutoff`,
    /// soonest first
    pub fn vaccinations_due(&self, cutoff: NaiveDate) -> ServiceResult<Vec<HealthRecord>> {
        Ok(self.records.find_sorted(
            |r| r.vaccination_due(cutoff),
            |r| r.next_vaccination_date,
            SortOrder::Ascending,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::model::health_record::{Diagnosis, DiagnosisCategory};
    use store::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stores() -> (MemoryStore<HealthRecord>, MemoryStore<Animal>, EntityId) {
        let records = MemoryStore::new();
        let mut animals = MemoryStore::new();
        let stored = animals
            .add(Animal::new("Rex", "Dog", date(2026, 1, 10)))
            .unwrap();
        (records, animals, stored.id)
    }

    fn checkup(animal_id: EntityId, recorded: NaiveDate) -> HealthRecord {
        HealthRecord::new(
            animal_id,
            recorded,
            Diagnosis::new(DiagnosisCategory::RoutineCheckup, ""),
        )
    }

    #[test]
    fn test_record_requires_existing_animal() {
        let (records, animals, _) = stores();
        let mut service = HealthRecordService::new(records, animals);

        let result = service.record(checkup(42, date(2026, 6, 1)));
        assert!(matches!(
            result,
            Err(ServiceError::NotFound { kind: "Animal", id: 42 })
        ));
    }

    #[test]
    fn test_record_rejects_future_date() {
        let (records, animals, animal_id) = stores();
        let mut service = HealthRecordService::new(records, animals);

        let result = service.record(checkup(animal_id, date(2099, 1, 1)));
        assert!(matches!(result, Err(ServiceError::InvalidArgument(_))));
    }

    #[test]
    fn test_for_animal_newest_first() {
        let (records, animals, animal_id) = stores();
        let mut service = HealthRecordService::new(records, animals);

        service.record(checkup(animal_id, date(2026, 3, 1))).unwrap();
        service.record(checkup(animal_id, date(2026, 7, 1))).unwrap();
        service.record(checkup(animal_id, date(2026, 5, 1))).unwrap();

        let history = service.for_animal(animal_id).unwrap();
        let dates: Vec<NaiveDate> = history.iter().map(|r| r.recorded_at).collect();
        assert_eq!(
            dates,
            vec![date(2026, 7, 1), date(2026, 5, 1), date(2026, 3, 1)]
        );

        let latest = service.latest_for_animal(animal_id).unwrap().unwrap();
        assert_eq!(latest.recorded_at, date(2026, 7, 1));
    }

    #[test]
    fn test_latest_for_animal_without_records() {
        let (records, animals, animal_id) = stores();
        let service = HealthRecordService::new(records, animals);
        assert!(service.latest_for_animal(animal_id).unwrap().is_none());
    }

    #[test]
    fn test_vaccinations_due() {
        let (records, animals, animal_id) = stores();
        let mut service = HealthRecordService::new(records, animals);

        service
            .record(checkup(animal_id, date(2026, 1, 1)).with_vaccination(Some(date(2026, 7, 15))))
            .unwrap();
        service
            .record(checkup(animal_id, date(2026, 2, 1)).with_vaccination(Some(date(2026, 7, 1))))
            .unwrap();
        service
            .record(checkup(animal_id, date(2026, 3, 1)).with_vaccination(Some(date(2027, 1, 1))))
            .unwrap();

        let due = service.vaccinations_due(date(2026, 8, 1)).unwrap();
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].next_vaccination_date, Some(date(2026, 7, 1)));
        assert_eq!(due[1].next_vaccination_date, Some(date(2026, 7, 15)));
    }
}
