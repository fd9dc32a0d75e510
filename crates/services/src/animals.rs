//! AnimalService - CRUD, queries and health summaries for animals

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::info;

use domain::entity::{Entity, EntityId};
use domain::model::animal::{Animal, AnimalStatus};
use domain::model::health_record::HealthRecord;
use domain::model::visit::Visit;
use domain::repository::{Page, Repository, SortOrder};
use domain::service::health::HealthEvaluator;
use domain::summary::AnimalHealthSummary;

use crate::error::{ServiceError, ServiceResult};

/// Animal service
///
/// Owns handles to the animal store plus the health-record and visit stores
/// the summary view reads from.
pub struct AnimalService<A, H, V>
where
    A: Repository<Animal>,
    H: Repository<HealthRecord>,
    V: Repository<Visit>,
{
    animals: A,
    health_records: H,
    visits: V,
    evaluator: HealthEvaluator,
}

impl<A, H, V> AnimalService<A, H, V>
where
    A: Repository<Animal>,
    H: Repository<HealthRecord>,
    V: Repository<Visit>,
{
    pub fn new(animals: A, health_records: H, visits: V) -> Self {
        Self {
            animals,
            health_records,
            visits,
            evaluator: HealthEvaluator::new(),
        }
    }

    fn validate(animal: &Animal) -> ServiceResult<()> {
        if animal.name.trim().is_empty() {
            return Err(ServiceError::InvalidArgument(
                "animal name must not be empty".to_string(),
            ));
        }
        if animal.species.trim().is_empty() {
            return Err(ServiceError::InvalidArgument(
                "animal species must not be empty".to_string(),
            ));
        }
        if let Some(birth) = animal.birth_date {
            if birth > animal.intake_date {
                return Err(ServiceError::InvalidArgument(
                    "birth date cannot be after intake date".to_string(),
                ));
            }
        }
        Ok(())
    }

    // ========== CRUD ==========

    /// Register a new animal
    pub fn register(&mut self, animal: Animal) -> ServiceResult<Animal> {
        Self::validate(&animal)?;
        let stored = self.animals.add(animal)?;
        info!(id = stored.id, name = %stored.name, "animal registered");
        Ok(stored)
    }

    /// Load one animal, soft-deleted included
    pub fn get(&self, id: EntityId) -> ServiceResult<Animal> {
        self.animals
            .get_by_id(id)?
            .ok_or(ServiceError::NotFound {
                kind: Animal::KIND,
                id,
            })
    }

    /// Replace an animal record
    pub fn update(&mut self, animal: Animal) -> ServiceResult<Animal> {
        Self::validate(&animal)?;
        Ok(self.animals.update(animal)?)
    }

    /// Soft-delete an animal
    pub fn remove(&mut self, id: EntityId) -> ServiceResult<()> {
        self.animals.delete(id)?;
        info!(id, "animal archived");
        Ok(())
    }

    /// Change the lifecycle status
    pub fn set_status(&mut self, id: EntityId, status: AnimalStatus) -> ServiceResult<Animal> {
        let mut animal = self.get(id)?;
        animal.status = status;
        let updated = self.animals.update(animal)?;
        info!(id, status = %status, "animal status changed");
        Ok(updated)
    }

    // ========== Queries ==========

    /// All animals that are not archived
    pub fn list_active(&self) -> ServiceResult<Vec<Animal>> {
        Ok(self.animals.find(|a| !a.is_deleted)?)
    }

    /// Active animals of one species (case-insensitive)
    pub fn by_species(&self, species: &str) -> ServiceResult<Vec<Animal>> {
        let wanted = species.to_lowercase();
        Ok(self
            .animals
            .find(|a| !a.is_deleted && a.canonical_species() == wanted)?)
    }

    /// Active animals with one lifecycle status
    pub fn by_status(&self, status: AnimalStatus) -> ServiceResult<Vec<Animal>> {
        Ok(self.animals.find(|a| !a.is_deleted && a.status == status)?)
    }

    /// Animals ready to go home, newest intake first
    pub fn available_for_adoption(&self) -> ServiceResult<Vec<Animal>> {
        Ok(self.animals.find_sorted(
            |a| !a.is_deleted && a.status == AnimalStatus::Available,
            |a| a.intake_date,
            SortOrder::Descending,
        )?)
    }

    /// Case-insensitive name search over active animals
    pub fn search_name(&self, query: &str) -> ServiceResult<Vec<Animal>> {
        let needle = query.to_lowercase();
        Ok(self
            .animals
            .find(|a| !a.is_deleted && a.name.to_lowercase().contains(&needle))?)
    }

    /// One page of active animals
    pub fn list_paged(&self, page: usize, page_size: usize) -> ServiceResult<Page<Animal>> {
        Ok(self
            .animals
            .get_paged_filtered(page, page_size, |a| !a.is_deleted)?)
    }

    /// Active animals grouped by canonical species
    pub fn group_by_species(&self) -> ServiceResult<BTreeMap<String, Vec<Animal>>> {
        Ok(self
            .animals
            .find_grouped(|a| !a.is_deleted, |a| a.canonical_species())?)
    }

    // ========== Health Summary ==========

    /// Build the combined health view for one animal
    ///
    /// Reads the animal, its latest health record and its visit history,
    /// then hands everything to the evaluator. `now` is explicit so the
    /// result is reproducible.
    pub fn health_summary(
        &self,
        id: EntityId,
        now: DateTime<Utc>,
    ) -> ServiceResult<AnimalHealthSummary> {
        let animal = self.get(id)?;

        let latest_record = self
            .health_records
            .find_sorted(
                |r| r.animal_id == id,
                |r| r.recorded_at,
                SortOrder::Descending,
            )?
            .into_iter()
            .next();

        let visits = self.visits.find(|v| v.animal_id == id)?;

        Ok(self
            .evaluator
            .summarize(animal, latest_record, &visits, now))
    }
}
