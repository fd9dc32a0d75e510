//! Animal - the central entity of the shelter
//!
//! An Animal is an Entity (has identity that persists through changes).
//! Health records and visits reference it by id only; the animal does not
//! own those objects.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};

/// Lifecycle status of a sheltered animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimalStatus {
    /// In the shelter, can be adopted
    Available,
    /// Left the shelter with a new owner
    Adopted,
    /// Promised to an adopter, not yet picked up
    Reserved,
    /// Under veterinary treatment
    InTreatment,
    /// Deceased
    Deceased,
}

impl AnimalStatus {
    /// Terminal or administrative states that short-circuit all
    /// health-record-based reasoning
    pub fn is_administrative(&self) -> bool {
        matches!(self, Self::Adopted | Self::Reserved | Self::Deceased)
    }
}

impl core::fmt::Display for AnimalStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Available => "Available",
            Self::Adopted => "Adopted",
            Self::Reserved => "Reserved",
            Self::InTreatment => "In treatment",
            Self::Deceased => "Deceased",
        };
        write!(f, "{}", label)
    }
}

/// Animal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    /// Unique identifier (assigned by the store)
    pub id: EntityId,
    /// Display name
    pub name: String,
    /// Species (free text, e.g. "dog", "cat")
    pub species: String,
    /// Breed, if known
    pub breed: Option<String>,
    /// Lifecycle status
    pub status: AnimalStatus,
    /// Date of birth, if known
    pub birth_date: Option<NaiveDate>,
    /// Date the animal arrived at the shelter
    pub intake_date: NaiveDate,
    /// Weight in kg
    pub weight_kg: Option<f64>,
    /// Soft-delete flag
    pub is_deleted: bool,
    /// When the record was soft-deleted
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Animal {
    /// Create a new animal, available for adoption
    pub fn new(
        name: impl Into<String>,
        species: impl Into<String>,
        intake_date: NaiveDate,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            species: species.into(),
            breed: None,
            status: AnimalStatus::Available,
            birth_date: None,
            intake_date,
            weight_kg: None,
            is_deleted: false,
            deleted_at: None,
        }
    }

    /// Builder: set breed
    pub fn with_breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = Some(breed.into());
        self
    }

    /// Builder: set birth date
    pub fn with_birth_date(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    /// Builder: set weight in kg
    pub fn with_weight_kg(mut self, weight: f64) -> Self {
        self.weight_kg = Some(weight);
        self
    }

    /// Builder: set lifecycle status
    pub fn with_status(mut self, status: AnimalStatus) -> Self {
        self.status = status;
        self
    }

    /// Canonical species name (lowercase)
    pub fn canonical_species(&self) -> String {
        self.species.to_lowercase()
    }

    /// Whether the animal is still in the shelter's care
    pub fn in_care(&self) -> bool {
        matches!(
            self.status,
            AnimalStatus::Available | AnimalStatus::Reserved | AnimalStatus::InTreatment
        )
    }
}

impl Entity for Animal {
    const KIND: &'static str = "Animal";
    const SOFT_DELETE: bool = true;

    fn id(&self) -> EntityId {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
    }

    fn clear_deletion(&mut self) {
        self.is_deleted = false;
        self.deleted_at = None;
    }
}
