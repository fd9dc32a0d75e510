//! HealthRecord - a veterinary examination record for one animal
//!
//! Severity and diagnosis are closed enumerations with a free-text note
//! fallback, so downstream reasoning matches on variants instead of
//! substrings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};

/// Severity assessed at examination time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Normal,
    Mild,
    Moderate,
    Severe,
    Critical,
}

impl Severity {
    /// Severe and Critical conditions trigger alerts
    pub fn is_alarming(&self) -> bool {
        matches!(self, Self::Severe | Self::Critical)
    }
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Normal => "Normal",
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
            Self::Critical => "Critical",
        };
        write!(f, "{}", label)
    }
}

/// Diagnosis category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosisCategory {
    Vaccination,
    RoutineCheckup,
    Illness,
    Injury,
    Other,
}

impl core::fmt::Display for DiagnosisCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Vaccination => "Vaccination",
            Self::RoutineCheckup => "Routine checkup",
            Self::Illness => "Illness",
            Self::Injury => "Injury",
            Self::Other => "Other",
        };
        write!(f, "{}", label)
    }
}

/// Diagnosis: a category plus the veterinarian's free-text note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub category: DiagnosisCategory,
    pub note: String,
}

impl Diagnosis {
    pub fn new(category: DiagnosisCategory, note: impl Into<String>) -> Self {
        Self {
            category,
            note: note.into(),
        }
    }

    /// Routine entries (vaccinations, checkups) don't raise diagnosis alerts
    pub fn is_routine(&self) -> bool {
        matches!(
            self.category,
            DiagnosisCategory::Vaccination | DiagnosisCategory::RoutineCheckup
        )
    }
}

impl core::fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.note.is_empty() {
            write!(f, "{}", self.category)
        } else {
            write!(f, "{} ({})", self.category, self.note)
        }
    }
}

/// Health record, referencing its animal by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    /// Unique identifier (assigned by the store)
    pub id: EntityId,
    /// The examined animal
    pub animal_id: EntityId,
    /// Examination date
    pub recorded_at: NaiveDate,
    /// Diagnosis
    pub diagnosis: Diagnosis,
    /// Assessed severity
    pub severity: Severity,
    /// Prescribed treatment, if any
    pub treatment: String,
    /// Whether the animal is up to date on vaccinations
    pub vaccinated: bool,
    /// When the next vaccination is due
    pub next_vaccination_date: Option<NaiveDate>,
    /// Examining veterinarian
    pub veterinarian: Option<String>,
}

impl HealthRecord {
    /// Create a new record for an animal
    pub fn new(animal_id: EntityId, recorded_at: NaiveDate, diagnosis: Diagnosis) -> Self {
        Self {
            id: 0,
            animal_id,
            recorded_at,
            diagnosis,
            severity: Severity::Normal,
            treatment: String::new(),
            vaccinated: false,
            next_vaccination_date: None,
            veterinarian: None,
        }
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Builder: set treatment
    pub fn with_treatment(mut self, treatment: impl Into<String>) -> Self {
        self.treatment = treatment.into();
        self
    }

    /// Builder: mark vaccinated, with the next due date
    pub fn with_vaccination(mut self, next_due: Option<NaiveDate>) -> Self {
        self.vaccinated = true;
        self.next_vaccination_date = next_due;
        self
    }

    /// Builder: set veterinarian
    pub fn with_veterinarian(mut self, name: impl Into<String>) -> Self {
        self.veterinarian = Some(name.into());
        self
    }

    /// Whether the next vaccination is due on or before `today`
    pub fn vaccination_due(&self, today: NaiveDate) -> bool {
        self.next_vaccination_date.is_some_and(|due| due <= today)
    }
}

impl Entity for HealthRecord {
    const KIND: &'static str = "HealthRecord";

    fn id(&self) -> EntityId {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }
}
