//! AnimalHealthSummary - a derived, read-only view of one animal's health
//!
//! Built on demand from an animal, its latest health record, and its visit
//! history. Never stored, discarded after use.

use serde::{Deserialize, Serialize};

use crate::model::animal::Animal;
use crate::model::health_record::HealthRecord;
use crate::model::visit::Visit;

/// The single derived health status of an animal
///
/// `Display` produces the human-readable label the front-ends show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Deceased,
    Adopted,
    Reserved,
    /// No health record exists at all
    Unknown,
    NeedsVaccination,
    Critical,
    Severe,
    /// Latest diagnosis is an illness or injury
    UnderObservation,
    /// The animal's lifecycle status says in-treatment
    UnderTreatment,
    Healthy,
}

impl core::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Deceased => "Deceased",
            Self::Adopted => "Adopted",
            Self::Reserved => "Reserved",
            Self::Unknown => "Unknown (no record)",
            Self::NeedsVaccination => "Needs vaccination",
            Self::Critical => "Critical",
            Self::Severe => "Severe",
            Self::UnderObservation => "Under observation/treatment",
            Self::UnderTreatment => "Under treatment",
            Self::Healthy => "Apparently healthy",
        };
        write!(f, "{}", label)
    }
}

/// Combined health view of one animal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalHealthSummary {
    pub animal: Animal,
    /// Most recent health record, if any exists
    pub latest_record: Option<HealthRecord>,
    /// Visits planned in the future, ascending by planned date
    pub upcoming_visits: Vec<Visit>,
    /// Visits already over, descending by when they took place
    pub past_visits: Vec<Visit>,
    /// Derived status
    pub health_status: HealthStatus,
    /// Derived alerts, in a fixed order
    pub health_alerts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(HealthStatus::Unknown.to_string(), "Unknown (no record)");
        assert_eq!(
            HealthStatus::NeedsVaccination.to_string(),
            "Needs vaccination"
        );
        assert_eq!(
            HealthStatus::UnderObservation.to_string(),
            "Under observation/treatment"
        );
        assert_eq!(HealthStatus::Healthy.to_string(), "Apparently healthy");
    }
}
