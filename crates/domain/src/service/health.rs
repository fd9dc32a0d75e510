//! Health evaluation - deriving one status and a list of alerts
//!
//! The evaluator is a decision chain: conditions are checked top to bottom
//! and the first match determines the status. Alerts are collected
//! independently and their order is fixed.
//!
//! This is pure domain logic - no I/O, no mutation, deterministic given its
//! inputs. "Now" is an explicit input for exactly that reason.

use chrono::{DateTime, Utc};

use crate::model::animal::{Animal, AnimalStatus};
use crate::model::health_record::{DiagnosisCategory, HealthRecord, Severity};
use crate::model::visit::{Visit, VisitKind};
use crate::summary::{AnimalHealthSummary, HealthStatus};

/// Result of evaluating one animal's health
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthEvaluation {
    pub status: HealthStatus,
    pub alerts: Vec<String>,
}

/// HealthEvaluator - the aggregation engine
///
/// Stateless; all inputs arrive per call.
pub struct HealthEvaluator;

impl HealthEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Derive status and alerts for one animal
    pub fn evaluate(
        &self,
        animal: &Animal,
        latest_record: Option<&HealthRecord>,
        visits: &[Visit],
        now: DateTime<Utc>,
    ) -> HealthEvaluation {
        let (upcoming, _) = self.partition_visits(visits, now);

        HealthEvaluation {
            status: self.derive_status(animal, latest_record, now),
            alerts: self.collect_alerts(animal, latest_record, &upcoming, now),
        }
    }

    /// Build the full summary view for one animal
    pub fn summarize(
        &self,
        animal: Animal,
        latest_record: Option<HealthRecord>,
        visits: &[Visit],
        now: DateTime<Utc>,
    ) -> AnimalHealthSummary {
        let (upcoming_visits, past_visits) = self.partition_visits(visits, now);
        let evaluation = self.evaluate(&animal, latest_record.as_ref(), visits, now);

        AnimalHealthSummary {
            animal,
            latest_record,
            upcoming_visits,
            past_visits,
            health_status: evaluation.status,
            health_alerts: evaluation.alerts,
        }
    }

    /// The status decision chain, first match wins
    fn derive_status(
        &self,
        animal: &Animal,
        latest_record: Option<&HealthRecord>,
        now: DateTime<Utc>,
    ) -> HealthStatus {
        // 1. Administrative states short-circuit all record-based reasoning
        match animal.status {
            AnimalStatus::Deceased => return HealthStatus::Deceased,
            AnimalStatus::Adopted => return HealthStatus::Adopted,
            AnimalStatus::Reserved => return HealthStatus::Reserved,
            AnimalStatus::Available | AnimalStatus::InTreatment => {}
        }

        // 2. Nothing on file
        let Some(record) = latest_record else {
            return HealthStatus::Unknown;
        };

        // 3. Overdue vaccination outranks the recorded condition
        if record.vaccination_due(now.date_naive()) {
            return HealthStatus::NeedsVaccination;
        }

        // 4. Alarming severity
        if record.severity == Severity::Critical {
            return HealthStatus::Critical;
        }
        if record.severity == Severity::Severe {
            return HealthStatus::Severe;
        }

        // 5. Sickness or injury on the latest diagnosis
        if matches!(
            record.diagnosis.category,
            DiagnosisCategory::Illness | DiagnosisCategory::Injury
        ) {
            return HealthStatus::UnderObservation;
        }

        // 6. Lifecycle says in-treatment even though the record looks fine
        if animal.status == AnimalStatus::InTreatment {
            return HealthStatus::UnderTreatment;
        }

        // 7.
        HealthStatus::Healthy
    }

    /// Alert collection, independent of the status chain
    fn collect_alerts(
        &self,
        animal: &Animal,
        latest_record: Option<&HealthRecord>,
        upcoming: &[Visit],
        now: DateTime<Utc>,
    ) -> Vec<String> {
        let mut alerts = Vec::new();
        let today = now.date_naive();

        if animal.status == AnimalStatus::InTreatment {
            alerts.push("Animal is marked 'Under treatment'.".to_string());
        }

        match latest_record {
            Some(record) => {
                if let Some(due) = record.next_vaccination_date.filter(|due| *due <= today) {
                    alerts.push(format!("Vaccination due on {}.", due));
                } else if !record.vaccinated {
                    alerts.push("Vaccination status unknown.".to_string());
                }
            }
            None => alerts.push("Vaccination status unknown.".to_string()),
        }

        if let Some(record) = latest_record {
            if record.severity.is_alarming() {
                alerts.push(format!(
                    "{} condition: {}.",
                    record.severity, record.diagnosis
                ));
            }

            if !record.diagnosis.is_routine() {
                alerts.push(format!("Latest diagnosis: {}.", record.diagnosis));
            }
        }

        let veterinary_count = upcoming
            .iter()
            .filter(|v| v.kind == VisitKind::Veterinary)
            .count();
        if veterinary_count > 0 {
            alerts.push(format!(
                "{} upcoming veterinary visit(s).",
                veterinary_count
            ));
        }

        if alerts.is_empty() {
            alerts.push("No immediate health alerts.".to_string());
        }

        alerts
    }

    /// Split visits into (upcoming, past)
    ///
    /// Upcoming: planned in the future and not terminal, ascending by
    /// planned date. Past: already took place or terminal, descending by
    /// actual date when known, planned date otherwise.
    pub fn partition_visits(
        &self,
        visits: &[Visit],
        now: DateTime<Utc>,
    ) -> (Vec<Visit>, Vec<Visit>) {
        let mut upcoming: Vec<Visit> = visits
            .iter()
            .filter(|v| v.is_upcoming(now))
            .cloned()
            .collect();
        upcoming.sort_by_key(|v| v.planned_at);

        let mut past: Vec<Visit> = visits.iter().filter(|v| v.is_past(now)).cloned().collect();
        past.sort_by_key(|v| std::cmp::Reverse(v.effective_date()));

        (upcoming, past)
    }
}

impl Default for HealthEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
