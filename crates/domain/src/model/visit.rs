//! Visit - a scheduled appointment for one animal
//!
//! A Visit is an Entity with a status state machine. Completed and
//! Cancelled are terminal; every other transition goes through the
//! methods below.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::{Entity, EntityId};

/// What kind of appointment this is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitKind {
    /// Veterinary examination or treatment
    Veterinary,
    /// Adoption meeting with a prospective owner
    Adoption,
    Grooming,
    Behavioural,
}

impl core::fmt::Display for VisitKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Veterinary => "Veterinary",
            Self::Adoption => "Adoption",
            Self::Grooming => "Grooming",
            Self::Behavioural => "Behavioural",
        };
        write!(f, "{}", label)
    }
}

/// The current status of a Visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitStatus {
    /// Booked, not yet confirmed
    Scheduled,
    /// No free slot; waiting for one
    Waitlisted,
    /// Confirmed by both sides
    Confirmed,
    /// Took place
    Completed,
    /// Called off
    Cancelled,
}

impl VisitStatus {
    /// Completed and Cancelled visits accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl core::fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Scheduled => "Scheduled",
            Self::Waitlisted => "Waitlisted",
            Self::Confirmed => "Confirmed",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        };
        write!(f, "{}", label)
    }
}

/// Errors that can occur during Visit state transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisitError {
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: VisitStatus, to: VisitStatus },
}

/// Visit record, referencing its animal (and optionally a customer) by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    /// Unique identifier (assigned by the store)
    pub id: EntityId,
    /// The animal this visit is about
    pub animal_id: EntityId,
    /// The customer attending, if any
    pub customer_id: Option<EntityId>,
    /// Kind of appointment
    pub kind: VisitKind,
    /// Current status
    pub status: VisitStatus,
    /// When the visit is planned
    pub planned_at: DateTime<Utc>,
    /// When the visit actually took place
    pub actual_at: Option<DateTime<Utc>>,
    /// Planned duration in minutes
    pub duration_minutes: u32,
    /// Free-text notes
    pub notes: String,
}

impl Visit {
    /// Create a new visit in Scheduled state
    pub fn new(
        animal_id: EntityId,
        kind: VisitKind,
        planned_at: DateTime<Utc>,
        duration_minutes: u32,
    ) -> Self {
        Self {
            id: 0,
            animal_id,
            customer_id: None,
            kind,
            status: VisitStatus::Scheduled,
            planned_at,
            actual_at: None,
            duration_minutes,
            notes: String::new(),
        }
    }

    /// Builder: attach a customer
    pub fn with_customer(mut self, customer_id: EntityId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    /// Builder: set notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    // ========== State Transitions ==========

    /// Confirm a scheduled or waitlisted visit
    pub fn confirm(&mut self) -> Result<(), VisitError> {
        match self.status {
            VisitStatus::Scheduled | VisitStatus::Waitlisted => {
                self.status = VisitStatus::Confirmed;
                Ok(())
            }
            from => Err(VisitError::InvalidStateTransition {
                from,
                to: VisitStatus::Confirmed,
            }),
        }
    }

    /// Move a scheduled visit to the waitlist
    pub fn waitlist(&mut self) -> Result<(), VisitError> {
        match self.status {
            VisitStatus::Scheduled => {
                self.status = VisitStatus::Waitlisted;
                Ok(())
            }
            from => Err(VisitError::InvalidStateTransition {
                from,
                to: VisitStatus::Waitlisted,
            }),
        }
    }

    /// Mark the visit as completed, stamping when it took place
    pub fn complete(&mut self, actual_at: DateTime<Utc>) -> Result<(), VisitError> {
        match self.status {
            VisitStatus::Scheduled | VisitStatus::Confirmed => {
                self.status = VisitStatus::Completed;
                self.actual_at = Some(actual_at);
                Ok(())
            }
            from => Err(VisitError::InvalidStateTransition {
                from,
                to: VisitStatus::Completed,
            }),
        }
    }

    /// Cancel any visit that has not reached a terminal state
    pub fn cancel(&mut self) -> Result<(), VisitError> {
        if self.status.is_terminal() {
            return Err(VisitError::InvalidStateTransition {
                from: self.status,
                to: VisitStatus::Cancelled,
            });
        }
        self.status = VisitStatus::Cancelled;
        Ok(())
    }

    // ========== Queries ==========

    /// Planned in the future and not called off or already over
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.planned_at > now && !self.status.is_terminal()
    }

    /// Already took place, or reached a terminal state
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.actual_at.is_some_and(|at| at <= now) || self.status.is_terminal()
    }

    /// Actual date when known, planned date otherwise
    pub fn effective_date(&self) -> DateTime<Utc> {
        self.actual_at.unwrap_or(self.planned_at)
    }
}

impl Entity for Visit {
    const KIND: &'static str = "Visit";

    fn id(&self) -> EntityId {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_visit_lifecycle() {
        let mut visit = Visit::new(1, VisitKind::Veterinary, at(2026, 9, 1), 30);
        assert_eq!(visit.status, VisitStatus::Scheduled);

        visit.confirm().unwrap();
        assert_eq!(visit.status, VisitStatus::Confirmed);

        visit.complete(at(2026, 9, 1)).unwrap();
        assert_eq!(visit.status, VisitStatus::Completed);
        assert_eq!(visit.actual_at, Some(at(2026, 9, 1)));
    }

    #[test]
    fn test_waitlist_then_confirm() {
        let mut visit = Visit::new(1, VisitKind::Adoption, at(2026, 9, 1), 45);
        visit.waitlist().unwrap();
        assert_eq!(visit.status, VisitStatus::Waitlisted);

        visit.confirm().unwrap();
        assert_eq!(visit.status, VisitStatus::Confirmed);
    }

    #[test]
    fn test_invalid_transitions() {
        let mut visit = Visit::new(1, VisitKind::Veterinary, at(2026, 9, 1), 30);
        visit.cancel().unwrap();

        // Terminal state refuses everything
        assert!(visit.confirm().is_err());
        assert!(visit.waitlist().is_err());
        assert!(visit.complete(at(2026, 9, 1)).is_err());
        assert!(visit.cancel().is_err());
        assert_eq!(visit.status, VisitStatus::Cancelled);
    }

    #[test]
    fn test_cannot_waitlist_confirmed() {
        let mut visit = Visit::new(1, VisitKind::Grooming, at(2026, 9, 1), 30);
        visit.confirm().unwrap();

        let result = visit.waitlist();
        assert_eq!(
            result,
            Err(VisitError::InvalidStateTransition {
                from: VisitStatus::Confirmed,
                to: VisitStatus::Waitlisted,
            })
        );
    }

    #[test]
    fn test_upcoming_and_past() {
        let now = at(2026, 8, 1);

        let future = Visit::new(1, VisitKind::Veterinary, at(2026, 9, 1), 30);
        assert!(future.is_upcoming(now));
        assert!(!future.is_past(now));

        let mut done = Visit::new(1, VisitKind::Veterinary, at(2026, 7, 1), 30);
        done.complete(at(2026, 7, 1)).unwrap();
        assert!(!done.is_upcoming(now));
        assert!(done.is_past(now));

        // Cancelled counts as past even when planned in the future
        let mut cancelled = Visit::new(1, VisitKind::Veterinary, at(2026, 9, 1), 30);
        cancelled.cancel().unwrap();
        assert!(!cancelled.is_upcoming(now));
        assert!(cancelled.is_past(now));
    }

    #[test]
    fn test_effective_date() {
        let mut visit = Visit::new(1, VisitKind::Veterinary, at(2026, 9, 1), 30);
        assert_eq!(visit.effective_date(), at(2026, 9, 1));

        visit.complete(at(2026, 9, 2)).unwrap();
        assert_eq!(visit.effective_date(), at(2026, 9, 2));
    }
}
