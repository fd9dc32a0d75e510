//! Employee - shelter staff

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};

/// Staff role within the shelter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffRole {
    Veterinarian,
    Caretaker,
    Receptionist,
    Manager,
}

impl core::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Veterinarian => "Veterinarian",
            Self::Caretaker => "Caretaker",
            Self::Receptionist => "Receptionist",
            Self::Manager => "Manager",
        };
        write!(f, "{}", label)
    }
}

/// Employee record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier (assigned by the store)
    pub id: EntityId,
    /// Full name
    pub name: String,
    /// Staff role
    pub role: StaffRole,
    /// First day of employment
    pub hired_at: NaiveDate,
    /// Soft-delete flag
    pub is_deleted: bool,
    /// When the record was soft-deleted
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Employee {
    pub fn new(name: impl Into<String>, role: StaffRole, hired_at: NaiveDate) -> Self {
        Self {
            id: 0,
            name: name.into(),
            role,
            hired_at,
            is_deleted: false,
            deleted_at: None,
        }
    }
}

impl Entity for Employee {
    const KIND: &'static str = "Employee";
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_employee() {
        let vet = Employee::new(
            "Dr. Holm",
            StaffRole::Veterinarian,
            NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
        );

        assert_eq!(vet.role, StaffRole::Veterinarian);
        assert_eq!(vet.role.to_string(), "Veterinarian");
        assert!(!vet.is_deleted);
    }
}
