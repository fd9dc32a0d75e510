//! Customer - an adopter or regular visitor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};

/// Customer record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier (assigned by the store)
    pub id: EntityId,
    /// Full name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Postal address, if provided
    pub address: Option<String>,
    /// When the customer registered
    pub registered_at: DateTime<Utc>,
    /// Soft-delete flag
    pub is_deleted: bool,
    /// When the record was soft-deleted
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Customer {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            address: None,
            registered_at,
            is_deleted: false,
            deleted_at: None,
        }
    }

    /// Builder: set address
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

impl Entity for Customer {
    const KIND: &'static str = "Customer";
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
    fn test_new_customer() {
        let customer = Customer::new("Jane Doe", "jane@example.com", "+45 12345678", Utc::now())
            .with_address("1 Shelter Lane");

        assert_eq!(customer.id, 0);
        assert_eq!(customer.email, "jane@example.com");
        assert_eq!(customer.address.as_deref(), Some("1 Shelter Lane"));
        assert!(!customer.is_deleted);
    }
}
