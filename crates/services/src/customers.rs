//! CustomerService - adopters and regular visitors

use tracing::info;

use domain::entity::{Entity, EntityId};
use domain::model::customer::Customer;
use domain::repository::Repository;

use crate::error::{ServiceError, ServiceResult};

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const PHONE_PATTERN: &str = r"^\+?[0-9][0-9 \-]{4,18}[0-9]$";

fn matches_pattern(pattern: &str, text: &str) -> bool {
    regex::Regex::new(pattern)
        .map(|r| r.is_match(text))
        .unwrap_or(false)
}

/// Customer service
pub struct CustomerService<C>
where
    C: Repository<Customer>,
{
    customers: C,
}

impl<C> CustomerService<C>
where
    C: Repository<Customer>,
{
    pub fn new(customers: C) -> Self {
        Self { customers }
    }

    fn validate(customer: &Customer) -> ServiceResult<()> {
        if customer.name.trim().is_empty() {
            return Err(ServiceError::InvalidArgument(
                "customer name must not be empty".to_string(),
            ));
        }
        if !matches_pattern(EMAIL_PATTERN, &customer.email) {
            return Err(ServiceError::InvalidArgument(format!(
                "'{}' is not a valid email address",
                customer.email
            )));
        }
        if !matches_pattern(PHONE_PATTERN, &customer.phone) {
            return Err(ServiceError::InvalidArgument(format!(
                "'{}' is not a valid phone number",
                customer.phone
            )));
        }
        Ok(())
    }

    /// Register a new customer
    pub fn register(&mut self, customer: Customer) -> ServiceResult<Customer> {
        Self::validate(&customer)?;
        let stored = self.customers.add(customer)?;
        info!(id = stored.id, name = %stored.name, "customer registered");
        Ok(stored)
    }

    /// Load one customer
    pub fn get(&self, id: EntityId) -> ServiceResult<Customer> {
        self.customers.get_by_id(id)?.ok_or(ServiceError::NotFound {
            kind: Customer::KIND,
            id,
        })
    }

    /// Replace a customer record
    pub fn update(&mut self, customer: Customer) -> ServiceResult<Customer> {
        Self::validate(&customer)?;
        Ok(self.customers.update(customer)?)
    }

    /// Soft-delete a customer
    pub fn deactivate(&mut self, id: EntityId) -> ServiceResult<()> {
        self.customers.delete(id)?;
        info!(id, "customer deactivated");
        Ok(())
    }

    /// All customers that are not deactivated
    pub fn list_active(&self) -> ServiceResult<Vec<Customer>> {
        Ok(self.customers.find(|c| !c.is_deleted)?)
    }

    /// Case-insensitive name search over active customers
    pub fn search_name(&self, query: &str) -> ServiceResult<Vec<Customer>> {
        let needle = query.to_lowercase();
        Ok(self
            .customers
            .find(|c| !c.is_deleted && c.name.to_lowercase().contains(&needle))?)
    }
}
