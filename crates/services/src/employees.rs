//! EmployeeService - shelter staff

use chrono::Utc;
use tracing::info;

use domain::entity::{Entity, EntityId};
use domain::model::employee::{Employee, StaffRole};
use domain::repository::Repository;

use crate::error::{ServiceError, ServiceResult};

/// Employee service
pub struct EmployeeService<E>
where
    E: Repository<Employee>,
{
    employees: E,
}

impl<E> EmployeeService<E>
where
    E: Repository<Employee>,
{
    pub fn new(employees: E) -> Self {
        Self { employees }
    }

    fn validate(employee: &Employee) -> ServiceResult<()> {
        if employee.name.trim().is_empty() {
            return Err(ServiceError::InvalidArgument(
                "employee name must not be empty".to_string(),
            ));
        }
        if employee.hired_at > Utc::now().date_naive() {
            return Err(ServiceError::InvalidArgument(
                "hire date cannot be in the future".to_string(),
            ));
        }
        Ok(())
    }

    /// Register a new employee
    pub fn register(&mut self, employee: Employee) -> ServiceResult<Employee> {
        Self::validate(&employee)?;
        let stored = self.employees.add(employee)?;
        info!(id = stored.id, name = %stored.name, role = %stored.role, "employee registered");
        Ok(stored)
    }

    /// Load one employee
    pub fn get(&self, id: EntityId) -> ServiceResult<Employee> {
        self.employees.get_by_id(id)?.ok_or(ServiceError::NotFound {
            kind: Employee::KIND,
            id,
        })
    }

    /// Replace an employee record
    pub fn update(&mut self, employee: Employee) -> ServiceResult<Employee> {
        Self::validate(&employee)?;
        Ok(self.employees.update(employee)?)
    }

    /// Soft-delete an employee
    pub fn deactivate(&mut self, id: EntityId) -> ServiceResult<()> {
        self.employees.delete(id)?;
        info!(id, "employee deactivated");
        Ok(())
    }

    /// All employees that are not deactivated
    pub fn list_active(&self) -> ServiceResult<Vec<Employee>> {
        Ok(self.employees.find(|e| !e.is_deleted)?)
    }

    /// Active employees with one staff role
    pub fn by_role(&self, role: StaffRole) -> ServiceResult<Vec<Employee>> {
        Ok(self.employees.find(|e| !e.is_deleted && e.role == role)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use store::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service() -> EmployeeService<MemoryStore<Employee>> {
        EmployeeService::new(MemoryStore::new())
    }

    #[test]
    fn test_register_and_filter_by_role() {
        let mut service = service();
        service
            .register(Employee::new("Dr. Holm", StaffRole::Veterinarian, date(2023, 2, 1)))
            .unwrap();
        service
            .register(Employee::new("Sam", StaffRole::Caretaker, date(2024, 5, 1)))
            .unwrap();

        let vets = service.by_role(StaffRole::Veterinarian).unwrap();
        assert_eq!(vets.len(), 1);
        assert_eq!(vets[0].name, "Dr. Holm");
    }

    #[test]
    fn test_register_rejects_future_hire_date() {
        let mut service = service();
        let result = service.register(Employee::new(
            "Time Traveller",
            StaffRole::Manager,
            date(2099, 1, 1),
        ));
        assert!(matches!(result, Err(ServiceError::InvalidArgument(_))));
    }

    #[test]
    fn test_deactivate() {
        let mut service = service();
        let stored = service
            .register(Employee::new("Sam", StaffRole::Caretaker, date(2024, 5, 1)))
            .unwrap();

        service.deactivate(stored.id).unwrap();
        assert!(service.list_active().unwrap().is_empty());
    }
}
