//! # Haven Services
//!
//! One domain service per entity type. Services validate input, translate
//! missing references into not-found errors, delegate CRUD to a repository,
//! and assemble the derived health summary.

pub mod animals;
pub mod customers;
pub mod employees;
pub mod error;
pub mod health_records;
pub mod visits;

// Re-exports
pub use animals::AnimalService;
pub use customers::CustomerService;
pub use employees::EmployeeService;
pub use error::{ServiceError, ServiceResult};
pub use health_records::HealthRecordService;
pub use visits::VisitService;
