//! # Haven Domain Layer
//!
//! Entities, the repository port, and the health aggregation engine.
//!
//! ```text
//! model/      - Entities and value objects
//! entity      - The Entity contract (id + optional soft delete)
//! repository  - The Repository trait (port, not implementation)
//! summary     - The derived AnimalHealthSummary view
//! service/    - Domain services (HealthEvaluator)
//! ```

pub mod entity;
pub mod model;
pub mod repository;
pub mod service;
pub mod summary;

// Re-export commonly used types
pub use entity::{Entity, EntityId};
pub use model::{
    animal::{Animal, AnimalStatus},
    customer::Customer,
    employee::{Employee, StaffRole},
    health_record::{Diagnosis, DiagnosisCategory, HealthRecord, Severity},
    visit::{Visit, VisitError, VisitKind, VisitStatus},
};
pub use repository::{Page, Repository, SortOrder, StoreError, StoreResult};
pub use service::health::{HealthEvaluation, HealthEvaluator};
pub use summary::{AnimalHealthSummary, HealthStatus};
