//! Service-level error type

use thiserror::Error;

use domain::entity::EntityId;
use domain::model::visit::VisitError;
use domain::repository::StoreError;

/// Errors raised by the domain services
///
/// Store and state-machine errors pass through transparently; the service
/// adds its own variants for input validation and reference checks.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller supplied an out-of-contract value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A referenced entity does not exist
    #[error("{kind} with id {id} not found")]
    NotFound { kind: &'static str, id: EntityId },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transition(#[from] VisitError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
