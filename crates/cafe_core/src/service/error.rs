//! Caller-facing error taxonomy.
//!
//! # Invariants
//! - `ValidationFailed` is produced before any unit starts.
//! - `AlreadyExists` and `NotFound` come out of an aborted unit.
//! - `Internal` keeps the original storage error as its source.

use crate::repo::{Entity, RepoError};
use crate::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// One or more field validators failed; storage untouched.
    ValidationFailed(ValidationError),
    /// Uniqueness rule violated.
    AlreadyExists(Entity),
    /// No record matches the given external id.
    NotFound { entity: Entity, id: String },
    /// Storage failure; the unit was aborted.
    Internal(RepoError),
}

impl ServiceError {
    /// Stable code for routing layers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ValidationFailed(_) => "ValidationFailed",
            Self::AlreadyExists(_) => "AlreadyExists",
            Self::NotFound { .. } => "NotFound",
            Self::Internal(_) => "Internal",
        }
    }

    /// Field-level messages; empty for non-validation errors.
    pub fn messages(&self) -> &[String] {
        match self {
            Self::ValidationFailed(err) => &err.messages,
            _ => &[],
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationFailed(err) => write!(f, "{err}"),
            Self::AlreadyExists(Entity::Cafe) => write!(f, "Cafe already exists"),
            Self::AlreadyExists(Entity::Employee) => write!(f, "Employee already exists"),
            Self::NotFound {
                entity: Entity::Cafe,
                id,
            } => write!(f, "Cafe not found: {id}"),
            Self::NotFound {
                entity: Entity::Employee,
                id,
            } => write!(f, "Employee not found: {id}"),
            Self::Internal(err) => write!(f, "internal storage error: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ValidationFailed(err) => Some(err),
            Self::Internal(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::ValidationFailed(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::AlreadyExists { entity } => Self::AlreadyExists(entity),
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Internal(other),
        }
    }
}
