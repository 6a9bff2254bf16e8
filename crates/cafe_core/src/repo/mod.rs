//! Repository layer: SQLite persistence for cafés and employees.
//!
//! # Responsibility
//! - Own every SQL statement touching `cafes` and `employees`.
//! - Run multi-step writes inside one [`unit::AtomicUnit`].
//! - Return semantic errors (`NotFound`, `AlreadyExists`) next to storage
//!   transport errors.
//!
//! # Invariants
//! - Duplicate checks, existence checks, writes and cascades of one request
//!   share one transaction.
//! - A `UNIQUE` violation surfacing from storage maps to `AlreadyExists`.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod cafe_repo;
pub mod cascade;
pub mod duplicate;
pub mod employee_repo;
pub mod ids;
pub mod unit;

pub type RepoResult<T> = Result<T, RepoError>;

/// Record family an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Cafe,
    Employee,
}

impl Entity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cafe => "cafe",
            Self::Employee => "employee",
        }
    }
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from café/employee persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// No record carries the given external identifier.
    NotFound { entity: Entity, id: String },
    /// The write would break a uniqueness rule.
    AlreadyExists { entity: Entity },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
}

impl RepoError {
    pub(crate) fn not_found(entity: Entity, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Maps a write failure, turning `UNIQUE` violations into `AlreadyExists`.
    pub(crate) fn from_write(entity: Entity, err: rusqlite::Error) -> Self {
        let err = DbError::from(err);
        if err.is_unique_violation() {
            Self::AlreadyExists { entity }
        } else {
            Self::Db(err)
        }
    }

    /// Stable snake_case code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Db(_) => "db_error",
            Self::NotFound { .. } => "not_found",
            Self::AlreadyExists { .. } => "already_exists",
            Self::UninitializedConnection { .. } => "uninitialized_connection",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::AlreadyExists { entity } => write!(f, "{entity} already exists"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Rejects connections that did not go through `open_db*`.
pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}
