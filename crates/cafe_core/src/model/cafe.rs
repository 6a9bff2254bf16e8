//! Café records.
//!
//! # Invariants
//! - `(name, location)` is unique across all cafés.
//! - `employee_count` only exists on the read model and is derived at query
//!   time; it is never stored on the café row.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Client-facing café identifier.
pub type CafeId = Uuid;

/// Storage-assigned join key for cafés.
///
/// Only the repository layer constructs keys; callers receive them on
/// [`Cafe`] for joins and never see them serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CafeKey(i64);

impl CafeKey {
    pub(crate) fn from_raw(value: i64) -> Self {
        Self(value)
    }

    /// Raw rowid value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for CafeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-supplied café fields for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CafeDraft {
    pub name: String,
    pub description: String,
    /// Logo reference (URL or asset path).
    #[serde(default)]
    pub logo: Option<String>,
    pub location: String,
}

impl CafeDraft {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        logo: Option<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            logo,
            location: location.into(),
        }
    }
}

/// Persisted café record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cafe {
    /// External identifier, serialized as `id`.
    #[serde(rename = "id")]
    pub cafe_id: CafeId,
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    pub location: String,
    /// Internal join key.
    #[serde(skip)]
    pub key: Option<CafeKey>,
}

/// Row of the café listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CafeSummary {
    #[serde(rename = "id")]
    pub cafe_id: CafeId,
    pub name: String,
    pub description: String,
    /// Number of employees currently assigned, serialized as `employees`.
    #[serde(rename = "employees")]
    pub employee_count: u32,
    pub logo: Option<String>,
    pub location: String,
}

/// Result of a successful café delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedCafe {
    pub cafe_id: CafeId,
    pub deleted_name: String,
    /// Employees whose assignment was cleared by the cascade.
    pub released_employees: usize,
}
