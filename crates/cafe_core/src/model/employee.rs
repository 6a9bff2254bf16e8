//! Employee records.
//!
//! # Invariants
//! - `employee_id` always matches `^[A-Z]{2}[A-Z0-9]{7}$`; generated ids use
//!   the `UI` prefix.
//! - `cafe` is either `None` or the key of an existing café. Café deletion
//!   clears it; it never deletes the employee.

use crate::model::cafe::{CafeId, CafeKey};
use crate::validation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const GENERATED_PREFIX: &str = "UI";
const GENERATED_BODY_LEN: usize = 7;
const BODY_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Client-facing employee identifier (`UIXXXXXXX`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Parses an identifier, rejecting anything outside the fixed pattern.
    pub fn parse(value: &str) -> Result<Self, String> {
        match validation::validate_employee_id_format(value).into_message() {
            None => Ok(Self(value.to_string())),
            Some(message) => Err(message),
        }
    }

    /// Generates a fresh `UI`-prefixed identifier.
    ///
    /// Seven base-36 digits drawn from a v4 UUID; uniqueness against stored
    /// rows is the repository's job.
    pub fn generate() -> Self {
        let mut entropy = Uuid::new_v4().as_u128();
        let mut value = String::with_capacity(GENERATED_PREFIX.len() + GENERATED_BODY_LEN);
        value.push_str(GENERATED_PREFIX);
        for _ in 0..GENERATED_BODY_LEN {
            let digit = (entropy % BODY_ALPHABET.len() as u128) as usize;
            value.push(char::from(BODY_ALPHABET[digit]));
            entropy /= BODY_ALPHABET.len() as u128;
        }
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for EmployeeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmployeeId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmployeeId> for String {
    fn from(value: EmployeeId) -> Self {
        value.0
    }
}

/// Supported gender values, stored lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Case-insensitive parse; surrounding whitespace is ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Caller-supplied employee fields, still raw text.
///
/// Everything here goes through the validation pipeline before the
/// repository sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub email_address: String,
    pub phone_number: String,
    pub gender: String,
    /// Start date in `YYYY-MM-DD`.
    pub start_date: String,
    /// External id of the assigned café, if any.
    #[serde(default)]
    pub cafe: Option<String>,
}

/// Validated employee fields ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeFields {
    pub name: String,
    pub email_address: String,
    pub phone_number: String,
    pub gender: Gender,
    pub start_date: NaiveDate,
    pub cafe: Option<CafeId>,
}

/// Persisted employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "id")]
    pub employee_id: EmployeeId,
    pub name: String,
    pub email_address: String,
    pub phone_number: String,
    pub gender: Gender,
    pub start_date: NaiveDate,
    /// Internal key of the assigned café.
    #[serde(skip)]
    pub cafe: Option<CafeKey>,
}

/// Row of the employee listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    #[serde(rename = "id")]
    pub employee_id: EmployeeId,
    pub name: String,
    pub email_address: String,
    pub phone_number: String,
    pub gender: Gender,
    pub days_worked: i64,
    /// Café name, empty when unassigned.
    pub cafe: String,
    /// Café external id, `None` when unassigned.
    pub cafe_id: Option<CafeId>,
}

/// Result of a successful employee delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedEmployee {
    pub employee_id: EmployeeId,
    pub deleted_name: String,
}
