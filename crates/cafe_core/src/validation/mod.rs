//! Field validation pipeline.
//!
//! # Responsibility
//! - Provide pure per-field validators that always return a [`Verdict`].
//! - Compose validators per entity and report every failure in one pass.
//!
//! # Invariants
//! - Validators never panic and never touch storage.
//! - Composition keeps failures in validator order.
//! - Uniqueness is not a field rule; it is re-checked inside the atomic unit.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod entity;
mod fields;

pub use entity::{
    parse_cafe_id, parse_employee_id, validate_cafe_draft, validate_employee_draft,
    validate_employee_fields,
};
pub use fields::{
    validate_cafe_id_format, validate_date, validate_description, validate_email,
    validate_employee_id_format, validate_gender, validate_location, validate_name,
    validate_phone_number, DATE_FORMAT,
};

/// Outcome of one field validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub valid: bool,
    /// Human-readable reason, present only when `valid` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Verdict {
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the failure message, or `None` for a passing verdict.
    pub fn into_message(self) -> Option<String> {
        if self.valid {
            None
        } else {
            self.message
        }
    }
}

/// Aggregated validation failure for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Failure messages in validator order. Never empty.
    pub messages: Vec<String>,
}

impl ValidationError {
    /// Folds verdicts into `Ok(())` or an error carrying every failure.
    pub fn check(verdicts: impl IntoIterator<Item = Verdict>) -> Result<(), Self> {
        let messages: Vec<String> = verdicts
            .into_iter()
            .filter_map(Verdict::into_message)
            .collect();
        if messages.is_empty() {
            Ok(())
        } else {
            Err(Self { messages })
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid input: {}", self.messages.join("; "))
    }
}

impl Error for ValidationError {}
