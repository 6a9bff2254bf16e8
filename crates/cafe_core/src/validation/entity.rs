//! Per-entity composition of field validators.

use super::fields::{
    validate_cafe_id_format, validate_date, validate_description, validate_email,
    validate_employee_id_format, validate_gender, validate_location, validate_name,
    validate_phone_number, DATE_FORMAT,
};
use super::{ValidationError, Verdict};
use crate::model::cafe::{CafeDraft, CafeId};
use crate::model::employee::{EmployeeDraft, EmployeeFields, EmployeeId, Gender};
use chrono::NaiveDate;
use uuid::Uuid;

/// Parses a caller-supplied café id.
pub fn parse_cafe_id(value: &str) -> Result<CafeId, ValidationError> {
    ValidationError::check([validate_cafe_id_format(value)])?;
    Uuid::parse_str(value).map_err(|_| ValidationError {
        messages: vec!["Invalid Cafe ID format".to_string()],
    })
}

/// Parses a caller-supplied employee id.
pub fn parse_employee_id(value: &str) -> Result<EmployeeId, ValidationError> {
    ValidationError::check([validate_employee_id_format(value)])?;
    EmployeeId::parse(value).map_err(|message| ValidationError {
        messages: vec![message],
    })
}

/// Checks every café text field and returns the draft with surrounding
/// whitespace removed.
///
/// Text fields of both entities are stored trimmed, so the exact-match
/// uniqueness rule compares trimmed values.
pub fn validate_cafe_draft(draft: &CafeDraft) -> Result<CafeDraft, ValidationError> {
    ValidationError::check([
        validate_name(&draft.name),
        validate_description(&draft.description),
        validate_location(&draft.location),
    ])?;
    Ok(CafeDraft {
        name: draft.name.trim().to_string(),
        description: draft.description.trim().to_string(),
        logo: draft
            .logo
            .as_deref()
            .map(str::trim)
            .filter(|logo| !logo.is_empty())
            .map(str::to_string),
        location: draft.location.trim().to_string(),
    })
}

/// Runs the email, phone and gender gate used before employee writes.
pub fn validate_employee_fields(email: &str, phone_number: &str, gender: &str) -> Vec<Verdict> {
    vec![
        validate_email(email),
        validate_phone_number(phone_number),
        validate_gender(gender),
    ]
}

/// Validates a full employee draft and converts it into typed fields.
///
/// An empty `cafe` value means "no café".
pub fn validate_employee_draft(draft: &EmployeeDraft) -> Result<EmployeeFields, ValidationError> {
    let cafe_text = draft
        .cafe
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let mut verdicts = vec![validate_name(&draft.name)];
    verdicts.extend(validate_employee_fields(
        &draft.email_address,
        &draft.phone_number,
        &draft.gender,
    ));
    verdicts.push(validate_date(&draft.start_date));
    if let Some(cafe) = cafe_text {
        verdicts.push(validate_cafe_id_format(cafe));
    }
    ValidationError::check(verdicts)?;

    let gender = Gender::parse(&draft.gender);
    let start_date = NaiveDate::parse_from_str(&draft.start_date, DATE_FORMAT).ok();
    let cafe = cafe_text.map(Uuid::parse_str).transpose().ok();
    match (gender, start_date, cafe) {
        (Some(gender), Some(start_date), Some(cafe)) => Ok(EmployeeFields {
            name: draft.name.trim().to_string(),
            email_address: draft.email_address.clone(),
            phone_number: draft.phone_number.clone(),
            gender,
            start_date,
            cafe,
        }),
        _ => Err(ValidationError {
            messages: vec!["Employee fields could not be converted".to_string()],
        }),
    }
}
