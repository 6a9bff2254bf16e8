//! Single-field validators.

use super::Verdict;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

/// Canonical date format accepted by [`validate_date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_FORMAT_LABEL: &str = "YYYY-MM-DD";

static EMPLOYEE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}[A-Z0-9]{7}$").expect("valid employee id regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[89][0-9]{7}$").expect("valid phone regex"));

pub fn validate_name(name: &str) -> Verdict {
    non_blank(name, "Name cannot be empty")
}

pub fn validate_description(description: &str) -> Verdict {
    non_blank(description, "Description cannot be empty")
}

pub fn validate_location(location: &str) -> Verdict {
    non_blank(location, "Location cannot be empty")
}

pub fn validate_employee_id_format(id: &str) -> Verdict {
    if EMPLOYEE_ID_RE.is_match(id) {
        Verdict::pass()
    } else {
        Verdict::fail("Invalid Employee ID format, must match UIXXXXXXX")
    }
}

pub fn validate_cafe_id_format(id: &str) -> Verdict {
    match Uuid::parse_str(id) {
        Ok(_) => Verdict::pass(),
        Err(_) => Verdict::fail("Invalid Cafe ID format"),
    }
}

pub fn validate_email(email: &str) -> Verdict {
    if email.trim().is_empty() {
        return Verdict::fail("Email cannot be empty");
    }
    if !EMAIL_RE.is_match(email) {
        return Verdict::fail("Email does not fit the required format");
    }
    Verdict::pass()
}

/// Phone numbers are 8 digits and start with 8 or 9.
pub fn validate_phone_number(phone_number: &str) -> Verdict {
    if phone_number.trim().is_empty() {
        return Verdict::fail("Phone number cannot be empty");
    }
    if !PHONE_RE.is_match(phone_number) {
        return Verdict::fail("Phone number must start with 8 or 9 and be 8 digits long");
    }
    Verdict::pass()
}

pub fn validate_gender(gender: &str) -> Verdict {
    if gender.trim().is_empty() {
        return Verdict::fail("Gender cannot be empty");
    }
    if !matches!(gender.to_ascii_lowercase().as_str(), "male" | "female") {
        return Verdict::fail("Gender must be either Male or Female");
    }
    Verdict::pass()
}

pub fn validate_date(date: &str) -> Verdict {
    match NaiveDate::parse_from_str(date, DATE_FORMAT) {
        Ok(_) => Verdict::pass(),
        Err(_) => Verdict::fail(format!(
            "Invalid date format, it must be in the format {DATE_FORMAT_LABEL}"
        )),
    }
}

fn non_blank(value: &str, message: &'static str) -> Verdict {
    if value.trim().is_empty() {
        Verdict::fail(message)
    } else {
        Verdict::pass()
    }
}
