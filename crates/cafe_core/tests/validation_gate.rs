use cafe_core::{
    validate_cafe_id_format, validate_date, validate_email, validate_employee_fields,
    validate_employee_id_format, validate_gender, validate_phone_number, ValidationError, Verdict,
};

#[test]
fn employee_id_format_examples() {
    assert!(validate_employee_id_format("UI1234567").is_valid());
    assert!(!validate_employee_id_format("ui123456").is_valid());
    assert!(!validate_employee_id_format("").is_valid());
}

#[test]
fn phone_number_examples() {
    assert!(validate_phone_number("91234567").is_valid());
    assert!(!validate_phone_number("71234567").is_valid());
    assert!(!validate_phone_number("9123456").is_valid());
}

#[test]
fn cafe_id_must_be_uuid() {
    assert!(validate_cafe_id_format("6f1c4c1e-2b6e-4e0a-9a55-7b3b0c0d1e2f").is_valid());
    assert!(!validate_cafe_id_format("cafe-1").is_valid());
}

#[test]
fn date_must_be_iso_calendar_day() {
    assert!(validate_date("2024-02-29").is_valid());
    assert!(!validate_date("2023-02-29").is_valid());
    assert!(!validate_date("29-02-2024").is_valid());
}

#[test]
fn gender_rejects_blank_with_dedicated_message() {
    assert_eq!(
        validate_gender("").into_message().as_deref(),
        Some("Gender cannot be empty")
    );
}

#[test]
fn employee_field_gate_keeps_validator_order() {
    let verdicts = validate_employee_fields("barista@brew", "9123", "Male");
    assert_eq!(verdicts.len(), 3);
    assert!(!verdicts[0].is_valid());
    assert!(!verdicts[1].is_valid());
    assert_eq!(verdicts[2], Verdict::pass());

    let err = ValidationError::check(verdicts).unwrap_err();
    assert_eq!(err.messages.len(), 2);
    assert!(err.to_string().contains("Email does not fit the required format"));
}

#[test]
fn passing_gate_yields_no_error() {
    let verdicts = vec![
        validate_email("barista@brew.co"),
        validate_phone_number("81234567"),
        validate_gender("female"),
    ];
    assert!(ValidationError::check(verdicts).is_ok());
}
