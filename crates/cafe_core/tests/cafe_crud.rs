use cafe_core::db::open_db_in_memory;
use cafe_core::{
    CafeDraft, CafeService, EmployeeDraft, EmployeeService, ServiceError,
    SqliteCafeRepository, SqliteEmployeeRepository,
};
use rusqlite::Connection;

fn draft(name: &str, location: &str) -> CafeDraft {
    CafeDraft::new(name, "Specialty coffee", None, location)
}

fn hire(conn: &Connection, email: &str, cafe_id: &str) {
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(conn).unwrap());
    service
        .create_employee(&EmployeeDraft {
            name: "Barista".to_string(),
            email_address: email.to_string(),
            phone_number: "91234567".to_string(),
            gender: "Female".to_string(),
            start_date: "2024-01-01".to_string(),
            cafe: Some(cafe_id.to_string()),
        })
        .unwrap();
}

fn cafe_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM cafes;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_get_update_delete_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = CafeService::new(SqliteCafeRepository::try_new(&conn).unwrap());

    let created = service
        .create_cafe(&CafeDraft::new(
            "Brew Lab",
            "Third wave",
            Some("logo.png".to_string()),
            "Tiong Bahru",
        ))
        .unwrap();
    assert_eq!(created.name, "Brew Lab");
    assert_eq!(created.logo.as_deref(), Some("logo.png"));

    let cafe_id = created.cafe_id.to_string();
    let loaded = service.get_cafe(&cafe_id).unwrap();
    assert_eq!(loaded.cafe_id, created.cafe_id);

    let updated = service
        .update_cafe(&cafe_id, &draft("Brew Lab II", "Orchard"))
        .unwrap();
    assert_eq!(updated.cafe_id, created.cafe_id);
    assert_eq!(updated.location, "Orchard");
    assert_eq!(updated.logo, None);

    let deleted = service.delete_cafe(&cafe_id).unwrap();
    assert_eq!(deleted.deleted_name, "Brew Lab II");
    assert_eq!(deleted.released_employees, 0);
    assert!(matches!(
        service.get_cafe(&cafe_id),
        Err(ServiceError::NotFound { .. })
    ));
}

#[test]
fn duplicate_create_is_rejected_without_insert() {
    let conn = open_db_in_memory().unwrap();
    let service = CafeService::new(SqliteCafeRepository::try_new(&conn).unwrap());

    service.create_cafe(&draft("Kopi", "Tiong Bahru")).unwrap();
    let err = service
        .create_cafe(&CafeDraft::new("Kopi", "Other words", None, "Tiong Bahru"))
        .unwrap_err();

    assert_eq!(err.code(), "AlreadyExists");
    assert_eq!(err.to_string(), "Cafe already exists");
    assert_eq!(cafe_count(&conn), 1);
}

#[test]
fn duplicate_check_is_case_sensitive() {
    let conn = open_db_in_memory().unwrap();
    let service = CafeService::new(SqliteCafeRepository::try_new(&conn).unwrap());

    service.create_cafe(&draft("Kopi", "Tiong Bahru")).unwrap();
    service.create_cafe(&draft("kopi", "tiong bahru")).unwrap();

    assert_eq!(cafe_count(&conn), 2);
}

#[test]
fn update_into_another_cafe_identity_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = CafeService::new(SqliteCafeRepository::try_new(&conn).unwrap());

    service.create_cafe(&draft("Kopi", "Tiong Bahru")).unwrap();
    let other = service.create_cafe(&draft("Teh", "Orchard")).unwrap();

    let err = service
        .update_cafe(&other.cafe_id.to_string(), &draft("Kopi", "Tiong Bahru"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::AlreadyExists(_)));

    let unchanged = service.get_cafe(&other.cafe_id.to_string()).unwrap();
    assert_eq!(unchanged.name, "Teh");
}

#[test]
fn update_keeping_own_identity_succeeds() {
    let conn = open_db_in_memory().unwrap();
    let service = CafeService::new(SqliteCafeRepository::try_new(&conn).unwrap());

    let cafe = service.create_cafe(&draft("Kopi", "Tiong Bahru")).unwrap();
    let updated = service
        .update_cafe(
            &cafe.cafe_id.to_string(),
            &CafeDraft::new("Kopi", "New menu", None, "Tiong Bahru"),
        )
        .unwrap();

    assert_eq!(updated.description, "New menu");
}

#[test]
fn update_unknown_cafe_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = CafeService::new(SqliteCafeRepository::try_new(&conn).unwrap());

    let missing = uuid::Uuid::new_v4().to_string();
    let err = service
        .update_cafe(&missing, &draft("Kopi", "Tiong Bahru"))
        .unwrap_err();

    assert_eq!(err.to_string(), format!("Cafe not found: {missing}"));
    assert_eq!(cafe_count(&conn), 0);
}

#[test]
fn listing_filters_case_insensitively_and_orders_by_employee_count() {
    let conn = open_db_in_memory().unwrap();
    let service = CafeService::new(SqliteCafeRepository::try_new(&conn).unwrap());

    let quiet = service.create_cafe(&draft("Alpha", "Downtown")).unwrap();
    let busy = service.create_cafe(&draft("Zulu", "Uptown")).unwrap();
    service.create_cafe(&draft("Harbour", "Sentosa")).unwrap();

    hire(&conn, "a@brew.co", &busy.cafe_id.to_string());
    hire(&conn, "b@brew.co", &busy.cafe_id.to_string());
    hire(&conn, "c@brew.co", &quiet.cafe_id.to_string());

    let listed = service.list_cafes(Some("TOWN")).unwrap();
    let names: Vec<&str> = listed.iter().map(|cafe| cafe.name.as_str()).collect();
    assert_eq!(names, vec!["Zulu", "Alpha"]);
    assert_eq!(listed[0].employee_count, 2);
    assert_eq!(listed[1].employee_count, 1);

    assert_eq!(service.list_cafes(None).unwrap().len(), 3);
    assert_eq!(service.list_cafes(Some("")).unwrap().len(), 3);
    assert!(service.list_cafes(Some("Jurong")).unwrap().is_empty());
}

#[test]
fn listing_ties_break_on_name() {
    let conn = open_db_in_memory().unwrap();
    let service = CafeService::new(SqliteCafeRepository::try_new(&conn).unwrap());

    service.create_cafe(&draft("Mocha", "Bugis")).unwrap();
    service.create_cafe(&draft("Latte", "Bugis")).unwrap();

    let names: Vec<String> = service
        .list_cafes(None)
        .unwrap()
        .into_iter()
        .map(|cafe| cafe.name)
        .collect();
    assert_eq!(names, vec!["Latte".to_string(), "Mocha".to_string()]);
}

#[test]
fn delete_unknown_cafe_is_not_found_and_mutates_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = CafeService::new(SqliteCafeRepository::try_new(&conn).unwrap());
    service.create_cafe(&draft("Kopi", "Tiong Bahru")).unwrap();

    let err = service
        .delete_cafe(&uuid::Uuid::new_v4().to_string())
        .unwrap_err();

    assert_eq!(err.code(), "NotFound");
    assert_eq!(cafe_count(&conn), 1);
}

#[test]
fn validation_reports_every_failure_before_storage() {
    let conn = open_db_in_memory().unwrap();
    let service = CafeService::new(SqliteCafeRepository::try_new(&conn).unwrap());

    let err = service
        .create_cafe(&CafeDraft::new(" ", "", None, "Tiong Bahru"))
        .unwrap_err();
    assert_eq!(err.code(), "ValidationFailed");
    assert_eq!(
        err.messages(),
        &[
            "Name cannot be empty".to_string(),
            "Description cannot be empty".to_string(),
        ]
    );
    assert_eq!(cafe_count(&conn), 0);

    let bad_id = service.delete_cafe("not-a-uuid").unwrap_err();
    assert_eq!(bad_id.messages(), &["Invalid Cafe ID format".to_string()]);
}

#[test]
fn summary_serializes_with_client_field_names() {
    let conn = open_db_in_memory().unwrap();
    let service = CafeService::new(SqliteCafeRepository::try_new(&conn).unwrap());
    let cafe = service.create_cafe(&draft("Kopi", "Tiong Bahru")).unwrap();

    let listed = service.list_cafes(None).unwrap();
    let json = serde_json::to_value(&listed[0]).unwrap();

    assert_eq!(json["id"], cafe.cafe_id.to_string());
    assert_eq!(json["employees"], 0);
    assert_eq!(json["location"], "Tiong Bahru");
}

#[test]
fn location_filter_folds_non_ascii_letters() {
    let conn = open_db_in_memory().unwrap();
    let service = CafeService::new(SqliteCafeRepository::try_new(&conn).unwrap());

    let etoile = service.create_cafe(&draft("Le Grain", "ÉTOILE TOWN")).unwrap();
    service.create_cafe(&draft("Kopi", "Tiong Bahru")).unwrap();

    let hits = service.list_cafes(Some("étoile")).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].cafe_id, etoile.cafe_id);
    assert_eq!(hits[0].location, "ÉTOILE TOWN");

    let upper = service.list_cafes(Some("ÉTOILE")).unwrap();
    assert_eq!(upper.len(), 1);
}

#[test]
fn surrounding_whitespace_does_not_dodge_duplicate_check() {
    let conn = open_db_in_memory().unwrap();
    let service = CafeService::new(SqliteCafeRepository::try_new(&conn).unwrap());

    let stored = service
        .create_cafe(&draft("  Kopi ", " Tiong Bahru "))
        .unwrap();
    assert_eq!(stored.name, "Kopi");
    assert_eq!(stored.location, "Tiong Bahru");

    let err = service.create_cafe(&draft("Kopi", "Tiong Bahru")).unwrap_err();
    assert_eq!(err.code(), "AlreadyExists");
    assert_eq!(cafe_count(&conn), 1);
}
