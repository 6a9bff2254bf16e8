use cafe_core::db::open_db_in_memory;
use cafe_core::{
    CafeDraft, CafeService, EmployeeDraft, EmployeeService, ServiceError, SqliteCafeRepository,
    SqliteEmployeeRepository,
};
use chrono::NaiveDate;
use rusqlite::Connection;

fn employee(email: &str, cafe_id: &str) -> EmployeeDraft {
    EmployeeDraft {
        name: "Barista".to_string(),
        email_address: email.to_string(),
        phone_number: "81234567".to_string(),
        gender: "male".to_string(),
        start_date: "2024-03-01".to_string(),
        cafe: Some(cafe_id.to_string()),
    }
}

fn assigned_count(conn: &Connection) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM employees WHERE cafe_id IS NOT NULL;",
        [],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn delete_releases_every_assigned_employee() {
    let conn = open_db_in_memory().unwrap();
    let cafes = CafeService::new(SqliteCafeRepository::try_new(&conn).unwrap());
    let employees = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());

    let doomed = cafes
        .create_cafe(&CafeDraft::new("Kopi", "Toast", None, "Tiong Bahru"))
        .unwrap();
    let kept = cafes
        .create_cafe(&CafeDraft::new("Teh", "Tarik", None, "Orchard"))
        .unwrap();
    let doomed_id = doomed.cafe_id.to_string();
    for email in ["a@brew.co", "b@brew.co", "c@brew.co"] {
        employees.create_employee(&employee(email, &doomed_id)).unwrap();
    }
    employees
        .create_employee(&employee("d@brew.co", &kept.cafe_id.to_string()))
        .unwrap();

    let deleted = cafes.delete_cafe(&doomed_id).unwrap();
    assert_eq!(deleted.released_employees, 3);

    let today = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
    let listed = employees.list_employees_on(None, today).unwrap();
    assert_eq!(listed.len(), 4);
    let released: Vec<_> = listed
        .iter()
        .filter(|summary| summary.cafe_id.is_none())
        .collect();
    assert_eq!(released.len(), 3);
    assert!(released.iter().all(|summary| summary.cafe.is_empty()));
    assert_eq!(assigned_count(&conn), 1);

    let remaining = cafes.list_cafes(None).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].employee_count, 1);
}

#[test]
fn failed_cascade_rolls_back_the_whole_delete() {
    let conn = open_db_in_memory().unwrap();
    let cafes = CafeService::new(SqliteCafeRepository::try_new(&conn).unwrap());
    let employees = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());

    let cafe = cafes
        .create_cafe(&CafeDraft::new("Kopi", "Toast", None, "Tiong Bahru"))
        .unwrap();
    let cafe_id = cafe.cafe_id.to_string();
    employees.create_employee(&employee("a@brew.co", &cafe_id)).unwrap();
    employees.create_employee(&employee("b@brew.co", &cafe_id)).unwrap();

    conn.execute_batch(
        "CREATE TRIGGER block_employee_updates
         BEFORE UPDATE ON employees
         BEGIN
             SELECT RAISE(ABORT, 'forced cascade failure');
         END;",
    )
    .unwrap();

    let err = cafes.delete_cafe(&cafe_id).unwrap_err();
    assert!(matches!(err, ServiceError::Internal(_)));

    let survivor = cafes.get_cafe(&cafe_id).unwrap();
    assert_eq!(survivor.name, "Kopi");
    assert_eq!(assigned_count(&conn), 2);
    assert!(conn.is_autocommit());
}

#[test]
fn deleting_cafe_without_employees_touches_no_employee() {
    let conn = open_db_in_memory().unwrap();
    let cafes = CafeService::new(SqliteCafeRepository::try_new(&conn).unwrap());
    let employees = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());

    let empty = cafes
        .create_cafe(&CafeDraft::new("Empty", "Nobody", None, "Bugis"))
        .unwrap();
    let staffed = cafes
        .create_cafe(&CafeDraft::new("Staffed", "Busy", None, "Bugis"))
        .unwrap();
    employees
        .create_employee(&employee("a@brew.co", &staffed.cafe_id.to_string()))
        .unwrap();

    let deleted = cafes.delete_cafe(&empty.cafe_id.to_string()).unwrap();
    assert_eq!(deleted.released_employees, 0);
    assert_eq!(assigned_count(&conn), 1);
}
