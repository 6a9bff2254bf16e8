//! Employee repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist employees and their optional café assignment.
//! - Resolve external café ids to internal keys inside the writing unit.
//!
//! # Invariants
//! - A stored `cafe_id` always names an existing café at commit time.
//! - `email_address` is unique; the check runs in the unit and the `UNIQUE`
//!   constraint backs it up.
//! - Generated employee ids are checked against stored rows before insert.

use crate::model::cafe::{CafeId, CafeKey};
use crate::model::employee::{
    DeletedEmployee, Employee, EmployeeFields, EmployeeId, EmployeeSummary, Gender,
};
use crate::repo::duplicate::find_duplicate_employee;
use crate::repo::ids::{external_to_internal, internal_to_external, internal_to_name};
use crate::repo::unit::{AtomicUnit, UnitStage};
use crate::repo::{ensure_connection_ready, Entity, RepoError, RepoResult};
use crate::validation::DATE_FORMAT;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    employee_id,
    name,
    email_address,
    phone_number,
    gender,
    start_date,
    cafe_id
FROM employees";

const MAX_ID_ATTEMPTS: usize = 16;

/// Repository interface for employee operations.
pub trait EmployeeRepository {
    /// Lists employees, longest-serving first, optionally for one café.
    fn list_employees(
        &self,
        cafe: Option<CafeId>,
        today: NaiveDate,
    ) -> RepoResult<Vec<EmployeeSummary>>;
    /// Loads one employee by external id.
    fn get_employee(&self, employee_id: &EmployeeId) -> RepoResult<Option<Employee>>;
    /// Creates one employee and assigns its external id.
    fn create_employee(&self, fields: &EmployeeFields) -> RepoResult<Employee>;
    /// Replaces all editable fields of one employee, including the café.
    fn update_employee(
        &self,
        employee_id: &EmployeeId,
        fields: &EmployeeFields,
    ) -> RepoResult<Employee>;
    /// Deletes one employee.
    fn delete_employee(&self, employee_id: &EmployeeId) -> RepoResult<DeletedEmployee>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn list_employees(
        &self,
        cafe: Option<CafeId>,
        today: NaiveDate,
    ) -> RepoResult<Vec<EmployeeSummary>> {
        let cafe_key = match cafe {
            Some(cafe_id) => match external_to_internal(self.conn, cafe_id)? {
                Some(key) => Some(key),
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        // ISO dates sort chronologically, so earliest start = most days worked.
        let mut stmt = self.conn.prepare(&format!(
            "{EMPLOYEE_SELECT_SQL}
             WHERE ?1 IS NULL OR cafe_id = ?1
             ORDER BY start_date ASC, employee_id ASC;"
        ))?;
        let mut rows = stmt.query([cafe_key.map(CafeKey::get)])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            let employee = parse_employee_row(row)?;
            let (cafe_name, cafe_id) = match employee.cafe {
                Some(key) => (
                    internal_to_name(self.conn, key)?.unwrap_or_default(),
                    internal_to_external(self.conn, key)?,
                ),
                None => (String::new(), None),
            };
            items.push(EmployeeSummary {
                days_worked: (today - employee.start_date).num_days(),
                employee_id: employee.employee_id,
                name: employee.name,
                email_address: employee.email_address,
                phone_number: employee.phone_number,
                gender: employee.gender,
                cafe: cafe_name,
                cafe_id,
            });
        }
        Ok(items)
    }

    fn get_employee(&self, employee_id: &EmployeeId) -> RepoResult<Option<Employee>> {
        load_employee(self.conn, employee_id)
    }

    fn create_employee(&self, fields: &EmployeeFields) -> RepoResult<Employee> {
        AtomicUnit::run(self.conn, "employee_create", |unit| {
            if find_duplicate_employee(unit, &fields.email_address, None)?.is_some() {
                return Err(RepoError::AlreadyExists {
                    entity: Entity::Employee,
                });
            }
            unit.advance(UnitStage::DuplicateChecked);

            let cafe_key = resolve_cafe(unit, fields.cafe)?;
            let employee_id = unused_employee_id(unit)?;
            unit.advance(UnitStage::Located);

            unit.execute(
                "INSERT INTO employees (
                    employee_id,
                    name,
                    email_address,
                    phone_number,
                    gender,
                    start_date,
                    cafe_id
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    employee_id.as_str(),
                    fields.name.as_str(),
                    fields.email_address.as_str(),
                    fields.phone_number.as_str(),
                    fields.gender.as_str(),
                    fields.start_date.format(DATE_FORMAT).to_string(),
                    cafe_key.map(CafeKey::get),
                ],
            )
            .map_err(|err| RepoError::from_write(Entity::Employee, err))?;
            unit.advance(UnitStage::Written);

            load_required_employee(unit, &employee_id)
        })
    }

    fn update_employee(
        &self,
        employee_id: &EmployeeId,
        fields: &EmployeeFields,
    ) -> RepoResult<Employee> {
        AtomicUnit::run(self.conn, "employee_update", |unit| {
            if find_duplicate_employee(unit, &fields.email_address, Some(employee_id))?.is_some() {
                return Err(RepoError::AlreadyExists {
                    entity: Entity::Employee,
                });
            }
            unit.advance(UnitStage::DuplicateChecked);

            if load_employee(unit, employee_id)?.is_none() {
                return Err(RepoError::not_found(Entity::Employee, employee_id));
            }
            let cafe_key = resolve_cafe(unit, fields.cafe)?;
            unit.advance(UnitStage::Located);

            unit.execute(
                "UPDATE employees
                 SET
                    name = ?2,
                    email_address = ?3,
                    phone_number = ?4,
                    gender = ?5,
                    start_date = ?6,
                    cafe_id = ?7,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE employee_id = ?1;",
                params![
                    employee_id.as_str(),
                    fields.name.as_str(),
                    fields.email_address.as_str(),
                    fields.phone_number.as_str(),
                    fields.gender.as_str(),
                    fields.start_date.format(DATE_FORMAT).to_string(),
                    cafe_key.map(CafeKey::get),
                ],
            )
            .map_err(|err| RepoError::from_write(Entity::Employee, err))?;
            unit.advance(UnitStage::Written);

            load_required_employee(unit, employee_id)
        })
    }

    fn delete_employee(&self, employee_id: &EmployeeId) -> RepoResult<DeletedEmployee> {
        AtomicUnit::run(self.conn, "employee_delete", |unit| {
            let employee = load_employee(unit, employee_id)?
                .ok_or_else(|| RepoError::not_found(Entity::Employee, employee_id))?;
            unit.advance(UnitStage::Located);

            unit.execute(
                "DELETE FROM employees WHERE employee_id = ?1;",
                [employee_id.as_str()],
            )?;
            unit.advance(UnitStage::Written);

            Ok(DeletedEmployee {
                employee_id: employee.employee_id,
                deleted_name: employee.name,
            })
        })
    }
}

/// Resolves an optional external café id; an unknown café is `NotFound`.
fn resolve_cafe(conn: &Connection, cafe: Option<CafeId>) -> RepoResult<Option<CafeKey>> {
    match cafe {
        None => Ok(None),
        Some(cafe_id) => external_to_internal(conn, cafe_id)?
            .map(Some)
            .ok_or_else(|| RepoError::not_found(Entity::Cafe, cafe_id)),
    }
}

fn unused_employee_id(conn: &Connection) -> RepoResult<EmployeeId> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let candidate = EmployeeId::generate();
        let taken: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM employees WHERE employee_id = ?1;",
                [candidate.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        if taken.is_none() {
            return Ok(candidate);
        }
    }
    Err(RepoError::InvalidData(format!(
        "no free employee id after {MAX_ID_ATTEMPTS} attempts"
    )))
}

fn load_employee(conn: &Connection, employee_id: &EmployeeId) -> RepoResult<Option<Employee>> {
    let mut stmt = conn.prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE employee_id = ?1;"))?;
    let mut rows = stmt.query([employee_id.as_str()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_employee_row(row)?));
    }
    Ok(None)
}

fn load_required_employee(conn: &Connection, employee_id: &EmployeeId) -> RepoResult<Employee> {
    load_employee(conn, employee_id)?
        .ok_or_else(|| RepoError::not_found(Entity::Employee, employee_id))
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let id_text: String = row.get("employee_id")?;
    let employee_id = EmployeeId::parse(&id_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid employee id `{id_text}` in employees.employee_id"
        ))
    })?;

    let gender_text: String = row.get("gender")?;
    let gender = Gender::parse(&gender_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid gender `{gender_text}` in employees.gender"))
    })?;

    let date_text: String = row.get("start_date")?;
    let start_date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date `{date_text}` in employees.start_date"
        ))
    })?;

    Ok(Employee {
        employee_id,
        name: row.get("name")?,
        email_address: row.get("email_address")?,
        phone_number: row.get("phone_number")?,
        gender,
        start_date,
        cafe: row
            .get::<_, Option<i64>>("cafe_id")?
            .map(CafeKey::from_raw),
    })
}
