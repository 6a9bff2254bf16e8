//! Duplicate guards run inside an atomic unit before a write.
//!
//! # Invariants
//! - Café uniqueness is `(name, location)` compared exactly as stored
//!   (SQLite `BINARY` collation). The listing filter is case-insensitive on
//!   purpose; the two must stay separate.
//! - Values reach the guard already trimmed by validation, so surrounding
//!   whitespace never makes two cafés distinct.
//! - The record being updated is excluded from its own check.

use crate::model::cafe::{Cafe, CafeDraft, CafeId};
use crate::model::employee::EmployeeId;
use crate::repo::cafe_repo::{parse_cafe_row, CAFE_SELECT_SQL};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Returns an existing café colliding with `draft`, if any.
pub fn find_duplicate_cafe(
    conn: &Connection,
    draft: &CafeDraft,
    exclude: Option<CafeId>,
) -> RepoResult<Option<Cafe>> {
    let mut stmt = conn.prepare(&format!(
        "{CAFE_SELECT_SQL}
         WHERE name = ?1
           AND location = ?2
           AND (?3 IS NULL OR uuid <> ?3)
         LIMIT 1;"
    ))?;
    let mut rows = stmt.query(params![
        draft.name.as_str(),
        draft.location.as_str(),
        exclude.map(|id| id.to_string()),
    ])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_cafe_row(row)?));
    }
    Ok(None)
}

/// Returns the id of another employee already using `email_address`.
pub fn find_duplicate_employee(
    conn: &Connection,
    email_address: &str,
    exclude: Option<&EmployeeId>,
) -> RepoResult<Option<EmployeeId>> {
    let existing: Option<String> = conn
        .query_row(
            "SELECT employee_id
             FROM employees
             WHERE email_address = ?1
               AND (?2 IS NULL OR employee_id <> ?2)
             LIMIT 1;",
            params![email_address, exclude.map(EmployeeId::as_str)],
            |row| row.get(0),
        )
        .optional()?;
    existing
        .map(|value| {
            EmployeeId::parse(&value).map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid employee id `{value}` in employees.employee_id"
                ))
            })
        })
        .transpose()
}
