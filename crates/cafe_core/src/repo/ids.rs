//! Identifier translation between external café ids and internal keys.
//!
//! # Invariants
//! - Read-only; no function here writes.
//! - Passing an [`AtomicUnit`](crate::repo::unit::AtomicUnit) as the
//!   connection scopes the lookup to that unit, including its uncommitted
//!   writes.
//! - A missing record is `Ok(None)`, never an error.

use crate::model::cafe::{CafeId, CafeKey};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

/// Looks up the internal key for an external café id.
pub fn external_to_internal(conn: &Connection, cafe_id: CafeId) -> RepoResult<Option<CafeKey>> {
    let key: Option<i64> = conn
        .query_row(
            "SELECT id FROM cafes WHERE uuid = ?1;",
            [cafe_id.to_string()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(key.map(CafeKey::from_raw))
}

/// Looks up the external id for an internal café key.
pub fn internal_to_external(conn: &Connection, key: CafeKey) -> RepoResult<Option<CafeId>> {
    let uuid_text: Option<String> = conn
        .query_row(
            "SELECT uuid FROM cafes WHERE id = ?1;",
            [key.get()],
            |row| row.get(0),
        )
        .optional()?;
    uuid_text.map(|value| parse_cafe_uuid(&value)).transpose()
}

/// Looks up the café name for an internal café key.
pub fn internal_to_name(conn: &Connection, key: CafeKey) -> RepoResult<Option<String>> {
    let name = conn
        .query_row(
            "SELECT name FROM cafes WHERE id = ?1;",
            [key.get()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(name)
}

pub(crate) fn parse_cafe_uuid(value: &str) -> RepoResult<CafeId> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in cafes.uuid")))
}
