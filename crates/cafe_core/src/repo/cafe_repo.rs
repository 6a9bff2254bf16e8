//! Café repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide the café listing with derived employee counts.
//! - Run create/update/delete as atomic units: duplicate check, existence
//!   check, write and cascade commit together or not at all.
//!
//! # Invariants
//! - `employee_count` is computed by join at read time.
//! - Create and update re-check `(name, location)` uniqueness inside the
//!   unit even when callers validated beforehand.
//! - Delete clears every employee reference to the café before commit.

use crate::model::cafe::{Cafe, CafeDraft, CafeId, CafeKey, CafeSummary, DeletedCafe};
use crate::repo::cascade::clear_cafe_assignments;
use crate::repo::duplicate::find_duplicate_cafe;
use crate::repo::ids::{external_to_internal, parse_cafe_uuid};
use crate::repo::unit::{AtomicUnit, UnitStage};
use crate::repo::{ensure_connection_ready, Entity, RepoError, RepoResult};
use log::info;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

pub(crate) const CAFE_SELECT_SQL: &str = "SELECT
    id,
    uuid,
    name,
    description,
    logo,
    location
FROM cafes";

/// Repository interface for café operations.
pub trait CafeRepository {
    /// Lists cafés, optionally filtered by case-insensitive location substring.
    fn list_cafes(&self, location: Option<&str>) -> RepoResult<Vec<CafeSummary>>;
    /// Loads one café by external id.
    fn get_cafe(&self, cafe_id: CafeId) -> RepoResult<Option<Cafe>>;
    /// Creates one café and assigns its external id.
    fn create_cafe(&self, draft: &CafeDraft) -> RepoResult<Cafe>;
    /// Replaces all editable fields of one café.
    fn update_cafe(&self, cafe_id: CafeId, draft: &CafeDraft) -> RepoResult<Cafe>;
    /// Deletes one café and releases its employees.
    fn delete_cafe(&self, cafe_id: CafeId) -> RepoResult<DeletedCafe>;
}

/// SQLite-backed café repository.
pub struct SqliteCafeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCafeRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CafeRepository for SqliteCafeRepository<'_> {
    fn list_cafes(&self, location: Option<&str>) -> RepoResult<Vec<CafeSummary>> {
        // SQLite `lower()` folds ASCII only; the filter folds in Rust.
        let needle = location
            .filter(|value| !value.is_empty())
            .map(str::to_lowercase);
        let mut stmt = self.conn.prepare(
            "SELECT
                c.uuid AS uuid,
                c.name AS name,
                c.description AS description,
                c.logo AS logo,
                c.location AS location,
                COUNT(e.id) AS employee_count
             FROM cafes c
             LEFT JOIN employees e ON e.cafe_id = c.id
             GROUP BY c.id
             ORDER BY employee_count DESC, c.name ASC, c.uuid ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut cafes = Vec::new();
        while let Some(row) = rows.next()? {
            let location: String = row.get("location")?;
            if let Some(needle) = needle.as_deref() {
                if !location.to_lowercase().contains(needle) {
                    continue;
                }
            }
            let uuid_text: String = row.get("uuid")?;
            cafes.push(CafeSummary {
                cafe_id: parse_cafe_uuid(&uuid_text)?,
                name: row.get("name")?,
                description: row.get("description")?,
                employee_count: row.get("employee_count")?,
                logo: row.get("logo")?,
                location,
            });
        }
        Ok(cafes)
    }

    fn get_cafe(&self, cafe_id: CafeId) -> RepoResult<Option<Cafe>> {
        load_cafe(self.conn, cafe_id)
    }

    fn create_cafe(&self, draft: &CafeDraft) -> RepoResult<Cafe> {
        AtomicUnit::run(self.conn, "cafe_create", |unit| {
            if find_duplicate_cafe(unit, draft, None)?.is_some() {
                return Err(RepoError::AlreadyExists {
                    entity: Entity::Cafe,
                });
            }
            unit.advance(UnitStage::DuplicateChecked);

            let cafe_id = Uuid::new_v4();
            unit.execute(
                "INSERT INTO cafes (uuid, name, description, logo, location)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    cafe_id.to_string(),
                    draft.name.as_str(),
                    draft.description.as_str(),
                    draft.logo.as_deref(),
                    draft.location.as_str(),
                ],
            )
            .map_err(|err| RepoError::from_write(Entity::Cafe, err))?;
            unit.advance(UnitStage::Written);

            load_required_cafe(unit, cafe_id)
        })
    }

    fn update_cafe(&self, cafe_id: CafeId, draft: &CafeDraft) -> RepoResult<Cafe> {
        AtomicUnit::run(self.conn, "cafe_update", |unit| {
            if find_duplicate_cafe(unit, draft, Some(cafe_id))?.is_some() {
                return Err(RepoError::AlreadyExists {
                    entity: Entity::Cafe,
                });
            }
            unit.advance(UnitStage::DuplicateChecked);

            let key = external_to_internal(unit, cafe_id)?
                .ok_or_else(|| RepoError::not_found(Entity::Cafe, cafe_id))?;
            unit.advance(UnitStage::Located);

            unit.execute(
                "UPDATE cafes
                 SET
                    name = ?2,
                    description = ?3,
                    logo = ?4,
                    location = ?5,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?1;",
                params![
                    key.get(),
                    draft.name.as_str(),
                    draft.description.as_str(),
                    draft.logo.as_deref(),
                    draft.location.as_str(),
                ],
            )
            .map_err(|err| RepoError::from_write(Entity::Cafe, err))?;
            unit.advance(UnitStage::Written);

            load_required_cafe(unit, cafe_id)
        })
    }

    fn delete_cafe(&self, cafe_id: CafeId) -> RepoResult<DeletedCafe> {
        AtomicUnit::run(self.conn, "cafe_delete", |unit| {
            let cafe = load_cafe(unit, cafe_id)?
                .ok_or_else(|| RepoError::not_found(Entity::Cafe, cafe_id))?;
            let key = cafe.key.ok_or_else(|| {
                RepoError::InvalidData(format!("cafe {cafe_id} loaded without key"))
            })?;
            unit.advance(UnitStage::Located);

            unit.execute("DELETE FROM cafes WHERE id = ?1;", [key.get()])?;
            let released_employees = clear_cafe_assignments(unit, key)?;
            unit.advance(UnitStage::Written);

            info!(
                "event=cafe_delete module=repo status=cascaded cafe_key={key} released={released_employees}"
            );
            Ok(DeletedCafe {
                cafe_id,
                deleted_name: cafe.name,
                released_employees,
            })
        })
    }
}

pub(crate) fn parse_cafe_row(row: &Row<'_>) -> RepoResult<Cafe> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Cafe {
        cafe_id: parse_cafe_uuid(&uuid_text)?,
        name: row.get("name")?,
        description: row.get("description")?,
        logo: row.get("logo")?,
        location: row.get("location")?,
        key: Some(CafeKey::from_raw(row.get("id")?)),
    })
}

fn load_cafe(conn: &Connection, cafe_id: CafeId) -> RepoResult<Option<Cafe>> {
    let mut stmt = conn.prepare(&format!("{CAFE_SELECT_SQL} WHERE uuid = ?1;"))?;
    let mut rows = stmt.query([cafe_id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_cafe_row(row)?));
    }
    Ok(None)
}

fn load_required_cafe(conn: &Connection, cafe_id: CafeId) -> RepoResult<Cafe> {
    load_cafe(conn, cafe_id)?.ok_or_else(|| RepoError::not_found(Entity::Cafe, cafe_id))
}
