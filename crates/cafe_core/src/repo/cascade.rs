//! Cascade cleanup for café deletion.
//!
//! Must run on the same unit that removed the café; the deferred foreign key
//! rejects the commit if any reference is left behind.

use crate::model::cafe::CafeKey;
use crate::repo::RepoResult;
use rusqlite::Connection;

/// Unsets the café reference on every employee pointing at `key`.
///
/// Returns the number of employees released.
pub fn clear_cafe_assignments(conn: &Connection, key: CafeKey) -> RepoResult<usize> {
    let cleared = conn.execute(
        "UPDATE employees
         SET cafe_id = NULL,
             updated_at = (strftime('%s', 'now') * 1000)
         WHERE cafe_id = ?1;",
        [key.get()],
    )?;
    Ok(cleared)
}
