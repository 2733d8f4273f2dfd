use crate::error::Result;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// `changed_date` (microseconds) of every node in the working copy database.
pub(super) fn changed_dates(path: &Path) -> Result<Vec<String>> {
    let conn = Connection::open_with_flags(path.join(".svn/wc.db"), OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let mut stmt = conn.prepare("SELECT changed_date FROM NODES WHERE changed_date IS NOT NULL")?;
    let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;

    let mut dates = Vec::new();
    for row in rows {
        dates.push(row?.to_string());
    }
    Ok(dates)
}
