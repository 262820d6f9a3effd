//! SQLite target databases.
//!
//! Targets live in a `compoundlist` table with the same columns as the CSV
//! target table. Each row is rendered to text and validated by the same code
//! as CSV input, so SQL `NULL` takes the null-marker path.

use std::path::Path;

use csv::StringRecord;
use log::debug;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};

use super::{TableError, TargetTable};

/// Table holding the targets inside a SQLite database
pub const SQLITE_TARGET_TABLE: &str = "compoundlist";

impl TargetTable {
    /// Read the `compoundlist` table of a SQLite target database
    pub fn from_sqlite<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        let source = path.display().to_string();
        let connection = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        let mut statement = connection.prepare(&format!("SELECT * FROM {SQLITE_TARGET_TABLE}"))?;
        let headers = StringRecord::from(statement.column_names());
        let column_count = statement.column_count();

        let mut records = Vec::new();
        let mut rows = statement.query([])?;
        while let Some(row) = rows.next()? {
            let mut record = StringRecord::new();
            for index in 0..column_count {
                record.push_field(&sql_text(row.get_ref(index)?));
            }
            records.push(Ok(record));
        }

        debug!("Read {} rows from {} in {}", records.len(), SQLITE_TARGET_TABLE, source);
        Self::from_records(source, &headers, records)
    }
}

/// Text form of a SQLite value; `NULL` becomes the empty null marker
fn sql_text(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(v) => v.to_string(),
        ValueRef::Real(v) => v.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    }
}
