//! Word store bootstrap: connection setup and schema migrations.
//!
//! # Responsibility
//! - Open SQLite connections with cascading deletes enforced for words.
//! - Bring the `word_lists`/`words` schema up to the version this binary knows.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - No list or word data is read/written before migrations succeed.
//! - A store written by a newer binary is never touched.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failures while opening or upgrading the word store.
#[derive(Debug)]
pub enum DbError {
    /// Connection-level SQLite failure (open, pragma, transaction).
    Sqlite(rusqlite::Error),
    /// The store was written by a newer schema than this binary supports.
    UnsupportedSchemaVersion { store_version: u32, supported: u32 },
    /// One migration step failed; the upgrade transaction was rolled back.
    MigrationFailed {
        version: u32,
        source: rusqlite::Error,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "word store error: {err}"),
            Self::UnsupportedSchemaVersion {
                store_version,
                supported,
            } => write!(
                f,
                "word store schema v{store_version} is newer than this build (v{supported})"
            ),
            Self::MigrationFailed { version, source } => {
                write!(f, "word store migration v{version} failed: {source}")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::MigrationFailed { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Current time in epoch milliseconds, the unit used by every timestamp column.
pub(crate) fn now_epoch_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
