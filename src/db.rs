//! Database connection management, migrations, and error types.
//!
//! This module handles SQLite connection setup (WAL mode, foreign keys, busy
//! timeout), schema versioning via embedded migrations, database path
//! resolution, and the unified error type for the crate.

use crate::models::PageId;
use rusqlite::Connection;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides the default database location.
pub const DB_PATH_ENV: &str = "LETTERITE_DB";

/// Central error type for the page store.
///
/// Validation variants are raised inside a transaction and cause it to roll
/// back; `Db` and `Io` carry the underlying cause untouched.
#[derive(Debug, Error)]
pub enum BookError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    /// I/O operation failed (directory creation, reading stdin).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Page {0} not found")]
    PageNotFound(PageId),

    #[error("Parent page {0} not found")]
    ParentPageNotFound(PageId),

    /// Permanent deletion requires the page to sit under the recycle bin.
    #[error("Page {0} is not in the recycle bin")]
    PageIsNotInRecycleBin(PageId),

    #[error("Invalid update parameter: {0}")]
    InvalidUpdateParam(String),

    /// Invalid input provided by the user or caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Moving the page would make it its own ancestor.
    #[error("Cannot move page {page_id} under {parent_id}: it would become its own ancestor")]
    CyclicParent { page_id: PageId, parent_id: PageId },

    /// The stored parent links do not form a valid chain to a sentinel.
    #[error("Corrupt hierarchy at page {page_id}: {reason}")]
    CorruptHierarchy { page_id: PageId, reason: String },
}

/// Coarse classification of a [`BookError`], used by callers to decide
/// between a client-side and a server-side failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    StructuralViolation,
    StorageFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not-found",
            Self::InvalidInput => "invalid-input",
            Self::StructuralViolation => "structural-violation",
            Self::StorageFailure => "storage-failure",
        }
    }

    /// True for failures caused by the request rather than by storage.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::StorageFailure)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl BookError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PageNotFound(_) | Self::ParentPageNotFound(_) => ErrorKind::NotFound,
            Self::InvalidUpdateParam(_) | Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::PageIsNotInRecycleBin(_) | Self::CyclicParent { .. } => {
                ErrorKind::StructuralViolation
            }
            Self::Db(_) | Self::Io(_) | Self::CorruptHierarchy { .. } => ErrorKind::StorageFailure,
        }
    }
}

/// Returns the path to the SQLite database file.
///
/// Resolution order:
/// 1. `explicit` (the `--db` flag), if given
/// 2. `LETTERITE_DB` environment variable, if set
/// 3. `~/.letterite/book.sqlite3`
///
/// Creates the parent directory if it doesn't exist.
///
/// # Errors
///
/// Returns `BookError::Io` if the home directory cannot be determined or the
/// parent directory cannot be created.
pub fn db_path(explicit: Option<&Path>) -> Result<PathBuf, BookError> {
    let path = if let Some(p) = explicit {
        p.to_path_buf()
    } else if let Ok(env_path) = std::env::var(DB_PATH_ENV) {
        PathBuf::from(env_path)
    } else {
        let home = dirs::home_dir().ok_or_else(|| {
            BookError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine home directory",
            ))
        })?;
        home.join(".letterite").join("book.sqlite3")
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    Ok(path)
}

/// Opens a SQLite connection at the specified path with proper settings.
///
/// - **WAL mode**: concurrent readers with serialized writers
/// - **Foreign keys**: enabled
/// - **Busy timeout**: 5 seconds, so concurrent writers wait instead of failing
///
/// # Errors
///
/// Returns `BookError::Db` if the connection cannot be opened or configured.
pub fn open_connection_at(path: &Path) -> Result<Connection, BookError> {
    let conn = Connection::open(path)?;

    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.busy_timeout(std::time::Duration::from_secs(5))?;

    tracing::debug!(path = %path.display(), "opened database");
    Ok(conn)
}

/// Runs all pending database migrations.
///
/// Reads the current version from `schema_meta` (0 when the table does not
/// exist yet; any other read failure is returned)
/// and applies every embedded migration above it, each in its own
/// transaction. Each migration sets `schema_meta.version` itself.
///
/// # Errors
///
/// Returns `BookError::Db` if a migration fails; that migration is rolled back.
pub fn run_migrations(conn: &mut Connection) -> Result<(), BookError> {
    let has_meta: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_meta')",
        [],
        |row| row.get(0),
    )?;
    let current_version: i64 = if has_meta {
        conn.query_row("SELECT version FROM schema_meta LIMIT 1", [], |row| {
            row.get(0)
        })?
    } else {
        0
    };

    let migrations: [(i64, &str); 2] = [
        (1, include_str!("../migrations/001_initial.sql")),
        (2, include_str!("../migrations/002_tag_uniqueness.sql")),
    ];

    for (target_version, sql) in migrations {
        if target_version > current_version {
            let tx = conn.transaction()?;
            tx.execute_batch(sql)?;
            tx.commit()?;
            tracing::info!(version = target_version, "applied migration");
        }
    }

    Ok(())
}
