//! Scoped transactions: commit on success, roll back on every error path.

use crate::db::BookError;
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Runs `work` inside one transaction on `conn`.
///
/// Commits if `work` returns `Ok`. On `Err` the transaction is rolled back
/// and the error is returned unchanged; a rollback failure is logged but
/// never replaces the original error. Writers should pass
/// `TransactionBehavior::Immediate` so the write lock is taken before any
/// validation read.
pub fn in_transaction<T, F>(
    conn: &Connection,
    behavior: TransactionBehavior,
    work: F,
) -> Result<T, BookError>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, BookError>,
{
    let tx = Transaction::new_unchecked(conn, behavior)?;

    match work(&tx) {
        Ok(value) => {
            tx.commit()?;
            Ok(value)
        }
        Err(err) => {
            tracing::debug!(error = %err, "rolling back transaction");
            if let Err(rollback_err) = tx.rollback() {
                tracing::warn!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}
