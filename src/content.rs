//! Append-only revision log of page bodies.
//!
//! Revisions are numbered from 1 per page and read newest first. Nothing
//! here touches the page hierarchy, and deleting a page leaves its
//! revisions in place.

use crate::db::BookError;
use crate::hierarchy::page_exists;
use crate::models::{PageContent, PageId};
use crate::tx::in_transaction;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};

fn row_to_content(row: &rusqlite::Row) -> Result<PageContent, rusqlite::Error> {
    Ok(PageContent {
        page_id: row.get(0)?,
        revision: row.get(1)?,
        content: row.get(2)?,
        committed_time: row.get(3)?,
    })
}

/// Stores `content` as the next revision of `page_id`.
///
/// # Errors
///
/// Returns `BookError::PageNotFound` if the page does not exist.
pub fn append_content(
    conn: &Connection,
    page_id: PageId,
    content: &str,
) -> Result<PageContent, BookError> {
    let committed_time = chrono::Utc::now().timestamp();

    let stored = in_transaction(conn, TransactionBehavior::Immediate, |tx| {
        if !page_exists(tx, page_id)? {
            return Err(BookError::PageNotFound(page_id));
        }

        let revision: i64 = tx.query_row(
            "SELECT COALESCE(MAX(revision), 0) + 1 FROM page_contents WHERE page_id = ?1",
            [page_id],
            |row| row.get(0),
        )?;

        tx.execute(
            "INSERT INTO page_contents (page_id, revision, content, committed_time)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![page_id, revision, content, committed_time],
        )?;

        Ok(PageContent {
            page_id,
            revision,
            content: content.to_string(),
            committed_time,
        })
    })?;

    tracing::debug!(page_id, revision = stored.revision, "appended content");
    Ok(stored)
}

/// All revisions of a page, newest first. Empty for unknown pages.
pub fn list_contents(conn: &Connection, page_id: PageId) -> Result<Vec<PageContent>, BookError> {
    let mut stmt = conn.prepare(
        "SELECT page_id, revision, content, committed_time
         FROM page_contents
         WHERE page_id = ?1
         ORDER BY revision DESC",
    )?;

    let contents = stmt
        .query_map([page_id], row_to_content)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contents)
}

pub fn latest_content(conn: &Connection, page_id: PageId) -> Result<Option<PageContent>, BookError> {
    let latest = conn
        .query_row(
            "SELECT page_id, revision, content, committed_time
             FROM page_contents
             WHERE page_id = ?1
             ORDER BY revision DESC
             LIMIT 1",
            [page_id],
            row_to_content,
        )
        .optional()?;
    Ok(latest)
}
