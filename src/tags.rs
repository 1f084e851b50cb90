//! Tags attached to pages through the `pages_tags` join table.

use crate::db::BookError;
use crate::hierarchy::page_exists;
use crate::models::{PageId, Tag};
use crate::tx::in_transaction;
use rusqlite::{Connection, TransactionBehavior};

/// Attaches `tag` to a page, creating the tag if needed. Attaching the same
/// tag twice is a no-op.
///
/// # Errors
///
/// Returns `BookError::PageNotFound` if the page does not exist.
pub fn tag_page(conn: &Connection, page_id: PageId, tag: &str) -> Result<Tag, BookError> {
    in_transaction(conn, TransactionBehavior::Immediate, |tx| {
        if !page_exists(tx, page_id)? {
            return Err(BookError::PageNotFound(page_id));
        }

        tx.execute("INSERT OR IGNORE INTO tags (tag) VALUES (?1)", [tag])?;
        let tag_id: i64 = tx.query_row("SELECT id FROM tags WHERE tag = ?1", [tag], |row| {
            row.get(0)
        })?;
        tx.execute(
            "INSERT OR IGNORE INTO pages_tags (page_id, tag_id) VALUES (?1, ?2)",
            [page_id, tag_id],
        )?;

        Ok(Tag {
            id: tag_id,
            tag: tag.to_string(),
        })
    })
}

/// Detaches `tag` from a page. Returns whether an association was removed.
pub fn untag_page(conn: &Connection, page_id: PageId, tag: &str) -> Result<bool, BookError> {
    let removed = conn.execute(
        "DELETE FROM pages_tags
         WHERE page_id = ?1 AND tag_id = (SELECT id FROM tags WHERE tag = ?2)",
        rusqlite::params![page_id, tag],
    )?;
    Ok(removed > 0)
}

/// Tags on a page, sorted by name.
pub fn tags_for_page(conn: &Connection, page_id: PageId) -> Result<Vec<Tag>, BookError> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.tag
         FROM tags t
         INNER JOIN pages_tags pt ON pt.tag_id = t.id
         WHERE pt.page_id = ?1
         ORDER BY t.tag",
    )?;

    let tags = stmt
        .query_map([page_id], |row| {
            Ok(Tag {
                id: row.get(0)?,
                tag: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(tags)
}

/// Ids of pages carrying `tag`, ascending.
pub fn pages_with_tag(conn: &Connection, tag: &str) -> Result<Vec<PageId>, BookError> {
    let mut stmt = conn.prepare(
        "SELECT pt.page_id
         FROM pages_tags pt
         INNER JOIN tags t ON t.id = pt.tag_id
         WHERE t.tag = ?1
         ORDER BY pt.page_id",
    )?;

    let ids = stmt
        .query_map([tag], |row| row.get(0))?
        .collect::<Result<Vec<PageId>, _>>()?;

    Ok(ids)
}
