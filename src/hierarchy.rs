//! Parent-link checks: page existence and the ancestor walk.
//!
//! Every function takes a plain `&Connection`; callers pass the open
//! transaction so all reads of one walk see the same snapshot.

use crate::db::BookError;
use crate::models::{PageId, RECYCLE_BIN_PAGE_ID, ROOT_PAGE_ID};
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashSet;

/// Which sentinel an ancestor chain terminates at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainEnd {
    Root,
    RecycleBin,
}

/// Result of walking parent links from a starting id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorChain {
    /// Stored pages visited, starting page first. Empty when the walk
    /// started at a sentinel.
    pub pages: Vec<PageId>,
    pub end: ChainEnd,
}

impl AncestorChain {
    pub fn contains(&self, id: PageId) -> bool {
        self.pages.contains(&id)
    }
}

/// True iff a row with `id` exists. Sentinels are never rows.
pub fn page_exists(conn: &Connection, id: PageId) -> Result<bool, BookError> {
    let found = conn
        .query_row("SELECT 1 FROM pages WHERE id = ?1", [id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

fn parent_of(conn: &Connection, id: PageId) -> Result<Option<PageId>, BookError> {
    let parent = conn
        .query_row("SELECT parent_id FROM pages WHERE id = ?1", [id], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(parent)
}

/// Follows `parent_id` from `start` until a sentinel is reached.
///
/// # Errors
///
/// - `PageNotFound(start)` if `start` is not a sentinel and has no row.
/// - `CorruptHierarchy` if an ancestor row is missing (the chain was
///   orphaned by a delete) or an id repeats (a cycle).
pub fn ancestor_chain(conn: &Connection, start: PageId) -> Result<AncestorChain, BookError> {
    let mut pages = Vec::new();
    let mut visited = HashSet::new();
    let mut cursor = start;

    loop {
        if cursor == ROOT_PAGE_ID {
            return Ok(AncestorChain { pages, end: ChainEnd::Root });
        }
        if cursor == RECYCLE_BIN_PAGE_ID {
            return Ok(AncestorChain { pages, end: ChainEnd::RecycleBin });
        }

        if !visited.insert(cursor) {
            tracing::warn!(page_id = cursor, start, "cycle in ancestor chain");
            return Err(BookError::CorruptHierarchy {
                page_id: cursor,
                reason: format!("ancestor chain of page {} loops back to page {}", start, cursor),
            });
        }

        let parent = match parent_of(conn, cursor)? {
            Some(parent) => parent,
            None if cursor == start => return Err(BookError::PageNotFound(start)),
            None => {
                tracing::warn!(page_id = cursor, start, "dangling parent reference");
                return Err(BookError::CorruptHierarchy {
                    page_id: cursor,
                    reason: format!(
                        "ancestor {} of page {} does not exist",
                        cursor, start
                    ),
                });
            }
        };

        pages.push(cursor);
        cursor = parent;
    }
}

/// True iff the chain from `id` reaches the recycle bin before the root.
pub fn is_descendant_of_recycle_bin(conn: &Connection, id: PageId) -> Result<bool, BookError> {
    Ok(ancestor_chain(conn, id)?.end == ChainEnd::RecycleBin)
}
