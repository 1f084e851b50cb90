//! Sibling order allocation.
//!
//! New pages are placed `ORDER_INTERVAL` above the current highest sibling,
//! leaving room to move a page between two neighbours later by picking any
//! value strictly between their orders. Gaps are never rebalanced: after
//! enough inserts between the same two neighbours their orders collide and
//! listing falls back to the id tie-break.

use crate::db::BookError;
use crate::models::PageId;
use rusqlite::Connection;

/// Gap between a new page's order and the previous sibling maximum.
pub const ORDER_INTERVAL: i64 = 1024;

/// Order value for a new child of `parent_page_id`: highest sibling order
/// (0 when there are none) plus `ORDER_INTERVAL`.
pub fn next_order(conn: &Connection, parent_page_id: PageId) -> Result<i64, BookError> {
    let max_order: Option<i64> = conn.query_row(
        "SELECT MAX(list_order) FROM pages WHERE parent_id = ?1",
        [parent_page_id],
        |row| row.get(0),
    )?;
    Ok(max_order.unwrap_or(0).saturating_add(ORDER_INTERVAL))
}

/// An order strictly between `lower` and `upper`, if one exists.
///
/// Used to slot a page between two neighbours. Returns `None` once the gap
/// is exhausted.
pub fn order_between(lower: i64, upper: i64) -> Option<i64> {
    let (lo, hi) = if lower <= upper { (lower, upper) } else { (upper, lower) };
    if hi.checked_sub(lo)? < 2 {
        return None;
    }
    Some(lo + (hi - lo) / 2)
}
