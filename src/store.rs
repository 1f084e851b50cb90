//! The page store: hierarchy mutations and reads over one SQLite connection.
//!
//! Every operation runs in its own transaction. Validation failures abort
//! the transaction before anything is written, so callers never observe a
//! partial change.
//!
//! Deletion is a two-step protocol: a page is first moved under the recycle
//! bin ([`PageStore::trash_page`]), and only pages whose ancestor chain
//! reaches the recycle bin can be removed with [`PageStore::delete_page`].
//! Deleting never cascades; children of a deleted page keep their
//! `parent_id` and become unreachable from either sentinel.

use crate::db::{self, BookError};
use crate::hierarchy::{ancestor_chain, is_descendant_of_recycle_bin, page_exists};
use crate::models::{
    is_sentinel, Page, PageId, PageSummary, PageUpdate, RECYCLE_BIN_PAGE_ID, ROOT_PAGE_ID,
};
use crate::order::{next_order, order_between};
use crate::tx::in_transaction;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};
use std::path::Path;

/// Owns the database connection; construct once and pass by reference.
pub struct PageStore {
    conn: Connection,
}

fn row_to_page(row: &rusqlite::Row) -> Result<Page, rusqlite::Error> {
    Ok(Page {
        id: row.get(0)?,
        parent_page_id: row.get(1)?,
        order: row.get(2)?,
        subject: row.get(3)?,
    })
}

/// Fails with `ParentPageNotFound` unless `parent` is a sentinel or an
/// existing page.
fn ensure_parent(conn: &Connection, parent: PageId) -> Result<(), BookError> {
    if is_sentinel(parent) {
        return Ok(());
    }
    if !page_exists(conn, parent)? {
        return Err(BookError::ParentPageNotFound(parent));
    }
    Ok(())
}

fn load_page(conn: &Connection, page_id: PageId) -> Result<Page, BookError> {
    conn.query_row(
        "SELECT id, parent_id, list_order, subject FROM pages WHERE id = ?1",
        [page_id],
        row_to_page,
    )
    .optional()?
    .ok_or(BookError::PageNotFound(page_id))
}

impl PageStore {
    /// Opens (or creates) the database at `path` and applies migrations.
    pub fn open(path: &Path) -> Result<Self, BookError> {
        let mut conn = db::open_connection_at(path)?;
        db::run_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// A migrated store backed by a private in-memory database.
    pub fn open_in_memory() -> Result<Self, BookError> {
        let mut conn = Connection::open_in_memory()?;
        db::run_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Creates a page as the last (highest-ordered) child of `parent_page_id`.
    ///
    /// # Errors
    ///
    /// `ParentPageNotFound` if the parent is neither a sentinel nor a stored
    /// page. Nothing is inserted in that case.
    pub fn create_page(&self, parent_page_id: PageId, subject: &str) -> Result<Page, BookError> {
        tracing::debug!(parent_page_id, "create_page");

        let page = in_transaction(&self.conn, TransactionBehavior::Immediate, |tx| {
            ensure_parent(tx, parent_page_id)?;
            let order = next_order(tx, parent_page_id)?;

            tx.execute(
                "INSERT INTO pages (parent_id, list_order, subject) VALUES (?1, ?2, ?3)",
                rusqlite::params![parent_page_id, order, subject],
            )?;

            Ok(Page {
                id: tx.last_insert_rowid(),
                parent_page_id,
                order,
                subject: subject.to_string(),
            })
        })?;

        tracing::info!(page_id = page.id, parent_page_id, order = page.order, "created page");
        Ok(page)
    }

    /// Writes exactly one column of an existing page.
    ///
    /// # Errors
    ///
    /// - `PageNotFound` if `page_id` has no row.
    /// - `ParentPageNotFound` if a new parent is neither a sentinel nor a page.
    /// - `CyclicParent` if the new parent is the page itself or one of its
    ///   descendants.
    pub fn update_page(&self, page_id: PageId, update: PageUpdate) -> Result<(), BookError> {
        tracing::debug!(page_id, column = update.column(), "update_page");

        in_transaction(&self.conn, TransactionBehavior::Immediate, |tx| {
            if !page_exists(tx, page_id)? {
                return Err(BookError::PageNotFound(page_id));
            }

            let changed = match &update {
                PageUpdate::Parent(parent) => {
                    ensure_parent(tx, *parent)?;
                    if *parent == page_id || ancestor_chain(tx, *parent)?.contains(page_id) {
                        return Err(BookError::CyclicParent {
                            page_id,
                            parent_id: *parent,
                        });
                    }
                    tx.execute(
                        "UPDATE pages SET parent_id = ?1 WHERE id = ?2",
                        rusqlite::params![parent, page_id],
                    )?
                }
                PageUpdate::Order(order) => tx.execute(
                    "UPDATE pages SET list_order = ?1 WHERE id = ?2",
                    rusqlite::params![order, page_id],
                )?,
                PageUpdate::Subject(subject) => tx.execute(
                    "UPDATE pages SET subject = ?1 WHERE id = ?2",
                    rusqlite::params![subject, page_id],
                )?,
            };

            if changed != 1 {
                return Err(BookError::PageNotFound(page_id));
            }
            Ok(())
        })?;

        if let PageUpdate::Parent(parent) = update {
            tracing::info!(page_id, parent_page_id = parent, "moved page");
        }
        Ok(())
    }

    pub fn move_page(&self, page_id: PageId, new_parent: PageId) -> Result<(), BookError> {
        self.update_page(page_id, PageUpdate::Parent(new_parent))
    }

    pub fn reorder_page(&self, page_id: PageId, order: i64) -> Result<(), BookError> {
        self.update_page(page_id, PageUpdate::Order(order))
    }

    pub fn rename_page(&self, page_id: PageId, subject: &str) -> Result<(), BookError> {
        self.update_page(page_id, PageUpdate::Subject(subject.to_string()))
    }

    /// Soft delete: moves the page (and so its subtree) under the recycle bin.
    pub fn trash_page(&self, page_id: PageId) -> Result<(), BookError> {
        self.move_page(page_id, RECYCLE_BIN_PAGE_ID)
    }

    /// Moves a page out of the trash to `new_parent` (root by default).
    pub fn restore_page(&self, page_id: PageId, new_parent: Option<PageId>) -> Result<(), BookError> {
        self.move_page(page_id, new_parent.unwrap_or(ROOT_PAGE_ID))
    }

    /// Gives `page_id` an order strictly between the orders of two sibling
    /// pages and returns it.
    ///
    /// # Errors
    ///
    /// `PageNotFound` if any of the three pages is missing;
    /// `InvalidUpdateParam` if the three pages do not share one parent or no
    /// integer fits between the neighbours' orders.
    pub fn reorder_between(
        &self,
        page_id: PageId,
        lower_sibling: PageId,
        upper_sibling: PageId,
    ) -> Result<i64, BookError> {
        let order = in_transaction(&self.conn, TransactionBehavior::Immediate, |tx| {
            let page = load_page(tx, page_id)?;
            let lower = load_page(tx, lower_sibling)?;
            let upper = load_page(tx, upper_sibling)?;
            if lower.parent_page_id != upper.parent_page_id {
                return Err(BookError::InvalidUpdateParam(format!(
                    "pages {} and {} are not siblings",
                    lower_sibling, upper_sibling
                )));
            }
            if page.parent_page_id != lower.parent_page_id {
                return Err(BookError::InvalidUpdateParam(format!(
                    "page {} is not a sibling of {} and {}",
                    page_id, lower_sibling, upper_sibling
                )));
            }

            let order = order_between(lower.order, upper.order).ok_or_else(|| {
                BookError::InvalidUpdateParam(format!(
                    "no free order between {} and {}",
                    lower.order, upper.order
                ))
            })?;

            tx.execute(
                "UPDATE pages SET list_order = ?1 WHERE id = ?2",
                rusqlite::params![order, page_id],
            )?;
            Ok(order)
        })?;

        tracing::debug!(page_id, order, "reordered page between siblings");
        Ok(order)
    }

    /// Permanently removes one page that lives under the recycle bin.
    ///
    /// Children are not removed and keep pointing at the deleted id.
    ///
    /// # Errors
    ///
    /// - `PageNotFound` if the page does not exist (or vanished before the
    ///   delete statement ran).
    /// - `PageIsNotInRecycleBin` if its ancestor chain reaches the root.
    /// - `CorruptHierarchy` if the chain is broken or cyclic.
    pub fn delete_page(&self, page_id: PageId) -> Result<(), BookError> {
        tracing::debug!(page_id, "delete_page");

        in_transaction(&self.conn, TransactionBehavior::Immediate, |tx| {
            if is_sentinel(page_id) {
                return Err(BookError::PageNotFound(page_id));
            }
            if !is_descendant_of_recycle_bin(tx, page_id)? {
                return Err(BookError::PageIsNotInRecycleBin(page_id));
            }

            let deleted = tx.execute("DELETE FROM pages WHERE id = ?1", [page_id])?;
            if deleted != 1 {
                return Err(BookError::PageNotFound(page_id));
            }
            Ok(())
        })?;

        tracing::info!(page_id, "deleted page");
        Ok(())
    }

    pub fn get_page(&self, page_id: PageId) -> Result<Page, BookError> {
        load_page(&self.conn, page_id)
    }

    /// Direct children of `parent_page_id` with live child and revision
    /// counts, highest order first (ties: highest id first).
    ///
    /// An unknown parent yields an empty list rather than an error.
    pub fn get_pages_by_parent(&self, parent_page_id: PageId) -> Result<Vec<PageSummary>, BookError> {
        in_transaction(&self.conn, TransactionBehavior::Deferred, |tx| {
            let mut stmt = tx.prepare(
                "SELECT A.id, A.parent_id, A.list_order, A.subject,
                        (SELECT COUNT(*) FROM pages B WHERE B.parent_id = A.id),
                        (SELECT COUNT(*) FROM page_contents C WHERE C.page_id = A.id)
                 FROM pages A
                 WHERE A.parent_id = ?1
                 ORDER BY A.list_order DESC, A.id DESC",
            )?;

            let summaries = stmt
                .query_map([parent_page_id], |row| {
                    Ok(PageSummary {
                        page: row_to_page(row)?,
                        children_count: row.get(4)?,
                        content_count: row.get(5)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(summaries)
        })
    }

    /// Number of stored pages.
    pub fn count_pages(&self) -> Result<i64, BookError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::INVALID_PAGE_ID;
    use std::collections::HashSet;

    fn setup_store() -> PageStore {
        PageStore::open_in_memory().expect("Failed to open in-memory store")
    }

    #[test]
    fn test_first_page_under_root_gets_1024() {
        let store = setup_store();
        let page = store.create_page(ROOT_PAGE_ID, "Cover").unwrap();
        assert_eq!(page.order, 1024);
        assert_eq!(page.parent_page_id, ROOT_PAGE_ID);
        assert_eq!(page.subject, "Cover");
        assert!(page.id > 0);
    }

    #[test]
    fn test_second_sibling_gets_2048() {
        let store = setup_store();
        store.create_page(ROOT_PAGE_ID, "One").unwrap();
        let second = store.create_page(ROOT_PAGE_ID, "Two").unwrap();
        assert_eq!(second.order, 2048);
    }

    #[test]
    fn test_order_is_scoped_per_parent() {
        let store = setup_store();
        let a = store.create_page(ROOT_PAGE_ID, "A").unwrap();
        store.create_page(ROOT_PAGE_ID, "B").unwrap();
        let child = store.create_page(a.id, "A.1").unwrap();
        assert_eq!(child.order, 1024);
    }

    #[test]
    fn test_empty_subject_is_allowed() {
        let store = setup_store();
        let page = store.create_page(ROOT_PAGE_ID, "").unwrap();
        assert_eq!(store.get_page(page.id).unwrap().subject, "");
    }

    #[test]
    fn test_create_under_recycle_bin() {
        let store = setup_store();
        let page = store.create_page(RECYCLE_BIN_PAGE_ID, "Scratch").unwrap();
        assert_eq!(page.parent_page_id, RECYCLE_BIN_PAGE_ID);
        assert_eq!(page.order, 1024);
    }

    #[test]
    fn test_create_with_missing_parent_leaves_table_unchanged() {
        let store = setup_store();
        store.create_page(ROOT_PAGE_ID, "Existing").unwrap();
        let before = store.count_pages().unwrap();

        let err = store.create_page(999, "Orphan").unwrap_err();
        assert!(matches!(err, BookError::ParentPageNotFound(999)));
        assert_eq!(store.count_pages().unwrap(), before);
    }

    #[test]
    fn test_create_with_invalid_sentinel_parent() {
        let store = setup_store();
        let err = store.create_page(INVALID_PAGE_ID, "x").unwrap_err();
        assert!(matches!(err, BookError::ParentPageNotFound(INVALID_PAGE_ID)));
    }

    #[test]
    fn test_get_page_not_found() {
        let store = setup_store();
        assert!(matches!(store.get_page(5), Err(BookError::PageNotFound(5))));
    }

    #[test]
    fn test_get_page_is_idempotent() {
        let store = setup_store();
        let page = store.create_page(ROOT_PAGE_ID, "Stable").unwrap();
        let first = store.get_page(page.id).unwrap();
        let second = store.get_page(page.id).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, page);
    }

    #[test]
    fn test_update_each_field() {
        let store = setup_store();
        let parent = store.create_page(ROOT_PAGE_ID, "Parent").unwrap();
        let page = store.create_page(ROOT_PAGE_ID, "Page").unwrap();

        store.rename_page(page.id, "Renamed").unwrap();
        store.reorder_page(page.id, 77).unwrap();
        store.move_page(page.id, parent.id).unwrap();

        let updated = store.get_page(page.id).unwrap();
        assert_eq!(updated.subject, "Renamed");
        assert_eq!(updated.order, 77);
        assert_eq!(updated.parent_page_id, parent.id);
    }

    #[test]
    fn test_update_missing_page() {
        let store = setup_store();
        let err = store
            .update_page(12, PageUpdate::Subject("x".to_string()))
            .unwrap_err();
        assert!(matches!(err, BookError::PageNotFound(12)));
    }

    #[test]
    fn test_move_to_missing_parent_is_rejected() {
        let store = setup_store();
        let page = store.create_page(ROOT_PAGE_ID, "Page").unwrap();
        let err = store.move_page(page.id, 404).unwrap_err();
        assert!(matches!(err, BookError::ParentPageNotFound(404)));
        assert_eq!(store.get_page(page.id).unwrap(), page);
    }

    #[test]
    fn test_move_under_own_descendant_is_rejected() {
        let store = setup_store();
        let a = store.create_page(ROOT_PAGE_ID, "A").unwrap();
        let b = store.create_page(a.id, "B").unwrap();
        let c = store.create_page(b.id, "C").unwrap();

        let err = store.move_page(a.id, c.id).unwrap_err();
        assert!(matches!(err, BookError::CyclicParent { .. }));
        let err = store.move_page(a.id, a.id).unwrap_err();
        assert!(matches!(err, BookError::CyclicParent { .. }));
        assert_eq!(store.get_page(a.id).unwrap().parent_page_id, ROOT_PAGE_ID);
    }

    #[test]
    fn test_invalid_parsed_update_leaves_row_unchanged() {
        let store = setup_store();
        let page = store.create_page(ROOT_PAGE_ID, "Page").unwrap();

        let result =
            PageUpdate::parse("order", "not-a-number").and_then(|u| store.update_page(page.id, u));
        assert!(matches!(result, Err(BookError::InvalidUpdateParam(_))));
        assert_eq!(store.get_page(page.id).unwrap(), page);
    }

    #[test]
    fn test_delete_outside_recycle_bin_is_rejected() {
        let store = setup_store();
        let a = store.create_page(ROOT_PAGE_ID, "A").unwrap();
        let b = store.create_page(a.id, "B").unwrap();
        let before = store.count_pages().unwrap();

        let err = store.delete_page(b.id).unwrap_err();
        assert!(matches!(err, BookError::PageIsNotInRecycleBin(id) if id == b.id));
        assert_eq!(store.count_pages().unwrap(), before);
    }

    #[test]
    fn test_trash_then_delete() {
        let store = setup_store();
        let page = store.create_page(ROOT_PAGE_ID, "Doomed").unwrap();

        store.trash_page(page.id).unwrap();
        store.delete_page(page.id).unwrap();

        assert!(matches!(store.get_page(page.id), Err(BookError::PageNotFound(_))));
        assert_eq!(store.count_pages().unwrap(), 0);
    }

    #[test]
    fn test_delete_nested_in_trashed_subtree() {
        let store = setup_store();
        let folder = store.create_page(ROOT_PAGE_ID, "Folder").unwrap();
        let leaf = store.create_page(folder.id, "Leaf").unwrap();

        store.trash_page(folder.id).unwrap();
        store.delete_page(leaf.id).unwrap();
        assert!(store.get_page(folder.id).is_ok());
    }

    #[test]
    fn test_delete_missing_page() {
        let store = setup_store();
        assert!(matches!(store.delete_page(31), Err(BookError::PageNotFound(31))));
        assert!(matches!(
            store.delete_page(RECYCLE_BIN_PAGE_ID),
            Err(BookError::PageNotFound(_))
        ));
    }

    #[test]
    fn test_delete_does_not_cascade() {
        let store = setup_store();
        let parent = store.create_page(ROOT_PAGE_ID, "Parent").unwrap();
        let child = store.create_page(parent.id, "Child").unwrap();

        store.trash_page(parent.id).unwrap();
        store.delete_page(parent.id).unwrap();

        let orphan = store.get_page(child.id).unwrap();
        assert_eq!(orphan.parent_page_id, parent.id);
        // The orphan's chain is broken, so it can no longer be purged.
        let err = store.delete_page(child.id).unwrap_err();
        assert!(matches!(err, BookError::CorruptHierarchy { .. }));
    }

    #[test]
    fn test_restore_from_trash() {
        let store = setup_store();
        let page = store.create_page(ROOT_PAGE_ID, "Oops").unwrap();
        store.trash_page(page.id).unwrap();
        store.restore_page(page.id, None).unwrap();

        assert_eq!(store.get_page(page.id).unwrap().parent_page_id, ROOT_PAGE_ID);
        assert!(matches!(
            store.delete_page(page.id),
            Err(BookError::PageIsNotInRecycleBin(_))
        ));
    }

    #[test]
    fn test_list_children_ordered_with_counts() {
        let store = setup_store();
        let first = store.create_page(ROOT_PAGE_ID, "First").unwrap();
        let second = store.create_page(ROOT_PAGE_ID, "Second").unwrap();
        store.create_page(first.id, "First.1").unwrap();
        store.create_page(first.id, "First.2").unwrap();
        store
            .connection()
            .execute_batch(&format!(
                "INSERT INTO page_contents VALUES ({0}, 1, 'a', 0);
                 INSERT INTO page_contents VALUES ({0}, 2, 'b', 0);
                 INSERT INTO page_contents VALUES ({0}, 3, 'c', 0);",
                first.id
            ))
            .unwrap();

        let listed = store.get_pages_by_parent(ROOT_PAGE_ID).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].page, second);
        assert_eq!(listed[0].children_count, 0);
        assert_eq!(listed[0].content_count, 0);
        assert_eq!(listed[1].page.id, first.id);
        assert_eq!(listed[1].children_count, 2);
        assert_eq!(listed[1].content_count, 3);
    }

    #[test]
    fn test_list_ties_break_by_id() {
        let store = setup_store();
        let a = store.create_page(ROOT_PAGE_ID, "A").unwrap();
        let b = store.create_page(ROOT_PAGE_ID, "B").unwrap();
        store.reorder_page(a.id, 500).unwrap();
        store.reorder_page(b.id, 500).unwrap();

        let ids: Vec<PageId> = store
            .get_pages_by_parent(ROOT_PAGE_ID)
            .unwrap()
            .into_iter()
            .map(|s| s.page.id)
            .collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[test]
    fn test_list_unknown_parent_is_empty() {
        let store = setup_store();
        assert!(store.get_pages_by_parent(8080).unwrap().is_empty());
    }

    #[test]
    fn test_every_page_listed_once_under_its_parent() {
        let store = setup_store();
        let a = store.create_page(ROOT_PAGE_ID, "A").unwrap();
        let b = store.create_page(a.id, "B").unwrap();
        let c = store.create_page(a.id, "C").unwrap();
        let d = store.create_page(b.id, "D").unwrap();
        store.trash_page(c.id).unwrap();

        for id in [a.id, b.id, c.id, d.id] {
            let page = store.get_page(id).unwrap();
            let siblings = store.get_pages_by_parent(page.parent_page_id).unwrap();
            let hits: Vec<&PageSummary> = siblings.iter().filter(|s| s.page.id == id).collect();
            assert_eq!(hits.len(), 1);

            let live_children = store.get_pages_by_parent(id).unwrap().len() as i64;
            assert_eq!(hits[0].children_count, live_children);
        }
    }

    #[test]
    fn test_reorder_between_siblings() {
        let store = setup_store();
        let a = store.create_page(ROOT_PAGE_ID, "A").unwrap();
        let b = store.create_page(ROOT_PAGE_ID, "B").unwrap();
        let c = store.create_page(ROOT_PAGE_ID, "C").unwrap();

        let order = store.reorder_between(c.id, a.id, b.id).unwrap();
        assert_eq!(order, 1536);

        let subjects: Vec<String> = store
            .get_pages_by_parent(ROOT_PAGE_ID)
            .unwrap()
            .into_iter()
            .map(|s| s.page.subject)
            .collect();
        assert_eq!(subjects, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_reorder_between_exhausted_gap() {
        let store = setup_store();
        let a = store.create_page(ROOT_PAGE_ID, "A").unwrap();
        let b = store.create_page(ROOT_PAGE_ID, "B").unwrap();
        let c = store.create_page(ROOT_PAGE_ID, "C").unwrap();
        store.reorder_page(b.id, a.order + 1).unwrap();

        let err = store.reorder_between(c.id, a.id, b.id).unwrap_err();
        assert!(matches!(err, BookError::InvalidUpdateParam(_)));
        assert_eq!(store.get_page(c.id).unwrap().order, c.order);
    }

    #[test]
    fn test_reorder_between_requires_siblings() {
        let store = setup_store();
        let a = store.create_page(ROOT_PAGE_ID, "A").unwrap();
        let b = store.create_page(a.id, "B").unwrap();
        let c = store.create_page(ROOT_PAGE_ID, "C").unwrap();

        let err = store.reorder_between(c.id, a.id, b.id).unwrap_err();
        assert!(matches!(err, BookError::InvalidUpdateParam(_)));
    }

    #[test]
    fn test_reorder_between_rejects_page_under_other_parent() {
        let store = setup_store();
        let a = store.create_page(ROOT_PAGE_ID, "A").unwrap();
        let b = store.create_page(ROOT_PAGE_ID, "B").unwrap();
        let nested = store.create_page(a.id, "Nested").unwrap();

        let err = store.reorder_between(nested.id, a.id, b.id).unwrap_err();
        assert!(matches!(err, BookError::InvalidUpdateParam(_)));
        assert_eq!(store.get_page(nested.id).unwrap(), nested);
    }

    #[test]
    fn test_concurrent_creates_get_distinct_orders() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("book.sqlite3");
        PageStore::open(&path).expect("initial open runs migrations");

        let workers: Vec<_> = (0..8)
            .map(|worker| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let store = PageStore::open(&path).expect("open per thread");
                    (0..20)
                        .map(|i| {
                            store
                                .create_page(ROOT_PAGE_ID, &format!("w{}-{}", worker, i))
                                .expect("create under contention")
                                .order
                        })
                        .collect::<Vec<i64>>()
                })
            })
            .collect();

        let orders: Vec<i64> = workers
            .into_iter()
            .flat_map(|handle| handle.join().expect("worker panicked"))
            .collect();
        let unique: HashSet<i64> = orders.iter().copied().collect();

        assert_eq!(orders.len(), 160);
        assert_eq!(unique.len(), 160);
        assert_eq!(unique.iter().max().copied(), Some(160 * 1024));
    }

    #[test]
    fn test_open_file_store_persists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("book.sqlite3");

        let id = {
            let store = PageStore::open(&path).unwrap();
            store.create_page(ROOT_PAGE_ID, "Persistent").unwrap().id
        };

        let reopened = PageStore::open(&path).unwrap();
        assert_eq!(reopened.get_page(id).unwrap().subject, "Persistent");
    }
}
