//! Hierarchical page storage with a recycle bin, backed by SQLite.
//!
//! Pages form a tree under two implicit containers: the root and the
//! recycle bin. [`store::PageStore`] is the entry point; it creates, moves,
//! reorders, renames and lists pages, and only purges pages that have first
//! been moved under the recycle bin.

pub mod content;
pub mod db;
pub mod hierarchy;
pub mod models;
pub mod order;
pub mod output;
pub mod store;
pub mod tags;
pub mod tx;

pub use db::{BookError, ErrorKind};
pub use models::{Page, PageId, PageSummary, PageUpdate, RECYCLE_BIN_PAGE_ID, ROOT_PAGE_ID};
pub use store::PageStore;
