//! Core data structures for the page store.
//!
//! These structs are the shared language between the storage layer (SQL),
//! the CLI layer (clap), and the output layer (serde_json). The JSON field
//! names keep the `ID` / `parentPageID` shape the web client expects.

use crate::db::BookError;
use serde::Serialize;

/// Identifier of a stored page. Stored ids are always positive.
pub type PageId = i64;

/// Implicit top of the visible tree. Never a row in `pages`.
pub const ROOT_PAGE_ID: PageId = 0;

/// Implicit top of the trash subtree. Never a row in `pages`.
pub const RECYCLE_BIN_PAGE_ID: PageId = -1;

/// Placeholder for "no page"; never stored and never a valid parent.
pub const INVALID_PAGE_ID: PageId = -2;

/// True for the two reserved container ids.
pub fn is_sentinel(id: PageId) -> bool {
    id == ROOT_PAGE_ID || id == RECYCLE_BIN_PAGE_ID
}

/// A node in the page hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    #[serde(rename = "ID")]
    pub id: PageId,
    #[serde(rename = "parentPageID")]
    pub parent_page_id: PageId,
    pub order: i64,
    pub subject: String,
}

/// A page plus counts computed at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    #[serde(flatten)]
    pub page: Page,
    #[serde(rename = "childrenCount")]
    pub children_count: i64,
    #[serde(rename = "contentCount")]
    pub content_count: i64,
}

/// One single-column change to a page. Exactly one column is written per update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageUpdate {
    Parent(PageId),
    Order(i64),
    Subject(String),
}

impl PageUpdate {
    /// Build an update from the loose `field` / `value` string pair used by
    /// outer layers. Field names: `parentPageID`, `order`, `subject`.
    ///
    /// # Errors
    ///
    /// `BookError::InvalidUpdateParam` for an unknown field or a value that
    /// is not an integer where one is required.
    pub fn parse(field: &str, value: &str) -> Result<Self, BookError> {
        let parse_int = |v: &str| {
            v.trim().parse::<i64>().map_err(|_| {
                BookError::InvalidUpdateParam(format!(
                    "field '{}' expects an integer, got '{}'",
                    field, v
                ))
            })
        };

        match field {
            "parentPageID" => Ok(Self::Parent(parse_int(value)?)),
            "order" => Ok(Self::Order(parse_int(value)?)),
            "subject" => Ok(Self::Subject(value.to_string())),
            other => Err(BookError::InvalidUpdateParam(format!(
                "unknown field '{}'. Valid fields: parentPageID, order, subject",
                other
            ))),
        }
    }

    /// The `pages` column this update writes.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Parent(_) => "parent_id",
            Self::Order(_) => "list_order",
            Self::Subject(_) => "subject",
        }
    }
}

/// One stored revision of a page's body. Revisions start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContent {
    #[serde(rename = "pageID")]
    pub page_id: PageId,
    pub revision: i64,
    pub content: String,
    /// Unix seconds.
    #[serde(rename = "committedTime")]
    pub committed_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    #[serde(rename = "ID")]
    pub id: i64,
    pub tag: String,
}
