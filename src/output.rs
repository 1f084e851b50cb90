//! Output formatting for the CLI.
//!
//! - **JSON**: compact machine-readable output (default)
//! - **Pretty**: human-readable text (enabled via `--pretty`)
//!
//! JSON output serializes the models directly, so the field names are the
//! ones declared on the structs in `models`.

use crate::models::{
    Page, PageContent, PageId, PageSummary, Tag, RECYCLE_BIN_PAGE_ID, ROOT_PAGE_ID,
};
use chrono::{TimeZone, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Json,
    Pretty,
}

/// Serialize a value to compact JSON and print to stdout.
///
/// Serialization of the crate's models cannot fail; if a broken `Serialize`
/// impl ever does, the error object is printed instead.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{}", json),
        Err(e) => println!("{}", serde_json::json!({ "error": e.to_string() })),
    }
}

/// Human label for a parent id: sentinels by name, pages by number.
pub fn parent_label(parent: PageId) -> String {
    match parent {
        ROOT_PAGE_ID => "(root)".to_string(),
        RECYCLE_BIN_PAGE_ID => "(recycle bin)".to_string(),
        id => id.to_string(),
    }
}

/// Format:
/// ```text
/// Subject: Chapter 1
/// ID:      12
/// Parent:  (root)
/// Order:   2048
/// ```
pub fn print_pretty_page(page: &Page) {
    println!("Subject: {}", page.subject);
    println!("ID:      {}", page.id);
    println!("Parent:  {}", parent_label(page.parent_page_id));
    println!("Order:   {}", page.order);
}

/// One line per child: `<id> | <order> | <subject> | <children> children, <revisions> revisions`
pub fn print_pretty_summaries(summaries: &[PageSummary]) {
    if summaries.is_empty() {
        println!("(no pages)");
        return;
    }

    for summary in summaries {
        println!(
            "{} | {} | {} | {} children, {} revisions",
            summary.page.id,
            summary.page.order,
            summary.page.subject,
            summary.children_count,
            summary.content_count
        );
    }
}

fn format_committed_time(secs: i64) -> String {
    match Utc.timestamp_opt(secs, 0).single() {
        Some(t) => t.to_rfc3339(),
        None => secs.to_string(),
    }
}

pub fn print_pretty_content(content: &PageContent) {
    println!(
        "Revision {} of page {} ({})",
        content.revision,
        content.page_id,
        format_committed_time(content.committed_time)
    );
    println!();
    println!("{}", content.content);
}

pub fn print_pretty_contents(contents: &[PageContent]) {
    if contents.is_empty() {
        println!("(no revisions)");
        return;
    }

    for (i, content) in contents.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_pretty_content(content);
    }
}

pub fn print_pretty_tags(tags: &[Tag]) {
    if tags.is_empty() {
        println!("(no tags)");
        return;
    }
    let names: Vec<&str> = tags.iter().map(|t| t.tag.as_str()).collect();
    println!("{}", names.join(", "));
}

/// Dispatch between JSON serialization and a pretty-print closure.
pub fn print<T: Serialize>(mode: OutputMode, value: &T, pretty_fn: impl FnOnce()) {
    match mode {
        OutputMode::Json => print_json(value),
        OutputMode::Pretty => pretty_fn(),
    }
}
