//! Letterite CLI: manage a tree of pages with a recycle bin.
//!
//! All output is compact JSON by default, with `--pretty` for human-readable
//! text. Errors are written to stderr as JSON; the exit status is 2 for
//! request errors (not found, invalid input, structural violations) and 1
//! for storage failures.

use clap::{Parser, Subcommand};
use letterite::db::{self, BookError};
use letterite::models::{PageId, PageUpdate, RECYCLE_BIN_PAGE_ID, ROOT_PAGE_ID};
use letterite::output::{self, OutputMode};
use letterite::store::PageStore;
use letterite::{content, tags};
use std::io::{self, Read as _};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Input validation applied before anything reaches the store.
mod validation {
    use letterite::db::BookError;

    pub const MAX_SUBJECT_LEN: usize = 500;
    pub const MAX_BODY_LEN: usize = 10_000_000; // 10 MB
    pub const MAX_TAG_LEN: usize = 100;

    pub fn validate_subject(subject: &str) -> Result<(), BookError> {
        if subject.is_empty() {
            return Err(BookError::InvalidInput("Subject must not be empty".to_string()));
        }
        if subject.len() > MAX_SUBJECT_LEN {
            return Err(BookError::InvalidInput(format!(
                "Subject too long (max {} characters)",
                MAX_SUBJECT_LEN
            )));
        }
        Ok(())
    }

    pub fn validate_body(body: &str) -> Result<(), BookError> {
        if body.len() > MAX_BODY_LEN {
            return Err(BookError::InvalidInput(format!(
                "Body too long (max {} bytes)",
                MAX_BODY_LEN
            )));
        }
        Ok(())
    }

    pub fn validate_tag(tag: &str) -> Result<(), BookError> {
        if tag.trim().is_empty() {
            return Err(BookError::InvalidInput("Tag must not be empty".to_string()));
        }
        if tag.len() > MAX_TAG_LEN {
            return Err(BookError::InvalidInput(format!(
                "Tag '{}' too long (max {} characters)",
                tag, MAX_TAG_LEN
            )));
        }
        Ok(())
    }
}

/// A tree of pages with a recycle bin.
///
/// Page 0 is the root and page -1 is the recycle bin. Pages must be moved
/// into the recycle bin (`page trash`) before they can be deleted.
#[derive(Parser)]
#[command(name = "letterite", version, about)]
struct Cli {
    /// Path to the database file (default: $LETTERITE_DB or ~/.letterite/book.sqlite3).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Output in human-readable format instead of JSON.
    #[arg(long, global = true)]
    pretty: bool,

    /// Log store operations to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, move, list and delete pages.
    Page {
        #[command(subcommand)]
        action: PageAction,
    },
    /// Page content revisions.
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },
    /// Page tags.
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },
}

#[derive(Subcommand)]
enum PageAction {
    /// Create a page as the last child of a parent.
    Create {
        /// Parent page ID (0 = root, -1 = recycle bin).
        #[arg(long, default_value_t = ROOT_PAGE_ID, allow_negative_numbers = true)]
        parent: PageId,
        /// Page subject.
        #[arg(long)]
        subject: String,
    },
    /// Get a page by ID.
    Get {
        #[arg(allow_negative_numbers = true)]
        id: PageId,
    },
    /// List the direct children of a page.
    List {
        /// Parent page ID (0 = root, -1 = recycle bin).
        #[arg(long, default_value_t = ROOT_PAGE_ID, allow_negative_numbers = true)]
        parent: PageId,
    },
    /// List the top level of the recycle bin.
    TrashList,
    /// Update one field: parentPageID, order, or subject.
    Update {
        #[arg(allow_negative_numbers = true)]
        id: PageId,
        #[arg(long)]
        field: String,
        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },
    /// Move a page under a new parent.
    Move {
        #[arg(allow_negative_numbers = true)]
        id: PageId,
        #[arg(long, allow_negative_numbers = true)]
        parent: PageId,
    },
    /// Set a page's order, or place it between two siblings.
    Reorder {
        #[arg(allow_negative_numbers = true)]
        id: PageId,
        /// Explicit order value.
        #[arg(long, allow_negative_numbers = true, conflicts_with = "between")]
        order: Option<i64>,
        /// Two sibling page IDs to place this page between.
        #[arg(long, num_args = 2, value_names = ["SIBLING", "SIBLING"])]
        between: Option<Vec<PageId>>,
    },
    /// Change a page's subject.
    Rename {
        #[arg(allow_negative_numbers = true)]
        id: PageId,
        #[arg(long)]
        subject: String,
    },
    /// Move a page (and its subtree) into the recycle bin.
    Trash {
        #[arg(allow_negative_numbers = true)]
        id: PageId,
    },
    /// Move a page out of the recycle bin.
    Restore {
        #[arg(allow_negative_numbers = true)]
        id: PageId,
        /// New parent (default: root).
        #[arg(long, allow_negative_numbers = true)]
        parent: Option<PageId>,
    },
    /// Permanently delete a page that is in the recycle bin.
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: PageId,
    },
}

#[derive(Subcommand)]
enum ContentAction {
    /// Store a new revision of a page's content.
    Add {
        #[arg(allow_negative_numbers = true)]
        id: PageId,
        /// Content text. Omit to use --stdin.
        #[arg(long)]
        body: Option<String>,
        /// Read content from stdin.
        #[arg(long)]
        stdin: bool,
    },
    /// List all revisions, newest first.
    List {
        #[arg(allow_negative_numbers = true)]
        id: PageId,
    },
    /// Show the newest revision.
    Latest {
        #[arg(allow_negative_numbers = true)]
        id: PageId,
    },
}

#[derive(Subcommand)]
enum TagAction {
    /// Attach a tag to a page.
    Add {
        #[arg(allow_negative_numbers = true)]
        id: PageId,
        tag: String,
    },
    /// Detach a tag from a page.
    Remove {
        #[arg(allow_negative_numbers = true)]
        id: PageId,
        tag: String,
    },
    /// List a page's tags.
    List {
        #[arg(allow_negative_numbers = true)]
        id: PageId,
    },
    /// List IDs of pages carrying a tag.
    Pages { tag: String },
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "letterite=debug"
    } else {
        "letterite=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}

/// Undecodable input is the caller's fault; anything else is an I/O failure.
fn stdin_error(e: io::Error) -> BookError {
    if e.kind() == io::ErrorKind::InvalidData {
        BookError::InvalidInput(format!("stdin is not valid UTF-8: {}", e))
    } else {
        BookError::Io(e)
    }
}

/// Read content from --body or stdin.
fn read_body(body: &Option<String>, stdin: bool) -> Result<String, BookError> {
    if stdin {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(stdin_error)?;
        Ok(buf)
    } else if let Some(b) = body {
        Ok(b.clone())
    } else {
        Err(BookError::InvalidInput(
            "No content given. Use --body or --stdin.".to_string(),
        ))
    }
}

fn print_page(mode: OutputMode, store: &PageStore, id: PageId) -> Result<(), BookError> {
    let page = store.get_page(id)?;
    output::print(mode, &page, || output::print_pretty_page(&page));
    Ok(())
}

fn run(cli: Cli) -> Result<(), BookError> {
    let mode = if cli.pretty {
        OutputMode::Pretty
    } else {
        OutputMode::Json
    };

    let path = db::db_path(cli.db.as_deref())?;
    let store = PageStore::open(&path)?;

    match &cli.command {
        // =====================================================================
        // Page commands
        // =====================================================================
        Commands::Page { action } => match action {
            PageAction::Create { parent, subject } => {
                validation::validate_subject(subject)?;
                let page = store.create_page(*parent, subject)?;
                output::print(mode, &page, || output::print_pretty_page(&page));
            }
            PageAction::Get { id } => print_page(mode, &store, *id)?,
            PageAction::List { parent } => {
                let pages = store.get_pages_by_parent(*parent)?;
                output::print(mode, &pages, || output::print_pretty_summaries(&pages));
            }
            PageAction::TrashList => {
                let pages = store.get_pages_by_parent(RECYCLE_BIN_PAGE_ID)?;
                output::print(mode, &pages, || output::print_pretty_summaries(&pages));
            }
            PageAction::Update { id, field, value } => {
                let update = PageUpdate::parse(field, value)?;
                if let PageUpdate::Subject(ref s) = update {
                    validation::validate_subject(s)?;
                }
                store.update_page(*id, update)?;
                print_page(mode, &store, *id)?;
            }
            PageAction::Move { id, parent } => {
                store.move_page(*id, *parent)?;
                print_page(mode, &store, *id)?;
            }
            PageAction::Reorder { id, order, between } => {
                match (order, between.as_deref()) {
                    (Some(order), _) => store.reorder_page(*id, *order)?,
                    (None, Some([lower, upper])) => {
                        store.reorder_between(*id, *lower, *upper)?;
                    }
                    _ => {
                        return Err(BookError::InvalidInput(
                            "Give either --order or --between".to_string(),
                        ))
                    }
                }
                print_page(mode, &store, *id)?;
            }
            PageAction::Rename { id, subject } => {
                validation::validate_subject(subject)?;
                store.rename_page(*id, subject)?;
                print_page(mode, &store, *id)?;
            }
            PageAction::Trash { id } => {
                store.trash_page(*id)?;
                print_page(mode, &store, *id)?;
            }
            PageAction::Restore { id, parent } => {
                store.restore_page(*id, *parent)?;
                print_page(mode, &store, *id)?;
            }
            PageAction::Delete { id } => {
                store.delete_page(*id)?;
                let msg = serde_json::json!({ "deleted": id });
                output::print(mode, &msg, || println!("Deleted page {}", id));
            }
        },

        // =====================================================================
        // Content commands
        // =====================================================================
        Commands::Content { action } => match action {
            ContentAction::Add { id, body, stdin } => {
                let text = read_body(body, *stdin)?;
                validation::validate_body(&text)?;
                let stored = content::append_content(store.connection(), *id, &text)?;
                output::print(mode, &stored, || output::print_pretty_content(&stored));
            }
            ContentAction::List { id } => {
                let contents = content::list_contents(store.connection(), *id)?;
                output::print(mode, &contents, || output::print_pretty_contents(&contents));
            }
            ContentAction::Latest { id } => {
                let latest = content::latest_content(store.connection(), *id)?;
                output::print(mode, &latest, || match &latest {
                    Some(c) => output::print_pretty_content(c),
                    None => println!("(no revisions)"),
                });
            }
        },

        // =====================================================================
        // Tag commands
        // =====================================================================
        Commands::Tag { action } => match action {
            TagAction::Add { id, tag } => {
                validation::validate_tag(tag)?;
                let stored = tags::tag_page(store.connection(), *id, tag.trim())?;
                output::print(mode, &stored, || {
                    println!("Tagged page {} with '{}'", id, stored.tag)
                });
            }
            TagAction::Remove { id, tag } => {
                let removed = tags::untag_page(store.connection(), *id, tag.trim())?;
                let msg = serde_json::json!({ "page": id, "tag": tag, "removed": removed });
                output::print(mode, &msg, || {
                    if removed {
                        println!("Removed tag '{}' from page {}", tag, id);
                    } else {
                        println!("Page {} had no tag '{}'", id, tag);
                    }
                });
            }
            TagAction::List { id } => {
                let page_tags = tags::tags_for_page(store.connection(), *id)?;
                output::print(mode, &page_tags, || output::print_pretty_tags(&page_tags));
            }
            TagAction::Pages { tag } => {
                let ids = tags::pages_with_tag(store.connection(), tag.trim())?;
                output::print(mode, &ids, || {
                    for id in &ids {
                        println!("{}", id);
                    }
                });
            }
        },
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        let kind = e.kind();
        let error_json = serde_json::json!({
            "error": e.to_string(),
            "kind": kind,
        });
        eprintln!("{}", error_json);
        tracing::debug!(error = ?e, "command failed");
        process::exit(if kind.is_client_error() { 2 } else { 1 });
    }
}
