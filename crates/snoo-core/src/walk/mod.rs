//! Pagination walks.
//!
//! A walk follows `after` cursors one page at a time until the server
//! reports no further page or a caller bound ends it. Pages are requested
//! strictly in sequence; each request needs the previous page's cursor.

mod limits;
mod walker;

use thiserror::Error;

use crate::content::Content;
use crate::listing::Page;

pub use limits::{StopWhen, WalkLimits};
pub use walker::{WalkState, Walker};

/// Why a walk ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkStatus {
    /// The server reported no further page.
    Completed,
    /// `max_pages` was reached.
    PageLimit,
    /// `max_items` was reached.
    ItemLimit,
    /// The `stop_when` predicate ended the walk.
    Stopped,
    /// The walk failed or was cancelled part way through.
    Interrupted,
}

/// Pages accumulated by a walk.
#[derive(Clone, Debug, PartialEq)]
pub struct Walk {
    pub pages: Vec<Page>,
    pub status: WalkStatus,
    /// Requests issued, including a failed final one.
    pub requests: usize,
}

impl Walk {
    /// All items, in page then wire order.
    pub fn items(&self) -> impl Iterator<Item = &Content> {
        self.pages.iter().flat_map(|page| page.items())
    }

    pub fn into_items(self) -> Vec<Content> {
        self.pages.into_iter().flat_map(Page::into_items).collect()
    }

    pub fn item_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// Cursor to resume from, if the collection has more pages.
    pub fn next_cursor(&self) -> Option<&str> {
        self.pages.last().and_then(Page::after)
    }
}

/// A walk that ended early after at least one page, with what it had.
#[derive(Debug, Error)]
#[error(
    "walk interrupted at page {page_index} after {} items: {cause}",
    .partial.item_count()
)]
pub struct WalkInterrupted {
    pub partial: Walk,
    /// Zero-based index of the page that was not obtained.
    pub page_index: usize,
    #[source]
    pub cause: Interruption,
}

/// What stopped an interrupted walk.
#[derive(Debug, Error)]
pub enum Interruption {
    #[error("cancelled")]
    Cancelled,
    #[error(transparent)]
    Failed(Box<crate::Error>),
}

