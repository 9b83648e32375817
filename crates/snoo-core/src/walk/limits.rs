//! Caller-imposed bounds on a walk.

use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::listing::Page;

/// Predicate over the latest page; returning true ends the walk.
pub type StopWhen = Arc<dyn Fn(&Page) -> bool + Send + Sync>;

/// Bounds checked between pages.
///
/// The default is unbounded. An unbounded walk over a large collection
/// (every subscribed subreddit, a busy front page) keeps fetching until the
/// server runs out of pages, which can take a very long time.
#[derive(Clone, Default)]
pub struct WalkLimits {
    pub max_pages: Option<usize>,
    /// Stop once this many items have arrived. Checked between pages and
    /// pages are never split, so a walk can end up to one page over.
    pub max_items: Option<usize>,
    pub stop_when: Option<StopWhen>,
    pub cancel: Option<CancellationToken>,
}

impl WalkLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn max_pages(mut self, pages: usize) -> Self {
        self.max_pages = Some(pages);
        self
    }

    /// Cap the item count; the final page is kept whole, so the walk may
    /// overshoot by up to one page.
    pub fn max_items(mut self, items: usize) -> Self {
        self.max_items = Some(items);
        self
    }

    pub fn stop_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Page) -> bool + Send + Sync + 'static,
    {
        self.stop_when = Some(Arc::new(predicate));
        self
    }

    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    pub(crate) fn pages_exhausted(&self, pages: usize) -> bool {
        self.max_pages.is_some_and(|max| pages >= max)
    }

    pub(crate) fn items_exhausted(&self, items: usize) -> bool {
        self.max_items.is_some_and(|max| items >= max)
    }

    pub(crate) fn should_stop(&self, page: &Page) -> bool {
        self.stop_when.as_ref().is_some_and(|stop| stop(page))
    }
}

impl fmt::Debug for WalkLimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalkLimits")
            .field("max_pages", &self.max_pages)
            .field("max_items", &self.max_items)
            .field("stop_when", &self.stop_when.as_ref().map(|_| "<fn>"))
            .field("cancel", &self.cancel.as_ref().map(CancellationToken::is_cancelled))
            .finish()
    }
}
