//! The page-by-page walk state machine.

use tracing::{debug, trace};

use super::{Interruption, Walk, WalkInterrupted, WalkLimits, WalkStatus};
use crate::client::Listings;
use crate::endpoint::ListingEndpoint;
use crate::error::{DecodeError, Error};
use crate::listing::Page;
use crate::query::ListingOptions;
use crate::traits::Transport;
use crate::Result;

/// Where a walker is between calls to [`Walker::next_page`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkState {
    /// No page requested yet.
    Idle,
    /// A request is in flight.
    Fetching,
    /// A page arrived and another may follow.
    HavePage,
    /// No further pages will be fetched.
    Done(WalkStatus),
    /// The cancellation token fired before a fetch.
    Cancelled,
    /// A fetch or decode failed.
    Failed,
}

/// Fetches the pages of one endpoint in order.
///
/// The walker does not retry. A failed page ends the walk; retry policy
/// belongs to the transport or the caller.
pub struct Walker<'a, T> {
    listings: &'a Listings<T>,
    endpoint: ListingEndpoint,
    options: ListingOptions,
    limits: WalkLimits,
    state: WalkState,
    pages: usize,
    items: usize,
    requests: usize,
}

impl<'a, T: Transport> Walker<'a, T> {
    pub(crate) fn new(
        listings: &'a Listings<T>,
        endpoint: ListingEndpoint,
        options: ListingOptions,
        limits: WalkLimits,
    ) -> Self {
        Self {
            listings,
            endpoint,
            options,
            limits,
            state: WalkState::Idle,
            pages: 0,
            items: 0,
            requests: 0,
        }
    }

    pub fn state(&self) -> WalkState {
        self.state
    }

    /// Requests issued so far.
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Options the next request will use.
    pub fn options(&self) -> &ListingOptions {
        &self.options
    }

    /// Fetch the next page.
    ///
    /// Returns `Ok(None)` once the walk is done. Cancellation is checked
    /// before each fetch and reported as [`Error::Cancelled`]; a fetch that
    /// is already in flight completes and its page is returned.
    pub async fn next_page(&mut self) -> Result<Option<Page>> {
        match self.state {
            WalkState::Done(_) | WalkState::Failed => return Ok(None),
            WalkState::Cancelled => return Err(Error::Cancelled),
            WalkState::Idle => {
                if let Some(status) = self.exhausted() {
                    self.state = WalkState::Done(status);
                    return Ok(None);
                }
            }
            WalkState::Fetching | WalkState::HavePage => {}
        }

        if self.limits.is_cancelled() {
            debug!(pages = self.pages, "walk cancelled");
            self.state = WalkState::Cancelled;
            return Err(Error::Cancelled);
        }

        self.state = WalkState::Fetching;
        self.requests += 1;
        trace!(
            page = self.pages,
            after = self.options.after.as_deref().unwrap_or(""),
            "fetching page"
        );

        let page = match self.listings.fetch_page(&self.endpoint, &self.options).await {
            Ok(page) => page,
            Err(err) => {
                self.state = WalkState::Failed;
                return Err(err);
            }
        };

        let requested = self.options.after.as_deref().filter(|c| !c.is_empty());
        if let (Some(requested), Some(next)) = (requested, page.after())
            && requested == next
        {
            self.state = WalkState::Failed;
            return Err(DecodeError::RepeatedCursor {
                cursor: next.to_string(),
            }
            .into());
        }

        self.pages += 1;
        self.items += page.len();
        self.advance(&page);
        self.state = match self.finished(&page) {
            Some(status) => WalkState::Done(status),
            None => WalkState::HavePage,
        };

        debug!(
            page = self.pages,
            items = page.len(),
            after = page.after().unwrap_or(""),
            state = ?self.state,
            "walk advanced"
        );

        Ok(Some(page))
    }

    /// Drive the walk to its end and return every page.
    ///
    /// A failure on the first page is returned as is. A failure or
    /// cancellation after that is returned as [`Error::WalkInterrupted`]
    /// carrying the pages fetched so far.
    pub async fn run(mut self) -> Result<Walk> {
        let mut pages = Vec::new();
        loop {
            match self.next_page().await {
                Ok(Some(page)) => pages.push(page),
                Ok(None) => break,
                Err(err) => return Err(self.interrupt(pages, err)),
            }
        }

        let status = match self.state {
            WalkState::Done(status) => status,
            _ => WalkStatus::Completed,
        };
        Ok(Walk {
            pages,
            status,
            requests: self.requests,
        })
    }

    fn interrupt(&self, pages: Vec<Page>, err: Error) -> Error {
        if pages.is_empty() {
            return err;
        }

        let cause = match err {
            Error::Cancelled => Interruption::Cancelled,
            other => Interruption::Failed(Box::new(other)),
        };
        WalkInterrupted {
            page_index: pages.len(),
            partial: Walk {
                pages,
                status: WalkStatus::Interrupted,
                requests: self.requests,
            },
            cause,
        }
        .into()
    }

    fn advance(&mut self, page: &Page) {
        self.options.after = page.after().map(str::to_string);
        self.options.before = None;
        if let Some(count) = self.options.count {
            self.options.count = Some(count.saturating_add(page.len() as u32));
        }
    }

    fn finished(&self, page: &Page) -> Option<WalkStatus> {
        if page.is_last() {
            Some(WalkStatus::Completed)
        } else if let Some(status) = self.exhausted() {
            Some(status)
        } else if self.limits.should_stop(page) {
            Some(WalkStatus::Stopped)
        } else {
            None
        }
    }

    fn exhausted(&self) -> Option<WalkStatus> {
        if self.limits.pages_exhausted(self.pages) {
            Some(WalkStatus::PageLimit)
        } else if self.limits.items_exhausted(self.items) {
            Some(WalkStatus::ItemLimit)
        } else {
            None
        }
    }
}
