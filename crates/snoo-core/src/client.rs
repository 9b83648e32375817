//! The listing client.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::Result;
use crate::content::KindRegistry;
use crate::endpoint::ListingEndpoint;
use crate::error::DecodeError;
use crate::listing::{ListingDecoder, ListingSelector, Page, Thread};
use crate::query::{ListingOptions, build_query};
use crate::traits::{PageStream, Request, Transport};
use crate::types::{Fullname, Kind, SubredditName};
use crate::walk::{Walk, WalkLimits, Walker};

/// Fetches and walks listings over a transport.
///
/// Construct one per transport; clients are independent and several walks
/// may share one concurrently.
///
/// # Example
///
/// ```no_run
/// # async fn example<T: snoo_core::Transport>(transport: T) -> snoo_core::Result<()> {
/// use snoo_core::{ListingEndpoint, ListingOptions, Listings, Sort, SubredditName, WalkLimits};
///
/// let listings = Listings::new(transport);
/// let endpoint = ListingEndpoint::subreddit(SubredditName::new("rust")?, Sort::New);
/// let walk = listings
///     .fetch_all(&endpoint, ListingOptions::default(), WalkLimits::default().max_pages(3))
///     .await?;
/// println!("{} items", walk.item_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Listings<T> {
    transport: T,
    registry: Arc<KindRegistry>,
}

impl<T: Transport> Listings<T> {
    /// Create a client that decodes the built-in kinds.
    pub fn new(transport: T) -> Self {
        Self::with_registry(transport, Arc::new(KindRegistry::standard().clone()))
    }

    /// Create a client with a custom kind registry.
    pub fn with_registry(transport: T, registry: Arc<KindRegistry>) -> Self {
        Self {
            transport,
            registry,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    fn decoder(&self) -> ListingDecoder<'_> {
        ListingDecoder::new(&self.registry)
    }

    async fn send(&self, request: Request) -> Result<Value> {
        let body = self.transport.request(&request).await?;
        let value = serde_json::from_slice(&body).map_err(DecodeError::from)?;
        Ok(value)
    }

    /// Fetch one page.
    #[instrument(skip(self, endpoint, options), fields(path = %endpoint.path()))]
    pub async fn fetch_page(
        &self,
        endpoint: &ListingEndpoint,
        options: &ListingOptions,
    ) -> Result<Page> {
        let value = self.send(endpoint.request(options)).await?;
        let page = self.decoder().decode(value)?;
        debug!(items = page.len(), after = ?page.after(), "fetched page");
        Ok(page)
    }

    /// Fetch one page from an endpoint that answers with several listings.
    #[instrument(skip(self, endpoint, options), fields(path = %endpoint.path()))]
    pub async fn fetch_selected(
        &self,
        endpoint: &ListingEndpoint,
        options: &ListingOptions,
        selector: ListingSelector,
    ) -> Result<Page> {
        let value = self.send(endpoint.request(options)).await?;
        Ok(self.decoder().decode_selected(value, selector)?)
    }

    /// Start a walk without fetching anything.
    pub fn walker(
        &self,
        endpoint: &ListingEndpoint,
        options: ListingOptions,
        limits: WalkLimits,
    ) -> Walker<'_, T> {
        Walker::new(self, endpoint.clone(), options, limits)
    }

    /// Walk an endpoint until it ends or `limits` stop it.
    #[instrument(skip(self, endpoint, options, limits), fields(path = %endpoint.path()))]
    pub async fn fetch_all(
        &self,
        endpoint: &ListingEndpoint,
        options: ListingOptions,
        limits: WalkLimits,
    ) -> Result<Walk> {
        let walk = self.walker(endpoint, options, limits).run().await?;
        debug!(
            pages = walk.pages.len(),
            items = walk.item_count(),
            status = ?walk.status,
            "walk finished"
        );
        Ok(walk)
    }

    /// Walk an endpoint as a stream of pages.
    ///
    /// The stream ends after the last page, or with the error that stopped
    /// the walk. Pages already yielded stay with the caller.
    pub fn stream(
        &self,
        endpoint: ListingEndpoint,
        options: ListingOptions,
        limits: WalkLimits,
    ) -> impl PageStream + '_ {
        let mut walker = Walker::new(self, endpoint, options, limits);
        async_stream::stream! {
            loop {
                match walker.next_page().await {
                    Ok(Some(page)) => yield Ok(page),
                    Ok(None) => break,
                    Err(err) => {
                        yield Err(err);
                        break;
                    }
                }
            }
        }
    }

    /// Fetch a post and its comment tree.
    ///
    /// `article` is the post id, with or without its `t3_` prefix.
    #[instrument(skip(self, subreddit, options), fields(subreddit = %subreddit))]
    pub async fn thread(
        &self,
        subreddit: &SubredditName,
        article: &str,
        options: &ListingOptions,
    ) -> Result<Thread> {
        let id = article.strip_prefix("t3_").unwrap_or(article);
        let article = Fullname::from_parts(Kind::Post, id)?;
        let path = format!("/r/{}/comments/{}.json", subreddit.as_str(), article.id());

        let value = self.send(Request::get(path, build_query(options, None))).await?;
        let thread = self.decoder().decode_thread(value)?;
        debug!(comments = thread.comments.len(), "fetched thread");
        Ok(thread)
    }
}
