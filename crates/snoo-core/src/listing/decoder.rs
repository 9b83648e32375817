//! Listing envelope decoding.

use serde_json::{Map, Value};
use tracing::trace;

use super::Page;
use crate::content::{Content, KindRegistry, Post, split_envelope};
use crate::error::DecodeError;
use crate::types::Kind;

const LISTING_KIND: &str = "Listing";

/// Which listing to take from a response that returns several.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingPosition {
    First,
    Last,
    Index(usize),
}

impl ListingPosition {
    fn resolve(self, len: usize) -> Option<usize> {
        match self {
            ListingPosition::First if len > 0 => Some(0),
            ListingPosition::Last if len > 0 => Some(len - 1),
            ListingPosition::Index(index) if index < len => Some(index),
            _ => None,
        }
    }
}

/// Selects one listing out of a multi-listing response.
///
/// When `expected` is set the response must contain exactly that many
/// listings, otherwise decoding fails instead of picking the wrong one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingSelector {
    pub position: ListingPosition,
    pub expected: Option<usize>,
}

impl ListingSelector {
    pub fn new(position: ListingPosition) -> Self {
        Self {
            position,
            expected: None,
        }
    }

    pub fn expecting(mut self, count: usize) -> Self {
        self.expected = Some(count);
        self
    }
}

/// A post together with its comment tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Thread {
    pub post: Post,
    pub comments: Page,
}

/// Decodes Listing envelopes through a kind registry.
#[derive(Debug, Clone, Copy)]
pub struct ListingDecoder<'r> {
    registry: &'r KindRegistry,
}

impl ListingDecoder<'static> {
    /// A decoder over the built-in kinds.
    pub fn standard() -> Self {
        Self::new(KindRegistry::standard())
    }
}

impl<'r> ListingDecoder<'r> {
    pub fn new(registry: &'r KindRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r KindRegistry {
        self.registry
    }

    /// Decode a response body holding a single Listing.
    pub fn decode_slice(&self, bytes: &[u8]) -> Result<Page, DecodeError> {
        let value: Value = serde_json::from_slice(bytes)?;
        self.decode(value)
    }

    /// Decode one Listing envelope.
    ///
    /// Every child must decode; the first failure fails the page.
    pub fn decode(&self, value: Value) -> Result<Page, DecodeError> {
        let mut data = listing_data(value)?;

        let children = match data.remove("children") {
            Some(Value::Array(children)) => children,
            Some(_) => return Err(DecodeError::malformed("'children' is not an array")),
            None => return Err(DecodeError::malformed("listing data has no 'children'")),
        };

        let before = cursor(&mut data, "before")?;
        let after = cursor(&mut data, "after")?;
        let dist = data.remove("dist").and_then(|dist| dist.as_u64());

        let items = children
            .into_iter()
            .enumerate()
            .map(|(position, child)| {
                let (kind, payload) = split_envelope(child, position)?;
                self.registry.decode(&kind, payload, position)
            })
            .collect::<Result<Vec<Content>, DecodeError>>()?;

        trace!(
            items = items.len(),
            after = after.as_deref().unwrap_or(""),
            "decoded listing"
        );

        Ok(Page::new(items, before, after, dist))
    }

    /// Decode one Listing out of a response that may hold several.
    ///
    /// A lone Listing object counts as a one-element set.
    pub fn decode_selected(&self, value: Value, selector: ListingSelector) -> Result<Page, DecodeError> {
        let mut listings = match value {
            Value::Array(listings) => listings,
            single @ Value::Object(_) => vec![single],
            _ => {
                return Err(DecodeError::malformed(
                    "response is neither a listing nor an array of listings",
                ));
            }
        };

        if let Some(expected) = selector.expected
            && listings.len() != expected
        {
            return Err(DecodeError::malformed(format!(
                "expected {} listings, found {}",
                expected,
                listings.len()
            )));
        }

        let index = selector.position.resolve(listings.len()).ok_or_else(|| {
            DecodeError::malformed(format!(
                "no listing at {:?} among {}",
                selector.position,
                listings.len()
            ))
        })?;

        self.decode(listings.swap_remove(index))
    }

    /// Decode a comments response: `[post listing, comment listing]`.
    pub fn decode_thread(&self, value: Value) -> Result<Thread, DecodeError> {
        let Value::Array(listings) = value else {
            return Err(DecodeError::malformed("thread response is not an array"));
        };
        if listings.len() != 2 {
            return Err(DecodeError::malformed(format!(
                "expected 2 listings in a thread, found {}",
                listings.len()
            )));
        }

        let mut listings = listings.into_iter();
        let (Some(post_listing), Some(comment_listing)) = (listings.next(), listings.next()) else {
            return Err(DecodeError::malformed("thread response is truncated"));
        };

        let post = self
            .decode(post_listing)?
            .into_items()
            .into_iter()
            .next()
            .ok_or_else(|| DecodeError::malformed("thread has no post"))?;
        let post = match post {
            Content::Post(post) => post,
            other => {
                return Err(DecodeError::malformed(format!(
                    "thread starts with '{}', expected '{}'",
                    other.kind(),
                    Kind::Post
                )));
            }
        };

        let comments = self.decode(comment_listing)?;
        Ok(Thread { post, comments })
    }
}

fn listing_data(value: Value) -> Result<Map<String, Value>, DecodeError> {
    let Value::Object(mut envelope) = value else {
        return Err(DecodeError::malformed("listing is not an object"));
    };

    match envelope.remove("kind") {
        Some(Value::String(kind)) if kind == LISTING_KIND => {}
        Some(Value::String(kind)) => {
            return Err(DecodeError::malformed(format!(
                "expected kind '{}', found '{}'",
                LISTING_KIND, kind
            )));
        }
        Some(_) => return Err(DecodeError::malformed("listing 'kind' is not a string")),
        None => return Err(DecodeError::malformed("listing has no 'kind'")),
    }

    match envelope.remove("data") {
        Some(Value::Object(data)) => Ok(data),
        Some(_) => Err(DecodeError::malformed("listing 'data' is not an object")),
        None => Err(DecodeError::malformed("listing has no 'data'")),
    }
}

fn cursor(data: &mut Map<String, Value>, field: &str) -> Result<Option<String>, DecodeError> {
    match data.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(cursor)) if cursor.is_empty() => Ok(None),
        Some(Value::String(cursor)) => Ok(Some(cursor)),
        Some(_) => Err(DecodeError::malformed(format!("'{}' is not a string", field))),
    }
}
