//! Tag → decoder lookup for listing children.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{Account, Award, Comment, Content, More, Post, Subreddit};
use crate::error::DecodeError;
use crate::listing::ListingDecoder;
use crate::types::Kind;

/// Decodes a child's `data` payload into a content variant.
pub type DecodeFn = fn(Value) -> Result<Content, serde_json::Error>;

static STANDARD: LazyLock<KindRegistry> = LazyLock::new(|| {
    let mut registry = KindRegistry::empty();
    registry
        .register(Kind::Comment.tag(), decode_as::<Comment>)
        .register(Kind::Account.tag(), decode_as::<Account>)
        .register(Kind::Post.tag(), decode_as::<Post>)
        .register(Kind::Subreddit.tag(), decode_as::<Subreddit>)
        .register(Kind::Award.tag(), decode_as::<Award>)
        .register(Kind::More.tag(), decode_as::<More>);
    registry
});

/// Decoder for any payload type that converts into [`Content`].
pub fn decode_as<T>(data: Value) -> Result<Content, serde_json::Error>
where
    T: DeserializeOwned + Into<Content>,
{
    serde_json::from_value::<T>(data).map(Into::into)
}

/// Maps wire tags to decode functions.
///
/// Lookups are read-only, so a registry can be shared freely across
/// concurrent walks. Tags without a registration are rejected with
/// [`DecodeError::UnsupportedContentKind`]; they are never skipped.
///
/// # Example
///
/// ```
/// use snoo_core::content::{KindRegistry, decode_as, Post};
///
/// // Only accept posts.
/// let mut registry = KindRegistry::empty();
/// registry.register("t3", decode_as::<Post>);
/// assert!(registry.supports("t3"));
/// assert!(!registry.supports("t1"));
/// ```
#[derive(Clone, Default)]
pub struct KindRegistry {
    decoders: HashMap<String, DecodeFn>,
}

impl KindRegistry {
    /// A registry with no kinds.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The registry of all built-in kinds (`t1`, `t2`, `t3`, `t5`, `t6`, `more`).
    pub fn standard() -> &'static KindRegistry {
        &STANDARD
    }

    /// Register (or replace) the decoder for a tag.
    pub fn register(&mut self, tag: impl Into<String>, decode: DecodeFn) -> &mut Self {
        self.decoders.insert(tag.into(), decode);
        self
    }

    /// Returns true if the tag has a decoder.
    pub fn supports(&self, tag: &str) -> bool {
        self.decoders.contains_key(tag)
    }

    /// Returns the decoder for a tag.
    pub fn decoder(&self, tag: &str) -> Option<DecodeFn> {
        self.decoders.get(tag).copied()
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.decoders.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Decode one child payload.
    ///
    /// `position` is the child's index in its listing and is carried into
    /// errors for diagnosis. A comment's nested `replies` Listing is decoded
    /// through this same registry, so a kind rejected at the top level is
    /// rejected inside a reply tree too.
    pub fn decode(&self, tag: &str, mut data: Value, position: usize) -> Result<Content, DecodeError> {
        let decode = self
            .decoder(tag)
            .ok_or_else(|| DecodeError::UnsupportedContentKind {
                kind: tag.to_string(),
                position,
            })?;

        let invalid = |message: String| DecodeError::InvalidContent {
            kind: tag.to_string(),
            position,
            message,
        };

        let replies = take_replies(&mut data);
        let mut content = decode(data).map_err(|err| invalid(err.to_string()))?;

        if let (Content::Comment(comment), Some(replies)) = (&mut content, replies) {
            let page = ListingDecoder::new(self)
                .decode(replies)
                .map_err(|err| invalid(format!("in replies: {}", err)))?;
            comment.replies = Some(Box::new(page));
        }
        Ok(content)
    }
}

/// Detach a nested `replies` Listing so the payload decoder never sees it.
fn take_replies(data: &mut Value) -> Option<Value> {
    let Value::Object(fields) = data else {
        return None;
    };
    if !fields.get("replies").is_some_and(Value::is_object) {
        return None;
    }
    fields.remove("replies")
}

impl fmt::Debug for KindRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}
