//! Listing content: the tagged union of everything a Listing can hold.
//!
//! Each child of a Listing is a `{kind, data}` envelope. The `kind` tag is
//! read first and selects, through a [`KindRegistry`], how `data` decodes.

mod account;
mod award;
mod comment;
pub(crate) mod de;
mod more;
mod post;
mod registry;
mod subreddit;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub use account::Account;
pub use award::Award;
pub use comment::Comment;
pub use de::Edited;
pub use more::More;
pub use post::{ImageSource, Post, Preview, PreviewImage};
pub use registry::{DecodeFn, KindRegistry, decode_as};
pub use subreddit::Subreddit;

use crate::error::DecodeError;
use crate::types::{Fullname, Kind};

/// One decoded listing child.
///
/// Exactly one payload is present, matching the wire tag it was decoded
/// from. Serializes back to the `{kind, data}` envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Comment(Comment),
    Account(Account),
    Post(Post),
    Subreddit(Subreddit),
    Award(Award),
    More(More),
}

impl Content {
    /// Returns the kind this content was decoded as.
    pub fn kind(&self) -> Kind {
        match self {
            Content::Comment(_) => Kind::Comment,
            Content::Account(_) => Kind::Account,
            Content::Post(_) => Kind::Post,
            Content::Subreddit(_) => Kind::Subreddit,
            Content::Award(_) => Kind::Award,
            Content::More(_) => Kind::More,
        }
    }

    /// Returns the base-36 id, when the payload has one.
    pub fn id(&self) -> Option<&str> {
        match self {
            Content::Comment(c) => Some(&c.id),
            Content::Account(a) => Some(&a.id),
            Content::Post(p) => Some(&p.id),
            Content::Subreddit(s) => Some(&s.id),
            Content::Award(a) => a.id.as_deref(),
            Content::More(m) => Some(&m.id),
        }
    }

    /// Returns the fullname, when the payload has a parseable one.
    pub fn fullname(&self) -> Option<Fullname> {
        match self {
            Content::Comment(c) => Fullname::new(&c.name).ok(),
            Content::Account(a) => Fullname::from_parts(Kind::Account, &a.id).ok(),
            Content::Post(p) => Fullname::new(&p.name).ok(),
            Content::Subreddit(s) => Fullname::new(&s.name).ok(),
            Content::Award(a) => a
                .id
                .as_deref()
                .and_then(|id| Fullname::from_parts(Kind::Award, id).ok()),
            Content::More(_) => None,
        }
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Content::Comment(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_account(&self) -> Option<&Account> {
        match self {
            Content::Account(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_post(&self) -> Option<&Post> {
        match self {
            Content::Post(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_subreddit(&self) -> Option<&Subreddit> {
        match self {
            Content::Subreddit(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_award(&self) -> Option<&Award> {
        match self {
            Content::Award(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_more(&self) -> Option<&More> {
        match self {
            Content::More(m) => Some(m),
            _ => None,
        }
    }

    /// Decode a `{kind, data}` envelope with the standard registry.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let (kind, data) = split_envelope(value, 0)?;
        KindRegistry::standard().decode(&kind, data, 0)
    }
}

/// Split a child envelope into its tag and payload.
pub(crate) fn split_envelope(value: Value, position: usize) -> Result<(String, Value), DecodeError> {
    let Value::Object(mut envelope) = value else {
        return Err(DecodeError::malformed(format!(
            "child {} is not an object",
            position
        )));
    };

    let kind = match envelope.remove("kind") {
        Some(Value::String(kind)) => kind,
        Some(_) => {
            return Err(DecodeError::malformed(format!(
                "child {} has a non-string 'kind'",
                position
            )));
        }
        None => {
            return Err(DecodeError::malformed(format!(
                "child {} is missing 'kind'",
                position
            )));
        }
    };

    let data = envelope.remove("data").ok_or_else(|| {
        DecodeError::malformed(format!("child {} is missing 'data'", position))
    })?;

    Ok((kind, data))
}

macro_rules! content_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Content {
                fn from(value: $variant) -> Self {
                    Content::$variant(value)
                }
            }
        )*
    };
}

content_from!(Comment, Account, Post, Subreddit, Award, More);

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    kind: Kind,
    data: &'a T,
}

impl Serialize for Content {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let kind = self.kind();
        match self {
            Content::Comment(data) => EnvelopeRef { kind, data }.serialize(serializer),
            Content::Account(data) => EnvelopeRef { kind, data }.serialize(serializer),
            Content::Post(data) => EnvelopeRef { kind, data }.serialize(serializer),
            Content::Subreddit(data) => EnvelopeRef { kind, data }.serialize(serializer),
            Content::Award(data) => EnvelopeRef { kind, data }.serialize(serializer),
            Content::More(data) => EnvelopeRef { kind, data }.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Content::from_value(value).map_err(serde::de::Error::custom)
    }
}
