//! Content kind tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// The wire tag identifying which content variant a payload represents.
///
/// Reddit prefixes object ids with these tags to form fullnames
/// (`t3_abc123`). `more` is the placeholder emitted in comment trees for
/// children that were not inlined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Comment,
    Account,
    Post,
    Subreddit,
    Award,
    More,
}

impl Kind {
    /// All built-in kinds, in tag order.
    pub const ALL: [Kind; 6] = [
        Kind::Comment,
        Kind::Account,
        Kind::Post,
        Kind::Subreddit,
        Kind::Award,
        Kind::More,
    ];

    /// Returns the wire tag.
    pub const fn tag(self) -> &'static str {
        match self {
            Kind::Comment => "t1",
            Kind::Account => "t2",
            Kind::Post => "t3",
            Kind::Subreddit => "t5",
            Kind::Award => "t6",
            Kind::More => "more",
        }
    }

    /// Look up a kind by its wire tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Returns true if objects of this kind are addressed by a fullname.
    pub fn has_fullname(self) -> bool {
        self != Kind::More
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| {
            InvalidInputError::Other {
                message: format!("unknown content kind '{}'", s),
            }
            .into()
        })
    }
}

impl Serialize for Kind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for Kind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Kind::from_tag(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown content kind '{}'", s)))
    }
}
