//! Fullname type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Kind;
use crate::error::{Error, InvalidInputError};

/// A validated Reddit fullname.
///
/// Fullnames combine a kind tag and a base-36 id and are what listing
/// cursors and most write endpoints refer to.
/// Format: `<tag>_<id>`
///
/// # Example
///
/// ```
/// use snoo_core::{Fullname, Kind};
///
/// let name = Fullname::new("t3_abc123").unwrap();
/// assert_eq!(name.kind(), Kind::Post);
/// assert_eq!(name.id(), "abc123");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fullname {
    kind: Kind,
    id: String,
}

impl Fullname {
    /// Create a new fullname from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is not a known kind tag or the id is
    /// not base-36.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        Self::parse(s.as_ref())
    }

    /// Create a fullname from its components.
    pub fn from_parts(kind: Kind, id: impl Into<String>) -> Result<Self, Error> {
        let id = id.into();
        if !kind.has_fullname() {
            return Err(InvalidInputError::Fullname {
                value: format!("{}_{}", kind, id),
                reason: "'more' placeholders have no fullname".to_string(),
            }
            .into());
        }
        Self::validate_id(&id, &format!("{}_{}", kind, id))?;
        Ok(Self { kind, id })
    }

    /// Returns the kind tag.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the base-36 id without the tag.
    pub fn id(&self) -> &str {
        &self.id
    }

    fn parse(s: &str) -> Result<Self, Error> {
        let (tag, id) = s.split_once('_').ok_or_else(|| InvalidInputError::Fullname {
            value: s.to_string(),
            reason: "must have format '<kind>_<id>'".to_string(),
        })?;

        let kind = Kind::from_tag(tag)
            .filter(|kind| kind.has_fullname())
            .ok_or_else(|| InvalidInputError::Fullname {
                value: s.to_string(),
                reason: format!("unknown kind tag '{}'", tag),
            })?;

        Self::validate_id(id, s)?;

        Ok(Self {
            kind,
            id: id.to_string(),
        })
    }

    fn validate_id(id: &str, original: &str) -> Result<(), Error> {
        if id.is_empty() {
            return Err(InvalidInputError::Fullname {
                value: original.to_string(),
                reason: "id cannot be empty".to_string(),
            }
            .into());
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        {
            return Err(InvalidInputError::Fullname {
                value: original.to_string(),
                reason: "id must be lowercase base-36".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for Fullname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind, self.id)
    }
}

impl FromStr for Fullname {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Fullname {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Fullname> for String {
    fn from(name: Fullname) -> Self {
        name.to_string()
    }
}
