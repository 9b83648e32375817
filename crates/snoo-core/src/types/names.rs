//! Subreddit and user name types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A validated subreddit name.
///
/// Accepts the bare name or the `r/` / `/r/` prefixed form and stores the
/// bare name. Multireddit-style joins (`rust+programming`) are allowed since
/// Reddit serves them through the same listing paths.
///
/// # Example
///
/// ```
/// use snoo_core::SubredditName;
///
/// let sub = SubredditName::new("r/rust").unwrap();
/// assert_eq!(sub.as_str(), "rust");
/// assert_eq!(sub.prefixed(), "r/rust");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubredditName(String);

impl SubredditName {
    /// Create a new subreddit name, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if any `+`-separated segment is empty, longer than
    /// 21 characters, or contains characters other than ASCII letters,
    /// digits and `_`.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let original = s.as_ref();
        let bare = original
            .trim()
            .trim_start_matches('/')
            .trim_start_matches("r/")
            .trim_end_matches('/');

        for segment in bare.split('+') {
            validate_segment(segment, 21).map_err(|reason| InvalidInputError::Subreddit {
                value: original.to_string(),
                reason,
            })?;
        }

        Ok(Self(bare.to_string()))
    }

    /// Returns the bare name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `r/` prefixed name.
    pub fn prefixed(&self) -> String {
        format!("r/{}", self.0)
    }
}

/// A validated Reddit username.
///
/// Accepts the bare name or the `u/` / `/u/` prefixed form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a new username, validating the format.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let original = s.as_ref();
        let bare = original
            .trim()
            .trim_start_matches('/')
            .trim_start_matches("u/")
            .trim_start_matches("user/")
            .trim_end_matches('/');

        validate_user_segment(bare).map_err(|reason| InvalidInputError::Username {
            value: original.to_string(),
            reason,
        })?;

        Ok(Self(bare.to_string()))
    }

    /// Returns the bare name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate_segment(segment: &str, max_len: usize) -> Result<(), String> {
    if segment.is_empty() {
        return Err("name cannot be empty".to_string());
    }
    if segment.len() > max_len {
        return Err(format!("name cannot exceed {} characters", max_len));
    }
    if !segment
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err("name may only contain letters, digits and '_'".to_string());
    }
    Ok(())
}

fn validate_user_segment(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name cannot be empty".to_string());
    }
    if name.len() > 20 {
        return Err("name cannot exceed 20 characters".to_string());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err("name may only contain letters, digits, '_' and '-'".to_string());
    }
    Ok(())
}

macro_rules! string_newtype_impls {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = Error;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_newtype_impls!(SubredditName);
string_newtype_impls!(Username);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_subreddit_prefixes() {
        assert_eq!(SubredditName::new("rust").unwrap().as_str(), "rust");
        assert_eq!(SubredditName::new("r/rust").unwrap().as_str(), "rust");
        assert_eq!(SubredditName::new("/r/rust/").unwrap().as_str(), "rust");
    }

    #[test]
    fn allows_multireddit_join() {
        let sub = SubredditName::new("rust+programming").unwrap();
        assert_eq!(sub.as_str(), "rust+programming");
    }

    #[test]
    fn rejects_bad_subreddits() {
        assert!(SubredditName::new("").is_err());
        assert!(SubredditName::new("r/").is_err());
        assert!(SubredditName::new("rust+").is_err());
        assert!(SubredditName::new("has space").is_err());
        assert!(SubredditName::new("a".repeat(22)).is_err());
    }

    #[test]
    fn strips_user_prefixes() {
        assert_eq!(Username::new("u/spez").unwrap().as_str(), "spez");
        assert_eq!(Username::new("/user/spez").unwrap().as_str(), "spez");
        assert_eq!(Username::new("some-user_1").unwrap().as_str(), "some-user_1");
    }

    #[test]
    fn rejects_bad_usernames() {
        assert!(Username::new("u/").is_err());
        assert!(Username::new("a.b").is_err());
    }
}
