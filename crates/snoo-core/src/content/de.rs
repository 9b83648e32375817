//! Serde helpers for the API's encoding quirks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::listing::Page;

/// `""` and `null` both mean "absent".
pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseBool {
    Bool(bool),
    Text(String),
    Number(i64),
}

impl LooseBool {
    fn into_bool<E: serde::de::Error>(self) -> Result<bool, E> {
        match self {
            LooseBool::Bool(b) => Ok(b),
            LooseBool::Number(n) => Ok(n != 0),
            LooseBool::Text(s) => match s.as_str() {
                "true" | "True" | "1" => Ok(true),
                "false" | "False" | "0" | "" => Ok(false),
                other => Err(E::custom(format!("expected boolean, found '{}'", other))),
            },
        }
    }
}

/// Booleans that sometimes arrive as strings or are null.
pub(crate) fn loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LooseBool>::deserialize(deserializer)? {
        Some(value) => value.into_bool(),
        None => Ok(false),
    }
}

/// Tri-state booleans (`likes`, `user_is_subscriber`) with the same leniency.
pub(crate) fn loose_opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<LooseBool>::deserialize(deserializer)?
        .map(LooseBool::into_bool)
        .transpose()
}

/// Comment `replies`: `""` when there are none, otherwise a nested Listing.
pub(crate) fn replies<'de, D>(deserializer: D) -> Result<Option<Box<Page>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        other => Page::from_value(other)
            .map(|page| Some(Box::new(page)))
            .map_err(serde::de::Error::custom),
    }
}

pub(crate) fn serialize_replies<S>(replies: &Option<Box<Page>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match replies {
        Some(page) => page.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}

/// Edit marker: `false` when never edited, otherwise the edit time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Edited {
    Flag(bool),
    At(f64),
}

impl Edited {
    /// Returns true if the content was edited.
    pub fn is_edited(&self) -> bool {
        match self {
            Edited::Flag(flag) => *flag,
            Edited::At(_) => true,
        }
    }

    /// Returns the edit time, when the API reported one.
    pub fn at(&self) -> Option<DateTime<Utc>> {
        match self {
            Edited::Flag(_) => None,
            Edited::At(secs) => timestamp(*secs),
        }
    }
}

impl Default for Edited {
    fn default() -> Self {
        Edited::Flag(false)
    }
}

/// Convert the API's float epoch seconds into a UTC time.
pub(crate) fn timestamp(secs: f64) -> Option<DateTime<Utc>> {
    if secs <= 0.0 || !secs.is_finite() {
        return None;
    }
    DateTime::from_timestamp(secs.trunc() as i64, 0)
}
