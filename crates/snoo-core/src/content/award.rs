//! Awards and trophies (`t6`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;

/// An award or trophy.
///
/// Most trophies carry no id, so every field but `name` is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub name: String,
    #[serde(default, deserialize_with = "de::empty_string_as_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::empty_string_as_none")]
    pub award_id: Option<String>,
    #[serde(default, deserialize_with = "de::empty_string_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::empty_string_as_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "de::empty_string_as_none")]
    pub icon_40: Option<String>,
    #[serde(default, deserialize_with = "de::empty_string_as_none")]
    pub icon_70: Option<String>,
    #[serde(default)]
    pub granted_at: Option<f64>,
}

impl Award {
    pub fn granted(&self) -> Option<DateTime<Utc>> {
        self.granted_at.and_then(de::timestamp)
    }
}
