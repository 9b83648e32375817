//! Subreddits (`t5`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subreddit {
    pub id: String,
    /// Fullname (`t5_<id>`).
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub display_name_prefixed: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub public_description: String,
    /// Null for quarantined and some private communities.
    #[serde(default)]
    pub subscribers: Option<i64>,
    #[serde(default, deserialize_with = "de::loose_bool")]
    pub over18: bool,
    #[serde(default)]
    pub subreddit_type: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default, deserialize_with = "de::loose_opt_bool")]
    pub user_is_subscriber: Option<bool>,
}

impl Subreddit {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        de::timestamp(self.created_utc)
    }
}
