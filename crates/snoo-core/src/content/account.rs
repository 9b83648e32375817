//! User accounts (`t2`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    /// The username (accounts are the one kind whose `name` is not a fullname).
    pub name: String,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub link_karma: i64,
    #[serde(default)]
    pub comment_karma: i64,
    #[serde(default)]
    pub total_karma: i64,
    #[serde(default, deserialize_with = "de::loose_bool")]
    pub is_gold: bool,
    #[serde(default, deserialize_with = "de::loose_bool")]
    pub is_mod: bool,
    #[serde(default, deserialize_with = "de::loose_bool")]
    pub verified: bool,
    #[serde(default, deserialize_with = "de::loose_opt_bool")]
    pub has_verified_email: Option<bool>,
    #[serde(default, deserialize_with = "de::empty_string_as_none")]
    pub icon_img: Option<String>,
}

impl Account {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        de::timestamp(self.created_utc)
    }

    /// Fullname string (`t2_<id>`).
    pub fn fullname(&self) -> String {
        format!("t2_{}", self.id)
    }
}
