//! Link and self posts (`t3`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de::{self, Edited};

/// A link or self post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Base-36 id without the `t3_` prefix.
    pub id: String,
    /// Fullname (`t3_<id>`).
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub subreddit_id: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub upvote_ratio: f64,
    #[serde(default, deserialize_with = "de::loose_opt_bool")]
    pub likes: Option<bool>,
    #[serde(default)]
    pub num_comments: i64,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub edited: Edited,
    #[serde(default, deserialize_with = "de::empty_string_as_none")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "de::empty_string_as_none")]
    pub post_hint: Option<String>,
    #[serde(default, deserialize_with = "de::empty_string_as_none")]
    pub link_flair_text: Option<String>,
    #[serde(default, deserialize_with = "de::empty_string_as_none")]
    pub distinguished: Option<String>,
    #[serde(default, deserialize_with = "de::loose_bool")]
    pub is_self: bool,
    #[serde(default, deserialize_with = "de::loose_bool")]
    pub is_video: bool,
    #[serde(default, deserialize_with = "de::loose_bool")]
    pub stickied: bool,
    #[serde(default, deserialize_with = "de::loose_bool")]
    pub locked: bool,
    #[serde(default, deserialize_with = "de::loose_bool")]
    pub over_18: bool,
    #[serde(default, deserialize_with = "de::loose_bool")]
    pub spoiler: bool,
    #[serde(default)]
    pub preview: Option<Preview>,
}

impl Post {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        de::timestamp(self.created_utc)
    }

    /// Thumbnail URL, skipping the API's placeholder keywords.
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail
            .as_deref()
            .filter(|t| t.starts_with("http://") || t.starts_with("https://"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Preview {
    #[serde(default)]
    pub images: Vec<PreviewImage>,
    #[serde(default, deserialize_with = "de::loose_bool")]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PreviewImage {
    pub source: ImageSource,
    #[serde(default)]
    pub resolutions: Vec<ImageSource>,
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ImageSource {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_quirky_post() {
        let post: Post = serde_json::from_value(json!({
            "id": "abc",
            "name": "t3_abc",
            "title": "Hello",
            "thumbnail": "self",
            "link_flair_text": "",
            "distinguished": null,
            "is_self": "true",
            "over_18": false,
            "likes": null,
            "edited": false,
            "created_utc": 1700000000.0
        }))
        .unwrap();

        assert!(post.is_self);
        assert_eq!(post.link_flair_text, None);
        assert_eq!(post.thumbnail.as_deref(), Some("self"));
        assert_eq!(post.thumbnail_url(), None);
        assert_eq!(post.created_at().unwrap().timestamp(), 1_700_000_000);
        assert!(!post.edited.is_edited());
    }

    #[test]
    fn missing_title_is_an_error() {
        let result: Result<Post, _> = serde_json::from_value(json!({"id": "abc", "name": "t3_abc"}));
        assert!(result.is_err());
    }
}
