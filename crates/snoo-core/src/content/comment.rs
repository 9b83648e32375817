//! Comments (`t1`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de::{self, Edited};
use crate::listing::Page;

/// A comment, with its inlined reply tree.
///
/// Inside a listing, `replies` is decoded through the listing's own kind
/// registry; plain serde decoding falls back to the standard registry. In
/// both cases a reply tree containing an unknown kind fails the comment
/// (and its page) rather than dropping the reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub link_id: String,
    #[serde(default)]
    pub parent_id: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default, deserialize_with = "de::loose_opt_bool")]
    pub likes: Option<bool>,
    #[serde(default)]
    pub depth: i64,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub edited: Edited,
    #[serde(default, deserialize_with = "de::loose_bool")]
    pub score_hidden: bool,
    #[serde(default, deserialize_with = "de::loose_bool")]
    pub stickied: bool,
    #[serde(default, deserialize_with = "de::empty_string_as_none")]
    pub distinguished: Option<String>,
    #[serde(
        default,
        deserialize_with = "de::replies",
        serialize_with = "de::serialize_replies"
    )]
    pub replies: Option<Box<Page>>,
}

impl Comment {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        de::timestamp(self.created_utc)
    }

    /// Number of replies inlined directly under this comment, including
    /// `more` placeholders.
    pub fn reply_count(&self) -> usize {
        self.replies.as_ref().map_or(0, |page| page.len())
    }

    /// Returns true if this is a top-level comment on its post.
    pub fn is_top_level(&self) -> bool {
        self.parent_id.starts_with("t3_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Content;
    use serde_json::json;

    #[test]
    fn empty_replies_string() {
        let comment: Comment = serde_json::from_value(json!({
            "id": "c1",
            "name": "t1_c1",
            "parent_id": "t3_abc",
            "replies": ""
        }))
        .unwrap();
        assert!(comment.replies.is_none());
        assert!(comment.is_top_level());
        assert_eq!(comment.reply_count(), 0);
    }

    #[test]
    fn nested_replies_decode() {
        let comment: Comment = serde_json::from_value(json!({
            "id": "c1",
            "name": "t1_c1",
            "replies": {
                "kind": "Listing",
                "data": {
                    "before": null,
                    "after": null,
                    "children": [
                        {"kind": "t1", "data": {"id": "c2", "name": "t1_c2", "depth": 1, "replies": ""}},
                        {"kind": "more", "data": {"id": "c3", "name": "t1_c3", "count": 4, "depth": 1, "parent_id": "t1_c1", "children": ["c3", "c4"]}}
                    ]
                }
            }
        }))
        .unwrap();

        let replies = comment.replies.as_ref().unwrap();
        assert_eq!(replies.len(), 2);
        assert!(matches!(replies.items()[0], Content::Comment(_)));
        assert!(matches!(replies.items()[1], Content::More(_)));
    }

    #[test]
    fn unknown_kind_in_replies_fails() {
        let result: Result<Comment, _> = serde_json::from_value(json!({
            "id": "c1",
            "name": "t1_c1",
            "replies": {
                "kind": "Listing",
                "data": {"children": [{"kind": "t4", "data": {}}]}
            }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn no_replies_serialize_as_empty_string() {
        let comment: Comment = serde_json::from_value(json!({"id": "c1", "name": "t1_c1"})).unwrap();
        let value = serde_json::to_value(&comment).unwrap();
        assert_eq!(value["replies"], json!(""));
    }
}
