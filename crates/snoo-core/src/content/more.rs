//! "Load more" placeholders (`more`).

use serde::{Deserialize, Serialize};

/// Stands in for comment children the server did not inline.
///
/// An id of `_` with no children is the "continue this thread" marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct More {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub depth: i64,
    #[serde(default)]
    pub parent_id: String,
    #[serde(default)]
    pub children: Vec<String>,
}

impl More {
    /// Returns true for the "continue this thread" marker.
    pub fn is_continue_thread(&self) -> bool {
        self.id == "_" && self.children.is_empty()
    }
}
