//! Decoded listing pages.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::ListingDecoder;
use crate::content::Content;
use crate::error::DecodeError;

/// One fetched slice of a paginated collection.
///
/// Items keep server order. Cursors are `None` when the wire value was
/// absent, null or an empty string. A page is built once by the decoder
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    items: Vec<Content>,
    before: Option<String>,
    after: Option<String>,
    dist: Option<u64>,
}

impl Page {
    pub(crate) fn new(
        items: Vec<Content>,
        before: Option<String>,
        after: Option<String>,
        dist: Option<u64>,
    ) -> Self {
        Self {
            items,
            before: before.filter(|c| !c.is_empty()),
            after: after.filter(|c| !c.is_empty()),
            dist,
        }
    }

    /// Decode a Listing envelope with the standard registry.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        ListingDecoder::standard().decode(value)
    }

    /// Decode a Listing envelope from raw bytes with the standard registry.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        ListingDecoder::standard().decode_slice(bytes)
    }

    pub fn items(&self) -> &[Content] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Content> {
        self.items
    }

    /// Cursor for the previous page.
    pub fn before(&self) -> Option<&str> {
        self.before.as_deref()
    }

    /// Cursor for the next page.
    pub fn after(&self) -> Option<&str> {
        self.after.as_deref()
    }

    /// Server-reported item count. Informational only.
    pub fn dist(&self) -> Option<u64> {
        self.dist
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if there is no page after this one.
    pub fn is_last(&self) -> bool {
        self.after.is_none()
    }
}

struct ListingData<'a>(&'a Page);

impl Serialize for ListingData<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let page = self.0;
        let mut data = serializer.serialize_struct("ListingData", 4)?;
        data.serialize_field("before", &page.before)?;
        data.serialize_field("after", &page.after)?;
        data.serialize_field("dist", &page.dist)?;
        data.serialize_field("children", &page.items)?;
        data.end()
    }
}

impl Serialize for Page {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut envelope = serializer.serialize_struct("Listing", 2)?;
        envelope.serialize_field("kind", "Listing")?;
        envelope.serialize_field("data", &ListingData(self))?;
        envelope.end()
    }
}

impl<'de> Deserialize<'de> for Page {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Page::from_value(value).map_err(serde::de::Error::custom)
    }
}
