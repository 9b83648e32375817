//! Wire parameter building.

use std::collections::BTreeMap;

use super::{ListingOptions, Sort};

/// Ordered query parameters for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Set a parameter unless one is already present.
    pub fn insert_missing(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_insert_with(|| value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build the wire parameters for a listing request.
///
/// `after` and `before` are always present; an empty value means "no
/// cursor". The sort overlay adds `t` for top and controversial (day when
/// no window is set) and `g` for hot with a location. No other sort gets
/// either. Caller extras never replace these.
pub fn build_query(options: &ListingOptions, sort: Option<Sort>) -> QueryParams {
    let mut params = QueryParams::new();

    params.insert("after", options.after.clone().unwrap_or_default());
    params.insert("before", options.before.clone().unwrap_or_default());
    params.insert("limit", options.limit.max(1).to_string());

    if let Some(count) = options.count {
        params.insert("count", count.to_string());
    }
    if options.raw_json {
        params.insert("raw_json", "1");
    }

    match sort {
        Some(sort) if sort.uses_time_window() => {
            params.insert("t", options.time_window.unwrap_or_default().as_str());
        }
        Some(Sort::Hot) => {
            if let Some(ref location) = options.location {
                params.insert("g", location.as_str());
            }
        }
        _ => {}
    }

    for (key, value) in &options.extra {
        params.insert_missing(key.as_str(), value.as_str());
    }

    params
}
