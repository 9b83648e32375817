//! Typed listing options.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Items per page when the caller does not choose.
pub const DEFAULT_LIMIT: u32 = 25;

/// The server's page-size ceiling. Larger limits are sent as given and
/// clamped by the server.
pub const MAX_LIMIT: u32 = 100;

/// Listing sort order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    #[default]
    Hot,
    New,
    Rising,
    Top,
    Controversial,
    Best,
}

impl Sort {
    pub fn as_str(self) -> &'static str {
        match self {
            Sort::Hot => "hot",
            Sort::New => "new",
            Sort::Rising => "rising",
            Sort::Top => "top",
            Sort::Controversial => "controversial",
            Sort::Best => "best",
        }
    }

    /// Returns true if the sort takes a `t` time window.
    pub fn uses_time_window(self) -> bool {
        matches!(self, Sort::Top | Sort::Controversial)
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sort {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hot" => Ok(Sort::Hot),
            "new" => Ok(Sort::New),
            "rising" => Ok(Sort::Rising),
            "top" => Ok(Sort::Top),
            "controversial" => Ok(Sort::Controversial),
            "best" => Ok(Sort::Best),
            _ => Err(InvalidInputError::Other {
                message: format!(
                    "unknown sort '{}' (expected hot, new, rising, top, controversial or best)",
                    s
                ),
            }
            .into()),
        }
    }
}

/// Time window for top and controversial listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Hour => "hour",
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
            TimeWindow::All => "all",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hour" => Ok(TimeWindow::Hour),
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            "year" => Ok(TimeWindow::Year),
            "all" => Ok(TimeWindow::All),
            _ => Err(InvalidInputError::Other {
                message: format!(
                    "unknown time window '{}' (expected hour, day, week, month, year or all)",
                    s
                ),
            }
            .into()),
        }
    }
}

/// Geographic filter code for hot listings (`GLOBAL`, `US`, `GB`, `US_CA`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location(String);

impl Location {
    /// Create a location, normalizing to upper case.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is empty or contains anything other
    /// than ASCII letters and underscores.
    pub fn new(code: impl AsRef<str>) -> Result<Self, Error> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(InvalidInputError::Location {
                value: code.to_string(),
                reason: "cannot be empty".to_string(),
            }
            .into());
        }
        if !code.chars().all(|c| c.is_ascii_alphabetic() || c == '_') {
            return Err(InvalidInputError::Location {
                value: code.to_string(),
                reason: "must contain only letters and underscores".to_string(),
            }
            .into());
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn global() -> Self {
        Self("GLOBAL".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Location {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.0
    }
}

/// Options for one listing request.
///
/// Start a walk with the default (no cursors); the walker advances `after`
/// itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingOptions {
    pub after: Option<String>,
    pub before: Option<String>,
    /// Items per page. Never zero; see [`MAX_LIMIT`].
    pub limit: u32,
    /// Items already seen, for the server's numbering.
    pub count: Option<u32>,
    /// Used by top and controversial sorts only.
    pub time_window: Option<TimeWindow>,
    /// Used by the hot sort only.
    pub location: Option<Location>,
    /// Ask for unescaped text (`raw_json=1`).
    pub raw_json: bool,
    /// Extra parameters, sent after the base set and never replacing it.
    pub extra: Vec<(String, String)>,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            after: None,
            before: None,
            limit: DEFAULT_LIMIT,
            count: None,
            time_window: None,
            location: None,
            raw_json: true,
            extra: Vec::new(),
        }
    }
}

impl ListingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    /// Set the page size. Zero is raised to one.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = Some(window);
        self
    }

    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn raw_json(mut self, raw_json: bool) -> Self {
        self.raw_json = raw_json;
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }
}
