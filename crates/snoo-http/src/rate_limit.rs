//! Rate-limit header capture.

use std::time::{Duration, SystemTime};

use reqwest::header::HeaderMap;

/// The server's most recent rate-limit report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateLimit {
    /// Requests used in the current window.
    pub used: f64,
    /// Requests left in the current window.
    pub remaining: f64,
    /// When the window resets.
    pub reset_at: Option<SystemTime>,
}

impl RateLimit {
    /// Read the `x-ratelimit-*` headers. Returns `None` when the response
    /// carried none of them.
    pub(crate) fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let used = header_float(headers, "x-ratelimit-used");
        let remaining = header_float(headers, "x-ratelimit-remaining");
        let reset = header_float(headers, "x-ratelimit-reset");
        if used.is_none() && remaining.is_none() && reset.is_none() {
            return None;
        }

        // Out-of-range resets are dropped rather than trusted
        let reset_at = reset
            .and_then(|secs| Duration::try_from_secs_f64(secs.max(0.0)).ok())
            .and_then(|wait| SystemTime::now().checked_add(wait));
        Some(Self {
            used: used.unwrap_or_default(),
            remaining: remaining.unwrap_or_default(),
            reset_at,
        })
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining < 1.0
    }
}

fn header_float(headers: &HeaderMap, key: &str) -> Option<f64> {
    headers
        .get(key)
        .and_then(|value| value.to_str().ok())
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
