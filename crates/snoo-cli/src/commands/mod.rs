//! Subcommand implementations.

pub mod config;
pub mod listing;
pub mod query;
pub mod thread;

use anyhow::{Context, Result};
use clap::Args;

use snoo_core::{ListingOptions, Listings, Location, Sort, TimeWindow};
use snoo_http::HttpTransport;

use crate::config::Config;

/// Options shared by every command that builds a listing query.
#[derive(Args, Debug, Clone, Default)]
pub struct SortArgs {
    /// Sort order (hot, new, rising, top, controversial, best)
    #[arg(long)]
    pub sort: Option<Sort>,

    /// Time window for top/controversial (hour, day, week, month, year, all)
    #[arg(long = "time")]
    pub time_window: Option<TimeWindow>,

    /// Geographic filter for hot (e.g. GLOBAL, US, GB)
    #[arg(long)]
    pub geo: Option<Location>,

    /// Items per page (the server caps this at 100)
    #[arg(long)]
    pub limit: Option<u32>,

    /// Start after this fullname
    #[arg(long)]
    pub after: Option<String>,

    /// Start before this fullname
    #[arg(long)]
    pub before: Option<String>,
}

impl SortArgs {
    /// Listing options from these flags, falling back to the configured limit.
    pub fn options(&self, config: &Config) -> ListingOptions {
        let mut options = ListingOptions::default();
        if let Some(limit) = self.limit.or(config.limit) {
            options = options.limit(limit);
        }
        if let Some(ref after) = self.after {
            options = options.after(after.clone());
        }
        if let Some(ref before) = self.before {
            options = options.before(before.clone());
        }
        if let Some(window) = self.time_window {
            options = options.time_window(window);
        }
        if let Some(ref location) = self.geo {
            options = options.location(location.clone());
        }
        options
    }
}

/// Build a listing client from the stored config and the environment.
pub fn client(config: &Config) -> Result<Listings<HttpTransport>> {
    let http = config.http_config()?;
    tracing::debug!(base_url = %http.base_url, authenticated = http.access_token.is_some(), "building client");
    let transport = HttpTransport::new(http).context("Failed to create HTTP transport")?;
    Ok(Listings::new(transport))
}
