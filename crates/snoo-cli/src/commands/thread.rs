//! Thread command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use snoo_core::{Content, ListingOptions, SubredditName};

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct ThreadArgs {
    /// Subreddit the post lives in
    pub subreddit: String,

    /// Post id, with or without the `t3_` prefix
    pub article: String,

    /// Maximum number of top-level comments
    #[arg(long)]
    pub limit: Option<u32>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ThreadArgs) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let listings = super::client(&config)?;
    let subreddit = SubredditName::new(&args.subreddit).context("Invalid subreddit")?;

    let mut options = ListingOptions::default();
    if let Some(limit) = args.limit.or(config.limit) {
        options = options.limit(limit);
    }

    let thread = listings
        .thread(&subreddit, &args.article, &options)
        .await
        .with_context(|| format!("Failed to fetch thread {} in {}", args.article, subreddit))?;

    output::status("Title", &thread.post.title.bold().to_string());
    output::status("Comments", &thread.comments.len().to_string());

    output::item(&Content::Post(thread.post), args.pretty)?;
    for comment in thread.comments.items() {
        output::item(comment, args.pretty)?;
    }
    if let Some(after) = thread.comments.after() {
        output::status("Next cursor", after);
    }
    Ok(())
}
