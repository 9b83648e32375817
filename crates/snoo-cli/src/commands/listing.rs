//! Listing command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tokio_util::sync::CancellationToken;

use snoo_core::{
    Content, Error, Interruption, ListingEndpoint, Page, Sort, SubredditName, SubredditSource,
    UserSection, Username, Walk, WalkInterrupted, WalkLimits,
};

use super::SortArgs;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct ListingArgs {
    /// Subreddit to list (`rust`, `r/rust` or `rust+programming`)
    #[arg(long, conflicts_with_all = ["user", "subreddits"])]
    pub subreddit: Option<String>,

    /// User whose profile to list
    #[arg(long, conflicts_with = "subreddits")]
    pub user: Option<String>,

    /// Profile section (overview, submitted, comments, saved)
    #[arg(long, requires = "user")]
    pub section: Option<UserSection>,

    /// Subreddit directory (subscribed, popular, new, default)
    #[arg(long, conflicts_with_all = ["sort", "time_window", "geo"])]
    pub subreddits: Option<SubredditSource>,

    #[command(flatten)]
    pub sort: SortArgs,

    /// Follow cursors until the listing ends
    #[arg(long)]
    pub all: bool,

    /// Stop walking after this many pages
    #[arg(long, requires = "all")]
    pub max_pages: Option<usize>,

    /// Stop walking once this many items have arrived
    #[arg(long, requires = "all")]
    pub max_items: Option<usize>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl ListingArgs {
    fn endpoint(&self) -> Result<ListingEndpoint> {
        if let Some(ref name) = self.subreddit {
            let name = SubredditName::new(name).context("Invalid subreddit")?;
            return Ok(ListingEndpoint::subreddit(name, self.sort.sort.unwrap_or_default()));
        }
        if let Some(ref user) = self.user {
            let user = Username::new(user).context("Invalid username")?;
            return Ok(ListingEndpoint::User {
                user,
                section: self.section.unwrap_or_default(),
                sort: self.sort.sort,
            });
        }
        if let Some(source) = self.subreddits {
            return Ok(ListingEndpoint::Subreddits(source));
        }
        Ok(ListingEndpoint::front_page(self.sort.sort.unwrap_or(Sort::Hot)))
    }

    fn limits(&self, cancel: CancellationToken) -> WalkLimits {
        let mut limits = WalkLimits::default().cancel_on(cancel);
        if let Some(pages) = self.max_pages {
            limits = limits.max_pages(pages);
        }
        if let Some(items) = self.max_items {
            limits = limits.max_items(items);
        }
        limits
    }
}

pub async fn run(args: ListingArgs) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let listings = super::client(&config)?;
    let endpoint = args.endpoint()?;
    let options = args.sort.options(&config);

    if !args.all {
        let page = listings
            .fetch_page(&endpoint, &options)
            .await
            .with_context(|| format!("Failed to fetch {}", endpoint))?;
        print_items(page.items(), args.pretty)?;
        print_cursors(&page);
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    match listings
        .fetch_all(&endpoint, options, args.limits(cancel))
        .await
    {
        Ok(walk) => {
            print_walk(&walk, args.pretty)?;
            Ok(())
        }
        Err(Error::WalkInterrupted(interrupted)) => {
            let WalkInterrupted {
                partial,
                page_index,
                cause,
            } = *interrupted;
            print_walk(&partial, args.pretty)?;
            match cause {
                Interruption::Cancelled => {
                    output::warning(&format!("Cancelled after {} pages", partial.pages.len()));
                    Ok(())
                }
                Interruption::Failed(cause) => Err(anyhow::Error::new(*cause).context(format!(
                    "Walk of {} failed at page {}",
                    endpoint,
                    page_index + 1
                ))),
            }
        }
        Err(Error::Cancelled) => {
            output::warning("Cancelled before the first page");
            Ok(())
        }
        Err(err) => Err(err).with_context(|| format!("Failed to fetch {}", endpoint)),
    }
}

fn print_items(items: &[Content], pretty: bool) -> Result<()> {
    if items.is_empty() {
        eprintln!("{}", "No items found.".dimmed());
    }
    for item in items {
        output::item(item, pretty)?;
    }
    Ok(())
}

fn print_cursors(page: &Page) {
    if let Some(before) = page.before() {
        output::status("Previous cursor", before);
    }
    if let Some(after) = page.after() {
        output::status("Next cursor", after);
    }
}

fn print_walk(walk: &Walk, pretty: bool) -> Result<()> {
    for item in walk.items() {
        output::item(item, pretty)?;
    }
    eprintln!();
    output::status(
        "Walked",
        &format!(
            "{} items in {} pages ({:?})",
            walk.item_count(),
            walk.pages.len(),
            walk.status
        ),
    );
    if let Some(cursor) = walk.next_cursor() {
        output::status("Next cursor", cursor);
    }
    Ok(())
}
