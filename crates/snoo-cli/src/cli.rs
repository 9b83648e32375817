//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::config::ConfigCommand;
use crate::commands::listing::ListingArgs;
use crate::commands::query::QueryArgs;
use crate::commands::thread::ThreadArgs;

/// Reddit listing explorer.
#[derive(Parser, Debug)]
#[command(name = "snoo")]
#[command(author, version = env!("SNOO_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one page of a listing, or walk all of it
    Listing(ListingArgs),

    /// Show a post and its comments
    Thread(ThreadArgs),

    /// Print the query parameters a listing request would send
    Query(QueryArgs),

    /// Show or change the stored configuration
    Config(ConfigCommand),
}
