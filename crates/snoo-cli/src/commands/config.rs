//! Config command implementation.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use snoo_core::ApiUrl;

use crate::config::{self, Config};
use crate::output;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print the stored settings
    Show(ShowArgs),

    /// Change stored settings
    Set(SetArgs),

    /// Print the config file location
    Path,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// API host, e.g. https://oauth.reddit.com
    #[arg(long)]
    pub base_url: Option<String>,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Default page size
    #[arg(long)]
    pub limit: Option<u32>,
}

pub fn handle(cmd: ConfigCommand) -> Result<()> {
    match cmd.command {
        ConfigSubcommand::Show(args) => show(args),
        ConfigSubcommand::Set(args) => set(args),
        ConfigSubcommand::Path => {
            println!("{}", config::config_path()?.display());
            Ok(())
        }
    }
}

fn show(args: ShowArgs) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;
    if args.json {
        return output::json_pretty(&config);
    }

    let unset = "(default)";
    output::field("Base URL", config.base_url.as_deref().unwrap_or(unset));
    output::field("User agent", config.user_agent.as_deref().unwrap_or(unset));
    output::field(
        "Limit",
        &config
            .limit
            .map(|limit| limit.to_string())
            .unwrap_or_else(|| unset.to_string()),
    );
    if let Some(url) = config.effective_base_url()
        && config.base_url.as_deref() != Some(url.as_str())
    {
        output::field("Base URL (env)", &url);
    }
    Ok(())
}

fn set(args: SetArgs) -> Result<()> {
    if args.base_url.is_none() && args.user_agent.is_none() && args.limit.is_none() {
        bail!("Nothing to set; pass --base-url, --user-agent or --limit");
    }

    let mut config = Config::load().context("Failed to load config")?;

    if let Some(url) = args.base_url {
        let url = ApiUrl::new(&url).with_context(|| format!("Invalid base URL '{}'", url))?;
        config.base_url = Some(url.to_string());
    }
    if let Some(agent) = args.user_agent {
        if agent.trim().is_empty() {
            bail!("User agent cannot be empty");
        }
        config.user_agent = Some(agent);
    }
    if let Some(limit) = args.limit {
        if limit == 0 {
            bail!("Limit must be at least 1");
        }
        config.limit = Some(limit);
    }

    let path = config.save()?;
    output::success(&format!("Saved {}", path.display()));
    Ok(())
}
