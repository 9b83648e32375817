//! Query command implementation.
//!
//! Prints the wire parameters a listing request would carry without
//! contacting the server.

use anyhow::Result;
use clap::Args;
use serde_json::{Map, Value};

use snoo_core::build_query;

use super::SortArgs;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub sort: SortArgs,

    /// Extra parameter as key=value (repeatable)
    #[arg(long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Print the parameters as a JSON object
    #[arg(long)]
    pub json: bool,
}

fn parse_param(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

pub fn run(args: QueryArgs) -> Result<()> {
    let config = Config::load()?;
    let mut options = args.sort.options(&config);
    for (key, value) in args.params {
        options = options.param(key, value);
    }

    let query = build_query(&options, args.sort.sort);

    if args.json {
        let object: Map<String, Value> = query
            .iter()
            .map(|(key, value)| (key.to_string(), Value::from(value)))
            .collect();
        return output::json_pretty(&object);
    }

    for (key, value) in query.iter() {
        output::field(key, value);
    }
    Ok(())
}
