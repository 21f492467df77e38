mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, warn};

use irr_policy::{Config, IrrError, PolicyService};

use crate::cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<IrrError>() {
            Some(e) if e.is_not_found() => {
                eprintln!("{}", e);
                ExitCode::from(2)
            }
            _ => {
                eprintln!("error: {:#}", err);
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let from_file = Config::read(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let found = from_file.is_some();
    let mut config = from_file.unwrap_or_default();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if !found {
        warn!(path = %cli.config.display(), "configuration file not found; using defaults");
    }

    config
        .apply_overrides(cli.registry_url.as_deref(), cli.timeout_secs, cli.max_queries)
        .context("invalid command-line override")?;

    debug!(registry = %config.registry.url, max_queries = config.resolver.max_queries, "starting");

    let service = PolicyService::from_config(&config)?;

    match &cli.command {
        Command::RouteSet { name } => {
            let resolved = service.resolve_route_set_for(name, cli.family)?;
            print_json(&resolved, cli.pretty)
        }
        Command::GenerateFor { own_as, peer_as } => {
            let policy = service.generate_policy_for_family(own_as, peer_as, cli.family)?;
            print_json(&policy, cli.pretty)
        }
        Command::Rules { aut_num } => {
            let rules = service.rules(aut_num)?;
            print_json(&rules, cli.pretty)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}
