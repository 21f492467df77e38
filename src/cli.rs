use std::path::PathBuf;

use clap::{Parser, Subcommand};

use irr_policy::AddressFamily;

#[derive(Parser, Debug)]
#[command(name = "irr-policy", version, about = "Simplified JSON view over IRR route-sets and aut-num policy")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "irr-policy.yaml")]
    pub config: PathBuf,

    /// Registry query endpoint (overrides config file setting)
    #[arg(long)]
    pub registry_url: Option<String>,

    /// Per-query HTTP timeout in seconds (overrides config file setting)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Registry query ceiling per resolution (overrides config file setting)
    #[arg(long)]
    pub max_queries: Option<usize>,

    /// Only print prefixes of this address family
    #[arg(long, value_enum)]
    pub family: Option<AddressFamily>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Expand a route-set (or ANY) into its prefixes
    RouteSet { name: String },
    /// Prefixes OWN_AS imports from and exports to PEER_AS
    GenerateFor { own_as: String, peer_as: String },
    /// Every peer rule declared by an aut-num
    Rules { aut_num: String },
}
