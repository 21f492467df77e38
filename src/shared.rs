use std::fmt;
use std::str::FromStr;

use ipnetwork::IpNetwork;
use thiserror::Error;

/// Route-set name that stands for the whole IPv4 and IPv6 space.
pub const ANY: &str = "ANY";

/// Members reported for [`ANY`] without asking the registry.
pub const ANY_MEMBERS: [&str; 2] = ["0.0.0.0/0", "::/0"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Import,
    Export,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Import => "import",
            Direction::Export => "export",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    /// True when `token` parses as a prefix of this family. Opaque tokens never match.
    pub fn matches(&self, token: &str) -> bool {
        match (self, IpNetwork::from_str(token)) {
            (AddressFamily::V4, Ok(IpNetwork::V4(_))) => true,
            (AddressFamily::V6, Ok(IpNetwork::V6(_))) => true,
            _ => false,
        }
    }

    pub fn retain(&self, prefixes: &mut Vec<String>) {
        prefixes.retain(|p| self.matches(p));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrrError {
    /// The registry could not be reached or answered with a non-success status.
    #[error("registry query for '{keywords}' failed: {reason}")]
    RegistryUnavailable { keywords: String, reason: String },

    #[error("{what}")]
    NotFound { what: String },

    #[error("resolving '{name}' needed more than {limit} registry queries")]
    QueryLimitExceeded { name: String, limit: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl IrrError {
    pub fn not_found(what: impl Into<String>) -> Self {
        IrrError::NotFound { what: what.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, IrrError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, IrrError>;
