use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::shared::{IrrError, Result};

/// Fixed flags sent with every query: advanced mode, no type filter, no inverse lookup.
const QUERY_OPTIONS: [(&str, &str); 4] = [
    ("advanced_query", ""),
    ("-T option", ""),
    ("ip_option", ""),
    ("-i option", ""),
];

/// Anything that can answer a keyword query with raw RPSL text.
pub trait RegistryClient {
    fn query(&self, keywords: &str) -> Result<String>;
}

impl<R: RegistryClient + ?Sized> RegistryClient for &R {
    fn query(&self, keywords: &str) -> Result<String> {
        (**self).query(keywords)
    }
}

/// Queries a RADb-style web endpoint. One attempt per call, no retries.
pub struct RadbClient {
    url: String,
    client: Client,
}

impl RadbClient {
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("irr-policy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| IrrError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(RadbClient {
            url: config.url.clone(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn unavailable(keywords: &str, reason: impl ToString) -> IrrError {
        IrrError::RegistryUnavailable {
            keywords: keywords.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl RegistryClient for RadbClient {
    fn query(&self, keywords: &str) -> Result<String> {
        debug!(url = %self.url, keywords, "querying registry");

        let mut params = vec![("keywords", keywords)];
        params.extend(QUERY_OPTIONS);

        let response = self
            .client
            .get(&self.url)
            .query(&params)
            .send()
            .map_err(|e| Self::unavailable(keywords, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::unavailable(keywords, format!("HTTP {}", status)));
        }

        let body = response.text().map_err(|e| Self::unavailable(keywords, e))?;
        debug!(keywords, bytes = body.len(), "registry answered");
        Ok(body)
    }
}

/// Serves canned registry text from memory and records every query made.
///
/// Unknown keywords answer with an empty body, which is what the registry
/// returns for objects it does not hold.
#[derive(Default)]
pub struct StaticRegistry {
    objects: HashMap<String, String>,
    failing: HashSet<String>,
    queries: Mutex<Vec<String>>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, keywords: &str, text: &str) -> Self {
        self.objects.insert(keywords.to_string(), text.to_string());
        self
    }

    /// Make queries for `keywords` fail as if the registry were unreachable.
    pub fn with_failure(mut self, keywords: &str) -> Self {
        self.failing.insert(keywords.to_string());
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn query_count(&self) -> usize {
        self.queries().len()
    }
}

impl RegistryClient for StaticRegistry {
    fn query(&self, keywords: &str) -> Result<String> {
        match self.queries.lock() {
            Ok(mut q) => q.push(keywords.to_string()),
            Err(poisoned) => poisoned.into_inner().push(keywords.to_string()),
        }

        if self.failing.contains(keywords) {
            return Err(IrrError::RegistryUnavailable {
                keywords: keywords.to_string(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(self.objects.get(keywords).cloned().unwrap_or_default())
    }
}
