use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::patterns::{rule_captures, EXPORT_RE, IMPORT_RE};
use crate::registry::RegistryClient;
use crate::shared::{Direction, Result};

/// Filter expressions an AS declares toward one peer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PeerRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<String>,
}

impl PeerRules {
    pub fn get(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::Import => self.import.as_deref(),
            Direction::Export => self.export.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.import.is_none() && self.export.is_none()
    }
}

/// Peer AS -> rules, ordered by peer for stable output.
pub type AutNumRuleSet = BTreeMap<String, PeerRules>;

/// Build the rule set from raw aut-num text.
///
/// Imports assign, so the last import line for a peer wins. Exports are
/// applied afterwards and the first export line for a peer wins. Lines whose
/// filter expression is blank are ignored.
pub fn parse_rules(text: &str) -> AutNumRuleSet {
    let mut rules = AutNumRuleSet::new();

    for (peer, expr) in rule_captures(&IMPORT_RE, text) {
        let expr = expr.trim();
        if expr.is_empty() {
            continue;
        }
        rules.entry(peer.to_string()).or_default().import = Some(expr.to_string());
    }

    for (peer, expr) in rule_captures(&EXPORT_RE, text) {
        let expr = expr.trim();
        if expr.is_empty() {
            continue;
        }
        let entry = rules.entry(peer.to_string()).or_default();
        if entry.export.is_none() {
            entry.export = Some(expr.to_string());
        }
    }

    rules
}

pub struct RuleExtractor<R> {
    registry: R,
}

impl<R: RegistryClient> RuleExtractor<R> {
    pub fn new(registry: R) -> Self {
        RuleExtractor { registry }
    }

    pub fn extract(&self, aut_num: &str) -> Result<AutNumRuleSet> {
        let text = self.registry.query(aut_num)?;
        let rules = parse_rules(&text);
        debug!(aut_num, peers = rules.len(), "extracted aut-num rules");
        Ok(rules)
    }
}
