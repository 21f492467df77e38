use serde::Serialize;
use tracing::{debug, info};

use crate::aut_num::{AutNumRuleSet, RuleExtractor};
use crate::config::Config;
use crate::registry::{RadbClient, RegistryClient};
use crate::route_set::RouteSetResolver;
use crate::shared::{AddressFamily, Direction, IrrError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSetMembers {
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PeerPolicy {
    pub import: Vec<String>,
    pub export: Vec<String>,
}

/// Answers route-set and per-peer policy queries against one registry.
pub struct PolicyService<R> {
    resolver: RouteSetResolver<R>,
}

impl PolicyService<RadbClient> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let registry = RadbClient::new(&config.registry)?;
        Ok(Self::new(registry, config.resolver.max_queries))
    }
}

impl<R: RegistryClient> PolicyService<R> {
    pub fn new(registry: R, max_queries: usize) -> Self {
        PolicyService {
            resolver: RouteSetResolver::new(registry, max_queries),
        }
    }

    pub fn registry(&self) -> &R {
        self.resolver.registry()
    }

    pub fn resolve_route_set(&self, name: &str) -> Result<RouteSetMembers> {
        self.resolve_route_set_for(name, None)
    }

    /// Like [`resolve_route_set`](Self::resolve_route_set), keeping only
    /// prefixes of `family`. A set left empty by the filter is not found.
    pub fn resolve_route_set_for(
        &self,
        name: &str,
        family: Option<AddressFamily>,
    ) -> Result<RouteSetMembers> {
        let mut members = self.resolver.resolve_recursive(name)?;
        if let Some(family) = family {
            family.retain(&mut members);
        }
        if members.is_empty() {
            return Err(IrrError::not_found("Route set not found, or is empty"));
        }
        Ok(RouteSetMembers { members })
    }

    /// Every peer rule declared by `aut_num`.
    pub fn rules(&self, aut_num: &str) -> Result<AutNumRuleSet> {
        let rules = RuleExtractor::new(self.registry()).extract(aut_num)?;
        if rules.is_empty() {
            return Err(IrrError::not_found("No rules found"));
        }
        Ok(rules)
    }

    /// Prefixes `own_as` accepts from and announces to `peer_as`.
    pub fn generate_policy_for(&self, own_as: &str, peer_as: &str) -> Result<PeerPolicy> {
        self.generate_policy_for_family(own_as, peer_as, None)
    }

    /// Like [`generate_policy_for`](Self::generate_policy_for), keeping only
    /// prefixes of `family`. If the filter empties a policy that had prefixes,
    /// the peer is not found for that family.
    pub fn generate_policy_for_family(
        &self,
        own_as: &str,
        peer_as: &str,
        family: Option<AddressFamily>,
    ) -> Result<PeerPolicy> {
        let rules = RuleExtractor::new(self.registry()).extract(own_as)?;
        let peer_rules = match rules.get(peer_as) {
            Some(r) if !r.is_empty() => r,
            _ => return Err(IrrError::not_found("No rules found")),
        };

        let mut policy = PeerPolicy::default();
        for direction in [Direction::Import, Direction::Export] {
            let Some(expr) = peer_rules.get(direction) else {
                continue;
            };
            debug!(own_as, peer_as, %direction, expr, "resolving filter expression");
            let prefixes = self.resolver.resolve_recursive(expr)?;
            match direction {
                Direction::Import => policy.import = prefixes,
                Direction::Export => policy.export = prefixes,
            }
        }

        if let Some(family) = family {
            let had_prefixes = !policy.import.is_empty() || !policy.export.is_empty();
            family.retain(&mut policy.import);
            family.retain(&mut policy.export);
            if had_prefixes && policy.import.is_empty() && policy.export.is_empty() {
                return Err(IrrError::not_found("No rules found"));
            }
        }

        info!(
            own_as,
            peer_as,
            import = policy.import.len(),
            export = policy.export.len(),
            "generated peer policy"
        );
        Ok(policy)
    }
}
