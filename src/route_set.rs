use std::collections::{HashSet, VecDeque};

use tracing::{debug, info, warn};

use crate::patterns::MEMBERS_RE;
use crate::registry::RegistryClient;
use crate::shared::{IrrError, Result, ANY, ANY_MEMBERS};

/// Set-object naming convention used by the RIRs: `RS-FOO` or `AS64500:RS-FOO`.
pub fn is_nested_reference(token: &str) -> bool {
    token.starts_with("RS-") || token.contains(":RS-")
}

/// Split every `members:` attribute in `text` into trimmed tokens, in order.
pub fn parse_members(text: &str) -> Vec<String> {
    MEMBERS_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .flat_map(|section| section.as_str().split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct RouteSetResolver<R> {
    registry: R,
    max_queries: usize,
}

impl<R: RegistryClient> RouteSetResolver<R> {
    pub fn new(registry: R, max_queries: usize) -> Self {
        RouteSetResolver {
            registry,
            max_queries,
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Direct members of `name`. An unknown or empty set gives an empty list.
    pub fn list_members(&self, name: &str) -> Result<Vec<String>> {
        if name == ANY {
            return Ok(ANY_MEMBERS.iter().map(|m| m.to_string()).collect());
        }

        let text = self.registry.query(name)?;
        let members = parse_members(&text);
        debug!(name, count = members.len(), "listed route-set members");
        Ok(members)
    }

    /// Expand `name` until only concrete members remain.
    ///
    /// Each distinct set is queried at most once, so cyclic or diamond-shaped
    /// membership graphs terminate and shared sub-sets contribute once.
    pub fn resolve_recursive(&self, name: &str) -> Result<Vec<String>> {
        let mut queries = 0;
        let mut visited: HashSet<String> = HashSet::from([name.to_string()]);
        let mut pending: VecDeque<String> = self.counted_list(name, name, &mut queries)?.into();
        let mut resolved = Vec::new();

        while let Some(token) = pending.pop_front() {
            if !is_nested_reference(&token) {
                resolved.push(token);
                continue;
            }

            if !visited.insert(token.clone()) {
                warn!(root = name, set = %token, "route-set already expanded, skipping");
                continue;
            }

            debug!(root = name, set = %token, "expanding nested route-set");
            pending.extend(self.counted_list(name, &token, &mut queries)?);
        }

        info!(name, prefixes = resolved.len(), queries, "resolved route-set");
        Ok(resolved)
    }

    fn counted_list(&self, root: &str, name: &str, queries: &mut usize) -> Result<Vec<String>> {
        if name != ANY {
            if *queries >= self.max_queries {
                return Err(IrrError::QueryLimitExceeded {
                    name: root.to_string(),
                    limit: self.max_queries,
                });
            }
            *queries += 1;
        }
        self.list_members(name)
    }
}
