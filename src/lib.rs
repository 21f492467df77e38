// Re-export all public modules
pub mod shared;
pub mod config;
pub mod patterns;
pub mod registry;
pub mod route_set;
pub mod aut_num;
pub mod policy;

// Re-export commonly used types at the crate root
pub use aut_num::{AutNumRuleSet, PeerRules, RuleExtractor};
pub use config::Config;
pub use policy::{PeerPolicy, PolicyService, RouteSetMembers};
pub use registry::{RadbClient, RegistryClient, StaticRegistry};
pub use route_set::RouteSetResolver;
pub use shared::{AddressFamily, Direction, IrrError};
