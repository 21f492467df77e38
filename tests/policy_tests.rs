use irr_policy::aut_num::{PeerRules, RuleExtractor};
use irr_policy::policy::{PeerPolicy, PolicyService};
use irr_policy::registry::StaticRegistry;
use irr_policy::shared::{AddressFamily, IrrError};

const AS64496: &str = "\
aut-num:        AS64496
as-name:        EXAMPLE-NET
import:         from AS64500 accept RS-PEER-IN
export:         to AS64500 announce RS-PEER-OUT
import:         from AS64501 accept AS64501:RS-ROUTES
import:         from AS64502 accept ANY
export:         to AS64503 announce RS-PEER-OUT
mnt-by:         MAINT-EXAMPLE
source:         RADB
";

fn registry() -> StaticRegistry {
    StaticRegistry::new()
        .with_object("AS64496", AS64496)
        .with_object("RS-PEER-IN", "route-set: RS-PEER-IN\nmembers: 192.0.2.0/24, RS-NESTED\n")
        .with_object("RS-NESTED", "route-set: RS-NESTED\nmembers: 203.0.113.0/24\n")
        .with_object("RS-PEER-OUT", "route-set: RS-PEER-OUT\nmembers: 198.51.100.0/24, 2001:db8::/32\n")
        .with_object("AS64501:RS-ROUTES", "route-set: AS64501:RS-ROUTES\nmembers: 198.18.0.0/15\n")
}

#[test]
fn test_extract_rules() {
    let rules = RuleExtractor::new(registry()).extract("AS64496").unwrap();

    assert_eq!(
        rules.get("AS64500"),
        Some(&PeerRules {
            import: Some("RS-PEER-IN".to_string()),
            export: Some("RS-PEER-OUT".to_string()),
        })
    );
    assert_eq!(rules["AS64501"].export, None);
    assert_eq!(rules["AS64502"].import.as_deref(), Some("ANY"));
    assert_eq!(rules["AS64503"].import, None);
    assert_eq!(rules.len(), 4);
}

#[test]
fn test_extract_rules_json_shape() {
    let rules = RuleExtractor::new(registry()).extract("AS64496").unwrap();
    let json = serde_json::to_value(&rules).unwrap();

    assert_eq!(
        json["AS64500"],
        serde_json::json!({"import": "RS-PEER-IN", "export": "RS-PEER-OUT"})
    );
    assert_eq!(json["AS64503"], serde_json::json!({"export": "RS-PEER-OUT"}));
}

#[test]
fn test_extract_unknown_aut_num_is_empty() {
    let rules = RuleExtractor::new(StaticRegistry::new()).extract("AS65551").unwrap();
    assert!(rules.is_empty());
}

#[test]
fn test_resolve_route_set() {
    let service = PolicyService::new(registry(), 100);
    let resolved = service.resolve_route_set("RS-PEER-IN").unwrap();

    assert_eq!(resolved.members, vec!["192.0.2.0/24", "203.0.113.0/24"]);
    assert_eq!(
        serde_json::to_value(&resolved).unwrap(),
        serde_json::json!({"members": ["192.0.2.0/24", "203.0.113.0/24"]})
    );
}

#[test]
fn test_empty_route_set_is_not_found() {
    let registry = registry().with_object("RS-EMPTY", "route-set: RS-EMPTY\ndescr: nothing here\n");
    let service = PolicyService::new(registry, 100);

    assert!(service.resolve_route_set("RS-EMPTY").unwrap_err().is_not_found());
    assert!(service.resolve_route_set("RS-UNKNOWN").unwrap_err().is_not_found());
}

#[test]
fn test_registry_failure_is_not_not_found() {
    let service = PolicyService::new(registry().with_failure("RS-PEER-IN"), 100);
    let err = service.resolve_route_set("RS-PEER-IN").unwrap_err();

    assert!(matches!(err, IrrError::RegistryUnavailable { .. }));
    assert!(!err.is_not_found());
}

#[test]
fn test_generate_policy_both_directions() {
    let service = PolicyService::new(registry(), 100);
    let policy = service.generate_policy_for("AS64496", "AS64500").unwrap();

    assert_eq!(
        policy,
        PeerPolicy {
            import: vec!["192.0.2.0/24".to_string(), "203.0.113.0/24".to_string()],
            export: vec!["198.51.100.0/24".to_string(), "2001:db8::/32".to_string()],
        }
    );
}

#[test]
fn test_generate_policy_import_only() {
    let service = PolicyService::new(registry(), 100);
    let policy = service.generate_policy_for("AS64496", "AS64501").unwrap();

    assert_eq!(policy.import, vec!["198.18.0.0/15"]);
    assert!(policy.export.is_empty());
    assert_eq!(
        serde_json::to_value(&policy).unwrap(),
        serde_json::json!({"import": ["198.18.0.0/15"], "export": []})
    );
}

#[test]
fn test_generate_policy_accept_any() {
    let service = PolicyService::new(registry(), 100);
    let policy = service.generate_policy_for("AS64496", "AS64502").unwrap();

    assert_eq!(policy.import, vec!["0.0.0.0/0", "::/0"]);
    assert!(policy.export.is_empty());
    // Only the aut-num itself was fetched.
    assert_eq!(service.registry().queries(), vec!["AS64496"]);
}

#[test]
fn test_generate_policy_unknown_peer() {
    let service = PolicyService::new(registry(), 100);
    let err = service.generate_policy_for("AS64496", "AS65000").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "No rules found");
}

#[test]
fn test_generate_policy_unknown_aut_num() {
    let service = PolicyService::new(StaticRegistry::new(), 100);
    assert!(service.generate_policy_for("AS65551", "AS64500").unwrap_err().is_not_found());
}

#[test]
fn test_generate_policy_aut_num_unreachable() {
    let service = PolicyService::new(registry().with_failure("AS64496"), 100);
    let err = service.generate_policy_for("AS64496", "AS64500").unwrap_err();
    assert!(matches!(err, IrrError::RegistryUnavailable { .. }));
}

#[test]
fn test_rules() {
    let service = PolicyService::new(registry(), 100);
    assert_eq!(service.rules("AS64496").unwrap().len(), 4);
    assert!(service.rules("AS65551").unwrap_err().is_not_found());
}

#[test]
fn test_route_set_family_filter() {
    let service = PolicyService::new(registry(), 100);
    let resolved = service
        .resolve_route_set_for("RS-PEER-OUT", Some(AddressFamily::V6))
        .unwrap();
    assert_eq!(resolved.members, vec!["2001:db8::/32"]);

    let unfiltered = service.resolve_route_set_for("RS-PEER-OUT", None).unwrap();
    assert_eq!(unfiltered, service.resolve_route_set("RS-PEER-OUT").unwrap());
}

#[test]
fn test_route_set_emptied_by_family_is_not_found() {
    let service = PolicyService::new(registry(), 100);
    let err = service
        .resolve_route_set_for("AS64501:RS-ROUTES", Some(AddressFamily::V6))
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Route set not found, or is empty");
}

#[test]
fn test_generate_policy_family_filter() {
    let service = PolicyService::new(registry(), 100);
    let policy = service
        .generate_policy_for_family("AS64496", "AS64500", Some(AddressFamily::V6))
        .unwrap();
    assert!(policy.import.is_empty());
    assert_eq!(policy.export, vec!["2001:db8::/32"]);
}

#[test]
fn test_generate_policy_emptied_by_family_is_not_found() {
    let service = PolicyService::new(registry(), 100);
    let err = service
        .generate_policy_for_family("AS64496", "AS64501", Some(AddressFamily::V6))
        .unwrap_err();
    assert!(err.is_not_found());

    let v4 = service
        .generate_policy_for_family("AS64496", "AS64501", Some(AddressFamily::V4))
        .unwrap();
    assert_eq!(v4.import, vec!["198.18.0.0/15"]);
}
