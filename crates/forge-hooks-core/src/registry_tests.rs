use super::*;

const TABLE: &[(Event, Schema)] = &[
    (Event::from_static("push"), Schema::new("PushPayload")),
    (Event::from_static("create"), Schema::new("CreatePayload")),
    (Event::from_static("repository"), Schema::new("RepositoryPayload")),
];

#[test]
fn test_static_registry_resolves_known_events() {
    let registry = StaticRegistry::new(TABLE);

    assert_eq!(
        registry.resolve(&Event::new("create")),
        Some(Schema::new("CreatePayload"))
    );
    assert_eq!(registry.len(), 3);
    assert!(!registry.is_empty());
}

#[test]
fn test_static_registry_misses_unknown_events() {
    let registry = StaticRegistry::new(TABLE);

    assert_eq!(registry.resolve(&Event::new("Push")), None);
    assert_eq!(registry.resolve(&Event::new("")), None);
}

#[test]
fn test_events_are_listed_in_table_order() {
    let registry = StaticRegistry::new(TABLE);
    let names: Vec<&str> = registry.events().map(Event::as_str).collect();

    assert_eq!(names, ["push", "create", "repository"]);
}

#[test]
fn test_schema_serializes_as_its_name() {
    let json = serde_json::to_string(&Schema::new("PushPayload")).unwrap();
    assert_eq!(json, "\"PushPayload\"");
    assert_eq!(Schema::new("PushPayload").to_string(), "PushPayload");
}

#[test]
fn test_registry_can_be_mocked() {
    let mut registry = MockSchemaRegistry::new();
    registry
        .expect_resolve()
        .withf(|event| event.as_str() == "custom")
        .return_const(Some(Schema::new("CustomPayload")));

    assert_eq!(
        registry.resolve(&Event::new("custom")),
        Some(Schema::new("CustomPayload"))
    );
}

#[derive(serde::Deserialize)]
struct Counter {
    #[allow(dead_code)]
    count: u32,
}

#[test]
fn test_typed_schema_checks_shape() {
    let schema = Schema::typed::<Counter>("CounterPayload");

    assert!(schema.is_typed());
    assert!(schema.check(&serde_json::json!({"count": 3, "extra": true})).is_ok());
    assert!(schema.check(&serde_json::json!({"count": "three"})).is_err());
    assert!(schema.check(&serde_json::json!({})).is_err());
}

#[test]
fn test_untyped_schema_accepts_any_value() {
    let schema = Schema::new("CounterPayload");

    assert!(!schema.is_typed());
    assert!(schema.check(&serde_json::json!({"count": "three"})).is_ok());
}

#[test]
fn test_schemas_compare_by_name() {
    let typed = Schema::typed::<Counter>("CounterPayload");

    assert_eq!(typed, Schema::new("CounterPayload"));
    assert_ne!(typed, Schema::typed::<Counter>("OtherPayload"));
    assert_eq!(serde_json::to_string(&typed).unwrap(), "\"CounterPayload\"");
}
