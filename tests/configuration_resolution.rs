//! End-to-end configuration resolution through the public API

use serde_json::{json, Value};
use simcfg::{ConfigResolver, Configuration, EntityDescription, ResolveError, Scope, TestPlan};
use std::collections::BTreeMap;
use std::path::PathBuf;

fn sample_entity(name: &str, library: &str, generic_names: Vec<&str>) -> EntityDescription {
    EntityDescription {
        name: name.to_string(),
        library_name: library.to_string(),
        architecture_names: BTreeMap::from([("arch".to_string(), PathBuf::from("arch.vhd"))]),
        generic_names: generic_names.into_iter().map(|g| g.to_string()).collect(),
    }
}

#[test]
fn entity_without_registrations_gets_one_default_configuration() {
    let resolver = ConfigResolver::new();
    let entity = sample_entity("tb_entity", "lib", vec![]);

    let configs = resolver.get_configurations(&entity, "arch").unwrap();
    assert_eq!(configs, vec![Configuration::new("lib.tb_entity")]);
    assert!(configs[0].generics.is_empty());
    assert!(configs[0].pli.is_empty());
}

#[test]
fn generic_defaults_layer_by_scope_specificity() {
    let mut resolver = ConfigResolver::new();
    let entity = sample_entity("tb_entity", "lib", vec!["global_generic"]);

    resolver.set_generic("global_generic", json!(false), Scope::Global);
    let configs = resolver.get_configurations(&entity, "arch").unwrap();
    assert_eq!(configs[0].generics["global_generic"], json!(false));

    resolver.set_generic("global_generic", json!(true), Scope::Library("lib".to_string()));
    resolver.set_generic("generic_not_present", json!(true), Scope::Library("lib".to_string()));
    let configs = resolver.get_configurations(&entity, "arch").unwrap();
    assert_eq!(configs[0].generics["global_generic"], json!(true));
    assert!(!configs[0].generics.contains_key("generic_not_present"));

    // Null is a stored value at the winning scope, not a deletion
    resolver.set_generic("global_generic", Value::Null, Scope::entity("lib", "tb_entity"));
    let configs = resolver.get_configurations(&entity, "arch").unwrap();
    assert_eq!(configs[0].generics["global_generic"], Value::Null);
}

#[test]
fn scope_precedence_does_not_depend_on_write_order() {
    let entity = sample_entity("tb_entity", "lib", vec!["g"]);

    let mut forward = ConfigResolver::new();
    forward.set_generic("g", json!("a"), Scope::Library("lib".to_string()));
    forward.set_generic("g", json!("b"), Scope::entity("lib", "tb_entity"));

    let mut reverse = ConfigResolver::new();
    reverse.set_generic("g", json!("b"), Scope::entity("lib", "tb_entity"));
    reverse.set_generic("g", json!("a"), Scope::Library("lib".to_string()));

    let expected = json!("b");
    assert_eq!(
        forward.get_configurations(&entity, "arch").unwrap()[0].generics["g"],
        expected
    );
    assert_eq!(
        reverse.get_configurations(&entity, "arch").unwrap()[0].generics["g"],
        expected
    );
}

#[test]
fn pli_registrations_follow_the_same_fallback() {
    let mut resolver = ConfigResolver::new();
    let entity = sample_entity("tb_entity", "lib", vec![]);

    resolver.set_pli(vec!["libglobal.so".to_string()], Scope::Global);
    resolver.set_pli(vec!["libfoo.so".to_string()], Scope::Library("lib2".to_string()));
    let configs = resolver.get_configurations(&entity, "arch").unwrap();
    assert_eq!(configs[0].pli, vec!["libglobal.so".to_string()]);

    resolver.set_pli(vec!["libfoo.so".to_string()], Scope::Library("lib".to_string()));
    let configs = resolver.get_configurations(&entity, "arch").unwrap();
    assert_eq!(configs[0].pli, vec!["libfoo.so".to_string()]);

    resolver.set_pli(vec!["libfoo2.so".to_string()], Scope::entity("lib", "tb_entity"));
    let configs = resolver.get_configurations(&entity, "arch").unwrap();
    assert_eq!(configs[0].pli, vec!["libfoo2.so".to_string()]);
}

#[test]
fn named_configurations_suppress_the_default_and_keep_order() {
    let mut resolver = ConfigResolver::new();
    let entity = sample_entity("tb_entity", "lib", vec!["value", "global_value"]);

    for value in 1..3 {
        resolver
            .add_config(
                "lib.tb_entity",
                &format!("value={}", value),
                BTreeMap::from([
                    ("value".to_string(), json!(value)),
                    ("global_value".to_string(), json!("local value")),
                ]),
            )
            .unwrap();
    }

    // A global default written after the configs must not reach them
    resolver.set_generic("global_value", json!("global value"), Scope::Global);

    let configs = resolver.get_configurations(&entity, "arch").unwrap();
    assert_eq!(
        configs,
        vec![
            Configuration {
                identifier: "lib.tb_entity.value=1".to_string(),
                generics: BTreeMap::from([
                    ("value".to_string(), json!(1)),
                    ("global_value".to_string(), json!("local value")),
                ]),
                pli: Vec::new(),
            },
            Configuration {
                identifier: "lib.tb_entity.value=2".to_string(),
                generics: BTreeMap::from([
                    ("value".to_string(), json!(2)),
                    ("global_value".to_string(), json!("local value")),
                ]),
                pli: Vec::new(),
            },
        ]
    );
}

#[test]
fn named_configurations_fill_gaps_from_scope_defaults() {
    let mut resolver = ConfigResolver::new();
    let entity = sample_entity("tb_fifo", "lib", vec!["depth", "width"]);

    resolver.set_generic("width", json!(32), Scope::Library("lib".to_string()));
    resolver
        .add_config(
            "lib.tb_fifo",
            "deep",
            BTreeMap::from([("depth".to_string(), json!(1024))]),
        )
        .unwrap();

    let configs = resolver.get_configurations(&entity, "arch").unwrap();
    assert_eq!(configs[0].generics["depth"], json!(1024));
    assert_eq!(configs[0].generics["width"], json!(32));
}

#[test]
fn unknown_architecture_is_an_error() {
    let resolver = ConfigResolver::new();
    let entity = sample_entity("tb_entity", "lib", vec![]);

    let result = resolver.get_configurations(&entity, "missing_arch");
    match result {
        Err(ResolveError::UnknownArchitecture {
            entity,
            architecture,
        }) => {
            assert_eq!(entity, "lib.tb_entity");
            assert_eq!(architecture, "missing_arch");
        }
        other => panic!("expected UnknownArchitecture, got {:?}", other),
    }
}

#[test]
fn repeated_resolution_is_stable() {
    let mut resolver = ConfigResolver::new();
    let entity = sample_entity("tb_entity", "lib", vec!["g"]);

    resolver.set_generic("g", json!("x"), Scope::Global);
    resolver.set_pli(vec!["a.so".to_string()], Scope::Global);

    let first = resolver.get_configurations(&entity, "arch").unwrap();
    let second = resolver.get_configurations(&entity, "arch").unwrap();
    assert_eq!(first, second);
}

#[test]
fn plan_file_drives_the_same_resolution() {
    let plan = TestPlan::from_str(
        r#"
        [[generics]]
        name = "width"
        value = 8
        scope = "lib"

        [[pli]]
        libraries = ["libvpi.so"]

        [[configs]]
        entity = "lib.tb_fifo"
        name = "small"
        generics = { depth = 4 }

        [[configs]]
        entity = "lib.tb_fifo"
        name = "large"
        generics = { depth = 4096 }
        "#,
    )
    .unwrap();

    let mut resolver = ConfigResolver::new();
    plan.apply(&mut resolver).unwrap();

    let entity = sample_entity("tb_fifo", "lib", vec!["depth", "width"]);
    let configs = resolver.get_configurations(&entity, "arch").unwrap();

    let identifiers: Vec<&str> = configs.iter().map(|c| c.identifier.as_str()).collect();
    assert_eq!(identifiers, ["lib.tb_fifo.small", "lib.tb_fifo.large"]);
    for config in &configs {
        assert_eq!(config.generics["width"], json!(8));
        assert_eq!(config.pli, vec!["libvpi.so".to_string()]);
    }
    assert_eq!(configs[0].generics["depth"], json!(4));
    assert_eq!(configs[1].generics["depth"], json!(4096));
}
