//! Container lifecycle: lazy configurations, invalidation and snapshots.

use modmeta::core::{HashValue, ModuleComponentIdentifier};
use modmeta::metadata::{ComponentResolveMetadata, MavenModule, MutableModuleResolveMetadata};
use modmeta::model::{ExcludeMetadata, ModuleComponentArtifactMetadata};
use modmeta::test_utils::{MetadataFixture, init_test_logging};
use std::sync::Arc;

fn dependency_modules(metadata: &impl ComponentResolveMetadata, configuration: &str) -> Vec<String> {
    metadata
        .configuration(configuration)
        .unwrap()
        .dependencies()
        .iter()
        .map(|d| d.module().to_string())
        .collect()
}

#[test]
fn test_hierarchy_closure_shares_parents() {
    init_test_logging(None);
    let metadata = MetadataFixture::ivy_diamond();
    let c = metadata.configuration("c").unwrap();
    let b = metadata.configuration("b").unwrap();

    let parents: Vec<&str> = c.parents().iter().map(|p| p.name()).collect();
    assert_eq!(parents, vec!["a", "b"]);
    assert!(Arc::ptr_eq(&c.parents()[0], &b.parents()[0]));
    assert!(metadata.configuration("a").unwrap().parents().is_empty());
}

#[test]
fn test_dependencies_follow_scope_inheritance() {
    let metadata = MetadataFixture::maven();
    assert_eq!(dependency_modules(&metadata, "compile"), vec!["compile-dep"]);
    assert_eq!(dependency_modules(&metadata, "runtime"), vec!["compile-dep", "runtime-dep"]);
    assert_eq!(dependency_modules(&metadata, "test"), vec!["compile-dep", "runtime-dep", "test-dep"]);
    assert_eq!(dependency_modules(&metadata, "default"), vec!["compile-dep", "runtime-dep"]);
    assert!(dependency_modules(&metadata, "provided").is_empty());
}

#[test]
fn test_lazy_getter_is_idempotent() {
    let metadata = MetadataFixture::maven();
    let first: Vec<_> = metadata.configurations().values().cloned().collect();
    let second: Vec<_> = metadata.configurations().values().cloned().collect();
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert!(Arc::ptr_eq(a, b));
    }
}

#[test]
fn test_every_input_change_is_reflected() {
    let mut metadata = MetadataFixture::maven();
    let before = metadata.configuration("runtime").unwrap().clone();

    metadata.set_dependencies(vec![MetadataFixture::dependency("replacement", "compile")]);
    let after_dependencies = metadata.configuration("runtime").unwrap().clone();
    assert!(!Arc::ptr_eq(&before, &after_dependencies));
    assert_eq!(dependency_modules(&metadata, "runtime"), vec!["replacement"]);

    let override_artifact = metadata.artifact("pom", Some("pom"), None);
    metadata.set_artifact_overrides(Some(vec![override_artifact.clone()]));
    assert_eq!(metadata.configuration("runtime").unwrap().artifacts(), [override_artifact]);
    assert_eq!(dependency_modules(&metadata, "runtime"), vec!["replacement"]);

    metadata.add_dependency_metadata_rule("runtime", |deps| deps.retain(|_| false));
    assert!(dependency_modules(&metadata, "runtime").is_empty());
    assert_eq!(dependency_modules(&metadata, "compile"), vec!["replacement"]);
}

#[test]
fn test_override_precedence_over_maven_policy() {
    let mut metadata = MetadataFixture::maven();
    let overrides: Vec<ModuleComponentArtifactMetadata> = vec![
        metadata.artifact("jar", Some("jar"), Some("shaded")),
        metadata.artifact("jar", Some("jar"), Some("sources")),
    ];
    metadata.set_artifact_overrides(Some(overrides.clone()));

    for configuration in metadata.configurations().values() {
        assert_eq!(configuration.artifacts(), overrides.as_slice(), "{}", configuration.name());
    }
}

#[test]
fn test_rules_apply_in_registration_order() {
    let mut metadata = MetadataFixture::maven();
    metadata.add_dependency_metadata_rule("test", |deps| {
        for d in deps.iter_mut().filter(|d| d.module() == "compile-dep") {
            d.add_exclude(ExcludeMetadata::new("org.slf4j", "*"));
        }
    });
    metadata.add_dependency_metadata_rule("test", |deps| deps.remove_if(|d| d.module() == "runtime-dep"));

    let test = metadata.configuration("test").unwrap();
    let modules: Vec<&str> = test.dependencies().iter().map(|d| d.module()).collect();
    assert_eq!(modules, vec!["compile-dep", "test-dep"]);
    assert!(test.dependencies()[0].excludes_module("org.slf4j", "slf4j-api"));
    // Parent configurations are not rewritten by a child's rule
    assert!(metadata.configuration("compile").unwrap().dependencies()[0].excludes.is_empty());
}

#[test]
fn test_snapshot_shared_across_threads() {
    let mut metadata = MetadataFixture::maven();
    metadata.set_content_hash(HashValue::of("pom"));
    let snapshot = metadata.as_immutable();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let snapshot = snapshot.clone();
            std::thread::spawn(move || {
                let name = if i % 2 == 0 { "runtime" } else { "test" };
                snapshot.configuration(name).unwrap().dependencies().len()
            })
        })
        .collect();
    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(counts.iter().step_by(2).all(|&c| c == 2));
    assert!(counts.iter().skip(1).step_by(2).all(|&c| c == 3));
    assert_eq!(snapshot.content_hash(), HashValue::of("pom"));
}

#[test]
fn test_snapshot_round_trip() {
    let mut metadata = MetadataFixture::maven_with_variant();
    metadata.set_changing(true);
    metadata.set_status("milestone");
    let snapshot = metadata.as_immutable();

    let copy = snapshot.as_mutable();
    assert_eq!(copy.component_id(), snapshot.component_id());
    assert_eq!(copy.status(), "milestone");
    assert!(copy.is_changing());
    assert_eq!(copy.dependencies(), snapshot.dependencies());
    assert_eq!(copy.variants().len(), 1);
    assert!(copy.defines_variant("api"));
    assert_eq!(
        copy.configuration("runtime").unwrap().dependencies(),
        snapshot.configuration("runtime").unwrap().dependencies()
    );
}

#[test]
fn test_missing_module() {
    let id = ModuleComponentIdentifier::new("org.gone", "vanished", "0.1");
    let metadata = MutableModuleResolveMetadata::missing_maven(id.clone());
    let snapshot = metadata.as_immutable();
    assert!(snapshot.is_missing());
    assert_eq!(snapshot.component_id(), &id);
    assert!(snapshot.dependencies().is_empty());
    assert!(snapshot.variants().is_empty());
    assert_eq!(snapshot.flavor(), &MavenModule::new());
}
