//! Explicit variants: freezing, precedence over configurations and graph traversal.

use modmeta::core::ImmutableAttributes;
use modmeta::metadata::ComponentResolveMetadata;
use modmeta::model::{ComponentArtifactMetadata, VersionConstraint};
use modmeta::test_utils::MetadataFixture;
use std::sync::Arc;

#[test]
fn test_freeze_stability() {
    let mut metadata = MetadataFixture::maven();
    metadata
        .add_variant("api", ImmutableAttributes::of([("org.gradle.usage", "java-api")]))
        .add_file("lib-1.0.jar", "lib-1.0.jar");
    let before = metadata.variants().to_vec();
    assert_eq!(before.len(), 1);

    metadata.add_variant("runtime", ImmutableAttributes::of([("org.gradle.usage", "java-runtime")]));
    let after = metadata.variants();
    assert_eq!(after.len(), 2);
    assert_eq!(*after[0], *before[0]);
    assert!(Arc::ptr_eq(&after[0], &before[0]));
    assert_eq!(after[1].name(), "runtime");
}

#[test]
fn test_variants_take_precedence_over_configurations() {
    let mut metadata = MetadataFixture::maven();
    for name in ["compile", "runtime", "default", "test"] {
        assert!(metadata.defines_variant(name));
    }

    metadata.add_variant("runtimeElements", ImmutableAttributes::empty());
    assert!(metadata.defines_variant("runtimeElements"));
    for name in ["compile", "runtime", "default", "test"] {
        assert!(!metadata.defines_variant(name), "{name} must not be a variant");
    }
    // Configurations are still resolved and readable
    assert!(metadata.configuration("compile").is_some());
}

#[test]
fn test_duplicate_variant_names_coexist() {
    let mut metadata = MetadataFixture::maven_with_variant();
    metadata.variants();
    metadata.add_variant("api", ImmutableAttributes::empty());

    let names: Vec<&str> = metadata.variants().iter().map(|v| v.name()).collect();
    assert_eq!(names, vec!["api", "api"]);
    assert!(metadata.defines_variant("api"));
    assert_eq!(metadata.variants_for_graph_traversal().len(), 2);
}

#[test]
fn test_graph_view_applies_rules_by_variant_name() {
    let mut metadata = MetadataFixture::maven_with_variant();
    metadata
        .add_variant("runtime", ImmutableAttributes::empty())
        .add_dependency("org.dep", "compile-dep", VersionConstraint::prefer("1.0"))
        .add_dependency("org.dep", "extra", VersionConstraint::prefer("3.0").rejecting(["3.0.1"]));

    metadata.add_dependency_metadata_rule("runtime", |deps| deps.remove_if(|d| d.module() == "compile-dep"));

    let graph = metadata.variants_for_graph_traversal();
    assert_eq!(graph.len(), 2);
    assert_eq!(graph[0].name(), "api");
    assert_eq!(graph[0].dependencies().len(), 1);
    assert_eq!(graph[1].dependencies().len(), 1);
    assert_eq!(graph[1].dependencies()[0].selector.version.to_string(), "3.0 !{3.0.1}");
    assert_eq!(graph[1].hierarchy(), ["runtime"]);

    // The rule is keyed by name, so the Maven `runtime` configuration is rewritten too
    let runtime = metadata.configuration("runtime").unwrap();
    assert!(runtime.dependencies().iter().all(|d| d.module() != "compile-dep"));
}

#[test]
fn test_variant_artifacts_are_url_backed() {
    let metadata = MetadataFixture::maven_with_variant();
    let api = &metadata.variants()[0];
    assert_eq!(api.display_name(), "org.test:lib:1.0 variant api");

    let artifacts = api.artifacts();
    assert_eq!(artifacts.len(), 1);
    assert!(matches!(
        &artifacts[0],
        ComponentArtifactMetadata::UrlBacked(a) if a.uri == "lib-1.0.jar"
    ));
}

#[test]
fn test_snapshot_keeps_graph_view() {
    let mut metadata = MetadataFixture::maven_with_variant();
    metadata.add_dependency_metadata_rule("api", |deps| deps.retain(|_| false));
    let snapshot = metadata.as_immutable();

    assert!(snapshot.variants_for_graph_traversal()[0].dependencies().is_empty());
    assert_eq!(snapshot.variants()[0].dependencies().len(), 1);
}
