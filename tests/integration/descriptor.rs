//! Loading module descriptors from disk.

use modmeta::core::{HashValue, MetadataError, user_friendly_error};
use modmeta::descriptor::{LoadedMetadata, load};
use modmeta::metadata::ComponentResolveMetadata;
use modmeta::test_utils::DescriptorFixture;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_load_maven_descriptor() {
    let temp = TempDir::new().unwrap();
    let fixture = DescriptorFixture::maven_basic();
    let path = fixture.write_to(temp.path()).unwrap();

    let LoadedMetadata::Maven(metadata) = load(&path).await.unwrap() else {
        panic!("expected a maven module");
    };
    assert_eq!(metadata.component_id().to_string(), "org.example:lib:1.0");
    assert_eq!(metadata.status(), "release");
    assert_eq!(metadata.content_hash(), HashValue::of(&fixture.content));
    assert_eq!(metadata.configuration("test").unwrap().dependencies().len(), 2);
}

#[tokio::test]
async fn test_load_ivy_diamond() {
    let temp = TempDir::new().unwrap();
    let path = DescriptorFixture::ivy_diamond().write_to(temp.path()).unwrap();

    let LoadedMetadata::Ivy(metadata) = load(&path).await.unwrap() else {
        panic!("expected an ivy module");
    };
    let c = metadata.configuration("c").unwrap();
    assert!(!c.is_transitive());
    assert_eq!(c.hierarchy(), ["c", "a", "b"]);
    assert!(Arc::ptr_eq(&c.parents()[0], &metadata.configuration("b").unwrap().parents()[0]));
    assert_eq!(c.artifacts().len(), 1);
    assert!(metadata.configuration("b").unwrap().artifacts().is_empty());
    assert_eq!(c.dependencies()[0].module(), "base");
}

#[tokio::test]
async fn test_cyclic_descriptor_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = DescriptorFixture::ivy_cyclic().write_to(temp.path()).unwrap();

    let err = load(&path).await.unwrap_err();
    let context = user_friendly_error(err);
    match &context.error {
        MetadataError::CircularInheritance {
            cycle,
        } => {
            for name in ["x", "y", "z"] {
                assert!(cycle.contains(name), "{cycle}");
            }
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(context.suggestion.is_some());
}

#[tokio::test]
async fn test_invalid_syntax_is_a_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = DescriptorFixture::invalid_syntax().write_to(temp.path()).unwrap();

    let context = user_friendly_error(load(&path).await.unwrap_err());
    assert!(matches!(context.error, MetadataError::DescriptorParse { .. }));
}

#[tokio::test]
async fn test_unknown_kind_is_reported() {
    let temp = TempDir::new().unwrap();
    let path = DescriptorFixture::unknown_kind().write_to(temp.path()).unwrap();

    let context = user_friendly_error(load(&path).await.unwrap_err());
    assert_eq!(
        context.error,
        MetadataError::UnknownModuleKind {
            kind: "npm".to_string()
        }
    );
}
