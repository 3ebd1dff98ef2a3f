//! TOML module descriptors.
//!
//! A descriptor states everything a [`MutableModuleResolveMetadata`] is built
//! from: identity, status and flags, module-level dependencies, artifact
//! overrides and explicit variants. Ivy descriptors also carry their
//! configuration table and published artifacts; Maven descriptors use the
//! fixed Maven 2 table.
//!
//! # Format
//!
//! ```toml
//! component = "org.example:lib:1.0"
//! kind = "maven"              # or "ivy"; defaults to "maven"
//! status = "release"          # defaults to "integration"
//! changing = false
//! packaging = "jar"           # maven only
//!
//! [[dependencies]]
//! group = "org.dep"
//! module = "core"
//! version = "2.0"
//! reject = ["2.0.1"]
//! configurations = ["compile"]
//! excludes = [{ group = "org.log", module = "*" }]
//!
//! [[variants]]
//! name = "api"
//! attributes = { "org.gradle.usage" = "java-api" }
//! dependencies = [{ group = "org.dep", module = "core", version = "2.0" }]
//! files = [{ name = "lib-1.0.jar", uri = "lib-1.0.jar" }]
//! ```
//!
//! Ivy descriptors add `[[configurations]]` (`name`, `extends`, `transitive`,
//! `visible`) and `[[publications]]` (`name`, `type`, `extension`,
//! `classifier`, `configurations`). `[[artifacts]]` entries, when present,
//! override the artifacts of every configuration.
//!
//! The descriptor's raw bytes become the module's content hash, and its path
//! becomes the module source.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::debug;

use crate::constants::{JAR_PACKAGING, default_status_scheme};
use crate::core::{
    HashValue, ImmutableAttributes, MetadataError, ModuleComponentIdentifier, ModuleSource,
};
use crate::metadata::{
    ComponentResolveMetadata, IvyArtifact, IvyModule, MavenModule, ModuleFlavor,
    MutableModuleResolveMetadata,
};
use crate::model::{
    ConfigurationDefinition, ConfigurationDefinitions, ExcludeMetadata, IvyArtifactName,
    ModuleComponentArtifactMetadata, ModuleDependencyMetadata, VersionConstraint,
};

/// A parsed module descriptor.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleDescriptor {
    /// `group:module:version`
    pub component: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    pub status: Option<String>,
    pub status_scheme: Option<Vec<String>>,
    #[serde(default)]
    pub changing: bool,
    #[serde(default)]
    pub missing: bool,
    pub packaging: Option<String>,
    #[serde(default)]
    pub relocated: bool,
    pub snapshot_timestamp: Option<String>,
    #[serde(default)]
    pub configurations: Vec<ConfigurationEntry>,
    #[serde(default)]
    pub publications: Vec<PublicationEntry>,
    #[serde(default)]
    pub dependencies: Vec<DependencyEntry>,
    pub artifacts: Option<Vec<ArtifactEntry>>,
    #[serde(default)]
    pub variants: Vec<VariantEntry>,
}

fn default_kind() -> String {
    "maven".to_string()
}

fn default_true() -> bool {
    true
}

/// `[[configurations]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigurationEntry {
    pub name: String,
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default = "default_true")]
    pub transitive: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
}

/// `[[publications]]` entry: an Ivy artifact and the configurations publishing it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublicationEntry {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub extension: Option<String>,
    pub classifier: Option<String>,
    pub configurations: Vec<String>,
}

/// `[[dependencies]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyEntry {
    pub group: String,
    pub module: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub reject: Vec<String>,
    #[serde(default)]
    pub configurations: Vec<String>,
    #[serde(default = "default_true")]
    pub transitive: bool,
    #[serde(default)]
    pub excludes: Vec<ExcludeEntry>,
}

/// Exclusion inside a dependency entry; omitted fields match anything.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExcludeEntry {
    pub group: Option<String>,
    pub module: Option<String>,
}

/// `[[artifacts]]` override entry; the name defaults to the module name.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactEntry {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub extension: Option<String>,
    pub classifier: Option<String>,
}

/// `[[variants]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantEntry {
    pub name: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub dependencies: Vec<VariantDependencyEntry>,
    #[serde(default)]
    pub files: Vec<VariantFileEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantDependencyEntry {
    pub group: String,
    pub module: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub reject: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantFileEntry {
    pub name: String,
    pub uri: String,
}

/// The module source of metadata read from a descriptor file.
#[derive(Debug, Clone)]
pub struct DescriptorSource {
    path: PathBuf,
}

impl DescriptorSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModuleSource for DescriptorSource {
    fn describe(&self) -> String {
        format!("descriptor {}", self.path.display())
    }
}

/// Metadata built from a descriptor, by flavor.
#[derive(Debug)]
pub enum LoadedMetadata {
    Maven(MutableModuleResolveMetadata<MavenModule>),
    Ivy(MutableModuleResolveMetadata<IvyModule>),
}

impl ModuleDescriptor {
    /// Parse descriptor text. `origin` names the input in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::DescriptorParse`] for invalid TOML or fields
    /// that do not match the format.
    pub fn parse(content: &str, origin: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| MetadataError::DescriptorParse {
                file: origin.to_string(),
                reason: e.message().to_string(),
            })
            .with_context(|| format!("Invalid module descriptor: {origin}"))
    }

    /// Build mutable metadata from this descriptor.
    ///
    /// # Errors
    ///
    /// - [`MetadataError::InvalidIdentifier`] for a malformed `component`
    /// - [`MetadataError::UnknownModuleKind`] for a kind other than `maven` or `ivy`
    /// - configuration table errors for an invalid Ivy table
    /// - an error when a Maven descriptor declares Ivy-only sections
    pub fn into_metadata(self) -> Result<LoadedMetadata> {
        let component_id: ModuleComponentIdentifier = self.component.parse()?;

        match self.kind.as_str() {
            "maven" => {
                if !self.configurations.is_empty() || !self.publications.is_empty() {
                    bail!(
                        "Maven module {component_id} cannot declare configurations or publications; \
                         Maven modules use the fixed Maven 2 configuration table"
                    );
                }
                let mut maven = MavenModule::new();
                maven.set_packaging(self.packaging.clone().unwrap_or_else(|| JAR_PACKAGING.to_string()));
                maven.set_relocated(self.relocated);
                maven.set_snapshot_timestamp(self.snapshot_timestamp.clone());

                let mut metadata = MutableModuleResolveMetadata::new(component_id, maven);
                self.populate(&mut metadata);
                Ok(LoadedMetadata::Maven(metadata))
            }
            "ivy" => {
                if self.packaging.is_some() || self.relocated || self.snapshot_timestamp.is_some() {
                    bail!("Ivy module {component_id} cannot declare Maven packaging fields");
                }
                let definitions = ConfigurationDefinitions::new(self.configurations.iter().map(|c| {
                    ConfigurationDefinition::new(&c.name, &c.extends)
                        .transitive(c.transitive)
                        .visible(c.visible)
                }))
                .with_context(|| format!("Invalid configuration table for {component_id}"))?;

                let mut ivy = IvyModule::new(definitions);
                for publication in &self.publications {
                    let name = IvyArtifactName::new(
                        publication.name.as_deref().unwrap_or(&component_id.module),
                        &publication.artifact_type,
                        publication.extension.as_deref(),
                        publication.classifier.as_deref(),
                    );
                    ivy.add_artifact(IvyArtifact::new(name, &publication.configurations));
                }

                let mut metadata = MutableModuleResolveMetadata::new(component_id, ivy);
                self.populate(&mut metadata);
                Ok(LoadedMetadata::Ivy(metadata))
            }
            other => Err(MetadataError::UnknownModuleKind {
                kind: other.to_string(),
            }
            .into()),
        }
    }

    fn populate<F: ModuleFlavor>(&self, metadata: &mut MutableModuleResolveMetadata<F>) {
        if let Some(status) = &self.status {
            metadata.set_status(status);
        }
        metadata.set_status_scheme(self.status_scheme.clone().unwrap_or_else(default_status_scheme));
        metadata.set_changing(self.changing);
        metadata.set_missing(self.missing);
        metadata.set_dependencies(self.dependencies.iter().map(DependencyEntry::to_metadata).collect());

        if let Some(artifacts) = &self.artifacts {
            let component_id = metadata.component_id().clone();
            let overrides = artifacts
                .iter()
                .map(|a| {
                    ModuleComponentArtifactMetadata::new(
                        component_id.clone(),
                        IvyArtifactName::new(
                            a.name.as_deref().unwrap_or(&component_id.module),
                            &a.artifact_type,
                            a.extension.as_deref(),
                            a.classifier.as_deref(),
                        ),
                    )
                })
                .collect();
            metadata.set_artifact_overrides(Some(overrides));
        }

        for entry in &self.variants {
            let variant = metadata.add_variant(&entry.name, ImmutableAttributes::of(entry.attributes.clone()));
            for dependency in &entry.dependencies {
                variant.add_dependency(
                    &dependency.group,
                    &dependency.module,
                    VersionConstraint::prefer(&dependency.version).rejecting(&dependency.reject),
                );
            }
            for file in &entry.files {
                variant.add_file(&file.name, &file.uri);
            }
        }
    }
}

impl DependencyEntry {
    fn to_metadata(&self) -> ModuleDependencyMetadata {
        let mut dependency = ModuleDependencyMetadata::new(
            &self.group,
            &self.module,
            VersionConstraint::prefer(&self.version).rejecting(&self.reject),
        )
        .in_configurations(&self.configurations);
        dependency.set_transitive(self.transitive);
        for exclude in &self.excludes {
            dependency.add_exclude(ExcludeMetadata::new(
                exclude.group.as_deref().unwrap_or("*"),
                exclude.module.as_deref().unwrap_or("*"),
            ));
        }
        dependency
    }
}

/// Read a descriptor file and build its metadata.
///
/// The module source is set to the file path and the content hash to the hash
/// of the file's bytes.
///
/// # Errors
///
/// Fails when the file cannot be read, does not parse, or describes invalid
/// metadata (see [`ModuleDescriptor::into_metadata`]).
pub async fn load(path: &Path) -> Result<LoadedMetadata> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read module descriptor: {}", path.display()))?;

    let origin = path.display().to_string();
    let descriptor = ModuleDescriptor::parse(&content, &origin)?;
    debug!(
        "Parsed {} descriptor for {} from {}",
        descriptor.kind, descriptor.component, origin
    );

    let mut loaded = descriptor.into_metadata()?;
    let source: Arc<dyn ModuleSource> = Arc::new(DescriptorSource::new(path));
    let hash = HashValue::of(content.as_bytes());
    match &mut loaded {
        LoadedMetadata::Maven(metadata) => {
            metadata.set_source(Some(source));
            metadata.set_content_hash(hash);
        }
        LoadedMetadata::Ivy(metadata) => {
            metadata.set_source(Some(source));
            metadata.set_content_hash(hash);
        }
    }
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAVEN: &str = r#"
component = "org.example:lib:1.0"
status = "release"
packaging = "bundle"

[[dependencies]]
group = "org.dep"
module = "core"
version = "2.0"
reject = ["2.0.1"]
configurations = ["compile"]
excludes = [{ group = "org.log" }]

[[dependencies]]
group = "org.dep"
module = "junit"
version = "4.13"
configurations = ["test"]

[[variants]]
name = "api"
attributes = { "org.gradle.usage" = "java-api" }
dependencies = [{ group = "org.dep", module = "core", version = "2.0" }]
files = [{ name = "lib-1.0.jar", uri = "lib-1.0.jar" }]
"#;

    const IVY: &str = r#"
component = "org.example:tool:3.1"
kind = "ivy"

[[configurations]]
name = "base"

[[configurations]]
name = "runtime"
extends = ["base"]
visible = false

[[publications]]
type = "jar"
extension = "jar"
configurations = ["base"]

[[dependencies]]
group = "org.dep"
module = "everywhere"
version = "1.0"
configurations = ["*"]
"#;

    #[test]
    fn test_maven_descriptor() {
        let descriptor = ModuleDescriptor::parse(MAVEN, "maven.toml").unwrap();
        let LoadedMetadata::Maven(metadata) = descriptor.into_metadata().unwrap() else {
            panic!("expected a maven module");
        };

        assert_eq!(metadata.status(), "release");
        assert!(metadata.flavor().is_known_jar_packaging());
        let runtime = metadata.configuration("runtime").unwrap();
        assert_eq!(runtime.dependencies().len(), 1);
        let core = &runtime.dependencies()[0];
        assert_eq!(core.selector.version.to_string(), "2.0 !{2.0.1}");
        assert!(core.excludes_module("org.log", "anything"));
        assert_eq!(metadata.configuration("test").unwrap().dependencies().len(), 2);

        let variants = metadata.variants();
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].attributes().get("org.gradle.usage"), Some("java-api"));
        assert!(metadata.defines_variant("api"));
    }

    #[test]
    fn test_ivy_descriptor() {
        let descriptor = ModuleDescriptor::parse(IVY, "ivy.toml").unwrap();
        let LoadedMetadata::Ivy(metadata) = descriptor.into_metadata().unwrap() else {
            panic!("expected an ivy module");
        };

        assert_eq!(metadata.configuration_names(), vec!["base", "runtime"]);
        let runtime = metadata.configuration("runtime").unwrap();
        assert!(!runtime.is_visible());
        assert!(runtime.artifacts().is_empty());
        assert_eq!(runtime.dependencies().len(), 1);
        let base = metadata.configuration("base").unwrap();
        assert_eq!(base.artifacts()[0].name.to_string(), "tool.jar");
    }

    #[test]
    fn test_unknown_kind() {
        let descriptor = ModuleDescriptor::parse("component = \"g:m:1\"\nkind = \"npm\"", "x.toml").unwrap();
        let err = descriptor.into_metadata().unwrap_err();
        assert_eq!(
            err.downcast_ref::<MetadataError>(),
            Some(&MetadataError::UnknownModuleKind {
                kind: "npm".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_component() {
        let descriptor = ModuleDescriptor::parse("component = \"g:m\"", "x.toml").unwrap();
        let err = descriptor.into_metadata().unwrap_err();
        assert!(matches!(err.downcast_ref::<MetadataError>(), Some(MetadataError::InvalidIdentifier { .. })));
    }

    #[test]
    fn test_cyclic_ivy_table_is_reported() {
        let content = r#"
component = "g:m:1"
kind = "ivy"
configurations = [{ name = "a", extends = ["b"] }, { name = "b", extends = ["a"] }]
"#;
        let err = ModuleDescriptor::parse(content, "x.toml").unwrap().into_metadata().unwrap_err();
        let cause = err.chain().find_map(|c| c.downcast_ref::<MetadataError>());
        assert!(matches!(cause, Some(MetadataError::CircularInheritance { .. })));
    }

    #[test]
    fn test_maven_rejects_configurations() {
        let content = "component = \"g:m:1\"\nconfigurations = [{ name = \"a\" }]";
        let err = ModuleDescriptor::parse(content, "x.toml").unwrap().into_metadata().unwrap_err();
        assert!(err.to_string().contains("fixed Maven 2 configuration table"));
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = ModuleDescriptor::parse("component = ", "broken.toml").unwrap_err();
        let cause = err.chain().find_map(|c| c.downcast_ref::<MetadataError>());
        assert!(matches!(
            cause,
            Some(MetadataError::DescriptorParse { file, .. }) if file == "broken.toml"
        ));
    }

    #[test]
    fn test_artifact_overrides_default_to_module_name() {
        let content = r#"
component = "g:m:1"
artifacts = [{ type = "zip", extension = "zip", classifier = "dist" }]
"#;
        let LoadedMetadata::Maven(metadata) =
            ModuleDescriptor::parse(content, "x.toml").unwrap().into_metadata().unwrap()
        else {
            panic!("expected a maven module");
        };
        for configuration in metadata.configurations().values() {
            assert_eq!(configuration.artifacts().len(), 1);
            assert_eq!(configuration.artifacts()[0].name.to_string(), "m-dist.zip");
        }
    }

    #[tokio::test]
    async fn test_load_sets_source_and_hash() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("module.toml");
        tokio::fs::write(&path, MAVEN).await.unwrap();

        let LoadedMetadata::Maven(metadata) = load(&path).await.unwrap() else {
            panic!("expected a maven module");
        };
        assert_eq!(metadata.content_hash(), HashValue::of(MAVEN));
        assert!(metadata.source().unwrap().describe().contains("module.toml"));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/module.toml")).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read module descriptor"));
    }
}
