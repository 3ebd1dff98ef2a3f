//! Test fixtures for descriptors and metadata.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{ImmutableAttributes, ModuleComponentIdentifier};
use crate::metadata::{IvyModule, MavenModule, MutableModuleResolveMetadata};
use crate::model::{
    ConfigurationDefinition, ConfigurationDefinitions, ModuleDependencyMetadata, VersionConstraint,
};

/// A module descriptor file to write into a test directory.
#[derive(Clone, Debug)]
pub struct DescriptorFixture {
    pub name: String,
    pub content: String,
}

impl DescriptorFixture {
    fn new(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            content: content.trim().to_string(),
        }
    }

    /// Maven module with a compile and a test dependency.
    pub fn maven_basic() -> Self {
        Self::new(
            "maven_basic",
            r#"
component = "org.example:lib:1.0"
status = "release"

[[dependencies]]
group = "org.dep"
module = "core"
version = "2.0"
configurations = ["compile"]

[[dependencies]]
group = "org.junit"
module = "junit"
version = "4.13"
configurations = ["test"]
"#,
        )
    }

    /// Maven module declaring explicit variants.
    pub fn maven_with_variants() -> Self {
        Self::new(
            "maven_with_variants",
            r#"
component = "org.example:lib:2.0"

[[dependencies]]
group = "org.dep"
module = "core"
version = "2.0"
configurations = ["compile"]

[[variants]]
name = "apiElements"
attributes = { "org.gradle.usage" = "java-api" }
dependencies = [{ group = "org.dep", module = "core", version = "2.0" }]
files = [{ name = "lib-2.0.jar", uri = "lib-2.0.jar" }]

[[variants]]
name = "runtimeElements"
attributes = { "org.gradle.usage" = "java-runtime" }
dependencies = [
    { group = "org.dep", module = "core", version = "2.0" },
    { group = "org.dep", module = "runtime-only", version = "1.5", reject = ["1.4"] },
]
files = [{ name = "lib-2.0.jar", uri = "lib-2.0.jar" }]
"#,
        )
    }

    /// Ivy module with diamond inheritance.
    pub fn ivy_diamond() -> Self {
        Self::new(
            "ivy_diamond",
            r#"
component = "org.example:tool:3.1"
kind = "ivy"

[[configurations]]
name = "a"

[[configurations]]
name = "b"
extends = ["a"]

[[configurations]]
name = "c"
extends = ["a", "b"]
transitive = false

[[publications]]
type = "jar"
extension = "jar"
configurations = ["a", "c"]

[[dependencies]]
group = "org.dep"
module = "base"
version = "1.0"
configurations = ["a"]
"#,
        )
    }

    /// Ivy module whose configurations extend each other in a cycle.
    pub fn ivy_cyclic() -> Self {
        Self::new(
            "ivy_cyclic",
            r#"
component = "org.example:loop:1.0"
kind = "ivy"
configurations = [
    { name = "x", extends = ["z"] },
    { name = "y", extends = ["x"] },
    { name = "z", extends = ["y"] },
]
"#,
        )
    }

    /// Descriptor that is not valid TOML.
    pub fn invalid_syntax() -> Self {
        Self::new("invalid_syntax", "component = \"org.example:lib:1.0\"\n[[dependencies]\n")
    }

    /// Descriptor with an unsupported module kind.
    pub fn unknown_kind() -> Self {
        Self::new("unknown_kind", "component = \"org.example:lib:1.0\"\nkind = \"npm\"")
    }

    /// Write the descriptor as `<name>.toml` into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(format!("{}.toml", self.name));
        fs::write(&path, &self.content)?;
        Ok(path)
    }
}

/// Prebuilt metadata for tests that do not go through a descriptor.
pub struct MetadataFixture;

impl MetadataFixture {
    pub fn component_id() -> ModuleComponentIdentifier {
        ModuleComponentIdentifier::new("org.test", "lib", "1.0")
    }

    /// Maven metadata with one dependency per scope in `compile`, `runtime` and `test`.
    pub fn maven() -> MutableModuleResolveMetadata<MavenModule> {
        let mut metadata = MutableModuleResolveMetadata::new(Self::component_id(), MavenModule::new());
        metadata.set_dependencies(vec![
            Self::dependency("compile-dep", "compile"),
            Self::dependency("runtime-dep", "runtime"),
            Self::dependency("test-dep", "test"),
        ]);
        metadata
    }

    /// Maven metadata with one explicit `api` variant.
    pub fn maven_with_variant() -> MutableModuleResolveMetadata<MavenModule> {
        let mut metadata = Self::maven();
        metadata
            .add_variant("api", ImmutableAttributes::of([("org.gradle.usage", "java-api")]))
            .add_dependency("org.dep", "compile-dep", VersionConstraint::prefer("1.0"))
            .add_file("lib-1.0.jar", "lib-1.0.jar");
        metadata
    }

    /// The table `{a: [], b: [a], c: [a, b]}`.
    pub fn diamond_definitions() -> ConfigurationDefinitions {
        ConfigurationDefinitions::from_trusted([
            ConfigurationDefinition::new("a", Vec::<String>::new()),
            ConfigurationDefinition::new("b", ["a"]),
            ConfigurationDefinition::new("c", ["a", "b"]),
        ])
    }

    /// Ivy metadata over [`diamond_definitions`](Self::diamond_definitions).
    pub fn ivy_diamond() -> MutableModuleResolveMetadata<IvyModule> {
        MutableModuleResolveMetadata::new(Self::component_id(), IvyModule::new(Self::diamond_definitions()))
    }

    pub fn dependency(module: &str, configuration: &str) -> ModuleDependencyMetadata {
        ModuleDependencyMetadata::new("org.dep", module, VersionConstraint::prefer("1.0"))
            .in_configurations([configuration])
    }
}
