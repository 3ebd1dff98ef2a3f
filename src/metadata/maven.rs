//! Maven-flavored modules.
//!
//! Maven modules share one fixed configuration table derived from the Maven 2
//! scopes. Without artifact overrides, the scopes that put the main jar on a
//! classpath (`compile`, `runtime`, `default`, `test`) each publish a single
//! `jar` artifact named after the module; every other configuration publishes
//! nothing.

use std::sync::LazyLock;

use super::{ModuleFlavor, MutableModuleResolveMetadata};
use crate::constants::{JAR_PACKAGING, JAR_PACKAGINGS, MAVEN_JAR_CONFIGURATIONS, POM_PACKAGING};
use crate::core::ModuleComponentIdentifier;
use crate::model::{
    ConfigurationDefinition, ConfigurationDefinitions, IvyArtifactName,
    ModuleComponentArtifactMetadata,
};
use crate::resolver::DefaultArtifacts;

static MAVEN2_CONFIGURATIONS: LazyLock<ConfigurationDefinitions> = LazyLock::new(|| {
    const NONE: [&str; 0] = [];
    ConfigurationDefinitions::from_trusted([
        ConfigurationDefinition::new("default", ["runtime", "master"]),
        ConfigurationDefinition::new("master", NONE),
        ConfigurationDefinition::new("compile", NONE),
        ConfigurationDefinition::new("provided", NONE),
        ConfigurationDefinition::new("runtime", ["compile"]),
        ConfigurationDefinition::new("test", ["runtime"]).visible(false),
        ConfigurationDefinition::new("system", NONE),
        ConfigurationDefinition::new("sources", NONE),
        ConfigurationDefinition::new("javadoc", NONE),
        ConfigurationDefinition::new("optional", NONE),
    ])
});

/// Maven-specific module state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenModule {
    packaging: String,
    relocated: bool,
    snapshot_timestamp: Option<String>,
}

impl Default for MavenModule {
    fn default() -> Self {
        Self {
            packaging: JAR_PACKAGING.to_string(),
            relocated: false,
            snapshot_timestamp: None,
        }
    }
}

impl MavenModule {
    /// A `jar`-packaged, non-relocated module.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    pub fn set_packaging(&mut self, packaging: impl Into<String>) {
        self.packaging = packaging.into();
    }

    /// Whether the POM declares a relocation.
    pub fn is_relocated(&self) -> bool {
        self.relocated
    }

    pub fn set_relocated(&mut self, relocated: bool) {
        self.relocated = relocated;
    }

    /// Timestamp of a unique snapshot version, if any.
    pub fn snapshot_timestamp(&self) -> Option<&str> {
        self.snapshot_timestamp.as_deref()
    }

    pub fn set_snapshot_timestamp(&mut self, timestamp: Option<String>) {
        self.snapshot_timestamp = timestamp;
    }

    /// Whether the module is a POM-only module.
    pub fn is_pom_packaging(&self) -> bool {
        self.packaging == POM_PACKAGING
    }

    /// Whether the packaging is known to produce a plain jar.
    pub fn is_known_jar_packaging(&self) -> bool {
        JAR_PACKAGINGS.contains(&self.packaging.as_str())
    }
}

impl DefaultArtifacts for MavenModule {
    fn default_artifacts(
        &self,
        component_id: &ModuleComponentIdentifier,
        configuration: &str,
    ) -> Vec<ModuleComponentArtifactMetadata> {
        if !MAVEN_JAR_CONFIGURATIONS.contains(&configuration) {
            return Vec::new();
        }
        vec![ModuleComponentArtifactMetadata::new(
            component_id.clone(),
            IvyArtifactName::new(&component_id.module, "jar", Some("jar"), None),
        )]
    }
}

impl ModuleFlavor for MavenModule {
    fn kind(&self) -> &'static str {
        "maven"
    }

    fn configuration_definitions(&self) -> &ConfigurationDefinitions {
        &MAVEN2_CONFIGURATIONS
    }
}

impl MutableModuleResolveMetadata<MavenModule> {
    /// Metadata for a Maven module version that has no POM.
    pub fn missing_maven(component_id: ModuleComponentIdentifier) -> Self {
        let mut metadata = Self::new(component_id, MavenModule::new());
        metadata.set_missing(true);
        metadata
    }
}
