//! Ivy-flavored modules.
//!
//! An Ivy module declares its own configuration table and lists each published
//! artifact together with the configurations that publish it.

use super::ModuleFlavor;
use crate::core::ModuleComponentIdentifier;
use crate::model::{ConfigurationDefinitions, IvyArtifactName, ModuleComponentArtifactMetadata};
use crate::resolver::DefaultArtifacts;

/// An artifact declared in an Ivy descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IvyArtifact {
    /// Artifact name
    pub name: IvyArtifactName,
    /// Configurations publishing the artifact
    pub configurations: Vec<String>,
}

impl IvyArtifact {
    pub fn new<I, S>(name: IvyArtifactName, configurations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name,
            configurations: configurations.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ivy-specific module state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IvyModule {
    definitions: ConfigurationDefinitions,
    artifacts: Vec<IvyArtifact>,
}

impl IvyModule {
    /// A module with the given configuration table and no declared artifacts.
    pub fn new(definitions: ConfigurationDefinitions) -> Self {
        Self {
            definitions,
            artifacts: Vec::new(),
        }
    }

    /// Declared artifacts in declaration order.
    pub fn artifacts(&self) -> &[IvyArtifact] {
        &self.artifacts
    }

    /// Declare an artifact.
    pub fn add_artifact(&mut self, artifact: IvyArtifact) {
        self.artifacts.push(artifact);
    }
}

impl DefaultArtifacts for IvyModule {
    fn default_artifacts(
        &self,
        component_id: &ModuleComponentIdentifier,
        configuration: &str,
    ) -> Vec<ModuleComponentArtifactMetadata> {
        self.artifacts
            .iter()
            .filter(|a| a.configurations.iter().any(|c| c == configuration))
            .map(|a| ModuleComponentArtifactMetadata::new(component_id.clone(), a.name.clone()))
            .collect()
    }
}

impl ModuleFlavor for IvyModule {
    fn kind(&self) -> &'static str {
        "ivy"
    }

    fn configuration_definitions(&self) -> &ConfigurationDefinitions {
        &self.definitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConfigurationDefinition;

    #[test]
    fn test_artifacts_follow_declared_configurations() {
        let definitions = ConfigurationDefinitions::new([
            ConfigurationDefinition::new("api", Vec::<String>::new()),
            ConfigurationDefinition::new("impl", ["api"]),
        ])
        .unwrap();
        let mut ivy = IvyModule::new(definitions);
        ivy.add_artifact(IvyArtifact::new(IvyArtifactName::new("lib", "jar", Some("jar"), None), ["api", "impl"]));
        ivy.add_artifact(IvyArtifact::new(
            IvyArtifactName::new("lib", "source", Some("jar"), Some("sources")),
            ["impl"],
        ));

        let id = ModuleComponentIdentifier::new("org.test", "lib", "1.0");
        assert_eq!(ivy.default_artifacts(&id, "api").len(), 1);
        let impl_artifacts = ivy.default_artifacts(&id, "impl");
        assert_eq!(impl_artifacts.len(), 2);
        assert_eq!(impl_artifacts[1].name.to_string(), "lib-sources.jar");
        assert!(ivy.default_artifacts(&id, "other").is_empty());
        assert_eq!(ivy.kind(), "ivy");
    }
}
