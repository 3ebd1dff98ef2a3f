//! Artifact metadata attached to configurations and variants.

use serde::Serialize;
use std::fmt;

use crate::core::ModuleComponentIdentifier;

/// Ivy-style artifact name: base name, type, and optional extension and classifier.
///
/// ```
/// use modmeta::model::IvyArtifactName;
///
/// let name = IvyArtifactName::new("lib", "jar", Some("jar"), Some("sources"));
/// assert_eq!(name.to_string(), "lib-sources.jar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct IvyArtifactName {
    /// Base file name, usually the module name
    pub name: String,
    /// Artifact type (`jar`, `pom`, `zip`, ...)
    #[serde(rename = "type")]
    pub artifact_type: String,
    /// File extension, absent for extension-less artifacts
    pub extension: Option<String>,
    /// Classifier, e.g. `sources` or `javadoc`
    pub classifier: Option<String>,
}

impl IvyArtifactName {
    /// Create a new artifact name.
    pub fn new(
        name: impl Into<String>,
        artifact_type: impl Into<String>,
        extension: Option<&str>,
        classifier: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            artifact_type: artifact_type.into(),
            extension: extension.map(str::to_string),
            classifier: classifier.map(str::to_string),
        }
    }
}

impl fmt::Display for IvyArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(classifier) = &self.classifier {
            write!(f, "-{classifier}")?;
        }
        if let Some(extension) = &self.extension {
            write!(f, ".{extension}")?;
        }
        Ok(())
    }
}

/// An artifact published by a module, addressed by component id and Ivy name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ModuleComponentArtifactMetadata {
    /// Owning component
    pub component_id: ModuleComponentIdentifier,
    /// Artifact name
    pub name: IvyArtifactName,
}

impl ModuleComponentArtifactMetadata {
    /// Create an artifact of the given component.
    pub fn new(component_id: ModuleComponentIdentifier, name: IvyArtifactName) -> Self {
        Self {
            component_id,
            name,
        }
    }
}

impl fmt::Display for ModuleComponentArtifactMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.component_id)
    }
}

/// A file declared by an explicit variant, addressed by a URI relative to the module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UrlBackedArtifactMetadata {
    /// Owning component
    pub component_id: ModuleComponentIdentifier,
    /// File name
    pub file_name: String,
    /// Location of the file
    pub uri: String,
}

impl fmt::Display for UrlBackedArtifactMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.file_name, self.component_id)
    }
}

/// Any artifact a configuration-shaped view may expose.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ComponentArtifactMetadata {
    /// Named by Ivy coordinates
    Module(ModuleComponentArtifactMetadata),
    /// Backed by a variant file
    UrlBacked(UrlBackedArtifactMetadata),
}

impl ComponentArtifactMetadata {
    /// The component this artifact belongs to.
    pub fn component_id(&self) -> &ModuleComponentIdentifier {
        match self {
            Self::Module(artifact) => &artifact.component_id,
            Self::UrlBacked(artifact) => &artifact.component_id,
        }
    }
}

impl From<ModuleComponentArtifactMetadata> for ComponentArtifactMetadata {
    fn from(artifact: ModuleComponentArtifactMetadata) -> Self {
        Self::Module(artifact)
    }
}

impl From<UrlBackedArtifactMetadata> for ComponentArtifactMetadata {
    fn from(artifact: UrlBackedArtifactMetadata) -> Self {
        Self::UrlBacked(artifact)
    }
}

impl fmt::Display for ComponentArtifactMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module(artifact) => artifact.fmt(f),
            Self::UrlBacked(artifact) => artifact.fmt(f),
        }
    }
}
