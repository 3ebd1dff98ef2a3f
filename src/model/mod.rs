//! Value types of the metadata model.
//!
//! - [`artifact`] - artifact names and artifact metadata
//! - [`dependency`] - module-level dependency records and version constraints
//! - [`configuration`] - the validated definition table and resolved configurations

pub mod artifact;
pub mod configuration;
pub mod dependency;

pub use artifact::{
    ComponentArtifactMetadata, IvyArtifactName, ModuleComponentArtifactMetadata,
    UrlBackedArtifactMetadata,
};
pub use configuration::{ConfigurationDefinition, ConfigurationDefinitions, ConfigurationMetadata};
pub use dependency::{
    ExcludeMetadata, ModuleComponentSelector, ModuleDependencyMetadata, VersionConstraint,
};
