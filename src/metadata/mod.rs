//! Module component resolve metadata.
//!
//! This module ties the configuration resolver and the variant builder together
//! into the per-module-version metadata consumed by a dependency graph walk.
//!
//! # Lifecycle
//!
//! 1. A descriptor parser creates a [`MutableModuleResolveMetadata`] for a
//!    [`ModuleFlavor`] ([`MavenModule`] or [`IvyModule`]).
//! 2. The owner sets identity, status and flags, supplies dependencies and
//!    artifact overrides, declares explicit variants and registers dependency
//!    metadata rules. Every change that affects derived data discards the
//!    matching lazy cache in full.
//! 3. [`as_immutable`](MutableModuleResolveMetadata::as_immutable) resolves
//!    everything and produces a [`ModuleResolveMetadata`] snapshot that can be
//!    shared across threads.
//!
//! Both states implement [`ComponentResolveMetadata`], the read surface the
//! graph walk works against.
//!
//! # Variants versus configurations
//!
//! A module either declares explicit variants or exposes its configuration
//! table. [`defines_variant`](ComponentResolveMetadata::defines_variant)
//! consults configurations only when no explicit variant exists at all.

pub mod ivy;
pub mod maven;
mod mutable;
mod snapshot;

pub use ivy::{IvyArtifact, IvyModule};
pub use maven::MavenModule;
pub use mutable::MutableModuleResolveMetadata;
pub use snapshot::ModuleResolveMetadata;

use std::fmt;
use std::sync::Arc;

use crate::core::{HashValue, ModuleComponentIdentifier, ModuleSource, ModuleVersionIdentifier};
use crate::model::{ConfigurationDefinitions, ConfigurationMetadata, ModuleComponentArtifactMetadata};
use crate::resolver::{Configurations, DefaultArtifacts};
use crate::variant::{ImmutableVariant, VariantBackedConfigurationMetadata};

/// The parts of module metadata that depend on the descriptor format.
///
/// A flavor provides the configuration definition table and decides which
/// artifacts a configuration publishes when no overrides are set.
pub trait ModuleFlavor: DefaultArtifacts + Clone + fmt::Debug + Send + Sync + 'static {
    /// Short name of the flavor, e.g. `maven`.
    fn kind(&self) -> &'static str;

    /// Configuration definitions of the module.
    fn configuration_definitions(&self) -> &ConfigurationDefinitions;
}

/// Read-only view of a module version's resolve metadata.
pub trait ComponentResolveMetadata {
    /// Component identifier.
    fn component_id(&self) -> &ModuleComponentIdentifier;

    /// Module version identifier derived from the component identifier.
    fn module_version_id(&self) -> &ModuleVersionIdentifier;

    /// Status of this version, e.g. `integration` or `release`.
    fn status(&self) -> &str;

    /// Ordered statuses, lowest first.
    fn status_scheme(&self) -> &[String];

    /// Whether the content of this version may change over time.
    fn is_changing(&self) -> bool;

    /// Whether this version had no descriptor.
    fn is_missing(&self) -> bool;

    /// Where the metadata was obtained from.
    fn source(&self) -> Option<&Arc<dyn ModuleSource>>;

    /// Hash of the descriptor content.
    fn content_hash(&self) -> HashValue;

    /// Every configuration, resolved.
    fn configurations(&self) -> &Configurations;

    /// Explicit variants, frozen.
    fn variants(&self) -> &[Arc<ImmutableVariant>];

    /// Explicit variants as configurations with dependency rules applied.
    fn variants_for_graph_traversal(&self) -> &[VariantBackedConfigurationMetadata];

    /// Whether `name` is a variant of this module.
    ///
    /// Explicit variants decide alone when at least one exists; otherwise
    /// the configuration table does.
    fn defines_variant(&self, name: &str) -> bool;

    /// A synthetic artifact named after the module.
    fn artifact(
        &self,
        artifact_type: &str,
        extension: Option<&str>,
        classifier: Option<&str>,
    ) -> ModuleComponentArtifactMetadata;

    /// Look up one resolved configuration.
    fn configuration(&self, name: &str) -> Option<&Arc<ConfigurationMetadata>> {
        self.configurations().get(name)
    }

    /// Names of all configurations in sorted order.
    fn configuration_names(&self) -> Vec<&str> {
        self.configurations().keys().map(String::as_str).collect()
    }
}
