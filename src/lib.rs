//! modmeta - resolve metadata for a single module version
//!
//! modmeta models what a dependency resolution engine knows about one version
//! of a module: which configurations or explicit variants it exposes, what
//! each configuration inherits, and which artifacts and dependencies each one
//! carries. Metadata is assembled in a mutable container and then frozen into
//! an immutable snapshot that is shared with the rest of the graph walk.
//!
//! # Architecture Overview
//!
//! - A [`model::ConfigurationDefinitions`] table (names, `extends_from`, flags)
//!   is validated once: undefined parents and cycles are rejected up front.
//! - The [`resolver`] turns the table into [`model::ConfigurationMetadata`]
//!   objects with a memoized walk over the inheritance DAG. Each configuration
//!   is built once and shared by every child that extends it.
//! - [`rules`] rewrite a configuration's or variant's dependencies at
//!   resolution time, in registration order.
//! - [`variant`] holds explicit variants, built mutably and frozen on read.
//! - [`metadata`] owns all of the above per module version, caches derived
//!   views and discards them whenever an input changes.
//!
//! # Core Modules
//!
//! - [`constants`] - status defaults and Maven names
//! - [`core`] - errors, identifiers, content hash, attributes
//! - [`model`] - artifact, dependency and configuration value types
//! - [`rules`] - dependency metadata rules
//! - [`resolver`] - configuration hierarchy resolution
//! - [`variant`] - explicit variants and their graph-traversal view
//! - [`metadata`] - the mutable container, the snapshot, and Maven/Ivy flavors
//!
//! # Application Modules
//!
//! - [`descriptor`] - TOML module descriptors
//! - [`cli`] - the `modmeta` command line
//!
//! # Example
//!
//! ```
//! use modmeta::core::{ImmutableAttributes, ModuleComponentIdentifier};
//! use modmeta::metadata::{ComponentResolveMetadata, MavenModule, MutableModuleResolveMetadata};
//! use modmeta::model::VersionConstraint;
//!
//! let id = ModuleComponentIdentifier::new("org.example", "lib", "1.0");
//! let mut metadata = MutableModuleResolveMetadata::new(id, MavenModule::new());
//! assert!(metadata.defines_variant("compile"));
//!
//! metadata
//!     .add_variant("api", ImmutableAttributes::of([("org.gradle.usage", "java-api")]))
//!     .add_dependency("org.dep", "core", VersionConstraint::prefer("2.0"));
//! metadata.add_dependency_metadata_rule("api", |deps| deps.remove_if(|d| d.module() == "core"));
//!
//! let snapshot = metadata.as_immutable();
//! assert!(snapshot.defines_variant("api"));
//! assert!(!snapshot.defines_variant("compile"));
//! assert!(snapshot.variants_for_graph_traversal()[0].dependencies().is_empty());
//! ```

// Metadata model
pub mod constants;
pub mod core;
pub mod metadata;
pub mod model;
pub mod resolver;
pub mod rules;
pub mod variant;

// Application layer
pub mod cli;
pub mod descriptor;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
