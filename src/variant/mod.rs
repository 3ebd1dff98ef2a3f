//! Explicitly declared variants.
//!
//! Variants are attribute-tagged bundles of dependencies and files, declared
//! directly rather than derived from a configuration hierarchy. They live in
//! two states:
//!
//! - [`MutableVariant`] - created by [`VariantSet::add`], grown with
//!   [`add_dependency`](MutableVariant::add_dependency) and
//!   [`add_file`](MutableVariant::add_file)
//! - [`ImmutableVariant`] - produced by freezing; exposes no mutators
//!
//! [`VariantSet`] holds previously frozen variants followed by variants still
//! being built, and freezes the latter on demand.

mod graph;

pub use graph::VariantBackedConfigurationMetadata;

use serde::Serialize;
use std::cell::OnceCell;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

use crate::core::{ImmutableAttributes, ModuleComponentIdentifier};
use crate::model::{ComponentArtifactMetadata, UrlBackedArtifactMetadata, VersionConstraint};

/// A dependency declared by a variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VariantDependency {
    /// Target group
    pub group: String,
    /// Target module
    pub module: String,
    /// Version requirement
    pub version: VersionConstraint,
}

/// A file published by a variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VariantFile {
    /// File name
    pub name: String,
    /// Location relative to the module
    pub uri: String,
}

/// A variant under construction.
///
/// Dependencies and files are append-only; duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutableVariant {
    name: String,
    attributes: ImmutableAttributes,
    dependencies: Vec<VariantDependency>,
    files: Vec<VariantFile>,
}

impl MutableVariant {
    fn new(name: String, attributes: ImmutableAttributes) -> Self {
        Self {
            name,
            attributes,
            dependencies: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Variant name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variant attributes.
    pub fn attributes(&self) -> &ImmutableAttributes {
        &self.attributes
    }

    /// Append a dependency.
    pub fn add_dependency(
        &mut self,
        group: impl Into<String>,
        module: impl Into<String>,
        version: VersionConstraint,
    ) -> &mut Self {
        self.dependencies.push(VariantDependency {
            group: group.into(),
            module: module.into(),
            version,
        });
        self
    }

    /// Append a file.
    pub fn add_file(&mut self, name: impl Into<String>, uri: impl Into<String>) -> &mut Self {
        self.files.push(VariantFile {
            name: name.into(),
            uri: uri.into(),
        });
        self
    }

    fn freeze(&self, component_id: &ModuleComponentIdentifier) -> ImmutableVariant {
        ImmutableVariant {
            component_id: component_id.clone(),
            name: self.name.clone(),
            attributes: self.attributes.clone(),
            dependencies: self.dependencies.clone(),
            files: self.files.clone(),
        }
    }
}

/// A frozen variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImmutableVariant {
    component_id: ModuleComponentIdentifier,
    name: String,
    attributes: ImmutableAttributes,
    dependencies: Vec<VariantDependency>,
    files: Vec<VariantFile>,
}

impl ImmutableVariant {
    /// Variant name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning component.
    pub fn component_id(&self) -> &ModuleComponentIdentifier {
        &self.component_id
    }

    /// Variant attributes.
    pub fn attributes(&self) -> &ImmutableAttributes {
        &self.attributes
    }

    /// Declared dependencies in declaration order.
    pub fn dependencies(&self) -> &[VariantDependency] {
        &self.dependencies
    }

    /// Declared files in declaration order.
    pub fn files(&self) -> &[VariantFile] {
        &self.files
    }

    /// One artifact per declared file, addressed by component id, file name and uri.
    pub fn artifacts(&self) -> Vec<ComponentArtifactMetadata> {
        self.files
            .iter()
            .map(|file| {
                UrlBackedArtifactMetadata {
                    component_id: self.component_id.clone(),
                    file_name: file.name.clone(),
                    uri: file.uri.clone(),
                }
                .into()
            })
            .collect()
    }

    /// Human readable name, e.g. `org:lib:1.0 variant runtime`.
    pub fn display_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ImmutableVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} variant {}", self.component_id, self.name)
    }
}

/// Previously frozen variants followed by variants still being built.
#[derive(Debug, Default)]
pub struct VariantSet {
    frozen: Vec<Arc<ImmutableVariant>>,
    building: Vec<MutableVariant>,
    snapshot: OnceCell<Vec<Arc<ImmutableVariant>>>,
}

impl Clone for VariantSet {
    fn clone(&self) -> Self {
        Self {
            frozen: self.frozen.clone(),
            building: self.building.clone(),
            snapshot: OnceCell::new(),
        }
    }
}

impl VariantSet {
    /// A set seeded with already frozen variants.
    pub fn from_frozen(frozen: Vec<Arc<ImmutableVariant>>) -> Self {
        Self {
            frozen,
            ..Self::default()
        }
    }

    /// Start a new variant and return it for mutation.
    ///
    /// A freeze memoised by [`variants`](Self::variants) becomes the new
    /// frozen prefix first, so earlier entries keep their identity.
    pub fn add(&mut self, name: impl Into<String>, attributes: ImmutableAttributes) -> &mut MutableVariant {
        if let Some(snapshot) = self.snapshot.take() {
            self.frozen = snapshot;
            self.building.clear();
        }
        self.building.push(MutableVariant::new(name.into(), attributes));
        let index = self.building.len() - 1;
        &mut self.building[index]
    }

    /// Frozen view of every variant: previously frozen first, then the variants
    /// being built in the order they were added.
    ///
    /// With nothing being built this is the previously frozen list itself; otherwise
    /// the freeze happens once and is memoised until the next [`add`](Self::add).
    pub fn variants(&self, component_id: &ModuleComponentIdentifier) -> &[Arc<ImmutableVariant>] {
        if self.building.is_empty() {
            return &self.frozen;
        }
        self.snapshot.get_or_init(|| {
            trace!("Freezing {} new variant(s) of {}", self.building.len(), component_id);
            self.frozen
                .iter()
                .cloned()
                .chain(self.building.iter().map(|v| Arc::new(v.freeze(component_id))))
                .collect()
        })
    }

    /// Drop a memoised freeze without promoting it.
    pub(crate) fn reset_snapshot(&mut self) {
        self.snapshot.take();
    }

    /// Whether any variant, frozen or being built, exists.
    pub fn is_empty(&self) -> bool {
        self.frozen.is_empty() && self.building.is_empty()
    }

    /// Whether a variant with exactly this name exists, frozen or being built.
    pub fn contains(&self, name: &str) -> bool {
        self.frozen.iter().any(|v| v.name() == name) || self.building.iter().any(|v| v.name() == name)
    }
}
