use std::sync::Arc;

use super::ImmutableVariant;
use crate::core::{ImmutableAttributes, ModuleComponentIdentifier};
use crate::model::{ComponentArtifactMetadata, ModuleDependencyMetadata};
use crate::rules::{self, DependencyMetadataRules};

/// A frozen variant presented as a configuration for dependency-graph traversal.
///
/// Rules registered under the variant's name have already been applied to
/// [`dependencies`](Self::dependencies). Variant configurations are always
/// transitive and visible, and their hierarchy is just their own name.
#[derive(Debug, Clone)]
pub struct VariantBackedConfigurationMetadata {
    component_id: ModuleComponentIdentifier,
    variant: Arc<ImmutableVariant>,
    name: String,
    hierarchy: Vec<String>,
    dependencies: Vec<ModuleDependencyMetadata>,
}

impl VariantBackedConfigurationMetadata {
    pub(crate) fn new(
        component_id: &ModuleComponentIdentifier,
        variant: Arc<ImmutableVariant>,
        rules: Option<&DependencyMetadataRules>,
    ) -> Self {
        let declared = variant
            .dependencies()
            .iter()
            .map(|d| ModuleDependencyMetadata::new(&d.group, &d.module, d.version.clone()))
            .collect();

        Self {
            component_id: component_id.clone(),
            name: variant.name().to_string(),
            hierarchy: vec![variant.name().to_string()],
            dependencies: rules::apply(rules, declared),
            variant,
        }
    }

    /// Variant name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning component.
    pub fn component_id(&self) -> &ModuleComponentIdentifier {
        &self.component_id
    }

    /// The wrapped variant.
    pub fn variant(&self) -> &Arc<ImmutableVariant> {
        &self.variant
    }

    /// Attributes of the wrapped variant.
    pub fn attributes(&self) -> &ImmutableAttributes {
        self.variant.attributes()
    }

    /// URL-backed artifacts of the variant's files.
    pub fn artifacts(&self) -> Vec<ComponentArtifactMetadata> {
        self.variant.artifacts()
    }

    /// Variant dependencies after rules ran.
    pub fn dependencies(&self) -> &[ModuleDependencyMetadata] {
        &self.dependencies
    }

    /// Only the variant itself; variants do not inherit.
    pub fn hierarchy(&self) -> &[String] {
        &self.hierarchy
    }

    /// Always true for variants.
    pub fn is_transitive(&self) -> bool {
        true
    }

    /// Always true for variants.
    pub fn is_visible(&self) -> bool {
        true
    }
}
