use std::cell::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

use super::{ComponentResolveMetadata, ModuleFlavor, ModuleResolveMetadata};
use crate::constants::{DEFAULT_STATUS, default_status_scheme};
use crate::core::{
    HashValue, ImmutableAttributes, ModuleComponentIdentifier, ModuleSource,
    ModuleVersionIdentifier,
};
use crate::model::{IvyArtifactName, ModuleComponentArtifactMetadata, ModuleDependencyMetadata};
use crate::resolver::{ConfigurationResolver, Configurations};
use crate::rules::{DependenciesMetadata, DependencyMetadataRules};
use crate::variant::{
    ImmutableVariant, MutableVariant, VariantBackedConfigurationMetadata, VariantSet,
};

/// Resolve metadata of one module version while it is being assembled.
///
/// Configurations and the graph-traversal view of variants are computed on
/// first read and cached. Any mutation that affects them drops the whole
/// cache; there is no partial invalidation:
///
/// | Mutation | Configurations | Graph variants |
/// |---|---|---|
/// | [`set_dependencies`](Self::set_dependencies) | dropped | kept |
/// | [`set_artifact_overrides`](Self::set_artifact_overrides) | dropped | kept |
/// | [`add_dependency_metadata_rule`](Self::add_dependency_metadata_rule) | dropped | dropped |
/// | [`add_variant`](Self::add_variant) | kept | dropped |
/// | [`set_component_id`](Self::set_component_id), [`flavor_mut`](Self::flavor_mut) | dropped | dropped |
///
/// The caches use [`OnceCell`], so this type is not `Sync`. Hand it to other
/// threads through [`as_immutable`](Self::as_immutable).
///
/// # Examples
///
/// ```
/// use modmeta::core::ModuleComponentIdentifier;
/// use modmeta::metadata::{ComponentResolveMetadata, MavenModule, MutableModuleResolveMetadata};
/// use modmeta::model::{ModuleDependencyMetadata, VersionConstraint};
///
/// let id = ModuleComponentIdentifier::new("org.example", "lib", "1.0");
/// let mut metadata = MutableModuleResolveMetadata::new(id, MavenModule::new());
/// metadata.set_dependencies(vec![
///     ModuleDependencyMetadata::new("org.dep", "core", VersionConstraint::prefer("2.0"))
///         .in_configurations(["compile"]),
/// ]);
///
/// let runtime = metadata.configuration("runtime").unwrap();
/// assert_eq!(runtime.dependencies().len(), 1);
///
/// let snapshot = metadata.as_immutable();
/// assert_eq!(snapshot.configuration_names().len(), 10);
/// ```
#[derive(Debug)]
pub struct MutableModuleResolveMetadata<F: ModuleFlavor> {
    component_id: ModuleComponentIdentifier,
    module_version_id: ModuleVersionIdentifier,
    status: String,
    status_scheme: Vec<String>,
    changing: bool,
    missing: bool,
    source: Option<Arc<dyn ModuleSource>>,
    content_hash: HashValue,
    flavor: F,
    artifact_overrides: Option<Vec<ModuleComponentArtifactMetadata>>,
    dependencies: Vec<ModuleDependencyMetadata>,
    rules: HashMap<String, DependencyMetadataRules>,
    configurations: OnceCell<Configurations>,
    variants: VariantSet,
    graph_variants: OnceCell<Vec<VariantBackedConfigurationMetadata>>,
}

impl<F: ModuleFlavor> MutableModuleResolveMetadata<F> {
    /// Metadata with default status, no dependencies and no variants.
    pub fn new(component_id: ModuleComponentIdentifier, flavor: F) -> Self {
        Self {
            module_version_id: ModuleVersionIdentifier::from(&component_id),
            component_id,
            status: DEFAULT_STATUS.to_string(),
            status_scheme: default_status_scheme(),
            changing: false,
            missing: false,
            source: None,
            content_hash: HashValue::empty(),
            flavor,
            artifact_overrides: None,
            dependencies: Vec::new(),
            rules: HashMap::new(),
            configurations: OnceCell::new(),
            variants: VariantSet::default(),
            graph_variants: OnceCell::new(),
        }
    }

    /// Rebuild a mutable container from a snapshot. Dependency rules are not
    /// carried over; the graph-traversal view is, as it was when frozen.
    pub(crate) fn from_snapshot(snapshot: &ModuleResolveMetadata<F>) -> Self {
        Self {
            component_id: snapshot.component_id().clone(),
            module_version_id: snapshot.module_version_id().clone(),
            status: snapshot.status().to_string(),
            status_scheme: snapshot.status_scheme().to_vec(),
            changing: snapshot.is_changing(),
            missing: snapshot.is_missing(),
            source: snapshot.source().cloned(),
            content_hash: snapshot.content_hash(),
            flavor: snapshot.flavor().clone(),
            artifact_overrides: snapshot.artifact_overrides().map(<[_]>::to_vec),
            dependencies: snapshot.dependencies().to_vec(),
            rules: HashMap::new(),
            configurations: OnceCell::new(),
            variants: VariantSet::from_frozen(snapshot.variants().to_vec()),
            graph_variants: OnceCell::from(snapshot.variants_for_graph_traversal().to_vec()),
        }
    }

    /// Replace the component identifier; the module version id follows it.
    pub fn set_component_id(&mut self, component_id: ModuleComponentIdentifier) {
        self.module_version_id = ModuleVersionIdentifier::from(&component_id);
        self.component_id = component_id;
        self.invalidate_configurations();
        self.variants.reset_snapshot();
        self.invalidate_graph_variants();
    }

    /// Release status, such as `integration` or `release`.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Ordered statuses from least to most mature.
    pub fn set_status_scheme(&mut self, status_scheme: Vec<String>) {
        self.status_scheme = status_scheme;
    }

    /// Mark the module as changing, so cached copies are re-checked.
    pub fn set_changing(&mut self, changing: bool) {
        self.changing = changing;
    }

    /// Mark the module as absent from its repository.
    pub fn set_missing(&mut self, missing: bool) {
        self.missing = missing;
    }

    /// Where the metadata was read from.
    pub fn set_source(&mut self, source: Option<Arc<dyn ModuleSource>>) {
        self.source = source;
    }

    /// Hash of the descriptor the metadata was parsed from.
    pub fn set_content_hash(&mut self, content_hash: HashValue) {
        self.content_hash = content_hash;
    }

    /// Format-specific state.
    pub fn flavor(&self) -> &F {
        &self.flavor
    }

    /// Mutable access to format-specific state. Drops every derived cache.
    pub fn flavor_mut(&mut self) -> &mut F {
        self.invalidate_configurations();
        self.invalidate_graph_variants();
        &mut self.flavor
    }

    /// Module-level dependencies.
    pub fn dependencies(&self) -> &[ModuleDependencyMetadata] {
        &self.dependencies
    }

    /// Replace the module-level dependencies.
    pub fn set_dependencies(&mut self, dependencies: Vec<ModuleDependencyMetadata>) {
        self.dependencies = dependencies;
        self.invalidate_configurations();
    }

    /// Artifacts replacing the default policy, if set.
    pub fn artifact_overrides(&self) -> Option<&[ModuleComponentArtifactMetadata]> {
        self.artifact_overrides.as_deref()
    }

    /// Set or clear the artifacts published by every configuration.
    pub fn set_artifact_overrides(&mut self, overrides: Option<Vec<ModuleComponentArtifactMetadata>>) {
        self.artifact_overrides = overrides;
        self.invalidate_configurations();
    }

    /// Register a rule action for the configuration or variant called `name`.
    ///
    /// Actions for one name run in registration order.
    pub fn add_dependency_metadata_rule(
        &mut self,
        name: impl Into<String>,
        action: impl Fn(&mut DependenciesMetadata) + Send + Sync + 'static,
    ) {
        self.rules.entry(name.into()).or_default().add_action(action);
        self.invalidate_configurations();
        self.invalidate_graph_variants();
    }

    /// Registered rules keyed by name.
    pub fn dependency_metadata_rules(&self) -> &HashMap<String, DependencyMetadataRules> {
        &self.rules
    }

    /// Declare an explicit variant and return it for population.
    pub fn add_variant(
        &mut self,
        name: impl Into<String>,
        attributes: ImmutableAttributes,
    ) -> &mut MutableVariant {
        self.invalidate_graph_variants();
        self.variants.add(name, attributes)
    }

    /// Resolve everything and copy it into an immutable snapshot.
    pub fn as_immutable(&self) -> ModuleResolveMetadata<F> {
        ModuleResolveMetadata::from_mutable(self)
    }

    fn invalidate_configurations(&mut self) {
        if self.configurations.take().is_some() {
            trace!("Discarded resolved configurations of {}", self.component_id);
        }
    }

    fn invalidate_graph_variants(&mut self) {
        if self.graph_variants.take().is_some() {
            trace!("Discarded graph variants of {}", self.component_id);
        }
    }
}

impl<F: ModuleFlavor> ComponentResolveMetadata for MutableModuleResolveMetadata<F> {
    fn component_id(&self) -> &ModuleComponentIdentifier {
        &self.component_id
    }

    fn module_version_id(&self) -> &ModuleVersionIdentifier {
        &self.module_version_id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn status_scheme(&self) -> &[String] {
        &self.status_scheme
    }

    fn is_changing(&self) -> bool {
        self.changing
    }

    fn is_missing(&self) -> bool {
        self.missing
    }

    fn source(&self) -> Option<&Arc<dyn ModuleSource>> {
        self.source.as_ref()
    }

    fn content_hash(&self) -> HashValue {
        self.content_hash
    }

    fn configurations(&self) -> &Configurations {
        self.configurations.get_or_init(|| {
            ConfigurationResolver::new(
                &self.component_id,
                self.flavor.configuration_definitions(),
                &self.flavor,
            )
            .with_dependencies(&self.dependencies)
            .with_rules(&self.rules)
            .with_artifact_overrides(self.artifact_overrides.as_deref())
            .resolve_all()
        })
    }

    fn variants(&self) -> &[Arc<ImmutableVariant>] {
        self.variants.variants(&self.component_id)
    }

    fn variants_for_graph_traversal(&self) -> &[VariantBackedConfigurationMetadata] {
        self.graph_variants.get_or_init(|| {
            self.variants()
                .iter()
                .map(|variant| {
                    VariantBackedConfigurationMetadata::new(
                        &self.component_id,
                        variant.clone(),
                        self.rules.get(variant.name()),
                    )
                })
                .collect()
        })
    }

    fn defines_variant(&self, name: &str) -> bool {
        if self.variants.is_empty() {
            self.flavor.configuration_definitions().contains(name)
        } else {
            self.variants.contains(name)
        }
    }

    fn artifact(
        &self,
        artifact_type: &str,
        extension: Option<&str>,
        classifier: Option<&str>,
    ) -> ModuleComponentArtifactMetadata {
        ModuleComponentArtifactMetadata::new(
            self.component_id.clone(),
            IvyArtifactName::new(&self.component_id.module, artifact_type, extension, classifier),
        )
    }
}
