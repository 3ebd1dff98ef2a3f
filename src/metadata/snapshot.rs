use std::sync::Arc;
use tracing::debug;

use super::{ComponentResolveMetadata, ModuleFlavor, MutableModuleResolveMetadata};
use crate::core::{HashValue, ModuleComponentIdentifier, ModuleSource, ModuleVersionIdentifier};
use crate::model::{IvyArtifactName, ModuleComponentArtifactMetadata, ModuleDependencyMetadata};
use crate::resolver::Configurations;
use crate::variant::{ImmutableVariant, VariantBackedConfigurationMetadata};

#[derive(Debug)]
struct Snapshot<F> {
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
    configurations: Configurations,
    variants: Vec<Arc<ImmutableVariant>>,
    graph_variants: Vec<VariantBackedConfigurationMetadata>,
}

/// Immutable resolve metadata of one module version.
///
/// Every derived view was computed when the snapshot was taken. Cloning is
/// cheap and clones share storage, so a snapshot can be handed to any number
/// of threads.
#[derive(Debug)]
pub struct ModuleResolveMetadata<F> {
    inner: Arc<Snapshot<F>>,
}

impl<F> Clone for ModuleResolveMetadata<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: ModuleFlavor> ModuleResolveMetadata<F> {
    pub(crate) fn from_mutable(metadata: &MutableModuleResolveMetadata<F>) -> Self {
        let snapshot = Snapshot {
            component_id: metadata.component_id().clone(),
            module_version_id: metadata.module_version_id().clone(),
            status: metadata.status().to_string(),
            status_scheme: metadata.status_scheme().to_vec(),
            changing: metadata.is_changing(),
            missing: metadata.is_missing(),
            source: metadata.source().cloned(),
            content_hash: metadata.content_hash(),
            flavor: metadata.flavor().clone(),
            artifact_overrides: metadata.artifact_overrides().map(<[_]>::to_vec),
            dependencies: metadata.dependencies().to_vec(),
            configurations: metadata.configurations().clone(),
            variants: metadata.variants().to_vec(),
            graph_variants: metadata.variants_for_graph_traversal().to_vec(),
        };
        debug!(
            "Froze {} ({} configurations, {} variants)",
            snapshot.component_id,
            snapshot.configurations.len(),
            snapshot.variants.len()
        );

        Self {
            inner: Arc::new(snapshot),
        }
    }

    /// A mutable copy of this snapshot, without dependency rules.
    pub fn as_mutable(&self) -> MutableModuleResolveMetadata<F> {
        MutableModuleResolveMetadata::from_snapshot(self)
    }

    /// Format-specific state.
    pub fn flavor(&self) -> &F {
        &self.inner.flavor
    }

    /// Module-level dependencies.
    pub fn dependencies(&self) -> &[ModuleDependencyMetadata] {
        &self.inner.dependencies
    }

    /// Artifacts replacing the default policy, if set.
    pub fn artifact_overrides(&self) -> Option<&[ModuleComponentArtifactMetadata]> {
        self.inner.artifact_overrides.as_deref()
    }
}

impl<F: ModuleFlavor> ComponentResolveMetadata for ModuleResolveMetadata<F> {
    fn component_id(&self) -> &ModuleComponentIdentifier {
        &self.inner.component_id
    }

    fn module_version_id(&self) -> &ModuleVersionIdentifier {
        &self.inner.module_version_id
    }

    fn status(&self) -> &str {
        &self.inner.status
    }

    fn status_scheme(&self) -> &[String] {
        &self.inner.status_scheme
    }

    fn is_changing(&self) -> bool {
        self.inner.changing
    }

    fn is_missing(&self) -> bool {
        self.inner.missing
    }

    fn source(&self) -> Option<&Arc<dyn ModuleSource>> {
        self.inner.source.as_ref()
    }

    fn content_hash(&self) -> HashValue {
        self.inner.content_hash
    }

    fn configurations(&self) -> &Configurations {
        &self.inner.configurations
    }

    fn variants(&self) -> &[Arc<ImmutableVariant>] {
        &self.inner.variants
    }

    fn variants_for_graph_traversal(&self) -> &[VariantBackedConfigurationMetadata] {
        &self.inner.graph_variants
    }

    fn defines_variant(&self, name: &str) -> bool {
        if self.inner.variants.is_empty() {
            self.inner.flavor.configuration_definitions().contains(name)
        } else {
            self.inner.variants.iter().any(|v| v.name() == name)
        }
    }

    fn artifact(
        &self,
        artifact_type: &str,
        extension: Option<&str>,
        classifier: Option<&str>,
    ) -> ModuleComponentArtifactMetadata {
        let id = &self.inner.component_id;
        ModuleComponentArtifactMetadata::new(
            id.clone(),
            IvyArtifactName::new(&id.module, artifact_type, extension, classifier),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ImmutableAttributes;
    use crate::metadata::MavenModule;
    use crate::model::VersionConstraint;

    #[derive(Debug)]
    struct Repo(&'static str);

    impl ModuleSource for Repo {
        fn describe(&self) -> String {
            self.0.to_string()
        }
    }

    fn assert_send_sync<T: Send + Sync>() {}

    fn populated() -> MutableModuleResolveMetadata<MavenModule> {
        let id = ModuleComponentIdentifier::new("org.test", "lib", "1.0");
        let mut metadata = MutableModuleResolveMetadata::new(id, MavenModule::new());
        metadata.set_status("release");
        metadata.set_changing(true);
        metadata.set_source(Some(Arc::new(Repo("central"))));
        metadata.set_content_hash(HashValue::of("<project/>"));
        metadata.set_dependencies(vec![
            ModuleDependencyMetadata::new("org.dep", "a", VersionConstraint::prefer("1.0"))
                .in_configurations(["compile"]),
        ]);
        metadata
            .add_variant("api", ImmutableAttributes::of([("usage", "java-api")]))
            .add_dependency("org.dep", "a", VersionConstraint::prefer("1.0"))
            .add_dependency("org.dep", "b", VersionConstraint::prefer("1.0"));
        metadata.add_dependency_metadata_rule("api", |deps| deps.remove_if(|d| d.module() == "b"));
        metadata
    }

    #[test]
    fn test_snapshot_is_send_and_sync() {
        assert_send_sync::<ModuleResolveMetadata<MavenModule>>();
    }

    #[test]
    fn test_snapshot_copies_state() {
        let metadata = populated();
        let snapshot = metadata.as_immutable();

        assert_eq!(snapshot.status(), "release");
        assert!(snapshot.is_changing());
        assert_eq!(snapshot.source().unwrap().describe(), "central");
        assert_eq!(snapshot.content_hash(), HashValue::of("<project/>"));
        assert_eq!(snapshot.configuration_names().len(), 10);
        assert_eq!(snapshot.configuration("runtime").unwrap().dependencies().len(), 1);
        assert_eq!(snapshot.variants().len(), 1);
        assert_eq!(snapshot.variants_for_graph_traversal()[0].dependencies().len(), 1);
        assert!(snapshot.defines_variant("api"));
        assert!(!snapshot.defines_variant("compile"));
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_mutation() {
        let mut metadata = populated();
        let snapshot = metadata.as_immutable();

        metadata.set_status("integration");
        metadata.set_dependencies(Vec::new());
        metadata.add_variant("runtime", ImmutableAttributes::empty());

        assert_eq!(snapshot.status(), "release");
        assert_eq!(snapshot.dependencies().len(), 1);
        assert_eq!(snapshot.configuration("compile").unwrap().dependencies().len(), 1);
        assert_eq!(snapshot.variants().len(), 1);
    }

    #[test]
    fn test_snapshot_clones_share_storage() {
        let snapshot = populated().as_immutable();
        let clone = snapshot.clone();
        assert!(Arc::ptr_eq(
            snapshot.configuration("default").unwrap(),
            clone.configuration("default").unwrap()
        ));
    }

    #[test]
    fn test_snapshot_readable_from_threads() {
        let snapshot = populated().as_immutable();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let snapshot = snapshot.clone();
                std::thread::spawn(move || snapshot.configuration("test").unwrap().hierarchy().len())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 3);
        }
    }

    #[test]
    fn test_as_mutable_round_trip_drops_rules() {
        let snapshot = populated().as_immutable();
        let mut mutable = snapshot.as_mutable();

        assert_eq!(mutable.status(), "release");
        assert!(mutable.dependency_metadata_rules().is_empty());
        // The graph view is carried as it was frozen
        assert_eq!(mutable.variants_for_graph_traversal()[0].dependencies().len(), 1);
        assert!(Arc::ptr_eq(&mutable.variants()[0], &snapshot.variants()[0]));

        // A new variant rebuilds the graph view without the dropped rule
        mutable.add_variant("runtime", ImmutableAttributes::empty());
        let graph = mutable.variants_for_graph_traversal();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph[0].dependencies().len(), 2);
    }
}
