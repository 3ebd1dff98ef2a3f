//! Configuration resolution for a single module version.
//!
//! The resolver turns a validated [`ConfigurationDefinitions`] table into fully
//! populated [`ConfigurationMetadata`] objects, one per name.
//!
//! # Algorithm
//!
//! Resolution is a memoized depth-first walk over the extends-from DAG:
//!
//! 1. A result table keyed by name is shared by the whole pass, so a
//!    configuration referenced by several children is built exactly once.
//! 2. Before a configuration is built, every name in its `extends_from` list is
//!    resolved in declared order; the built parents become its
//!    [`parents`](ConfigurationMetadata::parents).
//! 3. Each configuration is stored in the table as soon as it is built.
//!
//! The walk uses an explicit stack rather than recursion, so the depth of a
//! hierarchy is bounded by heap, not by the call stack.
//!
//! # Artifacts
//!
//! When artifact overrides are present every configuration receives exactly
//! that list. Otherwise the module flavor's [`DefaultArtifacts`] policy decides
//! by configuration name.
//!
//! # Dependencies
//!
//! A configuration keeps the module dependencies whose declared scope matches
//! its hierarchy (see [`ModuleDependencyMetadata::applies_to`]), then every rule
//! action registered under its name runs over that set in registration order.
//!
//! # Caching
//!
//! The resolver itself keeps no state between passes. Callers cache the
//! returned [`Configurations`] and discard it wholesale when any input changes.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::core::ModuleComponentIdentifier;
use crate::model::{
    ConfigurationDefinition, ConfigurationDefinitions, ConfigurationMetadata,
    ModuleComponentArtifactMetadata, ModuleDependencyMetadata,
};
use crate::rules::{self, DependencyMetadataRules};

/// Resolved configurations keyed by name.
pub type Configurations = BTreeMap<String, Arc<ConfigurationMetadata>>;

/// Decides which artifacts a configuration publishes when no overrides are set.
pub trait DefaultArtifacts {
    /// Artifacts of the named configuration of `component_id`.
    fn default_artifacts(
        &self,
        component_id: &ModuleComponentIdentifier,
        configuration: &str,
    ) -> Vec<ModuleComponentArtifactMetadata>;
}

/// Inputs of one resolution pass.
pub struct ConfigurationResolver<'a> {
    component_id: &'a ModuleComponentIdentifier,
    definitions: &'a ConfigurationDefinitions,
    dependencies: &'a [ModuleDependencyMetadata],
    rules: Option<&'a HashMap<String, DependencyMetadataRules>>,
    artifact_overrides: Option<&'a [ModuleComponentArtifactMetadata]>,
    default_artifacts: &'a dyn DefaultArtifacts,
}

impl<'a> ConfigurationResolver<'a> {
    /// Create a resolver over the given inputs.
    pub fn new(
        component_id: &'a ModuleComponentIdentifier,
        definitions: &'a ConfigurationDefinitions,
        default_artifacts: &'a dyn DefaultArtifacts,
    ) -> Self {
        Self {
            component_id,
            definitions,
            dependencies: &[],
            rules: None,
            artifact_overrides: None,
            default_artifacts,
        }
    }

    /// Module-level dependencies to distribute over configurations.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: &'a [ModuleDependencyMetadata]) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Dependency rules keyed by configuration name.
    #[must_use]
    pub fn with_rules(mut self, rules: &'a HashMap<String, DependencyMetadataRules>) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Artifact list replacing the default policy for every configuration.
    #[must_use]
    pub fn with_artifact_overrides(
        mut self,
        overrides: Option<&'a [ModuleComponentArtifactMetadata]>,
    ) -> Self {
        self.artifact_overrides = overrides;
        self
    }

    /// Resolve every configuration in the table.
    pub fn resolve_all(&self) -> Configurations {
        let mut resolved = Configurations::new();
        for name in self.definitions.names() {
            self.resolve(name, &mut resolved);
        }

        debug!(
            "Resolved {} configurations for {} ({} dependencies, {} rule entries)",
            resolved.len(),
            self.component_id,
            self.dependencies.len(),
            self.rules.map_or(0, HashMap::len)
        );
        resolved
    }

    /// Resolve one configuration and its ancestors into `resolved`.
    ///
    /// # Panics
    ///
    /// Panics if `name` has no definition. Tables are validated on
    /// construction, so only a caller passing an unknown root name can hit this.
    pub fn resolve(&self, name: &str, resolved: &mut Configurations) -> Arc<ConfigurationMetadata> {
        if let Some(configuration) = resolved.get(name) {
            return configuration.clone();
        }

        let mut stack: Vec<(&str, bool)> = vec![(name, false)];
        while let Some((current, parents_ready)) = stack.pop() {
            if resolved.contains_key(current) {
                continue;
            }
            let definition = self.definition(current);

            if parents_ready {
                let parents: Vec<Arc<ConfigurationMetadata>> =
                    definition.extends_from.iter().map(|p| resolved[p.as_str()].clone()).collect();
                let configuration = self.create_configuration(definition, parents);
                resolved.insert(current.to_string(), Arc::new(configuration));
            } else {
                stack.push((current, true));
                for parent in definition.extends_from.iter().rev() {
                    if !resolved.contains_key(parent.as_str()) {
                        stack.push((parent.as_str(), false));
                    }
                }
            }
        }

        resolved[name].clone()
    }

    fn definition(&self, name: &str) -> &'a ConfigurationDefinition {
        match self.definitions.get(name) {
            Some(definition) => definition,
            None => panic!("configuration '{name}' is not defined for {}", self.component_id),
        }
    }

    fn create_configuration(
        &self,
        definition: &ConfigurationDefinition,
        parents: Vec<Arc<ConfigurationMetadata>>,
    ) -> ConfigurationMetadata {
        let artifacts = match self.artifact_overrides {
            Some(overrides) => overrides.to_vec(),
            None => self.default_artifacts.default_artifacts(self.component_id, &definition.name),
        };

        trace!(
            "Building configuration '{}' of {} with {} parent(s)",
            definition.name,
            self.component_id,
            parents.len()
        );

        let configuration = ConfigurationMetadata::new(definition, parents, artifacts);
        let declared: Vec<ModuleDependencyMetadata> = self
            .dependencies
            .iter()
            .filter(|d| d.applies_to(configuration.hierarchy()))
            .cloned()
            .collect();
        let entry = self.rules.and_then(|rules| rules.get(&definition.name));
        let dependencies = rules::apply(entry, declared);
        configuration.with_dependencies(dependencies)
    }
}
