//! Configuration definitions and resolved configuration metadata.
//!
//! A [`ConfigurationDefinitions`] table is the static input produced by a
//! descriptor parser: names, `extends_from` lists and flags. The table is
//! validated once, when it is built; after that the extends-from relation is
//! guaranteed to be a DAG over defined names, which is what the resolver in
//! [`crate::resolver`] relies on.
//!
//! [`ConfigurationMetadata`] is the resolved form: parents are concrete shared
//! objects rather than names, and artifacts and dependencies are attached.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use super::{ModuleComponentArtifactMetadata, ModuleDependencyMetadata};
use crate::core::MetadataError;

/// Static description of one configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationDefinition {
    /// Configuration name
    pub name: String,
    /// Names of the configurations this one extends, in declared order
    pub extends_from: Vec<String>,
    /// Whether dependencies of this configuration are followed transitively
    pub transitive: bool,
    /// Whether the configuration is visible to consumers
    pub visible: bool,
}

impl ConfigurationDefinition {
    /// A transitive, visible configuration extending the given names.
    pub fn new<I, S>(name: impl Into<String>, extends_from: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            extends_from: extends_from.into_iter().map(Into::into).collect(),
            transitive: true,
            visible: true,
        }
    }

    /// Set the transitive flag.
    #[must_use]
    pub fn transitive(mut self, transitive: bool) -> Self {
        self.transitive = transitive;
        self
    }

    /// Set the visible flag.
    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// A validated table of configuration definitions, keyed and ordered by name.
///
/// # Examples
///
/// ```
/// use modmeta::model::{ConfigurationDefinition, ConfigurationDefinitions};
///
/// let table = ConfigurationDefinitions::new([
///     ConfigurationDefinition::new("a", Vec::<String>::new()),
///     ConfigurationDefinition::new("b", ["a"]),
/// ])?;
/// assert!(table.contains("b"));
///
/// let cyclic = ConfigurationDefinitions::new([
///     ConfigurationDefinition::new("a", ["b"]),
///     ConfigurationDefinition::new("b", ["a"]),
/// ]);
/// assert!(cyclic.is_err());
/// # Ok::<(), modmeta::core::MetadataError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationDefinitions {
    definitions: BTreeMap<String, ConfigurationDefinition>,
}

impl ConfigurationDefinitions {
    /// Build and validate a table.
    ///
    /// # Errors
    ///
    /// - [`MetadataError::DuplicateConfiguration`] when two definitions share a name
    /// - [`MetadataError::UndefinedConfiguration`] when `extends_from` names an absent configuration
    /// - [`MetadataError::CircularInheritance`] when the extends-from relation has a cycle
    pub fn new(
        definitions: impl IntoIterator<Item = ConfigurationDefinition>,
    ) -> Result<Self, MetadataError> {
        let mut table = BTreeMap::new();
        for definition in definitions {
            if table.contains_key(&definition.name) {
                return Err(MetadataError::DuplicateConfiguration {
                    name: definition.name,
                });
            }
            table.insert(definition.name.clone(), definition);
        }

        for definition in table.values() {
            if let Some(missing) = definition.extends_from.iter().find(|p| !table.contains_key(*p)) {
                return Err(MetadataError::UndefinedConfiguration {
                    name: missing.clone(),
                    referenced_by: definition.name.clone(),
                });
            }
        }

        let table = Self {
            definitions: table,
        };
        table.check_acyclic()?;
        Ok(table)
    }

    /// Build a table known to be valid, such as a fixed format table.
    pub(crate) fn from_trusted(definitions: impl IntoIterator<Item = ConfigurationDefinition>) -> Self {
        let table = Self {
            definitions: definitions.into_iter().map(|d| (d.name.clone(), d)).collect(),
        };
        debug_assert!(
            table.iter().all(|d| d.extends_from.iter().all(|p| table.contains(p))),
            "built-in configuration table references an undefined configuration"
        );
        debug_assert!(table.check_acyclic().is_ok(), "built-in configuration table has a cycle");
        table
    }

    /// An empty table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a definition.
    pub fn get(&self, name: &str) -> Option<&ConfigurationDefinition> {
        self.definitions.get(name)
    }

    /// Whether a definition with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Configuration names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// Definitions in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ConfigurationDefinition> {
        self.definitions.values()
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    fn check_acyclic(&self) -> Result<(), MetadataError> {
        let mut graph: DiGraph<&str, ()> = DiGraph::new();
        let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();
        for name in self.definitions.keys() {
            nodes.insert(name.as_str(), graph.add_node(name.as_str()));
        }
        for definition in self.definitions.values() {
            let child = nodes[definition.name.as_str()];
            for parent in &definition.extends_from {
                graph.add_edge(child, nodes[parent.as_str()], ());
            }
        }

        match toposort(&graph, None) {
            Ok(_) => Ok(()),
            Err(cycle) => {
                let start = cycle.node_id();
                let mut path = vec![start];
                find_path_back(&graph, start, start, &mut path);
                let rendered: Vec<&str> = path.iter().map(|idx| graph[*idx]).collect();
                Err(MetadataError::CircularInheritance {
                    cycle: rendered.join(" → "),
                })
            }
        }
    }
}

/// Depth-first search for a path from `current` back to `target`, appended to `path`.
fn find_path_back(
    graph: &DiGraph<&str, ()>,
    current: NodeIndex,
    target: NodeIndex,
    path: &mut Vec<NodeIndex>,
) -> bool {
    for next in graph.neighbors(current) {
        if next == target {
            path.push(next);
            return true;
        }
        if path.contains(&next) {
            continue;
        }
        path.push(next);
        if find_path_back(graph, next, target, path) {
            return true;
        }
        path.pop();
    }
    false
}

/// A resolved configuration of a module version.
///
/// Built once per name per resolution pass and never mutated afterwards.
/// Parents are shared: a configuration extended by several children appears
/// as the same `Arc` in each child's [`parents`](Self::parents).
#[derive(Debug)]
pub struct ConfigurationMetadata {
    name: String,
    transitive: bool,
    visible: bool,
    parents: Vec<Arc<ConfigurationMetadata>>,
    hierarchy: Vec<String>,
    artifacts: Vec<ModuleComponentArtifactMetadata>,
    dependencies: Vec<ModuleDependencyMetadata>,
}

impl ConfigurationMetadata {
    pub(crate) fn new(
        definition: &ConfigurationDefinition,
        parents: Vec<Arc<ConfigurationMetadata>>,
        artifacts: Vec<ModuleComponentArtifactMetadata>,
    ) -> Self {
        let mut hierarchy = vec![definition.name.clone()];
        let mut seen: HashSet<&str> = HashSet::from([definition.name.as_str()]);
        for parent in &parents {
            for name in &parent.hierarchy {
                if seen.insert(name.as_str()) {
                    hierarchy.push(name.clone());
                }
            }
        }

        Self {
            name: definition.name.clone(),
            transitive: definition.transitive,
            visible: definition.visible,
            parents,
            hierarchy,
            artifacts,
            dependencies: Vec::new(),
        }
    }

    pub(crate) fn with_dependencies(mut self, dependencies: Vec<ModuleDependencyMetadata>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Configuration name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether dependencies are followed transitively.
    pub fn is_transitive(&self) -> bool {
        self.transitive
    }

    /// Whether the configuration is visible to consumers.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Resolved parents in declared order; empty for a tail configuration.
    pub fn parents(&self) -> &[Arc<ConfigurationMetadata>] {
        &self.parents
    }

    /// This configuration's name followed by every ancestor, without duplicates.
    pub fn hierarchy(&self) -> &[String] {
        &self.hierarchy
    }

    /// Artifacts published by this configuration.
    pub fn artifacts(&self) -> &[ModuleComponentArtifactMetadata] {
        &self.artifacts
    }

    /// Dependencies of this configuration after rule actions were applied.
    pub fn dependencies(&self) -> &[ModuleDependencyMetadata] {
        &self.dependencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str, extends: &[&str]) -> ConfigurationDefinition {
        ConfigurationDefinition::new(name, extends.iter().copied())
    }

    #[test]
    fn test_valid_table() {
        let table =
            ConfigurationDefinitions::new([def("a", &[]), def("b", &["a"]), def("c", &["a", "b"])])
                .unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(table.get("c").unwrap().extends_from, vec!["a", "b"]);
    }

    #[test]
    fn test_undefined_parent_is_rejected() {
        let err = ConfigurationDefinitions::new([def("runtime", &["compile"])]).unwrap_err();
        assert_eq!(
            err,
            MetadataError::UndefinedConfiguration {
                name: "compile".to_string(),
                referenced_by: "runtime".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_is_rejected() {
        let err = ConfigurationDefinitions::new([def("a", &[]), def("a", &[])]).unwrap_err();
        assert!(matches!(err, MetadataError::DuplicateConfiguration { .. }));
    }

    #[test]
    fn test_cycle_is_rejected_with_path() {
        let err = ConfigurationDefinitions::new([
            def("a", &["c"]),
            def("b", &["a"]),
            def("c", &["b"]),
            def("d", &[]),
        ])
        .unwrap_err();

        match err {
            MetadataError::CircularInheritance {
                cycle,
            } => {
                let names: Vec<&str> = cycle.split(" → ").collect();
                assert_eq!(names.len(), 4);
                assert_eq!(names.first(), names.last());
                assert!(!names.contains(&"d"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_self_extension_is_a_cycle() {
        let err = ConfigurationDefinitions::new([def("a", &["a"])]).unwrap_err();
        assert_eq!(
            err,
            MetadataError::CircularInheritance {
                cycle: "a → a".to_string(),
            }
        );
    }

    #[test]
    fn test_hierarchy_deduplicates_diamond() {
        let a = Arc::new(ConfigurationMetadata::new(&def("a", &[]), vec![], vec![]));
        let b = Arc::new(ConfigurationMetadata::new(&def("b", &["a"]), vec![a.clone()], vec![]));
        let c = ConfigurationMetadata::new(&def("c", &["a", "b"]), vec![a, b], vec![]);
        assert_eq!(c.hierarchy(), ["c", "a", "b"]);
    }
}
