//! Dependency metadata rules.
//!
//! A rule is a user-supplied action that rewrites the dependency set of one
//! configuration or variant, identified by name, at resolution time. Rules for
//! the same name run in registration order, each seeing the output of the one
//! before it.
//!
//! ```
//! use modmeta::model::{ModuleDependencyMetadata, VersionConstraint};
//! use modmeta::rules::DependencyMetadataRules;
//!
//! let mut rules = DependencyMetadataRules::new();
//! rules.add_action(|deps| deps.remove_if(|d| d.module() == "legacy"));
//!
//! let input = vec![
//!     ModuleDependencyMetadata::new("g", "legacy", VersionConstraint::prefer("1")),
//!     ModuleDependencyMetadata::new("g", "core", VersionConstraint::prefer("2")),
//! ];
//! let output = rules.execute(&input);
//! assert_eq!(output.len(), 1);
//! assert_eq!(output[0].module(), "core");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::model::ModuleDependencyMetadata;

/// A single rule action.
pub type DependencyAction = Arc<dyn Fn(&mut DependenciesMetadata) + Send + Sync>;

/// Mutable view over a dependency set handed to rule actions.
#[derive(Debug, Default)]
pub struct DependenciesMetadata {
    dependencies: Vec<ModuleDependencyMetadata>,
}

impl DependenciesMetadata {
    fn new(dependencies: Vec<ModuleDependencyMetadata>) -> Self {
        Self {
            dependencies,
        }
    }

    /// Append a dependency.
    pub fn add(&mut self, dependency: ModuleDependencyMetadata) {
        self.dependencies.push(dependency);
    }

    /// Remove every dependency matching the predicate.
    pub fn remove_if(&mut self, mut predicate: impl FnMut(&ModuleDependencyMetadata) -> bool) {
        self.dependencies.retain(|d| !predicate(d));
    }

    /// Keep only dependencies matching the predicate.
    pub fn retain(&mut self, predicate: impl FnMut(&ModuleDependencyMetadata) -> bool) {
        self.dependencies.retain(predicate);
    }

    /// Iterate the current dependencies.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleDependencyMetadata> {
        self.dependencies.iter()
    }

    /// Iterate the current dependencies mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ModuleDependencyMetadata> {
        self.dependencies.iter_mut()
    }

    /// Number of dependencies.
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

/// Ordered actions registered for one configuration or variant name.
#[derive(Clone, Default)]
pub struct DependencyMetadataRules {
    actions: Vec<DependencyAction>,
}

impl DependencyMetadataRules {
    /// An entry with no actions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action.
    pub fn add_action(&mut self, action: impl Fn(&mut DependenciesMetadata) + Send + Sync + 'static) {
        self.actions.push(Arc::new(action));
    }

    /// Append an already shared action.
    pub fn add_shared_action(&mut self, action: DependencyAction) {
        self.actions.push(action);
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether no action is registered.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Run every action, in registration order, over a copy of `dependencies`.
    pub fn execute(&self, dependencies: &[ModuleDependencyMetadata]) -> Vec<ModuleDependencyMetadata> {
        let mut view = DependenciesMetadata::new(dependencies.to_vec());
        for action in &self.actions {
            action(&mut view);
        }
        view.dependencies
    }
}

impl fmt::Debug for DependencyMetadataRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyMetadataRules").field("actions", &self.actions.len()).finish()
    }
}

/// Apply the optional rule entry for a name, returning the input unchanged when absent.
pub(crate) fn apply(
    rules: Option<&DependencyMetadataRules>,
    dependencies: Vec<ModuleDependencyMetadata>,
) -> Vec<ModuleDependencyMetadata> {
    match rules {
        Some(rules) if !rules.is_empty() => rules.execute(&dependencies),
        _ => dependencies,
    }
}
