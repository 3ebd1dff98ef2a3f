//! Module-level dependency records.

use serde::Serialize;
use std::fmt;

use crate::constants::{ALL_CONFIGURATIONS, THIS_CONFIGURATION};

/// A version requirement: the preferred version plus versions that must be rejected.
///
/// ```
/// use modmeta::model::VersionConstraint;
///
/// let constraint = VersionConstraint::prefer("1.0").rejecting(["1.0.1"]);
/// assert_eq!(constraint.to_string(), "1.0 !{1.0.1}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct VersionConstraint {
    /// Preferred version, empty when unconstrained
    pub preferred: String,
    /// Versions excluded from selection
    pub rejected: Vec<String>,
}

impl VersionConstraint {
    /// Constraint preferring a single version.
    pub fn prefer(version: impl Into<String>) -> Self {
        Self {
            preferred: version.into(),
            rejected: Vec::new(),
        }
    }

    /// Add rejected versions.
    #[must_use]
    pub fn rejecting<I, S>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rejected.extend(versions.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preferred)?;
        if !self.rejected.is_empty() {
            write!(f, " !{{{}}}", self.rejected.join(", "))?;
        }
        Ok(())
    }
}

/// Selects a module by group and name together with a version constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ModuleComponentSelector {
    /// Target group
    pub group: String,
    /// Target module
    pub module: String,
    /// Version requirement
    pub version: VersionConstraint,
}

impl fmt::Display for ModuleComponentSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.module, self.version)
    }
}

/// Excludes transitive dependencies by group and/or module; `*` matches anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ExcludeMetadata {
    /// Excluded group or `*`
    pub group: String,
    /// Excluded module or `*`
    pub module: String,
}

impl ExcludeMetadata {
    /// Create an exclusion.
    pub fn new(group: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            module: module.into(),
        }
    }

    /// Whether this exclusion removes the given module.
    pub fn matches(&self, group: &str, module: &str) -> bool {
        (self.group == "*" || self.group == group) && (self.module == "*" || self.module == module)
    }
}

/// A dependency declared by a module, scoped to one or more of its configurations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ModuleDependencyMetadata {
    /// Target of the dependency
    pub selector: ModuleComponentSelector,
    /// Configurations of the declaring module this dependency belongs to
    pub module_configurations: Vec<String>,
    /// Transitive exclusions
    pub excludes: Vec<ExcludeMetadata>,
    /// Whether the target's own dependencies are followed
    pub transitive: bool,
}

impl ModuleDependencyMetadata {
    /// Create a transitive dependency on `group:module` with the given constraint.
    pub fn new(
        group: impl Into<String>,
        module: impl Into<String>,
        version: VersionConstraint,
    ) -> Self {
        Self {
            selector: ModuleComponentSelector {
                group: group.into(),
                module: module.into(),
                version,
            },
            module_configurations: Vec::new(),
            excludes: Vec::new(),
            transitive: true,
        }
    }

    /// Scope this dependency to the given configurations.
    #[must_use]
    pub fn in_configurations<I, S>(mut self, configurations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.module_configurations = configurations.into_iter().map(Into::into).collect();
        self
    }

    /// Target group.
    pub fn group(&self) -> &str {
        &self.selector.group
    }

    /// Target module.
    pub fn module(&self) -> &str {
        &self.selector.module
    }

    /// Add a transitive exclusion.
    pub fn add_exclude(&mut self, exclude: ExcludeMetadata) {
        self.excludes.push(exclude);
    }

    /// Replace the version constraint.
    pub fn set_version(&mut self, version: VersionConstraint) {
        self.selector.version = version;
    }

    /// Set whether the target's dependencies are followed.
    pub fn set_transitive(&mut self, transitive: bool) {
        self.transitive = transitive;
    }

    /// Whether the given module is excluded by this dependency.
    pub fn excludes_module(&self, group: &str, module: &str) -> bool {
        self.excludes.iter().any(|e| e.matches(group, module))
    }

    /// Whether this dependency belongs to a configuration with the given hierarchy.
    ///
    /// `hierarchy` is the configuration's own name followed by all of its
    /// ancestors. A dependency applies when one of its module configurations is
    /// `%`, is in the hierarchy, or is `*` and the hierarchy is not negated with
    /// a `!name` entry.
    pub fn applies_to(&self, hierarchy: &[String]) -> bool {
        let negated = |name: &str| {
            self.module_configurations
                .iter()
                .any(|c| c.strip_prefix('!') == Some(name))
        };

        self.module_configurations.iter().any(|configuration| match configuration.as_str() {
            THIS_CONFIGURATION => true,
            ALL_CONFIGURATIONS => !hierarchy.iter().any(|name| negated(name)),
            name => hierarchy.iter().any(|h| h == name),
        })
    }
}

impl fmt::Display for ModuleDependencyMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.selector.fmt(f)
    }
}
