//! Module identity.
//!
//! A module version is addressed by its [`ModuleComponentIdentifier`]
//! (`group:module:version`). The [`ModuleVersionIdentifier`] carries the same
//! coordinates under the resolver's naming and can only be derived from a
//! component identifier, so the two never drift apart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::MetadataError;

/// Identifies one version of a module in a module repository.
///
/// ```
/// use modmeta::core::ModuleComponentIdentifier;
///
/// let id: ModuleComponentIdentifier = "org.example:lib:1.2".parse().unwrap();
/// assert_eq!(id.group, "org.example");
/// assert_eq!(id.module, "lib");
/// assert_eq!(id.version, "1.2");
/// assert_eq!(id.to_string(), "org.example:lib:1.2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleComponentIdentifier {
    /// Group (organisation) of the module
    pub group: String,
    /// Module name
    pub module: String,
    /// Version string, not interpreted here
    pub version: String,
}

impl ModuleComponentIdentifier {
    /// Create a new component identifier.
    pub fn new(
        group: impl Into<String>,
        module: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            module: module.into(),
            version: version.into(),
        }
    }
}

impl FromStr for ModuleComponentIdentifier {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 {
            return Err(MetadataError::InvalidIdentifier {
                value: s.to_string(),
                reason: format!("expected 3 ':'-separated parts, found {}", parts.len()),
            });
        }
        if let Some(position) = parts.iter().position(|p| p.trim().is_empty()) {
            let part = ["group", "module", "version"][position];
            return Err(MetadataError::InvalidIdentifier {
                value: s.to_string(),
                reason: format!("{part} cannot be empty"),
            });
        }
        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl fmt::Display for ModuleComponentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.module, self.version)
    }
}

/// The module version id seen by the dependency graph.
///
/// Deliberately has no public constructor besides the conversion from a
/// [`ModuleComponentIdentifier`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ModuleVersionIdentifier {
    group: String,
    name: String,
    version: String,
}

impl ModuleVersionIdentifier {
    /// Group of the module.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Module name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version string.
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl From<&ModuleComponentIdentifier> for ModuleVersionIdentifier {
    fn from(id: &ModuleComponentIdentifier) -> Self {
        Self {
            group: id.group.clone(),
            name: id.module.clone(),
            version: id.version.clone(),
        }
    }
}

impl fmt::Display for ModuleVersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}
