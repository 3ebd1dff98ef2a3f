//! Constants shared across the metadata model.
//!
//! Status defaults, the Maven configuration names that receive a default jar
//! artifact, and the packaging names the Maven flavor recognises.

/// Status assigned to a module whose descriptor does not declare one.
pub const DEFAULT_STATUS: &str = "integration";

/// Status scheme used when a module does not declare its own, lowest first.
pub const DEFAULT_STATUS_SCHEME: &[&str] = &["integration", "milestone", "release"];

/// Returns [`DEFAULT_STATUS_SCHEME`] as an owned list.
pub fn default_status_scheme() -> Vec<String> {
    DEFAULT_STATUS_SCHEME.iter().map(|s| (*s).to_string()).collect()
}

/// Maven configurations that carry the module's main jar when no artifact
/// overrides are set.
pub const MAVEN_JAR_CONFIGURATIONS: &[&str] = &["compile", "runtime", "default", "test"];

/// Default Maven packaging.
pub const JAR_PACKAGING: &str = "jar";

/// Packaging of a POM-only Maven module.
pub const POM_PACKAGING: &str = "pom";

/// Packagings known to produce a plain jar artifact.
pub const JAR_PACKAGINGS: &[&str] = &["jar", "ejb", "bundle", "maven-plugin", "eclipse-plugin"];

/// Module configuration wildcard matching every configuration.
pub const ALL_CONFIGURATIONS: &str = "*";

/// Module configuration token matching the configuration being populated.
pub const THIS_CONFIGURATION: &str = "%";
