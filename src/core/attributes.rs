//! Immutable variant attributes.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// An immutable, name-ordered set of `attribute = value` pairs attached to a variant.
///
/// Cloning is cheap; the map is shared.
///
/// ```
/// use modmeta::core::ImmutableAttributes;
///
/// let attrs = ImmutableAttributes::of([("usage", "java-api"), ("format", "jar")]);
/// assert_eq!(attrs.get("usage"), Some("java-api"));
/// assert_eq!(attrs.to_string(), "{format=jar, usage=java-api}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImmutableAttributes(Arc<BTreeMap<String, String>>);

impl ImmutableAttributes {
    /// The empty attribute set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an attribute set from pairs; a later pair replaces an earlier one with the same name.
    pub fn of<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(Arc::new(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()))
    }

    /// Value of the named attribute.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Whether no attributes are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for ImmutableAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl fmt::Display for ImmutableAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}={v}")?;
        }
        f.write_str("}")
    }
}
