//! Core types for modmeta
//!
//! This module holds the small building blocks every other module depends on:
//!
//! - [`error`] - the [`MetadataError`] taxonomy and the [`ErrorContext`] used by the CLI
//! - [`identifier`] - [`ModuleComponentIdentifier`] and the derived [`ModuleVersionIdentifier`]
//! - [`hash`] - the descriptor [`HashValue`]
//! - [`attributes`] - [`ImmutableAttributes`] attached to explicit variants
//! - [`ModuleSource`] - the opaque token describing where a module's metadata came from

pub mod attributes;
pub mod error;
pub mod hash;
pub mod identifier;

pub use attributes::ImmutableAttributes;
pub use error::{ErrorContext, MetadataError, user_friendly_error};
pub use hash::HashValue;
pub use identifier::{ModuleComponentIdentifier, ModuleVersionIdentifier};

use std::fmt;

/// Opaque token identifying the repository a module's metadata was obtained from.
///
/// The metadata model stores and copies the token but never inspects it beyond
/// [`describe`](Self::describe).
pub trait ModuleSource: fmt::Debug + Send + Sync {
    /// Short human-readable description, used in logs and reports.
    fn describe(&self) -> String;
}
