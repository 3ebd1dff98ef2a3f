//! Error handling for modmeta
//!
//! The error system mirrors the failure taxonomy of the metadata model:
//!
//! - **Contract violations** detected at a boundary ([`MetadataError::UndefinedConfiguration`],
//!   [`MetadataError::CircularInheritance`], [`MetadataError::DuplicateConfiguration`]).
//!   These indicate a bug in the collaborator that produced the configuration table
//!   and are reported once, when the table is built.
//! - **Input errors** from the descriptor layer ([`MetadataError::InvalidIdentifier`],
//!   [`MetadataError::UnknownModuleKind`], [`MetadataError::DescriptorParse`]).
//!
//! Absent data (a missing module, an empty dependency list, a missing classifier) is
//! never an error; it is represented in the data model.
//!
//! Use [`user_friendly_error`] to turn any [`anyhow::Error`] into an [`ErrorContext`]
//! carrying a suggestion for CLI display.
//!
//! # Examples
//!
//! ```rust,no_run
//! use modmeta::core::{MetadataError, ErrorContext};
//!
//! let context = ErrorContext::new(MetadataError::UndefinedConfiguration {
//!     name: "compile".to_string(),
//!     referenced_by: "runtime".to_string(),
//! })
//! .with_suggestion("Declare the 'compile' configuration in the descriptor");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for metadata operations.
///
/// # Error Categories
///
/// ## Configuration table
/// - [`UndefinedConfiguration`](Self::UndefinedConfiguration) - `extends_from` names an absent configuration
/// - [`CircularInheritance`](Self::CircularInheritance) - `extends_from` relations form a cycle
/// - [`DuplicateConfiguration`](Self::DuplicateConfiguration) - two definitions share a name
///
/// ## Descriptor input
/// - [`InvalidIdentifier`](Self::InvalidIdentifier) - malformed `group:module:version`
/// - [`UnknownModuleKind`](Self::UnknownModuleKind) - unsupported module flavor
/// - [`DescriptorParse`](Self::DescriptorParse) - invalid descriptor syntax
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// A configuration extends from a name that has no definition.
    #[error("Configuration '{referenced_by}' extends from undefined configuration '{name}'")]
    UndefinedConfiguration {
        /// The missing configuration name
        name: String,
        /// The configuration whose `extends_from` references it
        referenced_by: String,
    },

    /// The `extends_from` graph contains a cycle.
    #[error("Circular configuration inheritance detected: {cycle}")]
    CircularInheritance {
        /// The cycle rendered as `a → b → a`
        cycle: String,
    },

    /// Two definitions in one table share a name.
    #[error("Configuration '{name}' is defined more than once")]
    DuplicateConfiguration {
        /// The duplicated name
        name: String,
    },

    /// A module identifier could not be parsed.
    #[error("Invalid module identifier '{value}': {reason}")]
    InvalidIdentifier {
        /// The rejected input
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// The descriptor names a module flavor this crate does not model.
    #[error("Unknown module kind '{kind}'")]
    UnknownModuleKind {
        /// The rejected kind
        kind: String,
    },

    /// A module descriptor failed to parse.
    #[error("Invalid module descriptor syntax in {file}")]
    DescriptorParse {
        /// Path of the descriptor
        file: String,
        /// Parser message
        reason: String,
    },

    /// Any other failure, carried as a message.
    #[error("{message}")]
    Other {
        /// The error message
        message: String,
    },
}

/// Error wrapper adding user-facing details and a suggestion.
///
/// ```rust,no_run
/// use modmeta::core::{MetadataError, ErrorContext};
///
/// let context = ErrorContext::new(MetadataError::UnknownModuleKind { kind: "npm".into() })
///     .with_suggestion("Use kind = \"maven\" or kind = \"ivy\"");
/// println!("{}", context);
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: MetadataError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: MetadataError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: error in red, details in yellow, suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`].
///
/// Recognises [`MetadataError`], [`std::io::Error`] and [`toml::de::Error`] anywhere
/// in the error chain; everything else is reported with its full chain of causes.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(metadata_error) = cause.downcast_ref::<MetadataError>() {
            return create_error_context(metadata_error.clone());
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::NotFound {
            return ErrorContext::new(MetadataError::Other {
                message: error.to_string(),
            })
            .with_suggestion("Check that the descriptor path exists and is readable");
        }
    }

    if let Some(toml_error) = error.chain().find_map(|c| c.downcast_ref::<toml::de::Error>()) {
        return ErrorContext::new(MetadataError::DescriptorParse {
            file: "descriptor".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax of the module descriptor")
        .with_details(toml_error.message().to_string());
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(MetadataError::Other {
        message,
    })
}

fn create_error_context(error: MetadataError) -> ErrorContext {
    match &error {
        MetadataError::UndefinedConfiguration {
            name,
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!("Define configuration '{name}' or remove it from extends_from"))
            .with_details("Every name listed in extends_from must have its own definition"),
        MetadataError::CircularInheritance {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Break the cycle by removing one of the extends_from entries")
            .with_details("Configuration inheritance must form a directed acyclic graph"),
        MetadataError::DuplicateConfiguration {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Merge the duplicate definitions into a single entry"),
        MetadataError::InvalidIdentifier {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Module identifiers use the form group:module:version"),
        MetadataError::UnknownModuleKind {
            ..
        } => ErrorContext::new(error).with_suggestion("Supported kinds are \"maven\" and \"ivy\""),
        MetadataError::DescriptorParse {
            reason,
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check the TOML syntax of the module descriptor")
            .with_details(reason.clone()),
        MetadataError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
