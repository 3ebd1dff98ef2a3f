//! Command-line interface for modmeta.
//!
//! # Commands
//!
//! - `inspect` - Load a module descriptor and print its resolved
//!   configurations and variants
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Suppress all logging except errors
//!
//! `RUST_LOG` takes precedence over both flags when set.
//!
//! # Examples
//!
//! ```bash
//! modmeta inspect module.toml
//! modmeta --verbose inspect module.toml --format json
//! modmeta inspect module.toml --immutable
//! ```

pub mod inspect;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::inspect::InspectCommand;

/// Runtime settings derived from the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter directive; `None` disables logging
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Install the global tracing subscriber.
    ///
    /// A second call, or a call after another subscriber was installed, is a no-op.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if let Some(level) = &self.log_level {
            EnvFilter::new(level)
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Top-level command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "modmeta",
    about = "Inspect module component resolve metadata",
    version,
    long_about = "modmeta loads a module descriptor, resolves its configuration hierarchy and \
                  explicit variants, and prints the result."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all logging except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the resolved metadata of a module descriptor
    Inspect(InspectCommand),
}

impl Cli {
    /// Run the selected command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
        }
    }

    /// Run the selected command with explicit settings.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Inspect(cmd) => cmd.execute().await,
        }
    }
}
