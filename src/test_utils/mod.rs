//! Test utilities for modmeta
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration suite:
//!
//! - [`init_test_logging`] - install a tracing subscriber once per process
//! - [`fixtures`] - sample descriptors and prebuilt metadata
//!
//! # Example
//!
//! ```rust,no_run
//! use modmeta::test_utils::{fixtures::DescriptorFixture, init_test_logging};
//!
//! init_test_logging(None);
//! let dir = std::env::temp_dir();
//! let path = DescriptorFixture::maven_basic().write_to(&dir).unwrap();
//! assert!(path.exists());
//! ```

pub mod fixtures;

pub use fixtures::{DescriptorFixture, MetadataFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `level` set, that level is used;
/// otherwise `RUST_LOG` is honoured, and without either nothing is installed.
///
/// ```bash
/// RUST_LOG=modmeta=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
