//! Integration test suite for modmeta
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **lifecycle**: mutable container, caches, invalidation and snapshots
//! - **variants**: explicit variants, freezing and graph traversal
//! - **descriptor**: loading TOML descriptors from disk
//! - **cli**: the `modmeta inspect` binary

mod cli;
mod descriptor;
mod lifecycle;
mod variants;
