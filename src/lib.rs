//! Shared helpers for the workspace integration tests and benchmarks

use std::path::PathBuf;

/// The sample template corpus shipped with the workspace
pub fn templates_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
}
