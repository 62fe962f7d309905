//! Template corpus lookup across ordered roots
//!
//! The application's own root is searched first, followed by roots
//! registered by libraries, so an application can override any template.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, ScaffoldError};

/// Resolves relative template paths against an ordered list of roots
#[derive(Debug, Clone, Default)]
pub struct TemplateResolver {
    roots: Vec<PathBuf>,
}

impl TemplateResolver {
    /// Resolver over `roots`, searched in order
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Register an additional root, searched after the existing ones
    pub fn add_root(&mut self, root: impl Into<PathBuf>) {
        self.roots.push(root.into());
    }

    /// Roots in lookup order
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// First existing `root/relative` path
    pub fn resolve(&self, relative: impl AsRef<Path>) -> Result<PathBuf> {
        let relative = relative.as_ref();
        for root in &self.roots {
            let candidate = root.join(relative);
            if candidate.exists() {
                debug!(template = %candidate.display(), "resolved template");
                return Ok(candidate);
            }
        }
        Err(ScaffoldError::TemplateNotFound {
            path: relative.to_path_buf(),
            searched: self.roots.clone(),
        })
    }
}
