//! Key-path insertion into YAML documents
//!
//! The document is parsed once to confirm the key path resolves to a mapping,
//! then edited as raw lines so comments and key order survive.

use std::fs;
use std::path::Path;

use serde_yaml::Value;
use tracing::{debug, info};

use crate::error::Result;
use crate::hooks::{PatchFragment, PatchOutcome, Patched, DEFAULT_INDENT_UNIT};

fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start();
    &line[..line.len() - trimmed.len()]
}

fn is_ignorable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Whether `key_path` resolves to a mapping in `document`
pub fn path_is_mapping(document: &str, key_path: &[&str]) -> Result<bool> {
    let root: Value = serde_yaml::from_str(document)?;
    let mut node = &root;
    for key in key_path {
        match node.get(*key) {
            Some(child) => node = child,
            None => return Ok(false),
        }
    }
    Ok(node.is_mapping())
}

/// Inserts lines under a nested key of a YAML document
#[derive(Debug, Clone)]
pub struct ConfigPathPatcher {
    indent_unit: String,
}

impl ConfigPathPatcher {
    /// Patcher with two-space indentation
    pub fn new() -> Self {
        Self {
            indent_unit: DEFAULT_INDENT_UNIT.to_string(),
        }
    }

    /// Patcher with a custom indentation unit
    pub fn with_indent_unit(indent_unit: impl Into<String>) -> Self {
        Self {
            indent_unit: indent_unit.into(),
        }
    }

    /// Insert `content` as the first entry under `key_path`
    ///
    /// Returns [`Patched::AnchorNotFound`] when the path does not resolve to a
    /// mapping, and [`Patched::AlreadyPresent`] when the mapping already has
    /// the content as a direct child.
    pub fn insert_at_path(&self, document: &str, content: &str, key_path: &[&str]) -> Result<Patched> {
        if key_path.is_empty() || !path_is_mapping(document, key_path)? {
            debug!(path = ?key_path, "key path not found");
            return Ok(Patched::AnchorNotFound);
        }

        let lines: Vec<&str> = document.split_inclusive('\n').collect();
        let Some((anchor_index, anchor_indent)) = locate(&lines, key_path) else {
            return Ok(Patched::AnchorNotFound);
        };

        let indent = format!("{}{}", anchor_indent, self.indent_unit);
        let block = PatchFragment::new(content).reindent(&indent);
        if block.is_empty() {
            return Ok(Patched::AlreadyPresent);
        }

        let children: Vec<&str> = lines[anchor_index + 1..]
            .iter()
            .take_while(|line| {
                is_ignorable(line) || leading_whitespace(line).len() > anchor_indent.len()
            })
            .map(|line| line.trim_end())
            .collect();
        if block.iter().all(|line| children.contains(&line.as_str())) {
            return Ok(Patched::AlreadyPresent);
        }

        let mut output = String::with_capacity(document.len() + content.len() + indent.len());
        for (index, line) in lines.iter().enumerate() {
            output.push_str(line);
            if index == anchor_index {
                if !line.ends_with('\n') {
                    output.push('\n');
                }
                for inserted in &block {
                    output.push_str(inserted);
                    output.push('\n');
                }
            }
        }
        Ok(Patched::Updated(output))
    }

    /// [`ConfigPathPatcher::insert_at_path`] against a file on disk
    pub fn insert_at_path_in_file(&self, path: &Path, content: &str, key_path: &[&str]) -> Result<PatchOutcome> {
        let document = fs::read_to_string(path)?;
        match self.insert_at_path(&document, content, key_path)? {
            Patched::Updated(updated) => {
                info!("Updating '{}'.", path.display());
                fs::write(path, updated)?;
                Ok(PatchOutcome::Updated)
            }
            Patched::AlreadyPresent => Ok(PatchOutcome::AlreadyPresent),
            Patched::AnchorNotFound => Ok(PatchOutcome::AnchorNotFound),
        }
    }
}

impl Default for ConfigPathPatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk the raw lines, matching one path segment per nesting level
///
/// Only direct children of the last matched key are compared against the
/// next segment; their indentation is taken from the first child line.
/// Returns the index and indentation of the line for the final segment.
fn locate<'d>(lines: &[&'d str], key_path: &[&str]) -> Option<(usize, &'d str)> {
    let mut segments = key_path.iter();
    let mut needle = segments.next()?;
    let mut anchor: Option<(usize, &'d str)> = None;
    let mut child_indent: Option<usize> = Some(0);

    for (index, line) in lines.iter().copied().enumerate() {
        if is_ignorable(line) {
            continue;
        }
        let indent = leading_whitespace(line);
        if let Some((_, anchor_indent)) = anchor {
            // left the block of the last matched key
            if indent.len() <= anchor_indent.len() {
                return None;
            }
        }

        let level = *child_indent.get_or_insert(indent.len());
        if indent.len() > level {
            continue;
        }
        if indent.len() < level {
            return None;
        }

        if line.trim() == format!("{}:", needle) {
            anchor = Some((index, indent));
            match segments.next() {
                Some(next) => {
                    needle = next;
                    child_indent = None;
                }
                None => return anchor,
            }
        }
    }
    None
}
