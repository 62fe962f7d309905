//! Error types for the scaffolding engine

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the engine
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Errors that can occur while generating or patching files
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// No template root contains the requested file
    #[error(
        "Couldn't find the template for `{}` in any of the following locations:\n\n{}",
        .path.display(),
        format_roots(.searched)
    )]
    TemplateNotFound {
        /// Template path relative to the roots
        path: PathBuf,
        /// Every root that was searched, in lookup order
        searched: Vec<PathBuf>,
    },

    /// A template's directive markers are structurally unbalanced
    #[error("Directive error in {template}: {source}")]
    Directive {
        /// Template that failed
        template: String,
        /// Underlying structural error
        #[source]
        source: DirectiveError,
    },

    /// A scaffold was requested without any owning concept
    #[error("`{child}` needs at least one parent to be scaffolded under")]
    MissingParent {
        /// The child concept
        child: String,
    },

    /// A line filter or anchor could not be compiled
    #[error("Invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The pattern text
        pattern: String,
        /// Regex compilation error
        #[source]
        source: regex::Error,
    },

    /// YAML document could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_roots(roots: &[PathBuf]) -> String {
    roots
        .iter()
        .map(|root| root.display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Structural errors in the directive stream of a template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    /// A stop-repeat marker appeared outside any repeat block
    #[error("stop-repeat marker on line {line} has no matching start-repeat marker")]
    UnmatchedStopRepeat {
        /// 1-based line number of the marker
        line: usize,
    },

    /// A start-repeat marker appeared inside an open repeat block
    #[error("start-repeat marker on line {line} is nested inside the repeat block opened on line {opened_at}")]
    NestedRepeat {
        /// 1-based line number of the nested marker
        line: usize,
        /// 1-based line number of the enclosing start marker
        opened_at: usize,
    },

    /// End of input reached with a repeat block still open
    #[error("repeat block opened on line {opened_at} is never closed")]
    UnterminatedRepeat {
        /// 1-based line number of the start marker
        opened_at: usize,
    },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying loader failed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Loaded values are not acceptable
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
