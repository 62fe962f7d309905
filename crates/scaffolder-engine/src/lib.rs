#![warn(missing_docs)]

//! Scaffolder engine: template transformation and source patching
//!
//! Templates are written against a canonical placeholder pair of concepts.
//! This crate rewrites them for a target pair and patches existing files so
//! the new concept is wired in.
//!
//! # Components
//!
//! - [`naming`]: the naming transformer and its substitution table
//! - [`directives`]: template directive processing, including repeat blocks
//! - [`hooks`]: idempotent insertion of fragments at hook lines
//! - [`yaml_path`]: insertion under a nested YAML key path
//! - [`scaffolder`]: the facade tying templates, naming and patching together
//!
//! # Example
//!
//! ```
//! use scaffolder_engine::naming::{transform, ConceptPair};
//!
//! let pair = ConceptPair::new("Order", "Team");
//! assert_eq!(
//!     transform("class Scaffolding::CompletelyConcrete::TangibleThing", &pair),
//!     "class Order"
//! );
//! ```

pub mod config;
pub mod directives;
pub mod error;
pub mod hooks;
pub mod naming;
pub mod scaffolder;
pub mod templates;
pub mod yaml_path;

pub use self::config::{ConfigManager, ScaffoldConfig};
pub use directives::{DirectiveProcessor, DEFAULT_ROOT_OWNER};
pub use error::{ConfigError, DirectiveError, Result, ScaffoldError};
pub use hooks::{HookAnchor, HookPatcher, MatchMode, PatchFragment, PatchOptions, PatchOutcome, Patched};
pub use naming::{ClassName, ConceptPair, NamingTransformer};
pub use scaffolder::Scaffolder;
pub use templates::TemplateResolver;
pub use yaml_path::ConfigPathPatcher;
