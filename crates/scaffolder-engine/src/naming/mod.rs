//! Naming-convention substitution
//!
//! Provides the concept pair model, English inflection and the substitution
//! table that rewrites canonical placeholder text into a target pair.

pub mod concept;
pub mod inflection;
pub mod table;

pub use concept::{ClassName, ConceptPair, DEFAULT_NAMESPACE};
pub use inflection::{pluralize, singularize};
pub use table::{transform, Form, NamingTransformer, SubstitutionTable, NEEDLES};
