//! Substitution table and the naming transformer built on it
//!
//! Templates are written against a canonical placeholder pair: the child
//! `Scaffolding::CompletelyConcrete::TangibleThing` owned by the parent
//! `Scaffolding::AbsolutelyAbstract::CreativeConcept`, in the `account`
//! namespace. Every lexical rendering of that pair is a needle, and each
//! needle is rewritten to the matching rendering of the target pair.
//!
//! All needles are matched in one leftmost-first scan, with earlier table
//! entries winning ties, so replacement text is never rescanned by a later,
//! shorter needle.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::trace;

use super::concept::{ClassName, ConceptPair};

/// Which side of the pair a needle refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The owning concept (`CreativeConcept`)
    Parent,
    /// The scaffolded concept (`TangibleThing`)
    Child,
}

/// How much of the class name a needle spells out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Fully namespaced class name
    Full,
    /// Class name relative to the other side of the pair
    InContext,
    /// Final segment only
    Bare,
}

/// Grammatical number of a needle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Number {
    /// `tangible_things`
    Plural,
    /// `tangible_thing`
    Singular,
}

/// Lexical rendering of a needle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    /// `Scaffolding::CompletelyConcrete::TangibleThing`
    ClassName,
    /// `scaffolding/completely_concrete/tangible_thing`
    Path,
    /// `scaffolding/completely_concrete/_tangible_things`
    PartialPath,
    /// `scaffolding_completely_concrete_tangible_thing`
    Flat,
    /// `scaffolding-completely-concrete-tangible-thing`
    Kebab,
    /// `Tangible Thing`
    Title,
}

/// What a needle stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    /// A rendering of the child or parent class
    Concept {
        /// Child or parent
        role: Role,
        /// Namespaced, in context, or bare
        scope: Scope,
        /// Plural or singular
        number: Number,
        /// Lexical rendering
        rendering: Rendering,
    },
    /// `:account` symbol
    NamespaceSymbol,
    /// `/account/` path segment
    NamespacePath,
}

const fn concept(role: Role, scope: Scope, number: Number, rendering: Rendering) -> Form {
    Form::Concept {
        role,
        scope,
        number,
        rendering,
    }
}

use Number::{Plural, Singular};
use Rendering::{ClassName as Class, Flat, Kebab, PartialPath, Path, Title};
use Role::{Child, Parent};
use Scope::{Bare, Full, InContext};

/// Canonical needles, most specific first
pub const NEEDLES: &[(&str, Form)] = &[
    // full class name plural.
    ("Scaffolding::AbsolutelyAbstract::CreativeConcepts", concept(Parent, Full, Plural, Class)),
    ("Scaffolding::CompletelyConcrete::TangibleThings", concept(Child, Full, Plural, Class)),
    ("scaffolding/absolutely_abstract/creative_concepts", concept(Parent, Full, Plural, Path)),
    ("scaffolding/completely_concrete/tangible_things", concept(Child, Full, Plural, Path)),
    ("scaffolding/completely_concrete/_tangible_things", concept(Child, Full, Plural, PartialPath)),
    ("scaffolding_absolutely_abstract_creative_concepts", concept(Parent, Full, Plural, Flat)),
    ("scaffolding_completely_concrete_tangible_things", concept(Child, Full, Plural, Flat)),
    ("scaffolding-absolutely-abstract-creative-concepts", concept(Parent, Full, Plural, Kebab)),
    ("scaffolding-completely-concrete-tangible-things", concept(Child, Full, Plural, Kebab)),
    // full class name singular.
    ("Scaffolding::AbsolutelyAbstract::CreativeConcept", concept(Parent, Full, Singular, Class)),
    ("Scaffolding::CompletelyConcrete::TangibleThing", concept(Child, Full, Singular, Class)),
    ("scaffolding/absolutely_abstract/creative_concept", concept(Parent, Full, Singular, Path)),
    ("scaffolding/completely_concrete/tangible_thing", concept(Child, Full, Singular, Path)),
    ("scaffolding_absolutely_abstract_creative_concept", concept(Parent, Full, Singular, Flat)),
    ("scaffolding_completely_concrete_tangible_thing", concept(Child, Full, Singular, Flat)),
    ("scaffolding-absolutely-abstract-creative-concept", concept(Parent, Full, Singular, Kebab)),
    ("scaffolding-completely-concrete-tangible-thing", concept(Child, Full, Singular, Kebab)),
    // class name in context plural.
    ("absolutely_abstract_creative_concepts", concept(Parent, InContext, Plural, Flat)),
    ("completely_concrete_tangible_things", concept(Child, InContext, Plural, Flat)),
    ("absolutely_abstract/creative_concepts", concept(Parent, InContext, Plural, Path)),
    ("completely_concrete/tangible_things", concept(Child, InContext, Plural, Path)),
    ("absolutely-abstract-creative-concepts", concept(Parent, InContext, Plural, Kebab)),
    ("completely-concrete-tangible-things", concept(Child, InContext, Plural, Kebab)),
    // class name in context singular.
    ("absolutely_abstract_creative_concept", concept(Parent, InContext, Singular, Flat)),
    ("completely_concrete_tangible_thing", concept(Child, InContext, Singular, Flat)),
    ("absolutely_abstract/creative_concept", concept(Parent, InContext, Singular, Path)),
    ("completely_concrete/tangible_thing", concept(Child, InContext, Singular, Path)),
    ("absolutely-abstract-creative-concept", concept(Parent, InContext, Singular, Kebab)),
    ("completely-concrete-tangible-thing", concept(Child, InContext, Singular, Kebab)),
    // just class name plural.
    ("creative_concepts", concept(Parent, Bare, Plural, Flat)),
    ("tangible_things", concept(Child, Bare, Plural, Flat)),
    ("creative-concepts", concept(Parent, Bare, Plural, Kebab)),
    ("tangible-things", concept(Child, Bare, Plural, Kebab)),
    ("Creative Concepts", concept(Parent, Bare, Plural, Title)),
    ("Tangible Things", concept(Child, Bare, Plural, Title)),
    // just class name singular.
    ("creative_concept", concept(Parent, Bare, Singular, Flat)),
    ("tangible_thing", concept(Child, Bare, Singular, Flat)),
    ("creative-concept", concept(Parent, Bare, Singular, Kebab)),
    ("tangible-thing", concept(Child, Bare, Singular, Kebab)),
    ("Creative Concept", concept(Parent, Bare, Singular, Title)),
    ("Tangible Thing", concept(Child, Bare, Singular, Title)),
    // account namespace vs. others.
    (":account", Form::NamespaceSymbol),
    ("/account/", Form::NamespacePath),
];

/// One compiled matcher for the whole needle set, in table order
fn needle_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        let alternation = NEEDLES
            .iter()
            .map(|(needle, _)| regex::escape(needle))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&alternation).expect("Invalid regex")
    })
}

fn render(class: &ClassName, rendering: Rendering) -> String {
    match rendering {
        Rendering::ClassName => class.to_string(),
        Rendering::Path => class.underscore(),
        Rendering::PartialPath => class.partial_path(),
        Rendering::Flat => class.flat(),
        Rendering::Kebab => class.kebab(),
        Rendering::Title => class.title(),
    }
}

/// Replacement for one needle form under `pair`
pub fn replacement_for(form: Form, pair: &ConceptPair) -> String {
    match form {
        Form::NamespaceSymbol => format!(":{}", pair.namespace()),
        Form::NamespacePath => format!("/{}/", pair.namespace()),
        Form::Concept {
            role,
            scope,
            number,
            rendering,
        } => {
            let class = match (role, scope) {
                (Role::Child, Scope::InContext) => pair.child_in_context(),
                (Role::Parent, Scope::InContext) => pair.parent_in_context(),
                (Role::Child, _) => pair.child().clone(),
                (Role::Parent, _) => pair.parent().clone(),
            };
            let class = match number {
                Number::Plural => class.pluralized(),
                Number::Singular => class,
            };
            match (scope, rendering) {
                (Scope::Bare, Rendering::Flat) => class.bare(),
                (Scope::Bare, Rendering::Kebab) => class.bare_kebab(),
                (_, rendering) => render(&class, rendering),
            }
        }
    }
}

/// Needle → replacement map for one concept pair
#[derive(Debug, Clone)]
pub struct SubstitutionTable {
    entries: Vec<(&'static str, String)>,
    lookup: HashMap<&'static str, usize>,
}

impl SubstitutionTable {
    /// Compute every replacement for `pair`
    pub fn for_pair(pair: &ConceptPair) -> Self {
        let entries: Vec<(&'static str, String)> = NEEDLES
            .iter()
            .map(|(needle, form)| (*needle, replacement_for(*form, pair)))
            .collect();
        let lookup = entries
            .iter()
            .enumerate()
            .map(|(index, (needle, _))| (*needle, index))
            .collect();
        Self { entries, lookup }
    }

    /// Entries in registration order
    pub fn entries(&self) -> &[(&'static str, String)] {
        &self.entries
    }

    /// Replacement registered for `needle`
    pub fn get(&self, needle: &str) -> Option<&str> {
        self.lookup
            .get(needle)
            .map(|&index| self.entries[index].1.as_str())
    }

    /// Number of needles
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no needles
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rewrites canonical placeholder text into a concrete concept pair
#[derive(Debug, Clone)]
pub struct NamingTransformer {
    pair: ConceptPair,
    table: SubstitutionTable,
}

impl NamingTransformer {
    /// Build the transformer for `pair`
    pub fn new(pair: ConceptPair) -> Self {
        let table = SubstitutionTable::for_pair(&pair);
        Self { pair, table }
    }

    /// The pair this transformer targets
    pub fn pair(&self) -> &ConceptPair {
        &self.pair
    }

    /// The substitution table in use
    pub fn table(&self) -> &SubstitutionTable {
        &self.table
    }

    /// Replace every needle occurrence in `text`
    ///
    /// Never fails: text without needles is returned unchanged.
    pub fn transform(&self, text: &str) -> String {
        needle_regex()
            .replace_all(text, |caps: &Captures<'_>| {
                let needle = &caps[0];
                trace!(needle, "substituting");
                self.table.get(needle).unwrap_or(needle).to_string()
            })
            .into_owned()
    }
}

/// Convenience wrapper for one-off transformations
pub fn transform(text: &str, pair: &ConceptPair) -> String {
    NamingTransformer::new(pair.clone()).transform(text)
}
