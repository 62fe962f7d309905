//! Concept pairs and the lexical forms derived from them

use std::fmt;

use heck::{ToPascalCase, ToSnakeCase, ToTitleCase};

use super::inflection::{pluralize, singularize};

/// Namespace used when none is configured
pub const DEFAULT_NAMESPACE: &str = "account";

/// A `::`-separated class name such as `Projects::Deliverable`
///
/// Each segment is kept in PascalCase. Human noun phrases are accepted on
/// construction, so `Tangible Thing` and `tangible_thing` both parse to
/// `TangibleThing`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassName {
    segments: Vec<String>,
}

impl ClassName {
    /// Parse a class name or noun phrase
    pub fn parse(input: &str) -> Self {
        let segments = input
            .split("::")
            .flat_map(|part| part.split('/'))
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.to_pascal_case())
            .collect();
        Self { segments }
    }

    fn from_segments(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Final segment, e.g. `Deliverable`
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Namespace segments preceding the name
    pub fn namespace(&self) -> &[String] {
        match self.segments.split_last() {
            Some((_, namespace)) => namespace,
            None => &[],
        }
    }

    /// Same class name with the final word pluralised
    pub fn pluralized(&self) -> Self {
        self.map_name(pluralize)
    }

    /// Same class name with the final word singularised
    pub fn singularized(&self) -> Self {
        self.map_name(singularize)
    }

    fn map_name(&self, f: fn(&str) -> String) -> Self {
        let mut segments = self.segments.clone();
        if let Some(last) = segments.last_mut() {
            *last = f(last);
        }
        Self { segments }
    }

    /// `Projects::Deliverable` → `projects/deliverable`
    pub fn underscore(&self) -> String {
        self.segments
            .iter()
            .map(|segment| segment.to_snake_case())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// `Projects::Deliverable` → `projects/_deliverable`
    pub fn partial_path(&self) -> String {
        let mut parts: Vec<String> = self.segments.iter().map(|s| s.to_snake_case()).collect();
        if let Some(last) = parts.last_mut() {
            last.insert(0, '_');
        }
        parts.join("/")
    }

    /// `Projects::Deliverable` → `projects_deliverable`
    pub fn flat(&self) -> String {
        self.underscore().replace('/', "_")
    }

    /// `Projects::Deliverable` → `projects-deliverable`
    pub fn kebab(&self) -> String {
        self.underscore().replace(['/', '_'], "-")
    }

    /// Bare snake-case name, e.g. `deliverable`
    pub fn bare(&self) -> String {
        self.name().to_snake_case()
    }

    /// Bare kebab-case name, e.g. `tangible-thing`
    pub fn bare_kebab(&self) -> String {
        self.bare().replace('_', "-")
    }

    /// Human-readable title, e.g. `Tangible Thing`
    pub fn title(&self) -> String {
        self.name().to_title_case()
    }

    /// Strip the namespace segments this class shares with `other`
    fn without_shared_namespace(&self, other: &ClassName) -> Vec<String> {
        let shared = self
            .namespace()
            .iter()
            .zip(other.namespace())
            .take_while(|(a, b)| a == b)
            .count();
        self.segments[shared..].to_vec()
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("::"))
    }
}

/// The (child, parent, namespace) triple one scaffold operation works on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptPair {
    child: ClassName,
    parent: ClassName,
    namespace: String,
}

impl ConceptPair {
    /// Create a pair in the default namespace
    pub fn new(child: &str, parent: &str) -> Self {
        Self::with_namespace(child, parent, DEFAULT_NAMESPACE)
    }

    /// Create a pair in an explicit namespace
    pub fn with_namespace(child: &str, parent: &str, namespace: &str) -> Self {
        Self {
            child: ClassName::parse(child),
            parent: ClassName::parse(parent),
            namespace: namespace.trim().to_snake_case(),
        }
    }

    /// The child class, singular
    pub fn child(&self) -> &ClassName {
        &self.child
    }

    /// The parent class, singular
    pub fn parent(&self) -> &ClassName {
        &self.parent
    }

    /// Route/module namespace token, e.g. `account`
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Child class as seen from inside the parent
    ///
    /// Shared namespace segments are dropped, as is a leading segment named
    /// after the pluralised parent: `Projects::Deliverable` under `Project`
    /// becomes `Deliverable`.
    pub fn child_in_context(&self) -> ClassName {
        let mut segments = self.child.without_shared_namespace(&self.parent);
        let parent_plural = pluralize(self.parent.name());
        if segments.len() > 1 && segments[0] == parent_plural {
            segments.remove(0);
        }
        ClassName::from_segments(segments)
    }

    /// Parent class as seen from inside the child's namespace
    pub fn parent_in_context(&self) -> ClassName {
        ClassName::from_segments(self.parent.without_shared_namespace(&self.child))
    }

    /// Pair used for one link of an ancestor chain, keeping this namespace
    pub fn relink(&self, child: &str, parent: &str) -> Self {
        Self::with_namespace(child, parent, &self.namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_noun_phrase() {
        assert_eq!(ClassName::parse("Tangible Thing").to_string(), "TangibleThing");
        assert_eq!(ClassName::parse("tangible_thing").to_string(), "TangibleThing");
        assert_eq!(
            ClassName::parse("Projects::Deliverable").to_string(),
            "Projects::Deliverable"
        );
    }

    #[test]
    fn test_path_forms() {
        let class = ClassName::parse("Scaffolding::CompletelyConcrete::TangibleThing");
        assert_eq!(class.underscore(), "scaffolding/completely_concrete/tangible_thing");
        assert_eq!(class.partial_path(), "scaffolding/completely_concrete/_tangible_thing");
        assert_eq!(class.flat(), "scaffolding_completely_concrete_tangible_thing");
        assert_eq!(class.kebab(), "scaffolding-completely-concrete-tangible-thing");
        assert_eq!(class.bare(), "tangible_thing");
        assert_eq!(class.bare_kebab(), "tangible-thing");
        assert_eq!(class.title(), "Tangible Thing");
    }

    #[test]
    fn test_pluralized_keeps_namespace() {
        let class = ClassName::parse("Projects::Deliverable");
        assert_eq!(class.pluralized().to_string(), "Projects::Deliverables");
        assert_eq!(class.pluralized().singularized(), class);
    }

    #[test]
    fn test_child_in_context_drops_parent_namespace() {
        let pair = ConceptPair::new("Projects::Deliverable", "Project");
        assert_eq!(pair.child_in_context().to_string(), "Deliverable");
        assert_eq!(pair.parent_in_context().to_string(), "Project");
    }

    #[test]
    fn test_in_context_drops_shared_namespace() {
        let pair = ConceptPair::new("Billing::Invoice", "Billing::Customer");
        assert_eq!(pair.child_in_context().to_string(), "Invoice");
        assert_eq!(pair.parent_in_context().to_string(), "Customer");
    }

    #[test]
    fn test_unrelated_namespaces_are_kept() {
        let pair = ConceptPair::new("Orders::Line", "Account");
        assert_eq!(pair.child_in_context().to_string(), "Orders::Line");
    }

    #[test]
    fn test_namespace_normalised() {
        let pair = ConceptPair::with_namespace("Order", "Account", "Admin");
        assert_eq!(pair.namespace(), "admin");
        assert_eq!(ConceptPair::new("Order", "Team").namespace(), DEFAULT_NAMESPACE);
    }
}
