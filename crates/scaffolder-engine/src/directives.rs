//! Directive processing for template files
//!
//! Templates carry structural markers as comments. A single pass over the
//! template's lines interprets them:
//!
//! - [`markers::SKIP_LINE`] drops its own line
//! - [`markers::SKIP_SECTION`] drops everything up to [`markers::STOP_SKIPPING`]
//! - [`markers::SKIP_SECTION_IF_ROOT_OWNED`] does the same, but only when the
//!   immediate parent is the root owner
//! - [`markers::START_REPEAT`] … [`markers::STOP_REPEAT`] captures a block that
//!   is emitted once per link of the ancestor chain
//! - lines containing [`markers::REMOVE_IN_OUTPUT`] are dropped
//! - lines containing [`markers::PROTECTED`] bypass naming substitution
//!
//! All other lines go through the [`NamingTransformer`].

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::DirectiveError;
use crate::naming::{ClassName, ConceptPair, NamingTransformer};

/// Marker strings shared with template authors. They are matched verbatim.
pub mod markers {
    /// Drop this line
    pub const SKIP_LINE: &str = "# 🚅 skip when scaffolding.";
    /// Start skipping when the parent is the root owner
    pub const SKIP_SECTION_IF_ROOT_OWNED: &str =
        "# 🚅 skip this section if resource is nested directly under team.";
    /// Start skipping unconditionally
    pub const SKIP_SECTION: &str = "# 🚅 skip this section when scaffolding.";
    /// Stop skipping
    pub const STOP_SKIPPING: &str = "# 🚅 stop any skipping we're doing now.";
    /// Open a repeat block
    pub const START_REPEAT: &str = "# 🚅 for each child resource from team down to the resource we're scaffolding, repeat the following:";
    /// Close a repeat block
    pub const STOP_REPEAT: &str = "# 🚅 stop repeating.";
    /// Drop this line from generated output
    pub const REMOVE_IN_OUTPUT: &str = "remove in scaffolded files.";
    /// Exempt this line from naming substitution
    pub const PROTECTED: &str = "🔒";
}

/// Concept that owns everything when no other parent is configured
pub const DEFAULT_ROOT_OWNER: &str = "Team";

fn protected_comment_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\s+?#\s+🔒.*").expect("Invalid regex"))
}

/// Remove a trailing `# 🔒 …` comment from a protected line
pub fn strip_protected_comment(line: &str) -> String {
    protected_comment_regex().replace_all(line, "").into_owned()
}

/// Per-call state of the directive state machine
#[derive(Debug)]
enum Mode<'t> {
    Emitting,
    Repeating {
        opened_at: usize,
        buffer: Vec<&'t str>,
    },
}

#[derive(Debug)]
struct DirectiveState<'t> {
    mode: Mode<'t>,
    skipping: bool,
    output: Vec<String>,
}

/// Turns template text into generated content for one concept pair
#[derive(Debug, Clone)]
pub struct DirectiveProcessor {
    transformer: NamingTransformer,
    ancestors: Vec<String>,
    root_owner: ClassName,
}

impl DirectiveProcessor {
    /// Create a processor for `pair`
    ///
    /// `parents` lists the ancestors nearest first, ending at the root owner.
    /// When empty, the pair's own parent is the only ancestor.
    pub fn new(pair: ConceptPair, parents: Vec<String>) -> Self {
        let ancestors = if parents.is_empty() {
            vec![pair.parent().to_string()]
        } else {
            parents
        };
        Self {
            transformer: NamingTransformer::new(pair),
            ancestors,
            root_owner: ClassName::parse(DEFAULT_ROOT_OWNER),
        }
    }

    /// Override the concept that triggers [`markers::SKIP_SECTION_IF_ROOT_OWNED`]
    pub fn with_root_owner(mut self, root_owner: &str) -> Self {
        self.root_owner = ClassName::parse(root_owner);
        self
    }

    /// Transformer for the main pair
    pub fn transformer(&self) -> &NamingTransformer {
        &self.transformer
    }

    fn pair(&self) -> &ConceptPair {
        self.transformer.pair()
    }

    fn parent_is_root_owner(&self) -> bool {
        *self.pair().parent() == self.root_owner
    }

    /// Process a whole template
    ///
    /// The result is trimmed of trailing whitespace and ends with exactly one
    /// newline.
    pub fn process(&self, template: &str) -> Result<String, DirectiveError> {
        let mut state = DirectiveState {
            mode: Mode::Emitting,
            skipping: false,
            output: Vec::new(),
        };

        for (index, line) in template.split_inclusive('\n').enumerate() {
            self.step(&mut state, index + 1, line)?;
        }

        if let Mode::Repeating { opened_at, .. } = state.mode {
            return Err(DirectiveError::UnterminatedRepeat { opened_at });
        }

        let content = state.output.concat();
        Ok(format!("{}\n", content.trim_end()))
    }

    fn step<'t>(
        &self,
        state: &mut DirectiveState<'t>,
        line_number: usize,
        line: &'t str,
    ) -> Result<(), DirectiveError> {
        if let Mode::Repeating { opened_at, buffer } = &mut state.mode {
            if line.contains(markers::STOP_REPEAT) {
                let block = buffer.concat();
                self.expand_repeat(&block, &mut state.output);
                state.mode = Mode::Emitting;
            } else if line.contains(markers::START_REPEAT) {
                return Err(DirectiveError::NestedRepeat {
                    line: line_number,
                    opened_at: *opened_at,
                });
            } else {
                buffer.push(line);
            }
            return Ok(());
        }

        if line.contains(markers::SKIP_LINE) {
            return Ok(());
        }
        if line.contains(markers::SKIP_SECTION_IF_ROOT_OWNED) {
            if self.parent_is_root_owner() {
                debug!(line = line_number, "skipping section nested under root owner");
                state.skipping = true;
            }
            return Ok(());
        }
        if line.contains(markers::SKIP_SECTION) {
            state.skipping = true;
            return Ok(());
        }
        if line.contains(markers::STOP_SKIPPING) {
            state.skipping = false;
            return Ok(());
        }
        if state.skipping {
            return Ok(());
        }

        if line.contains(markers::START_REPEAT) {
            state.mode = Mode::Repeating {
                opened_at: line_number,
                buffer: Vec::new(),
            };
            return Ok(());
        }
        if line.contains(markers::STOP_REPEAT) {
            return Err(DirectiveError::UnmatchedStopRepeat { line: line_number });
        }
        if line.contains(markers::REMOVE_IN_OUTPUT) {
            return Ok(());
        }

        let emitted = if line.contains(markers::PROTECTED) {
            strip_protected_comment(line)
        } else {
            self.transformer.transform(line)
        };
        state.output.push(emitted);
        Ok(())
    }

    /// Emit one transformed copy of `block` per adjacent ancestor link,
    /// starting from the root owner.
    fn expand_repeat(&self, block: &str, output: &mut Vec<String>) {
        let child = self.pair().child().to_string();
        let mut chain: Vec<&str> = std::iter::once(child.as_str())
            .chain(self.ancestors.iter().map(String::as_str))
            .collect();
        chain.reverse();

        for link in chain.windows(2) {
            let (parent, child) = (link[0], link[1]);
            debug!(child, parent, "expanding repeat block");
            let link_transformer = NamingTransformer::new(self.pair().relink(child, parent));
            output.push(link_transformer.transform(block));
        }
    }
}
