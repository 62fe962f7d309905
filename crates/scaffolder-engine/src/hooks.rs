//! Hook-based patching of already generated files
//!
//! A hook is a marker line in a target file. Fragments are inserted after (or
//! before) every line matching the hook, re-indented onto the hook's own
//! indentation. Patching is idempotent: a fragment already present in the
//! file, verbatim or in its re-indented form, is not inserted again.

use std::fs;
use std::io;
use std::path::Path;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::{Result, ScaffoldError};

/// Indentation added per nesting level when none is configured
pub const DEFAULT_INDENT_UNIT: &str = "  ";

/// How a hook pattern is compared against a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// The line must equal the pattern
    Exact,
    /// The line must end with the pattern, ignoring trailing whitespace
    #[default]
    Suffix,
}

/// Identifies the line(s) a fragment is anchored on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookAnchor {
    pattern: String,
    mode: MatchMode,
}

impl HookAnchor {
    /// Anchor on `pattern` with an explicit match mode
    pub fn new(pattern: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            pattern: pattern.into(),
            mode,
        }
    }

    /// Anchor on lines ending with `pattern`
    pub fn suffix(pattern: impl Into<String>) -> Self {
        Self::new(pattern, MatchMode::Suffix)
    }

    /// Anchor on lines equal to `pattern`
    pub fn exact(pattern: impl Into<String>) -> Self {
        Self::new(pattern, MatchMode::Exact)
    }

    /// The pattern text
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The match mode
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Whether `line` is an anchor line
    pub fn matches(&self, line: &str) -> bool {
        match self.mode {
            MatchMode::Exact => line == self.pattern,
            MatchMode::Suffix => line.trim_end().ends_with(&self.pattern),
        }
    }
}

/// Options for [`HookPatcher::patch`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchOptions {
    /// Insert the fragment before the anchor line instead of after it
    pub prepend: bool,
    /// Indent every fragment line one unit deeper than the anchor
    pub increase_indent: bool,
    /// Text appended to the anchor line itself, separated by a space
    pub add_before: Option<String>,
    /// Extra line emitted after the fragment at the anchor's indentation
    pub add_after: Option<String>,
    /// Do not warn when the target file is missing
    pub suppress_missing_file_warning: bool,
}

impl PatchOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert before the anchor
    pub fn prepend(mut self) -> Self {
        self.prepend = true;
        self
    }

    /// Indent one level deeper than the anchor
    pub fn increase_indent(mut self) -> Self {
        self.increase_indent = true;
        self
    }

    /// Append `text` to the anchor line
    pub fn add_before(mut self, text: impl Into<String>) -> Self {
        self.add_before = Some(text.into());
        self
    }

    /// Emit `text` after the fragment
    pub fn add_after(mut self, text: impl Into<String>) -> Self {
        self.add_after = Some(text.into());
        self
    }

    /// Stay quiet about missing targets
    pub fn suppress_missing_file_warning(mut self) -> Self {
        self.suppress_missing_file_warning = true;
        self
    }
}

/// Literal text to insert, with its own baseline indentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchFragment {
    text: String,
    baseline: String,
}

impl PatchFragment {
    /// Wrap `text`, computing the shortest leading whitespace among its
    /// non-blank lines
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let baseline = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(leading_whitespace)
            .min_by_key(|ws| ws.len())
            .unwrap_or_default()
            .to_string();
        Self { text, baseline }
    }

    /// Original text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Shortest leading whitespace among non-blank lines
    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    /// Re-home the fragment onto `indent`, dropping lines left blank
    pub fn reindent(&self, indent: &str) -> Vec<String> {
        self.text
            .lines()
            .map(|line| {
                let body = line.strip_prefix(self.baseline.as_str()).unwrap_or(line);
                format!("{}{}", indent, body.trim_end())
            })
            .filter(|line| !line.trim().is_empty())
            .collect()
    }
}

/// Result of patching content in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patched {
    /// New file content
    Updated(String),
    /// The fragment is already in the file; nothing to do
    AlreadyPresent,
    /// No line matched the anchor; nothing to do
    AnchorNotFound,
}

impl Patched {
    /// New content, or `existing` when nothing changed
    pub fn into_content(self, existing: &str) -> String {
        match self {
            Patched::Updated(content) => content,
            Patched::AlreadyPresent | Patched::AnchorNotFound => existing.to_string(),
        }
    }
}

/// Result of patching a file on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The file was rewritten
    Updated,
    /// The fragment was already present
    AlreadyPresent,
    /// No anchor line in the file
    AnchorNotFound,
    /// The target file does not exist
    FileNotFound,
}

fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start();
    &line[..line.len() - trimmed.len()]
}

fn finish(lines: &[String]) -> String {
    format!("{}\n", lines.join("\n").trim_end())
}

/// Inserts and replaces content around hook lines
#[derive(Debug, Clone)]
pub struct HookPatcher {
    indent_unit: String,
}

impl HookPatcher {
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

    fn target_indent(&self, anchor_line: &str, options: &PatchOptions) -> String {
        let mut indent = leading_whitespace(anchor_line).to_string();
        if options.increase_indent {
            indent.push_str(&self.indent_unit);
        }
        indent
    }

    /// Insert `fragment` around every line matching `anchor`
    pub fn patch(
        &self,
        existing: &str,
        fragment: &str,
        anchor: &HookAnchor,
        options: &PatchOptions,
    ) -> Patched {
        if existing.contains(fragment) {
            return Patched::AlreadyPresent;
        }

        let fragment = PatchFragment::new(fragment);
        let lines: Vec<&str> = existing.lines().collect();

        let anchors: Vec<&str> = lines.iter().copied().filter(|l| anchor.matches(l)).collect();
        if anchors.is_empty() {
            return Patched::AnchorNotFound;
        }

        // a previous run leaves the re-indented form behind
        let already_rendered = anchors.iter().any(|line| {
            let block = fragment.reindent(&self.target_indent(line, options));
            !block.is_empty() && existing.contains(&block.join("\n"))
        });
        if already_rendered {
            return Patched::AlreadyPresent;
        }

        let mut output: Vec<String> = Vec::with_capacity(lines.len() + fragment.text().lines().count());
        for line in lines {
            if !anchor.matches(line) {
                output.push(line.to_string());
                continue;
            }

            debug!(anchor = anchor.pattern(), "inserting fragment at hook");
            if let Some(add_before) = &options.add_before {
                output.push(format!("{} {}", line, add_before));
            } else if !options.prepend {
                output.push(line.to_string());
            }

            output.extend(fragment.reindent(&self.target_indent(line, options)));

            if let Some(add_after) = &options.add_after {
                output.push(format!("{}{}", leading_whitespace(line), add_after));
            }

            if options.prepend {
                output.push(line.to_string());
            }
        }

        Patched::Updated(finish(&output))
    }

    /// Patch the file at `path` in place
    ///
    /// A missing file is reported as [`PatchOutcome::FileNotFound`], with a
    /// warning unless suppressed. Other IO errors propagate.
    pub fn patch_file(
        &self,
        path: &Path,
        fragment: &str,
        anchor: &HookAnchor,
        options: &PatchOptions,
    ) -> Result<PatchOutcome> {
        let Some(existing) = read_target(path, options.suppress_missing_file_warning)? else {
            return Ok(PatchOutcome::FileNotFound);
        };

        match self.patch(&existing, fragment, anchor, options) {
            Patched::Updated(content) => {
                info!("Updating '{}'.", path.display());
                fs::write(path, content)?;
                Ok(PatchOutcome::Updated)
            }
            Patched::AlreadyPresent => {
                info!(
                    "No need to update '{}'. It already has '{}'.",
                    path.display(),
                    fragment
                );
                Ok(PatchOutcome::AlreadyPresent)
            }
            Patched::AnchorNotFound => {
                warn!(
                    "Couldn't find the hook '{}' in '{}'",
                    anchor.pattern(),
                    path.display()
                );
                Ok(PatchOutcome::AnchorNotFound)
            }
        }
    }

    /// Replace every occurrence of `in_place_of` with `replacement`, unless
    /// `replacement` is already present
    pub fn replace_line(&self, existing: &str, replacement: &str, in_place_of: &str) -> Patched {
        if existing.contains(replacement) {
            return Patched::AlreadyPresent;
        }
        if !existing.contains(in_place_of) {
            return Patched::AnchorNotFound;
        }
        Patched::Updated(existing.replace(in_place_of, replacement))
    }

    /// [`HookPatcher::replace_line`] against a file on disk
    pub fn replace_line_in_file(
        &self,
        path: &Path,
        replacement: &str,
        in_place_of: &str,
    ) -> Result<PatchOutcome> {
        let Some(existing) = read_target(path, false)? else {
            return Ok(PatchOutcome::FileNotFound);
        };

        match self.replace_line(&existing, replacement, in_place_of) {
            Patched::Updated(content) => {
                info!("Updating '{}'.", path.display());
                fs::write(path, content)?;
                Ok(PatchOutcome::Updated)
            }
            Patched::AlreadyPresent => {
                info!(
                    "No need to update '{}'. It already has '{}'.",
                    path.display(),
                    replacement
                );
                Ok(PatchOutcome::AlreadyPresent)
            }
            Patched::AnchorNotFound => Ok(PatchOutcome::AnchorNotFound),
        }
    }

    /// Unconditionally replace `before` with `after` in `path`
    ///
    /// With a `line_filter`, only lines matching that regex are rewritten.
    pub fn replace_in_file(
        &self,
        path: &Path,
        before: &str,
        after: &str,
        line_filter: Option<&str>,
    ) -> Result<()> {
        info!("Replacing in '{}'.", path.display());
        let existing = fs::read_to_string(path)?;
        let content = replace_in_content(&existing, before, after, line_filter)?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl Default for HookPatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory form of [`HookPatcher::replace_in_file`]
pub fn replace_in_content(
    existing: &str,
    before: &str,
    after: &str,
    line_filter: Option<&str>,
) -> Result<String> {
    let Some(filter) = line_filter else {
        return Ok(existing.replace(before, after));
    };

    let filter = Regex::new(filter).map_err(|source| ScaffoldError::InvalidPattern {
        pattern: filter.to_string(),
        source,
    })?;

    Ok(existing
        .split_inclusive('\n')
        .map(|line| {
            if filter.is_match(line) {
                line.replace(before, after)
            } else {
                line.to_string()
            }
        })
        .collect())
}

/// Read a patch target, mapping a missing file to `None`
fn read_target(path: &Path, suppress_warning: bool) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            if !suppress_warning {
                warn!("Couldn't find '{}'", path.display());
            }
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patcher() -> HookPatcher {
        HookPatcher::new()
    }

    #[test]
    fn test_anchor_modes() {
        let suffix = HookAnchor::suffix("# add methods above.");
        assert!(suffix.matches("  # add methods above.   "));
        assert!(!suffix.matches("  # add methods above. later"));

        let exact = HookAnchor::exact("end");
        assert!(exact.matches("end"));
        assert!(!exact.matches("  end"));
    }

    #[test]
    fn test_fragment_baseline() {
        let fragment = PatchFragment::new("    a\n  b\n\n      c\n");
        assert_eq!(fragment.baseline(), "  ");
        assert_eq!(
            fragment.reindent("\t"),
            vec!["\t  a".to_string(), "\tb".to_string(), "\t    c".to_string()]
        );
        assert_eq!(PatchFragment::new("").baseline(), "");
    }

    #[test]
    fn test_prepend_with_increased_indent() {
        let result = patcher().patch(
            "  end\n",
            "foo\nbar\n",
            &HookAnchor::suffix("end"),
            &PatchOptions::new().prepend().increase_indent(),
        );
        assert_eq!(result, Patched::Updated("    foo\n    bar\n  end\n".to_string()));
    }

    #[test]
    fn test_insert_after_anchor() {
        let existing = "class Order\n  # add methods above.\nend\n";
        let result = patcher().patch(
            existing,
            "def total\n  0\nend\n",
            &HookAnchor::suffix("# add methods above."),
            &PatchOptions::new(),
        );
        assert_eq!(
            result,
            Patched::Updated(
                "class Order\n  # add methods above.\n  def total\n    0\n  end\nend\n".to_string()
            )
        );
    }

    #[test]
    fn test_add_before_and_after() {
        let existing = "  resources :orders\n";
        let result = patcher().patch(
            existing,
            "resources :line_items\n",
            &HookAnchor::suffix("resources :orders"),
            &PatchOptions::new()
                .add_before("do")
                .add_after("end")
                .increase_indent(),
        );
        assert_eq!(
            result,
            Patched::Updated(
                "  resources :orders do\n    resources :line_items\n  end\n".to_string()
            )
        );
    }

    #[test]
    fn test_blank_fragment_lines_are_dropped() {
        let result = patcher().patch(
            "x\n# hook\n",
            "a\n\n   \nb\n",
            &HookAnchor::exact("# hook"),
            &PatchOptions::new().prepend(),
        );
        assert_eq!(result, Patched::Updated("x\na\nb\n# hook\n".to_string()));
    }

    #[test]
    fn test_verbatim_fragment_is_already_present() {
        let result = patcher().patch(
            "a\nfoo\n# hook\n",
            "foo",
            &HookAnchor::suffix("# hook"),
            &PatchOptions::new(),
        );
        assert_eq!(result, Patched::AlreadyPresent);
    }

    #[test]
    fn test_reindented_fragment_is_already_present() {
        let anchor = HookAnchor::suffix("end");
        let options = PatchOptions::new().prepend().increase_indent();
        let once = patcher()
            .patch("class A\n  end\n", "foo\nbar\n", &anchor, &options)
            .into_content("class A\n  end\n");
        assert_eq!(
            patcher().patch(&once, "foo\nbar\n", &anchor, &options),
            Patched::AlreadyPresent
        );
    }

    #[test]
    fn test_missing_anchor() {
        let result = patcher().patch("a\nb\n", "c", &HookAnchor::exact("z"), &PatchOptions::new());
        assert_eq!(result, Patched::AnchorNotFound);
    }

    #[test]
    fn test_every_matching_anchor_receives_fragment() {
        let result = patcher().patch(
            "# hook\n  # hook\n",
            "x",
            &HookAnchor::suffix("# hook"),
            &PatchOptions::new(),
        );
        assert_eq!(result, Patched::Updated("# hook\nx\n  # hook\n  x\n".to_string()));
    }

    #[test]
    fn test_custom_indent_unit() {
        let result = HookPatcher::with_indent_unit("\t").patch(
            "\tend\n",
            "x\n",
            &HookAnchor::suffix("end"),
            &PatchOptions::new().prepend().increase_indent(),
        );
        assert_eq!(result, Patched::Updated("\t\tx\n\tend\n".to_string()));
    }

    #[test]
    fn test_replace_line() {
        let patcher = patcher();
        assert_eq!(
            patcher.replace_line("a = 1\nb = 1\n", "a = 2", "a = 1"),
            Patched::Updated("a = 2\nb = 1\n".to_string())
        );
        assert_eq!(patcher.replace_line("a = 2\n", "a = 2", "a = 1"), Patched::AlreadyPresent);
        assert_eq!(patcher.replace_line("b\n", "a = 2", "a = 1"), Patched::AnchorNotFound);
    }

    #[test]
    fn test_replace_in_content_with_filter() {
        let content = "foo bar\nbaz bar\n";
        assert_eq!(
            replace_in_content(content, "bar", "qux", Some("^foo")).unwrap(),
            "foo qux\nbaz bar\n"
        );
        assert_eq!(
            replace_in_content(content, "bar", "qux", None).unwrap(),
            "foo qux\nbaz qux\n"
        );
        assert!(matches!(
            replace_in_content(content, "bar", "qux", Some("(")),
            Err(ScaffoldError::InvalidPattern { .. })
        ));
    }
}
