//! Scaffolding facade
//!
//! Binds a concept pair, its ancestor chain, the template corpus and the
//! patchers for one scaffold invocation.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::ScaffoldConfig;
use crate::directives::DirectiveProcessor;
use crate::error::{Result, ScaffoldError};
use crate::hooks::{HookAnchor, HookPatcher, PatchOptions, PatchOutcome};
use crate::naming::{ConceptPair, NamingTransformer};
use crate::templates::TemplateResolver;
use crate::yaml_path::ConfigPathPatcher;

/// Generates and patches files for one child concept
#[derive(Debug, Clone)]
pub struct Scaffolder {
    processor: DirectiveProcessor,
    resolver: TemplateResolver,
    config: ScaffoldConfig,
    output_root: PathBuf,
    hooks: HookPatcher,
    yaml: ConfigPathPatcher,
}

impl Scaffolder {
    /// Scaffolder for `child` owned by `parents` (nearest first)
    ///
    /// Output is written relative to the current directory.
    pub fn new(child: &str, parents: &[String], config: ScaffoldConfig) -> Result<Self> {
        config.validate()?;
        let Some(parent) = parents.first() else {
            return Err(ScaffoldError::MissingParent {
                child: child.to_string(),
            });
        };

        let pair = ConceptPair::with_namespace(child, parent, &config.namespace);
        let processor =
            DirectiveProcessor::new(pair, parents.to_vec()).with_root_owner(&config.root_owner);

        Ok(Self {
            processor,
            resolver: TemplateResolver::new(config.template_roots.clone()),
            hooks: HookPatcher::with_indent_unit(config.indent_unit.clone()),
            yaml: ConfigPathPatcher::with_indent_unit(config.indent_unit.clone()),
            output_root: PathBuf::from("."),
            config,
        })
    }

    /// Write generated files under `output_root`
    pub fn with_output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
        self.output_root = output_root.into();
        self
    }

    /// The concept pair being scaffolded
    pub fn pair(&self) -> &ConceptPair {
        self.transformer().pair()
    }

    /// Template lookup
    pub fn resolver(&self) -> &TemplateResolver {
        &self.resolver
    }

    /// Effective configuration
    pub fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    fn transformer(&self) -> &NamingTransformer {
        self.processor.transformer()
    }

    /// Apply the naming transform to arbitrary text
    pub fn transform_string(&self, text: &str) -> String {
        self.transformer().transform(text)
    }

    fn target_path(&self, template: &Path) -> PathBuf {
        let transformed = self.transform_string(&template.to_string_lossy());
        self.output_root.join(transformed)
    }

    /// Generated content for the template at `template`
    pub fn transformed_file_content(&self, template: impl AsRef<Path>) -> Result<String> {
        let template = template.as_ref();
        let source = self.resolver.resolve(template)?;
        let text = fs::read_to_string(&source)?;
        self.processor
            .process(&text)
            .map_err(|source| ScaffoldError::Directive {
                template: template.display().to_string(),
                source,
            })
    }

    /// Generate one file, returning the path written
    pub fn scaffold_file(&self, template: impl AsRef<Path>) -> Result<PathBuf> {
        let template = template.as_ref();
        let content = self.transformed_file_content(template)?;
        let target = self.target_path(template);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        info!("Writing '{}'.", target.display());
        fs::write(&target, content)?;
        Ok(target)
    }

    /// Generate every regular file directly inside a template directory
    pub fn scaffold_directory(&self, directory: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let directory = directory.as_ref();
        let source = self.resolver.resolve(directory)?;

        let target = self.target_path(directory);
        if target.is_dir() {
            info!("Directory '{}' exists.", target.display());
        } else {
            info!("Creating directory '{}'.", target.display());
            fs::create_dir_all(&target)?;
        }

        let mut files: Vec<PathBuf> = fs::read_dir(&source)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|kind| kind.is_file()).unwrap_or(false))
            .map(|entry| directory.join(entry.file_name()))
            .collect();
        files.sort();

        debug!(count = files.len(), directory = %directory.display(), "scaffolding directory");
        files.iter().map(|file| self.scaffold_file(file)).collect()
    }

    fn options_with_config(&self, options: &PatchOptions) -> PatchOptions {
        let mut options = options.clone();
        if self.config.suppress_missing_file_warnings {
            options.suppress_missing_file_warning = true;
        }
        options
    }

    /// Insert `content` at `hook` in an existing file
    ///
    /// The file path, content and hook pattern are written against the
    /// placeholder pair and transformed first. The hook's match mode is kept.
    pub fn scaffold_add_line_to_file(
        &self,
        file: &str,
        content: &str,
        hook: &HookAnchor,
        options: &PatchOptions,
    ) -> Result<PatchOutcome> {
        let path = self.output_root.join(self.transform_string(file));
        let content = self.transform_string(content);
        let anchor = HookAnchor::new(self.transform_string(hook.pattern()), hook.mode());
        self.hooks
            .patch_file(&path, &content, &anchor, &self.options_with_config(options))
    }

    /// Replace `in_place_of` with `content` in an existing file
    ///
    /// Only the file path and `in_place_of` are transformed.
    pub fn scaffold_replace_line_in_file(
        &self,
        file: &str,
        content: &str,
        in_place_of: &str,
    ) -> Result<PatchOutcome> {
        let path = self.output_root.join(self.transform_string(file));
        let in_place_of = self.transform_string(in_place_of);
        self.hooks.replace_line_in_file(&path, content, &in_place_of)
    }

    /// Insert `content` under `key_path` in a YAML file
    pub fn add_line_to_yaml_file(
        &self,
        file: impl AsRef<Path>,
        content: &str,
        key_path: &[&str],
    ) -> Result<PatchOutcome> {
        let path = self.output_root.join(file.as_ref());
        if !path.exists() {
            return Ok(PatchOutcome::FileNotFound);
        }
        self.yaml.insert_at_path_in_file(&path, content, key_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::MatchMode;
    use tempfile::TempDir;

    const MODEL_TEMPLATE: &str = "\
class Scaffolding::CompletelyConcrete::TangibleThing < ApplicationRecord
  belongs_to :absolutely_abstract_creative_concept # 🚅 skip when scaffolding.
  belongs_to :creative_concept
  has_many :tangible_things # 🔒 keep the placeholder
end
";

    fn setup() -> (TempDir, TempDir, Scaffolder) {
        let templates = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let dir = templates.path().join("app/models/scaffolding/completely_concrete");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("tangible_thing.rb"), MODEL_TEMPLATE).unwrap();

        let config = ScaffoldConfig {
            template_roots: vec![templates.path().to_path_buf()],
            ..ScaffoldConfig::default()
        };
        let scaffolder = Scaffolder::new("Order", &["Team".to_string()], config)
            .unwrap()
            .with_output_root(output.path());
        (templates, output, scaffolder)
    }

    #[test]
    fn test_requires_a_parent() {
        assert!(matches!(
            Scaffolder::new("Order", &[], ScaffoldConfig::default()),
            Err(ScaffoldError::MissingParent { .. })
        ));
    }

    #[test]
    fn test_transformed_file_content() {
        let (_templates, _output, scaffolder) = setup();
        let content = scaffolder
            .transformed_file_content("app/models/scaffolding/completely_concrete/tangible_thing.rb")
            .unwrap();
        assert_eq!(
            content,
            "class Order < ApplicationRecord\n  belongs_to :team\n  has_many :tangible_things\nend\n"
        );
    }

    #[test]
    fn test_scaffold_file_writes_transformed_path() {
        let (_templates, output, scaffolder) = setup();
        let written = scaffolder
            .scaffold_file("app/models/scaffolding/completely_concrete/tangible_thing.rb")
            .unwrap();
        assert_eq!(written, output.path().join("app/models/order.rb"));
        assert!(fs::read_to_string(written).unwrap().starts_with("class Order"));
    }

    #[test]
    fn test_scaffold_directory() {
        let (_templates, output, scaffolder) = setup();
        let written = scaffolder
            .scaffold_directory("app/models/scaffolding/completely_concrete")
            .unwrap();
        assert_eq!(written, vec![output.path().join("app/models/order.rb")]);
    }

    #[test]
    fn test_missing_template() {
        let (_templates, _output, scaffolder) = setup();
        assert!(matches!(
            scaffolder.scaffold_file("app/views/missing.html.erb"),
            Err(ScaffoldError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn test_add_line_transforms_file_content_and_hook() {
        let (_templates, output, scaffolder) = setup();
        fs::create_dir_all(output.path().join("app/models")).unwrap();
        let target = output.path().join("app/models/team.rb");
        fs::write(&target, "class Team\n  # 🚅 add has_many associations above.\nend\n").unwrap();

        let outcome = scaffolder
            .scaffold_add_line_to_file(
                "app/models/team.rb",
                "has_many :tangible_things",
                &HookAnchor::suffix("# 🚅 add has_many associations above."),
                &PatchOptions::new().prepend(),
            )
            .unwrap();
        assert_eq!(outcome, PatchOutcome::Updated);
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "class Team\n  has_many :orders\n  # 🚅 add has_many associations above.\nend\n"
        );
    }

    #[test]
    fn test_add_line_keeps_exact_hook_mode() {
        let (_templates, output, scaffolder) = setup();
        let target = output.path().join("routes.rb");
        fs::write(&target, "resources :teams do\n  # orders\nend\n").unwrap();

        let outcome = scaffolder
            .scaffold_add_line_to_file(
                "routes.rb",
                "resources :tangible_things",
                &HookAnchor::exact("# tangible_things"),
                &PatchOptions::new(),
            )
            .unwrap();
        assert_eq!(outcome, PatchOutcome::AnchorNotFound);

        let outcome = scaffolder
            .scaffold_add_line_to_file(
                "routes.rb",
                "resources :tangible_things",
                &HookAnchor::new("  # tangible_things", MatchMode::Exact),
                &PatchOptions::new(),
            )
            .unwrap();
        assert_eq!(outcome, PatchOutcome::Updated);
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "resources :teams do\n  # orders\n  resources :orders\nend\n"
        );
    }

    #[test]
    fn test_replace_line_keeps_content_literal() {
        let (_templates, output, scaffolder) = setup();
        let target = output.path().join("menu.txt");
        fs::write(&target, "link tangible_things\n").unwrap();

        let outcome = scaffolder
            .scaffold_replace_line_in_file("menu.txt", "link tangible_things_path", "link tangible_things")
            .unwrap();
        assert_eq!(outcome, PatchOutcome::AnchorNotFound);

        fs::write(&target, "link orders\n").unwrap();
        let outcome = scaffolder
            .scaffold_replace_line_in_file("menu.txt", "link tangible_things_path", "link tangible_things")
            .unwrap();
        assert_eq!(outcome, PatchOutcome::Updated);
        assert_eq!(fs::read_to_string(&target).unwrap(), "link tangible_things_path\n");
    }

    #[test]
    fn test_missing_patch_target() {
        let (_templates, _output, scaffolder) = setup();
        let outcome = scaffolder
            .scaffold_add_line_to_file("nowhere.rb", "x", &HookAnchor::suffix("# hook"), &PatchOptions::new())
            .unwrap();
        assert_eq!(outcome, PatchOutcome::FileNotFound);
        assert_eq!(
            scaffolder.add_line_to_yaml_file("nowhere.yml", "x: 1", &["a"]).unwrap(),
            PatchOutcome::FileNotFound
        );
    }

    #[test]
    fn test_add_line_to_yaml_file() {
        let (_templates, output, scaffolder) = setup();
        let target = output.path().join("roles.yml");
        fs::write(&target, "admin:\n  models:\n    Team: manage\n").unwrap();
        let outcome = scaffolder
            .add_line_to_yaml_file("roles.yml", "Order: manage", &["admin", "models"])
            .unwrap();
        assert_eq!(outcome, PatchOutcome::Updated);
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "admin:\n  models:\n    Order: manage\n    Team: manage\n"
        );
    }
}
