//! Subcommand handlers

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use scaffolder_engine::naming::{transform, ConceptPair};
use scaffolder_engine::{
    ConfigManager, ConfigPathPatcher, HookAnchor, HookPatcher, PatchOptions, PatchOutcome,
    ScaffoldConfig, Scaffolder,
};
use tracing::debug;

use crate::cli::{Cli, Commands, ConceptArgs};

/// Dispatch a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Transform {
            text,
            child,
            parent,
            namespace,
        } => {
            let namespace = namespace.unwrap_or_else(|| config.namespace.clone());
            let pair = ConceptPair::with_namespace(&child, &parent, &namespace);
            println!("{}", transform(&text, &pair));
        }
        Commands::Render {
            template,
            concept,
            roots,
        } => {
            let scaffolder = build_scaffolder(&concept, &roots, config)?;
            let content = scaffolder
                .transformed_file_content(&template)
                .with_context(|| format!("Failed to render {}", template.display()))?;
            print!("{}", content);
        }
        Commands::Scaffold {
            templates,
            concept,
            roots,
            output,
        } => {
            let scaffolder = build_scaffolder(&concept, &roots, config)?.with_output_root(output);
            for path in scaffold_all(&scaffolder, &templates)? {
                println!("{} {}", "created".green(), path.display());
            }
        }
        Commands::Patch {
            file,
            anchor,
            fragment,
            fragment_file,
            exact,
            prepend,
            increase_indent,
            add_before,
            add_after,
            quiet_missing,
        } => {
            let fragment = read_fragment(fragment, fragment_file.as_deref())?;
            let anchor = if exact {
                HookAnchor::exact(anchor)
            } else {
                HookAnchor::suffix(anchor)
            };
            let options = patch_options(prepend, increase_indent, add_before, add_after);
            let outcome = HookPatcher::with_indent_unit(config.indent_unit.clone())
                .patch_file(&file, &fragment, &anchor, &options)
                .with_context(|| format!("Failed to patch {}", file.display()))?;
            report(
                &file,
                outcome,
                quiet_missing || config.suppress_missing_file_warnings,
            );
        }
        Commands::YamlInsert {
            file,
            path,
            content,
        } => {
            if !file.exists() {
                report(&file, PatchOutcome::FileNotFound, config.suppress_missing_file_warnings);
                return Ok(());
            }
            let key_path: Vec<&str> = path.split('.').filter(|key| !key.is_empty()).collect();
            let outcome = ConfigPathPatcher::with_indent_unit(config.indent_unit.clone())
                .insert_at_path_in_file(&file, &content, &key_path)
                .with_context(|| format!("Failed to update {}", file.display()))?;
            report(&file, outcome, config.suppress_missing_file_warnings);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ScaffoldConfig> {
    let manager = match path {
        Some(path) => ConfigManager::with_path(path.to_path_buf()),
        None => ConfigManager::new(),
    };
    manager.load().context("Failed to load configuration")
}

fn build_scaffolder(
    concept: &ConceptArgs,
    roots: &[PathBuf],
    mut config: ScaffoldConfig,
) -> Result<Scaffolder> {
    if let Some(namespace) = &concept.namespace {
        config.namespace = namespace.clone();
    }
    if !roots.is_empty() {
        let configured = std::mem::take(&mut config.template_roots);
        config.template_roots = roots.iter().cloned().chain(configured).collect();
    }
    debug!(roots = ?config.template_roots, "template roots");

    Scaffolder::new(&concept.child, &concept.parents, config)
        .with_context(|| format!("Cannot scaffold {}", concept.child))
}

/// Scaffold each template, expanding directories to the files they contain
pub fn scaffold_all(scaffolder: &Scaffolder, templates: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for template in templates {
        let source = scaffolder.resolver().resolve(template)?;
        if source.is_dir() {
            written.extend(
                scaffolder
                    .scaffold_directory(template)
                    .with_context(|| format!("Failed to scaffold {}", template.display()))?,
            );
        } else {
            written.push(
                scaffolder
                    .scaffold_file(template)
                    .with_context(|| format!("Failed to scaffold {}", template.display()))?,
            );
        }
    }
    Ok(written)
}

fn read_fragment(fragment: Option<String>, fragment_file: Option<&Path>) -> Result<String> {
    match (fragment, fragment_file) {
        (Some(fragment), _) => Ok(fragment),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read fragment from {}", path.display())),
        (None, None) => anyhow::bail!("Either --fragment or --fragment-file is required"),
    }
}

/// Patch options for the `patch` subcommand
///
/// A missing file is reported by [`report`], so the engine's own warning is
/// always suppressed.
fn patch_options(
    prepend: bool,
    increase_indent: bool,
    add_before: Option<String>,
    add_after: Option<String>,
) -> PatchOptions {
    PatchOptions {
        prepend,
        increase_indent,
        add_before,
        add_after,
        suppress_missing_file_warning: true,
    }
}

fn report(file: &Path, outcome: PatchOutcome, suppress_missing: bool) {
    match outcome {
        PatchOutcome::Updated => println!("{} {}", "updated".green(), file.display()),
        PatchOutcome::AlreadyPresent => println!("{} {}", "unchanged".dimmed(), file.display()),
        PatchOutcome::AnchorNotFound => {
            eprintln!("{} no hook found in {}", "warning:".yellow(), file.display())
        }
        PatchOutcome::FileNotFound if !suppress_missing => {
            eprintln!("{} couldn't find {}", "warning:".red(), file.display())
        }
        PatchOutcome::FileNotFound => {}
    }
}
