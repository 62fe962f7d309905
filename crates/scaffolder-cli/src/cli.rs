//! Argument definitions

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

/// Generate and patch source files from placeholder templates
#[derive(Debug, Parser)]
#[command(name = "scaffolder")]
#[command(version, about = "Generate and patch source files from placeholder templates")]
pub struct Cli {
    /// Show per-line and per-file detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file to use instead of the default locations
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Concept pair arguments shared by generating commands
#[derive(Debug, Args)]
pub struct ConceptArgs {
    /// Concept being scaffolded, e.g. `Projects::Deliverable`
    #[arg(long)]
    pub child: String,

    /// Owning concepts, nearest first, ending at the root owner
    #[arg(long = "parents", required = true, num_args = 1.., value_delimiter = ',')]
    pub parents: Vec<String>,

    /// Namespace token that replaces `account`
    #[arg(long)]
    pub namespace: Option<String>,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print text with placeholder names rewritten
    Transform {
        /// Text to transform
        text: String,

        /// Concept being scaffolded
        #[arg(long)]
        child: String,

        /// Owning concept
        #[arg(long)]
        parent: String,

        /// Namespace token that replaces `account`
        #[arg(long)]
        namespace: Option<String>,
    },

    /// Print the generated content for one template
    Render {
        /// Template path relative to the template roots
        template: PathBuf,

        #[command(flatten)]
        concept: ConceptArgs,

        /// Template root, searched before configured roots
        #[arg(long = "root")]
        roots: Vec<PathBuf>,
    },

    /// Write generated files for templates or template directories
    Scaffold {
        /// Template paths relative to the template roots
        #[arg(required = true)]
        templates: Vec<PathBuf>,

        #[command(flatten)]
        concept: ConceptArgs,

        /// Template root, searched before configured roots
        #[arg(long = "root")]
        roots: Vec<PathBuf>,

        /// Directory generated files are written under
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Insert a fragment at a hook line of an existing file
    #[command(group(ArgGroup::new("source").required(true).args(["fragment", "fragment_file"])))]
    Patch {
        /// File to patch
        file: PathBuf,

        /// Hook text identifying the anchor line(s)
        #[arg(long)]
        anchor: String,

        /// Fragment text to insert
        #[arg(long)]
        fragment: Option<String>,

        /// Read the fragment from a file
        #[arg(long)]
        fragment_file: Option<PathBuf>,

        /// Anchor lines must equal the hook exactly
        #[arg(long)]
        exact: bool,

        /// Insert before the anchor instead of after it
        #[arg(long)]
        prepend: bool,

        /// Indent the fragment one level deeper than the anchor
        #[arg(long)]
        increase_indent: bool,

        /// Text appended to the anchor line
        #[arg(long)]
        add_before: Option<String>,

        /// Line emitted after the fragment
        #[arg(long)]
        add_after: Option<String>,

        /// Do not warn when the file is missing
        #[arg(long)]
        quiet_missing: bool,
    },

    /// Insert a line under a nested key of a YAML file
    YamlInsert {
        /// YAML file to patch
        file: PathBuf,

        /// Dotted key path, e.g. `admin.models`
        #[arg(long)]
        path: String,

        /// Line to insert
        #[arg(long)]
        content: String,
    },
}
