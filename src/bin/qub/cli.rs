//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use qub::util::shell::ColorChoice;

/// qub - publish packed projects into a local package repository
#[derive(Parser)]
#[command(name = "qub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Repository root folder
    #[arg(long, global = true, env = "QUB_HOME", value_name = "DIR")]
    pub repository: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack a project and publish it into the repository
    Publish(PublishArgs),

    /// Display the dependency tree of a published package
    Tree(TreeArgs),

    /// List published packages whose latest version depends on a project
    Dependents(DependentsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MessageFormat {
    #[default]
    Human,
    Json,
}

#[derive(Args)]
pub struct PublishArgs {
    /// Project folder to publish (defaults to the current directory)
    pub folder: Option<PathBuf>,

    /// Publish the archives already in outputs/ without packing
    #[arg(long)]
    pub skip_pack: bool,

    /// Command that builds, tests and packs the project
    #[arg(long, value_name = "COMMAND", conflicts_with = "skip_pack")]
    pub pack_command: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,
}

#[derive(Args)]
pub struct TreeArgs {
    /// Package as publisher/project[@version] (defaults to the latest version)
    pub package: String,

    /// Maximum depth to display
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Show duplicate packages
    #[arg(long)]
    pub duplicates: bool,

    /// Print the classpath order instead of a tree
    #[arg(long)]
    pub flat: bool,
}

#[derive(Args)]
pub struct DependentsArgs {
    /// Project as publisher/project
    pub project: String,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,

    /// Write the script to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}
