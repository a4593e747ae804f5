//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

/// Convert the REACS classification table into a JSON tree and a Turtle ontology
#[derive(Parser, Debug)]
#[command(name = "reacs-onto")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Input table, relative to the project directory (overrides config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the JSON tree and the Turtle ontology (default)
    Build {
        /// Output directory, relative to the project directory (overrides config)
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        build_dir: Option<PathBuf>,
    },

    /// Print one artifact to stdout without writing files
    Render {
        /// Artifact to print
        #[arg(short, long, value_enum, default_value_t = Format::Turtle)]
        format: Format,
    },

    /// Show the classification as a tree
    Tree {
        /// Only this section letter
        #[arg(short, long)]
        letter: Option<String>,
        /// Levels to show below sections
        #[arg(long)]
        depth: Option<usize>,
    },

    /// Show node counts per level
    Stats,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Turtle,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
