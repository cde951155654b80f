use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "voice-ideas")]
#[command(about = "Find spontaneous ideas in exported voice-note transcripts")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.voice-ideas)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CategoryFilter {
    General,
    Health,
    Learning,
    Work,
    Personal,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a CSV export and report tag counts and ideas
    Analyze {
        /// CSV file to read ("-" for stdin)
        file: PathBuf,

        /// Output format (default: output.format from config)
        #[arg(short, long, value_enum)]
        format: Option<Format>,

        /// Number of tags to show (default: output.top_tags from config)
        #[arg(short, long)]
        top: Option<usize>,

        /// Only show ideas in this category
        #[arg(short, long, value_enum)]
        category: Option<CategoryFilter>,
    },

    /// Show tag frequencies only
    Tags {
        /// CSV file to read ("-" for stdin)
        file: PathBuf,

        /// Maximum tags to show (default: all)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., output.format)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., ingest.tag_separator)
        key: String,

        /// Value to set (e.g., "json" or ";")
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,
}
