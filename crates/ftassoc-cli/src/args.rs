use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "ftassoc")]
#[command(about = "Classify file names into file types from a rules file")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base directory (default: ~/.ftassoc)
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

#[derive(Subcommand)]
pub enum Commands {
    /// Print the file type of each file name
    Classify {
        /// File names (e.g., main.rs Makefile notes.TXT)
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Classify every file below a directory
    Scan {
        /// Directory to walk
        path: PathBuf,

        /// Only print files without a file type
        #[arg(short, long)]
        unmatched: bool,
    },

    /// List the patterns bound to each file type
    List {
        /// Only this file type
        #[arg(short, long)]
        file_type: Option<String>,
    },

    /// Manage the rules file
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
    /// Show rules file path
    Path,

    /// Initialize rules file with defaults
    Init,

    /// Show declared file types and pattern counts
    Show,
}
