use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "quotesync")]
#[command(about = "Collect quotes and keep them in sync with a remote snapshot")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the persisted quotes
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Path to the settings file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new quote
    #[command(alias = "new")]
    Add {
        /// Quote text
        #[arg(required = true)]
        text: Vec<String>,
        /// Quote category
        #[arg(short, long)]
        category: String,
        /// Also send the quote to the remote server
        #[arg(long)]
        push: bool,
    },
    /// Show a random quote
    Random {
        /// Only pick from this category ("all" for every category)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List stored quotes
    List {
        /// Only list quotes in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List distinct categories
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Merge the remote snapshot into the local quotes
    Sync {
        /// Keep syncing on an interval until interrupted
        #[arg(long)]
        watch: bool,
        /// Interval in seconds for --watch (defaults to the configured interval)
        #[arg(long, value_name = "SECS", requires = "watch")]
        interval: Option<u64>,
        /// Output the pass summary as JSON
        #[arg(long, conflicts_with = "watch")]
        json: bool,
    },
    /// Export all quotes as a JSON array
    Export {
        /// Output file or directory (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Import quotes from a JSON array file
    Import {
        /// File to import
        path: PathBuf,
    },
    /// Remove every stored quote
    Clear,
    /// Manage the settings file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Output file or directory (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a settings file with defaults
    Init {
        /// Remote snapshot endpoint
        #[arg(long, value_name = "URL", conflicts_with = "no_remote")]
        remote_url: Option<String>,
        /// Disable remote sync
        #[arg(long)]
        no_remote: bool,
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective settings
    Show,
}
