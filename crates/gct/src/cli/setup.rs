use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl From<CompletionShell> for clap_complete::Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => clap_complete::Shell::Bash,
            CompletionShell::Zsh => clap_complete::Shell::Zsh,
            CompletionShell::Fish => clap_complete::Shell::Fish,
            CompletionShell::Powershell => clap_complete::Shell::PowerShell,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    #[default]
    Table,
    Json,
    Plain,
}

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.2"
/// Format for dev builds: "v0.3.2\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "gct",
    bin_name = "gct",
    version = get_version(),
    disable_help_subcommand = true,
    after_help = "Todo IDs are renumbered after a delete: run `gct list` again before reusing an ID.\n\nEnable shell completions:\n  eval \"$(gct completion bash)\"  # add to ~/.bashrc\n  eval \"$(gct completion zsh)\"   # add to ~/.zshrc"
)]
#[command(about = "A small todo manager for the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use this data file instead of the resolved default
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub data_file: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Add a new todo
    #[command(display_order = 1)]
    Add {
        /// What needs doing (quote it if it has spaces)
        description: String,
    },

    /// List all todos
    #[command(alias = "ls", display_order = 2)]
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value_t = ListFormat::Table)]
        format: ListFormat,
    },

    /// Mark a todo complete, or incomplete again
    #[command(display_order = 3)]
    Toggle {
        /// ID of the todo
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Change the description of a todo
    #[command(display_order = 4)]
    Edit {
        /// ID of the todo
        #[arg(allow_negative_numbers = true)]
        id: i64,

        /// New description
        description: String,
    },

    /// Delete a todo. Todos after it move up one ID.
    #[command(alias = "rm", display_order = 5)]
    Delete {
        /// ID of the todo
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Open the full-screen interface
    #[command(display_order = 6)]
    Tui,

    /// Print a shell completion script
    #[command(display_order = 7)]
    Completion {
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

/// Builds the clap Command, used for completion script generation.
pub fn build_command() -> clap::Command {
    Cli::command()
}
