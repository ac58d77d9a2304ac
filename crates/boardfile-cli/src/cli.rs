use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "boardfile")]
#[command(about = "Add and remove board attachments and submit them in one request")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional JSON configuration file (overrides BOARDFILE_* variables)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply attachment changes and submit them to the action URL
    Submit {
        #[command(flatten)]
        changes: ChangeArgs,
        /// Submission endpoint
        #[arg(long, value_name = "URL")]
        url: Option<String>,
        /// Client-side request timeout in seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },
    /// Show the selection list and payload without sending anything
    Preview {
        #[command(flatten)]
        changes: ChangeArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct ChangeArgs {
    /// JSON file describing attachments already stored (object, array or null)
    #[arg(long, value_name = "PATH")]
    pub existing: Option<PathBuf>,
    /// Local file to upload (repeatable)
    #[arg(long = "add", value_name = "PATH")]
    pub add: Vec<PathBuf>,
    /// Key of an attachment to remove (repeatable)
    #[arg(long = "remove", value_name = "KEY")]
    pub remove: Vec<String>,
    /// Form field as NAME=VALUE (repeatable)
    #[arg(long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,
    /// Owning entity type sent as baseFileInfo.id
    #[arg(long, value_name = "ID")]
    pub entity_id: Option<String>,
    /// Language for labels and messages
    #[arg(long, value_enum)]
    pub locale: Option<LocaleArg>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LocaleArg {
    En,
    Ko,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}
