use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mdag",
    about = "Build content-addressed Merkle DAGs from files and directories",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Hash a file or directory into the store and print its root hash
    Add(AddArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// File or directory to add
    pub path: PathBuf,
    /// Object store directory (overrides the config file)
    #[arg(long)]
    pub store: Option<PathBuf>,
    /// Hash into memory only; nothing is written to disk
    #[arg(long)]
    pub dry_run: bool,
    /// Largest file stored as a single blob, in bytes
    #[arg(long)]
    pub block_size: Option<usize>,
    /// Deepest directory nesting accepted below the root
    #[arg(long)]
    pub max_depth: Option<usize>,
    /// Domain tag mixed into every hash
    #[arg(long)]
    pub domain: Option<String>,
    /// Skip symlinks and special files instead of failing
    #[arg(long)]
    pub skip_unsupported: bool,
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}
