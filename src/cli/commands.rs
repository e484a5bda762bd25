use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tl", about = concat!("tasklist v", env!("CARGO_PKG_VERSION"), " - one list, one plain-text file"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Task file to use (default: tasks.txt, or [store] file in tasklist.toml)
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a commented tasklist.toml in the current directory
    Init(InitArgs),
    /// List tasks with their positions
    List(ListArgs),
    /// Append a pending task
    Add(AddArgs),
    /// Mark the task at INDEX done
    Done(IndexArgs),
    /// Mark the task at INDEX pending again
    Undo(IndexArgs),
    /// Remove the task at INDEX (later tasks move up)
    Rm(IndexArgs),
    /// Show lines that could not be loaded or saved
    Recovery(RecoveryArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing tasklist.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only pending tasks
    #[arg(long, conflicts_with = "done")]
    pub pending: bool,
    /// Only finished tasks
    #[arg(long)]
    pub done: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text (multiple words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct IndexArgs {
    /// 0-based position in the list (as shown by `tl list`)
    pub index: usize,
}

#[derive(Args)]
pub struct RecoveryArgs {
    /// Maximum number of entries to show (most recent first)
    #[arg(long)]
    pub limit: Option<usize>,
}
