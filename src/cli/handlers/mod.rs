mod init;
pub use init::cmd_init;

use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::recovery;
use crate::io::store::{self, LoadedTasks};
use crate::model::config::AppConfig;
use crate::model::task::TaskList;
use crate::ops::task_ops;

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Read `tasklist.toml` from the working directory and resolve the task file.
/// `--file` wins over the configured path.
pub fn resolve_context(
    file: Option<&Path>,
) -> Result<(PathBuf, AppConfig), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let config = config_io::read_config(&cwd)?;
    let path = config_io::resolve_tasks_path(&cwd, &config, file);
    Ok((path, config))
}

fn tasks_path(file: Option<&Path>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(resolve_context(file)?.0)
}

/// Load the task list for a read-only command. Skipped lines are only
/// reported; they stay in the file untouched.
fn load_for_read(path: &Path) -> Result<TaskList, Box<dyn std::error::Error>> {
    let LoadedTasks { list, dropped } = store::load_tasks(path)?;
    if !dropped.is_empty() {
        eprintln!(
            "warning: skipped {} malformed line(s) in {}; they move to the recovery log on the next change",
            dropped.len(),
            path.display()
        );
    }
    Ok(list)
}

/// Rewrite the task file. Lines skipped at load time would be lost by the
/// rewrite, so they go to the recovery log first.
fn save_list(path: &Path, loaded: &LoadedTasks) -> Result<(), Box<dyn std::error::Error>> {
    if !loaded.dropped.is_empty() {
        store::log_dropped(path, &loaded.dropped);
        eprintln!(
            "warning: skipped {} malformed line(s) in {}; see `tl recovery`",
            loaded.dropped.len(),
            path.display()
        );
    }
    store::save_tasks(path, &loaded.list)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let file = cli.file.as_deref();

    match cli.command {
        // No subcommand → launch TUI
        None => {
            let (path, config) = resolve_context(file)?;
            crate::tui::run(&path, &config)
        }

        // Init runs before the config is read, so it can replace a broken one
        Some(Commands::Init(args)) => cmd_init(args),

        // Read commands
        Some(Commands::List(args)) => cmd_list(&tasks_path(file)?, args, json),
        Some(Commands::Recovery(args)) => cmd_recovery(&tasks_path(file)?, args, json),

        // Write commands
        Some(Commands::Add(args)) => cmd_add(&tasks_path(file)?, args, json),
        Some(Commands::Done(args)) => cmd_done(&tasks_path(file)?, args, json),
        Some(Commands::Undo(args)) => cmd_undo(&tasks_path(file)?, args, json),
        Some(Commands::Rm(args)) => cmd_rm(&tasks_path(file)?, args, json),
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(path: &Path, args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let list = load_for_read(path)?;
    let shown: Vec<(usize, _)> = list
        .iter()
        .enumerate()
        .filter(|(_, t)| {
            if args.pending {
                !t.completed()
            } else if args.done {
                t.completed()
            } else {
                true
            }
        })
        .collect();

    if json {
        let tasks: Vec<TaskJson> = shown.iter().map(|(i, t)| task_to_json(*i, t)).collect();
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if shown.is_empty() {
        if list.is_empty() {
            println!("No tasks. Add one with: tl add <text>");
        }
        return Ok(());
    }

    let width = index_width(list.len());
    for (i, task) in shown {
        println!("{}", format_task_line(i, task, width));
    }
    Ok(())
}

fn cmd_recovery(
    path: &Path,
    args: RecoveryArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let entries = recovery::read_recovery_entries(&store::store_dir(path), args.limit);

    if json {
        let values: Vec<serde_json::Value> = entries.iter().map(|e| e.to_json()).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("Recovery log is empty.");
        return Ok(());
    }
    for entry in &entries {
        print!("{}", entry.to_display_markdown());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(path: &Path, args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut loaded = store::load_tasks(path)?;
    let index = task_ops::add_task(&mut loaded.list, args.text.join(" "))?;
    save_list(path, &loaded)?;
    report(&loaded.list, index, "Added", json)
}

fn cmd_done(path: &Path, args: IndexArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut loaded = store::load_tasks(path)?;
    if task_ops::complete_task(&mut loaded.list, args.index)? {
        save_list(path, &loaded)?;
        report(&loaded.list, args.index, "Done", json)
    } else {
        report(&loaded.list, args.index, "Already done", json)
    }
}

fn cmd_undo(path: &Path, args: IndexArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut loaded = store::load_tasks(path)?;
    if task_ops::undo_task(&mut loaded.list, args.index)? {
        save_list(path, &loaded)?;
        report(&loaded.list, args.index, "Reopened", json)
    } else {
        report(&loaded.list, args.index, "Already pending", json)
    }
}

fn cmd_rm(path: &Path, args: IndexArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut loaded = store::load_tasks(path)?;
    let removed = task_ops::remove_task(&mut loaded.list, args.index)?;
    save_list(path, &loaded)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&task_to_json(args.index, &removed))?
        );
    } else {
        println!(
            "Removed {}",
            format_task_line(args.index, &removed, 1).trim_start()
        );
    }
    Ok(())
}

/// Print the task at `index` after a write command.
fn report(
    list: &TaskList,
    index: usize,
    verb: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(task) = list.get(index) else {
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(index, task))?);
    } else {
        println!("{} {}", verb, format_task_line(index, task, 1));
    }
    Ok(())
}
