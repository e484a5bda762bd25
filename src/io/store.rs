use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::task::TaskList;
use crate::parse::{DroppedLine, parse_tasks, serialize_tasks};

/// Error type for task file I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not save {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
        /// Whether the unsaved content made it into the recovery log
        saved_to_recovery: bool,
    },
}

/// Result of loading the task file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedTasks {
    pub list: TaskList,
    /// Malformed lines that were skipped. They stay in the file until the
    /// next save, so callers that rewrite the file pass them to `log_dropped`.
    pub dropped: Vec<DroppedLine>,
}

/// Directory holding the task file, used for temp files and the recovery log.
pub fn store_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Load the task list from `path`.
///
/// A missing file is an empty list. Malformed lines are skipped and returned
/// in `dropped`; every well-formed line is kept in file order. Loading never
/// writes anything.
pub fn load_tasks(path: &Path) -> Result<LoadedTasks, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LoadedTasks::default()),
        Err(e) => {
            return Err(StoreError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let (tasks, dropped) = parse_tasks(&text);
    Ok(LoadedTasks {
        list: TaskList::new(tasks),
        dropped,
    })
}

/// Copy skipped lines into the recovery log before the file that holds them
/// is rewritten. Does nothing when `dropped` is empty.
pub fn log_dropped(path: &Path, dropped: &[DroppedLine]) {
    if dropped.is_empty() {
        return;
    }
    let body = dropped
        .iter()
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let mut fields = vec![("Source".to_string(), path.display().to_string())];
    for d in dropped {
        fields.push((format!("Line {}", d.line_no), d.reason.to_string()));
    }
    recovery::log_recovery(
        &store_dir(path),
        RecoveryEntry::now(RecoveryCategory::Parser, "dropped lines", fields, body),
    );
}

/// Overwrite `path` with the whole list.
///
/// The write is atomic. If it fails, the content that could not be saved is
/// appended to the recovery log before the error is returned. Nothing is
/// printed, so this is safe to call while the terminal UI owns the screen.
pub fn save_tasks(path: &Path, list: &TaskList) -> Result<(), StoreError> {
    let content = serialize_tasks(&list.tasks);
    if let Err(e) = recovery::atomic_write(path, content.as_bytes()) {
        let saved_to_recovery = recovery::try_log_recovery(
            &store_dir(path),
            RecoveryEntry::now(
                RecoveryCategory::Write,
                "task file write failed",
                vec![
                    ("Target".to_string(), path.display().to_string()),
                    ("Error".to_string(), e.to_string()),
                ],
                content,
            ),
        )
        .is_ok();
        return Err(StoreError::WriteError {
            path: path.to_path_buf(),
            source: e,
            saved_to_recovery,
        });
    }
    Ok(())
}
