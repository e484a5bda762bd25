use crate::model::task::{Task, TaskState};

use super::ESCAPES;

/// Why a record line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error("no comma separating text from completion marker")]
    MissingMarker,
    #[error("unknown completion marker {0:?} (expected True or False)")]
    UnknownMarker(String),
}

/// A line skipped while parsing, kept so it can be written to the recovery log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedLine {
    /// 1-based line number in the source
    pub line_no: usize,
    pub text: String,
    pub reason: LineError,
}

/// Parse a whole task file.
///
/// Format: one `<text>,<True|False>` record per line. The split happens on
/// the last comma, so the text may itself contain commas. Blank lines are
/// ignored; malformed lines are skipped and returned alongside the tasks.
pub fn parse_tasks(source: &str) -> (Vec<Task>, Vec<DroppedLine>) {
    let mut tasks = Vec::new();
    let mut dropped = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        match parse_record(line) {
            Ok(task) => tasks.push(task),
            Err(reason) => dropped.push(DroppedLine {
                line_no: idx + 1,
                text: line.to_string(),
                reason,
            }),
        }
    }

    (tasks, dropped)
}

/// Parse a single record line (without its trailing newline)
pub fn parse_record(line: &str) -> Result<Task, LineError> {
    let (raw_text, marker) = line.rsplit_once(',').ok_or(LineError::MissingMarker)?;
    let state = TaskState::from_marker(marker)
        .ok_or_else(|| LineError::UnknownMarker(marker.to_string()))?;
    Ok(Task::with_state(unescape_text(raw_text), state))
}

/// Undo the escaping applied by the serializer: `\x0A`, `\x0D`, `\x5C`.
///
/// Any other backslash is kept literally, so legacy text such as
/// `C:\temp\notes` loads unchanged.
fn unescape_text(raw: &str) -> String {
    if !raw.contains("\\x") {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ESCAPES.iter().find(|(seq, _)| rest.starts_with(*seq)) {
            Some((seq, c)) => {
                out.push(*c);
                rest = &rest[seq.len()..];
            }
            None => {
                out.push('\\');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
