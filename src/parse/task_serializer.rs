use crate::model::task::Task;

use super::ESCAPES;

/// Serialize tasks to the file format: one `<text>,<True|False>` line each,
/// every line newline-terminated.
pub fn serialize_tasks(tasks: &[Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        out.push_str(&serialize_record(task));
        out.push('\n');
    }
    out
}

/// Serialize a single task (no trailing newline)
pub fn serialize_record(task: &Task) -> String {
    format!("{},{}", escape_text(&task.text), task.state.marker())
}

/// Escape characters that would break the one-record-per-line layout.
/// Commas are left alone: the parser splits on the last one. A backslash is
/// only escaped when it would otherwise start an escape sequence.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        match c {
            '\n' => out.push_str("\\x0A"),
            '\r' => out.push_str("\\x0D"),
            '\\' if starts_escape(&text[i..]) => out.push_str("\\x5C"),
            _ => out.push(c),
        }
    }
    out
}

fn starts_escape(s: &str) -> bool {
    ESCAPES.iter().any(|(seq, _)| s.starts_with(*seq))
}
