use serde::Serialize;

use crate::model::task::{Task, TaskState};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson<'a> {
    pub index: usize,
    pub text: &'a str,
    pub state: TaskState,
    pub completed: bool,
}

pub fn task_to_json(index: usize, task: &Task) -> TaskJson<'_> {
    TaskJson {
        index,
        text: &task.text,
        state: task.state,
        completed: task.completed(),
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// One listing line: right-aligned index, checkbox, text.
/// Newlines inside the text are shown escaped so each task stays on one line.
pub fn format_task_line(index: usize, task: &Task, index_width: usize) -> String {
    let text = task.text.replace('\n', "\\n").replace('\r', "\\r");
    format!(
        "{:>width$}  [{}] {}",
        index,
        task.state.checkbox_char(),
        text,
        width = index_width
    )
}

/// Column width needed for the largest index of a list of `len` tasks
pub fn index_width(len: usize) -> usize {
    len.saturating_sub(1).to_string().len()
}
