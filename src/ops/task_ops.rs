use crate::model::task::{Task, TaskList, TaskState};

/// Error type for task operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("task text is empty")]
    EmptyText,
    #[error("no task at index {index} (list has {len} tasks)")]
    OutOfRange { index: usize, len: usize },
}

// ---------------------------------------------------------------------------
// State transitions
// ---------------------------------------------------------------------------

/// Direct state set. Returns true if the state changed.
pub fn set_state(task: &mut Task, new_state: TaskState) -> bool {
    if task.state == new_state {
        return false;
    }
    task.state = new_state;
    true
}

/// Mark the task at `index` done: pending → done
pub fn complete_task(list: &mut TaskList, index: usize) -> Result<bool, TaskError> {
    let task = task_mut(list, index)?;
    Ok(set_state(task, TaskState::Done))
}

/// Reopen the task at `index`: done → pending
pub fn undo_task(list: &mut TaskList, index: usize) -> Result<bool, TaskError> {
    let task = task_mut(list, index)?;
    Ok(set_state(task, TaskState::Pending))
}

// ---------------------------------------------------------------------------
// List CRUD
// ---------------------------------------------------------------------------

/// Append a pending task. Empty text is rejected; duplicates are allowed.
/// Returns the index of the new task.
pub fn add_task(list: &mut TaskList, text: String) -> Result<usize, TaskError> {
    if text.is_empty() {
        return Err(TaskError::EmptyText);
    }
    list.tasks.push(Task::new(text));
    Ok(list.tasks.len() - 1)
}

/// Remove the task at `index`, shifting every later task down by one.
pub fn remove_task(list: &mut TaskList, index: usize) -> Result<Task, TaskError> {
    check_index(list, index)?;
    Ok(list.tasks.remove(index))
}

fn check_index(list: &TaskList, index: usize) -> Result<(), TaskError> {
    if index < list.tasks.len() {
        Ok(())
    } else {
        Err(TaskError::OutOfRange {
            index,
            len: list.tasks.len(),
        })
    }
}

fn task_mut(list: &mut TaskList, index: usize) -> Result<&mut Task, TaskError> {
    check_index(list, index)?;
    Ok(&mut list.tasks[index])
}
