use serde::{Deserialize, Serialize};

/// Completion state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    #[default]
    Pending,
    Done,
}

impl TaskState {
    /// The marker written after the last comma of a record
    pub fn marker(self) -> &'static str {
        match self {
            TaskState::Pending => "False",
            TaskState::Done => "True",
        }
    }

    /// Parse a record marker. Only the exact literals are accepted.
    pub fn from_marker(s: &str) -> Option<TaskState> {
        match s {
            "True" => Some(TaskState::Done),
            "False" => Some(TaskState::Pending),
            _ => None,
        }
    }

    /// The character shown inside the checkbox `[ ]`
    pub fn checkbox_char(self) -> char {
        match self {
            TaskState::Pending => ' ',
            TaskState::Done => 'x',
        }
    }

    pub fn is_done(self) -> bool {
        self == TaskState::Done
    }
}

/// A single to-do entry. Identity is its position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    pub state: TaskState,
}

impl Task {
    /// Create a new pending task
    pub fn new(text: impl Into<String>) -> Self {
        Task {
            text: text.into(),
            state: TaskState::Pending,
        }
    }

    /// Create a task in the given state
    pub fn with_state(text: impl Into<String>, state: TaskState) -> Self {
        Task {
            text: text.into(),
            state,
        }
    }

    pub fn completed(&self) -> bool {
        self.state.is_done()
    }
}

/// Ordered task sequence: insertion order = display order = persisted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    pub tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        TaskList { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Highest index the navigation slider may take (0 when empty)
    pub fn max_index(&self) -> usize {
        self.tasks.len().saturating_sub(1)
    }

    /// Count tasks in each state: (pending, done)
    pub fn counts(&self) -> (usize, usize) {
        let done = self.tasks.iter().filter(|t| t.completed()).count();
        (self.tasks.len() - done, done)
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
