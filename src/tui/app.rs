use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::store::{self, StoreError};
use crate::model::{AppConfig, Task, TaskList, TaskState};
use crate::ops::task_ops;

use super::input;
use super::render;
use super::theme::Theme;

/// Which control receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
    Slider,
}

impl Focus {
    pub fn next(self) -> Focus {
        match self {
            Focus::Input => Focus::List,
            Focus::List => Focus::Slider,
            Focus::Slider => Focus::Input,
        }
    }

    pub fn prev(self) -> Focus {
        match self {
            Focus::Input => Focus::Slider,
            Focus::List => Focus::Input,
            Focus::Slider => Focus::List,
        }
    }
}

/// The context-sensitive complete/undo button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionButton {
    /// Selected task is pending
    Complete,
    /// Selected task is done
    Undo,
    /// Nothing selected
    Disabled,
}

impl ActionButton {
    /// Derive the button from the selected task (if any)
    pub fn for_selection(selected: Option<&Task>) -> ActionButton {
        match selected.map(|t| t.state) {
            Some(TaskState::Pending) => ActionButton::Complete,
            Some(TaskState::Done) => ActionButton::Undo,
            None => ActionButton::Disabled,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActionButton::Complete | ActionButton::Disabled => "Complete",
            ActionButton::Undo => "Undo",
        }
    }

    pub fn is_enabled(self) -> bool {
        self != ActionButton::Disabled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line message shown in the status row until the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// Main application state. Owns the task list; the screen is rendered from it.
pub struct App {
    pub tasks: TaskList,
    /// File the list is persisted to after every mutation
    pub tasks_path: PathBuf,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub focus: Focus,
    /// Text typed into the new-task field
    pub input: String,
    /// Cursor position in `input` (byte offset, always on a grapheme boundary)
    pub input_cursor: usize,
    /// Selected row in the task list
    pub selected: Option<usize>,
    /// Navigation slider value, within `0..=tasks.max_index()`
    pub slider: usize,
    /// First visible row of the task list
    pub list_scroll: usize,
    pub show_help: bool,
    pub should_quit: bool,
    pub status: Option<StatusMessage>,
}

impl App {
    pub fn new(tasks: TaskList, tasks_path: PathBuf, config: &AppConfig) -> Self {
        App {
            tasks,
            tasks_path,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            focus: Focus::Input,
            input: String::new(),
            input_cursor: 0,
            selected: None,
            slider: 0,
            list_scroll: 0,
            show_help: false,
            should_quit: false,
            status: None,
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected.and_then(|i| self.tasks.get(i))
    }

    /// Current complete/undo button, recomputed from state on every call
    pub fn action_button(&self) -> ActionButton {
        ActionButton::for_selection(self.selected_task())
    }

    /// Upper bound of the navigation slider
    pub fn slider_max(&self) -> usize {
        self.tasks.max_index()
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind,
            text: text.into(),
        });
    }

    // -----------------------------------------------------------------------
    // Controller operations
    // -----------------------------------------------------------------------

    /// Add the text in the input field as a new pending task.
    /// Empty input is ignored.
    pub fn add_task(&mut self) {
        let text = std::mem::take(&mut self.input);
        self.input_cursor = 0;
        match task_ops::add_task(&mut self.tasks, text) {
            Ok(_) => self.persist(),
            Err(task_ops::TaskError::EmptyText) => {}
            Err(e) => self.set_status(StatusKind::Error, e.to_string()),
        }
    }

    /// Remove the selected task. Selection is cleared afterwards.
    pub fn remove_selected(&mut self) {
        let Some(index) = self.selected else {
            return;
        };
        if task_ops::remove_task(&mut self.tasks, index).is_err() {
            return;
        }
        self.selected = None;
        self.slider = self.slider.min(self.slider_max());
        self.persist();
    }

    /// Mark the selected task done
    pub fn complete_selected(&mut self) {
        if let Some(index) = self.selected
            && task_ops::complete_task(&mut self.tasks, index).is_ok()
        {
            self.persist();
        }
    }

    /// Mark the selected task pending again
    pub fn undo_selected(&mut self) {
        if let Some(index) = self.selected
            && task_ops::undo_task(&mut self.tasks, index).is_ok()
        {
            self.persist();
        }
    }

    /// Press the complete/undo button
    pub fn activate_action(&mut self) {
        match self.action_button() {
            ActionButton::Complete => self.complete_selected(),
            ActionButton::Undo => self.undo_selected(),
            ActionButton::Disabled => {}
        }
    }

    /// Change the selected row. Out-of-range indices clear the selection.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.tasks.len());
        if let Some(i) = self.selected {
            self.slider = i;
        }
    }

    /// Move the slider to `index` and select that row.
    pub fn navigate(&mut self, index: usize) {
        self.slider = index.min(self.slider_max());
        self.selected = None;
        if self.slider < self.tasks.len() {
            self.selected = Some(self.slider);
        }
    }

    /// Keep the selected row inside a viewport of `height` rows
    pub fn scroll_to_selection(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        let max_scroll = self.tasks.len().saturating_sub(height);
        self.list_scroll = self.list_scroll.min(max_scroll);
        if let Some(sel) = self.selected {
            if sel < self.list_scroll {
                self.list_scroll = sel;
            } else if sel >= self.list_scroll + height {
                self.list_scroll = sel + 1 - height;
            }
        }
    }

    /// Rewrite the whole task file. Failures go to the status row; the
    /// session carries on with the in-memory list.
    pub fn persist(&mut self) {
        if let Err(e) = self.try_persist() {
            let note = match &e {
                StoreError::WriteError {
                    saved_to_recovery: false,
                    ..
                } => "recovery log could not be written either; list kept in memory",
                _ => "unsaved list kept in recovery log",
            };
            self.set_status(StatusKind::Error, format!("{} ({})", e, note));
        }
    }

    fn try_persist(&self) -> Result<(), StoreError> {
        store::save_tasks(&self.tasks_path, &self.tasks)
    }

    /// Final save on quit
    pub fn save_on_close(&mut self) -> Result<(), StoreError> {
        self.should_quit = true;
        self.try_persist()
    }
}

/// Load the task file and run the TUI until the user quits.
pub fn run(tasks_path: &Path, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = store::load_tasks(tasks_path)?;
    // The file is rewritten on close at the latest, so keep the skipped
    // lines now, while stderr still belongs to us.
    store::log_dropped(tasks_path, &loaded.dropped);

    let mut app = App::new(loaded.list, tasks_path.to_path_buf(), config);
    if !loaded.dropped.is_empty() {
        app.set_status(
            StatusKind::Error,
            format!(
                "skipped {} malformed line(s) in {}; see `tl recovery`",
                loaded.dropped.len(),
                tasks_path.display()
            ),
        );
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal if a panic unwinds through the event loop
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    let saved = app.save_on_close();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    saved?;
    Ok(())
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
