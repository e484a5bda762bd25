use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::model::{AppConfig, Task, TaskList, TaskState};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer.
pub fn render_to_buffer<F>(w: u16, h: u16, f: F) -> Buffer
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();
    terminal.backend().buffer().clone()
}

/// Plain text of one buffer row, trailing blanks trimmed.
pub fn buffer_line(buf: &Buffer, y: u16) -> String {
    let w = buf.area.width;
    let s: String = (0..w).map(|x| buf[(x, y)].symbol()).collect();
    s.trim_end().to_string()
}

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let buf = render_to_buffer(w, h, f);
    let lines: Vec<String> = (0..buf.area.height).map(|y| buffer_line(&buf, y)).collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Build an App over `(text, done)` rows whose task file lives in a fresh
/// temp dir (`<tmp>/tasks.txt`, not yet written). Keep the TempDir alive.
pub fn app_with_tasks(rows: &[(&str, bool)]) -> (TempDir, App) {
    let tmp = TempDir::new().unwrap();
    let tasks = rows
        .iter()
        .map(|(text, done)| {
            let state = if *done {
                TaskState::Done
            } else {
                TaskState::Pending
            };
            Task::with_state(*text, state)
        })
        .collect();
    let path = tmp.path().join("tasks.txt");
    let app = App::new(TaskList::new(tasks), path, &AppConfig::default());
    (tmp, app)
}
