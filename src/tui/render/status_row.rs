use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus, StatusKind};
use crate::util::unicode;

/// Render the status row (bottom of screen): the pending message if any,
/// otherwise the task file path, dimmed.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let span = match &app.status {
        Some(msg) => {
            let fg = match msg.kind {
                StatusKind::Info => app.theme.text,
                StatusKind::Error => app.theme.red,
            };
            Span::styled(
                unicode::truncate_to_width(&format!(" {}", msg.text), width),
                Style::default().fg(fg).bg(bg),
            )
        }
        None => Span::styled(
            unicode::truncate_to_width(&format!(" {}", app.tasks_path.display()), width),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    };

    let paragraph = Paragraph::new(Line::from(span)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Key hints for the focused control
pub fn key_hints(focus: Focus) -> &'static str {
    match focus {
        Focus::Input => " Enter add  Tab list  Ctrl-C quit  F1 help",
        Focus::List => {
            " \u{2191}\u{2193} select  Enter complete/undo  d remove  Esc deselect  a new  q quit  ? help"
        }
        Focus::Slider => " \u{2190}\u{2192} move  Home/End ends  Tab input  q quit  ? help",
    }
}

/// Render the hint line above the status row
pub fn render_key_hints(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let hints = unicode::truncate_to_width(key_hints(app.focus), area.width as usize);
    let paragraph = Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(app.theme.dim).bg(bg),
    )))
    .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
