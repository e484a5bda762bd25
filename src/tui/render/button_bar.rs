use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{ActionButton, App};

/// Render the Remove button and the context-sensitive Complete/Undo button
pub fn render_button_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let has_selection = app.selected_task().is_some();
    let action = app.action_button();

    let button_style = |enabled: bool, color| {
        if enabled {
            Style::default()
                .fg(color)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        }
    };

    let action_color = match action {
        ActionButton::Undo => app.theme.pending,
        ActionButton::Complete | ActionButton::Disabled => app.theme.highlight,
    };

    let line = Line::from(vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled("[ Remove ]", button_style(has_selection, app.theme.red)),
        Span::styled("  ", Style::default().bg(bg)),
        Span::styled(
            format!("[ {} ]", action.label()),
            button_style(action.is_enabled(), action_color),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}
