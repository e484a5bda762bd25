pub mod button_bar;
pub mod help_overlay;
pub mod input_bar;
pub mod slider;
pub mod status_row;
pub mod task_list_view;
#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::App;

/// Main render function. The whole screen is rebuilt from `App` every frame.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let hint_rows = if app.show_key_hints { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),         // title
            Constraint::Length(3),         // input + add button
            Constraint::Min(3),            // task list
            Constraint::Length(1),         // remove / complete buttons
            Constraint::Length(1),         // navigation slider
            Constraint::Length(hint_rows), // key hints
            Constraint::Length(1),         // status row
        ])
        .split(area);

    render_title(frame, app, chunks[0]);
    input_bar::render_input_bar(frame, app, chunks[1]);
    task_list_view::render_task_list(frame, app, chunks[2]);
    button_bar::render_button_bar(frame, app, chunks[3]);
    slider::render_slider(frame, app, chunks[4]);
    if app.show_key_hints {
        status_row::render_key_hints(frame, app, chunks[5]);
    }
    status_row::render_status_row(frame, app, chunks[6]);

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

/// Title on the left, pending/done counts on the right
fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let (pending, done) = app.tasks.counts();
    let title = " Task List";
    let counts = format!("{} pending  {} done ", pending, done);

    let mut spans = vec![Span::styled(
        title,
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    let used = title.chars().count() + counts.chars().count();
    let width = area.width as usize;
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
        spans.push(Span::styled(counts, Style::default().fg(app.theme.dim).bg(bg)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}
