use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Focus};
use crate::util::unicode;

/// Render the task rows. Row `i` on screen is always task `i` of the list,
/// colored by its state.
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let border_color = if app.focus == Focus::List {
        app.theme.highlight
    } else {
        app.theme.dim
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Tasks ({}) ", app.tasks.len()))
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.tasks.is_empty() {
        let empty = Paragraph::new(" No tasks yet. Type one above and press Enter.")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, inner);
        return;
    }

    let visible_height = inner.height as usize;
    app.scroll_to_selection(visible_height);

    let width = inner.width as usize;
    let mut lines: Vec<Line> = Vec::new();
    for (i, task) in app
        .tasks
        .iter()
        .enumerate()
        .skip(app.list_scroll)
        .take(visible_height)
    {
        let is_selected = app.selected == Some(i);
        let row_bg = if is_selected {
            app.theme.selection_bg
        } else {
            bg
        };
        let color = app.theme.state_color(task.state);
        let mut text_style = Style::default().fg(color).bg(row_bg);
        if is_selected {
            text_style = text_style.add_modifier(Modifier::BOLD);
        }
        if task.completed() {
            text_style = text_style.add_modifier(Modifier::CROSSED_OUT);
        }

        let marker = if is_selected { "\u{25B8} " } else { "  " };
        let checkbox = format!("[{}] ", task.state.checkbox_char());
        let prefix_width = marker.chars().count() + checkbox.len();
        // Newlines inside a task would break the row layout
        let flat_text = task.text.replace(['\n', '\r'], " ");
        let text = unicode::truncate_to_width(&flat_text, width.saturating_sub(prefix_width));

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(app.theme.highlight).bg(row_bg)),
            Span::styled(checkbox, Style::default().fg(color).bg(row_bg)),
            Span::styled(text, text_style),
        ];

        if is_selected {
            let content_width: usize = spans
                .iter()
                .map(|s| unicode::display_width(&s.content))
                .sum();
            if content_width < width {
                spans.push(Span::styled(
                    " ".repeat(width - content_width),
                    Style::default().bg(row_bg),
                ));
            }
        }

        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, inner);
}
