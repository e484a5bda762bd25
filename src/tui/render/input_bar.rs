use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_segmentation::UnicodeSegmentation;

use crate::tui::app::{App, Focus};
use crate::util::unicode;

const ADD_LABEL: &str = "[ Add ]";

/// Render the new-task field and the Add button
pub fn render_input_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let focused = app.focus == Focus::Input;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(ADD_LABEL.len() as u16 + 2),
        ])
        .split(area);

    let border_color = if focused {
        app.theme.highlight
    } else {
        app.theme.dim
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" New task ")
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);

    let width = inner.width as usize;
    let line = if app.input.is_empty() && !focused {
        Line::from(Span::styled(
            "Type a task and press Enter",
            Style::default().fg(app.theme.dim).bg(bg),
        ))
    } else {
        let (visible, cursor_x) = visible_input(&app.input, app.input_cursor, width);
        if focused && inner.width > 0 && inner.height > 0 {
            frame.set_cursor_position((inner.x + cursor_x as u16, inner.y));
        }
        Line::from(Span::styled(
            visible,
            Style::default().fg(app.theme.text_bright).bg(bg),
        ))
    };
    frame.render_widget(Paragraph::new(line), inner);

    // Add button, vertically centered next to the field
    let button_area = Rect {
        x: chunks[1].x + 1,
        y: chunks[1].y + chunks[1].height / 2,
        width: chunks[1].width.saturating_sub(1),
        height: chunks[1].height.min(1),
    };
    let add_style = if app.input.is_empty() {
        Style::default().fg(app.theme.dim).bg(bg)
    } else {
        Style::default()
            .fg(app.theme.done)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(ADD_LABEL, add_style)),
        button_area,
    );
}

/// The slice of `text` to show in a field `width` cells wide so the cursor
/// stays visible, and the cursor column inside that slice.
fn visible_input(text: &str, cursor: usize, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }
    // One cell is kept free for the cursor at the end of the text
    let budget = width - 1;
    let before = &text[..cursor];
    let mut start = 0;
    let mut cursor_col = unicode::display_width(before);
    let mut graphemes = before.grapheme_indices(true);
    while cursor_col > budget {
        match graphemes.next() {
            Some((i, g)) => {
                start = i + g.len();
                cursor_col -= unicode::display_width(g);
            }
            None => break,
        }
    }

    let mut visible = String::new();
    let mut used = 0;
    for g in text[start..].graphemes(true) {
        let gw = unicode::display_width(g);
        if used + gw > width {
            break;
        }
        used += gw;
        visible.push_str(g);
    }
    (visible, cursor_col)
}
