use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

/// Render the help overlay (toggled with ? or F1)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(70, 80, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" New task field", header_style)));
    add_binding(&mut lines, " Enter", "Add task", key_style, desc_style);
    add_binding(&mut lines, " Ctrl-W / Ctrl-U", "Delete word / line", key_style, desc_style);
    add_binding(&mut lines, " Esc / \u{2193}", "Go to list", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Task list", header_style)));
    add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Select task", key_style, desc_style);
    add_binding(&mut lines, " Enter/Space", "Complete / undo", key_style, desc_style);
    add_binding(&mut lines, " d/Del", "Remove task", key_style, desc_style);
    add_binding(&mut lines, " Esc", "Clear selection", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Slider", header_style)));
    add_binding(&mut lines, " \u{2190}\u{2192}/hl", "Move selection", key_style, desc_style);
    add_binding(&mut lines, " Home/End", "First / last task", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Anywhere", header_style)));
    add_binding(&mut lines, " Tab/Shift-Tab", "Next / previous control", key_style, desc_style);
    add_binding(&mut lines, " q, Ctrl-C", "Save and quit", key_style, desc_style);
    add_binding(&mut lines, " ?, F1", "Close this help", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let padded_key = format!("{:<18}", key);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
