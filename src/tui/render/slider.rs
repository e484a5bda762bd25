use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus};

const LABEL: &str = " Go to ";

/// Render the navigation slider: ` Go to ◂───●───▸ 2/5`
pub fn render_slider(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let focused = app.focus == Focus::Slider;
    let max = app.slider_max();
    let counter = format!(" {}/{}", app.slider, max);

    let track_color = if focused {
        app.theme.highlight
    } else {
        app.theme.dim
    };
    let label_style = if focused {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(bg)
    };

    // 2 cells for the end arrows
    let fixed = LABEL.len() + 2 + counter.len();
    let track_width = (area.width as usize).saturating_sub(fixed);

    let mut spans = vec![Span::styled(LABEL, label_style)];
    if track_width > 0 {
        let thumb = thumb_position(app.slider, max, track_width);
        let before = "\u{2500}".repeat(thumb);
        let after = "\u{2500}".repeat(track_width - thumb - 1);
        let track_style = Style::default().fg(track_color).bg(bg);
        spans.push(Span::styled("\u{25C2}", track_style));
        spans.push(Span::styled(before, track_style));
        spans.push(Span::styled(
            "\u{25CF}",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(after, track_style));
        spans.push(Span::styled("\u{25B8}", track_style));
    }
    spans.push(Span::styled(counter, Style::default().fg(app.theme.dim).bg(bg)));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

/// Cell index of the thumb on a track `width` cells wide
fn thumb_position(value: usize, max: usize, width: usize) -> usize {
    if max == 0 || width <= 1 {
        return 0;
    }
    value.min(max) * (width - 1) / max
}
