use ratatui::style::Color;

use crate::model::TaskState;
use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    /// Row color of a task that is still open
    pub pending: Color,
    /// Row color of a finished task
    pub done: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x1C, 0x1C, 0x1C),
            text: Color::Rgb(0xE0, 0xE0, 0xE0),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x21, 0x96, 0xF3),
            dim: Color::Rgb(0x80, 0x80, 0x80),
            red: Color::Rgb(0xF4, 0x43, 0x36),
            pending: Color::Rgb(0xFF, 0x47, 0x4C),
            done: Color::Rgb(0x90, 0xEE, 0x90),
            selection_bg: Color::Rgb(0x3A, 0x3A, 0x3A),
        }
    }
}

/// Parse a hex color string like "#FF474C" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "red" => theme.red = color,
                    "pending" => theme.pending = color,
                    "done" => theme.done = color,
                    "selection_bg" => theme.selection_bg = color,
                    _ => {}
                }
            }
        }

        theme
    }

    /// Get the row color for a task state
    pub fn state_color(&self, state: TaskState) -> Color {
        match state {
            TaskState::Pending => self.pending,
            TaskState::Done => self.done,
        }
    }
}
