use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Focus};
use crate::util::unicode;

/// Keys while the new-task field has focus
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => app.add_task(),
        KeyCode::Esc | KeyCode::Down => app.focus = Focus::List,
        KeyCode::Char('w') if ctrl => delete_word_back(app),
        KeyCode::Char('u') if ctrl => {
            app.input.clear();
            app.input_cursor = 0;
        }
        KeyCode::Char('a') if ctrl => app.input_cursor = 0,
        KeyCode::Char('e') if ctrl => app.input_cursor = app.input.len(),
        KeyCode::Char(c) if !ctrl => {
            app.input.insert(app.input_cursor, c);
            app.input_cursor += c.len_utf8();
        }
        KeyCode::Backspace => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&app.input, app.input_cursor) {
                app.input.replace_range(prev..app.input_cursor, "");
                app.input_cursor = prev;
            }
        }
        KeyCode::Delete => {
            if let Some(next) = unicode::next_grapheme_boundary(&app.input, app.input_cursor) {
                app.input.replace_range(app.input_cursor..next, "");
            }
        }
        KeyCode::Left => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&app.input, app.input_cursor) {
                app.input_cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) = unicode::next_grapheme_boundary(&app.input, app.input_cursor) {
                app.input_cursor = next;
            }
        }
        KeyCode::Home => app.input_cursor = 0,
        KeyCode::End => app.input_cursor = app.input.len(),
        _ => {}
    }
}

fn delete_word_back(app: &mut App) {
    let start = unicode::word_boundary_left(&app.input, app.input_cursor);
    app.input.replace_range(start..app.input_cursor, "");
    app.input_cursor = start;
}
