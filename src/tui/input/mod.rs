mod edit;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus};

use edit::handle_edit;
use navigate::{handle_list, handle_slider};

/// Handle a key event for the focused control
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status = None;

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        app.should_quit = true;
        return;
    }

    // Help overlay intercepts everything else
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::F(1)) {
            app.show_help = false;
        }
        return;
    }

    match key.code {
        KeyCode::F(1) => {
            app.show_help = true;
            return;
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::Input => handle_edit(app, key),
        Focus::List => handle_list(app, key),
        Focus::Slider => handle_slider(app, key),
    }
}

/// Keys shared by the list and the slider (controls without text entry).
/// Returns true if the key was consumed.
fn handle_common(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('a') | KeyCode::Char('i') => app.focus = Focus::Input,
        _ => return false,
    }
    true
}
