use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

use super::handle_common;

/// Keys while the task list has focus
pub(super) fn handle_list(app: &mut App, key: KeyEvent) {
    if handle_common(app, key) {
        return;
    }
    let len = app.tasks.len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            let next = match app.selected {
                Some(i) => i.saturating_sub(1),
                None => len.saturating_sub(1),
            };
            app.select(Some(next));
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let next = match app.selected {
                Some(i) => (i + 1).min(len.saturating_sub(1)),
                None => 0,
            };
            app.select(Some(next));
        }
        KeyCode::Home | KeyCode::Char('g') => app.select(Some(0)),
        KeyCode::End | KeyCode::Char('G') => app.select(Some(len.saturating_sub(1))),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_action(),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Esc => app.select(None),
        _ => {}
    }
}

/// Keys while the navigation slider has focus
pub(super) fn handle_slider(app: &mut App, key: KeyEvent) {
    if handle_common(app, key) {
        return;
    }
    let target = match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.slider.saturating_sub(1),
        KeyCode::Right | KeyCode::Char('l') => app.slider + 1,
        KeyCode::Home => 0,
        KeyCode::End => app.slider_max(),
        _ => return,
    };
    app.navigate(target);
}
