//! Keyboard input dispatch.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::AppState;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Char('l') => app.show_labels = !app.show_labels,
        KeyCode::Char('g') => app.show_grid = !app.show_grid,
        KeyCode::Char(c @ '1'..='9') => {
            let scenario = c as usize - '1' as usize;
            app.toggle_scenario(scenario);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buydip_core::{compose, SimulationConfig};

    fn app() -> AppState {
        AppState::new(compose(&SimulationConfig::default()).unwrap())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        for key in [
            press(KeyCode::Char('q')),
            press(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = app();
            handle_key(&mut app, key);
            assert!(!app.running);
        }
    }

    #[test]
    fn test_plain_c_does_not_quit() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('c')));
        assert!(app.running);
    }

    #[test]
    fn test_toggles() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('l')));
        handle_key(&mut app, press(KeyCode::Char('g')));
        assert!(!app.show_labels);
        assert!(!app.show_grid);
    }

    #[test]
    fn test_digit_toggles_scenario() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('2')));
        assert!(app.is_visible(0));
        assert!(!app.is_visible(1));
        handle_key(&mut app, press(KeyCode::Char('9')));
        assert_eq!(app.visible_count(), 2);
    }

    #[test]
    fn test_release_ignored() {
        let mut app = app();
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert!(app.running);
    }
}
