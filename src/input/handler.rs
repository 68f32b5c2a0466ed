use crate::app::AppState;
use crate::domain::{Mode, UiMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask => handle_input_form_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        // Timer
        KeyCode::Char(' ') => app.toggle_running(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.reset_timer(),
        KeyCode::Char('f') | KeyCode::Char('F') => app.switch_mode(Mode::Focus),
        KeyCode::Char('b') | KeyCode::Char('B') => app.switch_mode(Mode::Break),

        // Task list
        KeyCode::Up => app.move_selection_up(),
        KeyCode::Down => app.move_selection_down(),
        KeyCode::Enter | KeyCode::Char('x') | KeyCode::Char('X') => app.toggle_selected(),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_task(),

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,

        _ => {}
    }
    false
}

/// Handle keys in input form mode
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input_form_add_char(c)
        }
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Command;

    fn create_test_app() -> AppState {
        let mut app = AppState::new(Mode::Focus, true);
        app.dispatch(Command::AddTask("Test task".to_string()));
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_handle_quit() {
        let mut app = create_test_app();
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))));
        assert!(handle_key(&mut app, key(KeyCode::Esc)));
        assert!(handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ));
    }

    #[test]
    fn test_handle_timer_keys() {
        let mut app = create_test_app();

        handle_key(&mut app, key(KeyCode::Char(' ')));
        assert!(app.session.timer().is_running());

        handle_key(&mut app, key(KeyCode::Char('b')));
        assert_eq!(app.session.timer().mode(), Mode::Break);
        assert!(!app.session.timer().is_running());

        handle_key(&mut app, key(KeyCode::Char('f')));
        assert_eq!(app.session.timer().mode(), Mode::Focus);
        assert_eq!(app.session.timer().remaining(), 1500);

        handle_key(&mut app, key(KeyCode::Char(' ')));
        handle_key(&mut app, key(KeyCode::Char('r')));
        assert!(!app.session.timer().is_running());
    }

    #[test]
    fn test_handle_add_task() {
        let mut app = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('a')));
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        assert!(app.input_form.is_some());

        // Keys that mean something in normal mode are plain text here
        for c in "read".chars() {
            assert!(!handle_key(&mut app, key(KeyCode::Char(c))));
        }
        handle_key(&mut app, key(KeyCode::Char('q')));
        handle_key(&mut app, key(KeyCode::Backspace));

        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.session.tasks().len(), 2);
        assert_eq!(app.session.tasks().as_slice()[1].text, "read");
    }

    #[test]
    fn test_handle_cancel_add_task() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a')));
        handle_key(&mut app, key(KeyCode::Char('z')));
        handle_key(&mut app, key(KeyCode::Esc));

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.session.tasks().len(), 1);
    }

    #[test]
    fn test_handle_toggle_and_delete() {
        let mut app = create_test_app();

        handle_key(&mut app, key(KeyCode::Enter));
        assert!(app.session.tasks().as_slice()[0].completed);

        handle_key(&mut app, key(KeyCode::Char('x')));
        assert!(!app.session.tasks().as_slice()[0].completed);

        handle_key(&mut app, key(KeyCode::Delete));
        assert!(app.session.tasks().is_empty());
    }
}
