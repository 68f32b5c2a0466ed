use crate::domain::{Mode, TaskId, UiMode};
use crate::session::{Command, Session, Snapshot};
use crate::ticker::idle_poll;
use std::time::{Duration, Instant};
use tracing::info;

/// Input form state for adding tasks
#[derive(Debug, Clone, Default)]
pub struct InputFormState {
    pub text: String,
}

/// Main application state: one session plus what the view needs to draw it
pub struct AppState {
    pub session: Session,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    /// Message left by a finished interval, cleared by the next command
    pub banner: Option<&'static str>,
    pub use_emoji: bool,
}

impl AppState {
    pub fn new(start_mode: Mode, use_emoji: bool) -> Self {
        Self {
            session: Session::new(start_mode),
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            banner: None,
            use_emoji,
        }
    }

    /// Forward a command to the session
    pub fn dispatch(&mut self, command: Command) -> Snapshot {
        self.banner = None;
        let snapshot = self.session.dispatch(command);
        self.clamp_selection();
        snapshot
    }

    /// Fire due ticks and pick up the completion signal
    pub fn tick(&mut self, now: Instant) {
        if let Some(snapshot) = self.session.poll(now) {
            if snapshot.completed {
                info!(mode = %snapshot.mode, "showing completion banner");
                self.banner = Some(snapshot.mode.completion_message());
            }
        }
    }

    /// How long the event loop may block on input
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.session.timer().next_timeout(now, idle_poll())
    }

    pub fn toggle_running(&mut self) {
        self.dispatch(Command::ToggleRunning);
    }

    pub fn reset_timer(&mut self) {
        self.dispatch(Command::Reset);
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        self.dispatch(Command::SwitchMode(mode));
    }

    /// Id of the highlighted task, if any
    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.session
            .tasks()
            .as_slice()
            .get(self.selected_index)
            .map(|task| task.id)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.session.tasks().len() {
            self.selected_index += 1;
        }
    }

    /// Toggle completion of the highlighted task
    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.dispatch(Command::ToggleTask(id));
        }
    }

    /// Delete the highlighted task
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.dispatch(Command::DeleteTask(id));
        }
    }

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::default());
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            form.text.push(c);
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.text.pop();
        }
    }

    /// Submit input form; blank text adds nothing
    pub fn submit_input_form(&mut self) {
        if let Some(form) = self.input_form.take() {
            let before = self.session.tasks().len();
            self.dispatch(Command::AddTask(form.text));
            if self.session.tasks().len() > before {
                self.selected_index = self.session.tasks().len() - 1;
            }
            self.ui_mode = UiMode::Normal;
        }
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    fn clamp_selection(&mut self) {
        let len = self.session.tasks().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_app() -> AppState {
        let mut app = AppState::new(Mode::Focus, true);
        app.dispatch(Command::AddTask("Task 1".to_string()));
        app.dispatch(Command::AddTask("Task 2".to_string()));
        app
    }

    #[test]
    fn test_app_state_new() {
        let app = AppState::new(Mode::Break, false);
        assert_eq!(app.session.timer().mode(), Mode::Break);
        assert_eq!(app.session.timer().remaining(), 300);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
        assert!(app.banner.is_none());
    }

    #[test]
    fn test_move_selection() {
        let mut app = create_test_app();

        app.move_selection_down();
        assert_eq!(app.selected_index, 1);

        // Can't go past the end
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);

        app.move_selection_up();
        assert_eq!(app.selected_index, 0);

        // Can't go below 0
        app.move_selection_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_toggle_selected() {
        let mut app = create_test_app();
        app.move_selection_down();
        app.toggle_selected();

        let tasks = app.session.tasks().as_slice();
        assert!(!tasks[0].completed);
        assert!(tasks[1].completed);
    }

    #[test]
    fn test_delete_last_clamps_selection() {
        let mut app = create_test_app();
        app.move_selection_down();
        app.delete_selected();

        assert_eq!(app.session.tasks().len(), 1);
        assert_eq!(app.selected_index, 0);

        app.delete_selected();
        assert!(app.session.tasks().is_empty());
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.selected_task_id(), None);

        // Nothing selected, nothing happens
        app.toggle_selected();
        app.delete_selected();
    }

    #[test]
    fn test_submit_input_form() {
        let mut app = create_test_app();
        app.start_add_task();
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        for c in " New ".chars() {
            app.input_form_add_char(c);
        }
        app.input_form_backspace();
        app.submit_input_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
        assert_eq!(app.session.tasks().len(), 3);
        assert_eq!(app.session.tasks().as_slice()[2].text, "New");
        assert_eq!(app.selected_index, 2);
    }

    #[test]
    fn test_submit_blank_form_adds_nothing() {
        let mut app = create_test_app();
        app.start_add_task();
        app.input_form_add_char(' ');
        app.submit_input_form();

        assert_eq!(app.session.tasks().len(), 2);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_banner_until_next_command() {
        let mut app = AppState::new(Mode::Break, true);
        let start = Instant::now();
        app.session.dispatch_at(Command::Start, start);

        app.tick(start + Duration::from_secs(300));
        assert_eq!(app.banner, Some("Break over"));

        // Idle ticks keep the banner
        app.tick(start + Duration::from_secs(301));
        assert_eq!(app.banner, Some("Break over"));

        app.reset_timer();
        assert!(app.banner.is_none());
        assert_eq!(app.session.timer().remaining(), 300);
    }

    #[test]
    fn test_switch_mode_and_toggle() {
        let mut app = AppState::new(Mode::Focus, true);
        app.toggle_running();
        assert!(app.session.timer().is_running());

        app.switch_mode(Mode::Break);
        assert!(!app.session.timer().is_running());
        assert_eq!(app.session.timer().remaining(), 300);
    }
}
