use crate::domain::{Mode, Task, TaskId, TaskList, TimerEngine};
use serde::Serialize;
use std::time::Instant;

/// User intent forwarded by the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    ToggleRunning,
    Reset,
    SwitchMode(Mode),
    AddTask(String),
    ToggleTask(TaskId),
    DeleteTask(TaskId),
}

/// Observable state after a command or tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub mode: Mode,
    pub remaining_seconds: u32,
    pub is_running: bool,
    /// True only in the snapshot produced by the tick that finished the interval
    pub completed: bool,
    pub tasks: Vec<Task>,
}

/// Running totals for this session (in memory only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    /// Seconds ticked down while in focus mode
    pub focus_seconds: u64,
    pub completed_focus: u32,
    pub completed_breaks: u32,
}

/// One open application instance: a timer and a task list side by side
#[derive(Debug, Clone)]
pub struct Session {
    timer: TimerEngine,
    tasks: TaskList,
    stats: SessionStats,
}

impl Session {
    pub fn new(mode: Mode) -> Self {
        Self {
            timer: TimerEngine::new(mode),
            tasks: TaskList::new(),
            stats: SessionStats::default(),
        }
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Apply a command. Every command is valid in every state.
    pub fn dispatch(&mut self, command: Command) -> Snapshot {
        self.dispatch_at(command, Instant::now())
    }

    pub fn dispatch_at(&mut self, command: Command, now: Instant) -> Snapshot {
        match command {
            Command::Start => self.timer.start_at(now),
            Command::Pause => self.timer.pause(),
            Command::ToggleRunning => self.timer.toggle_running_at(now),
            Command::Reset => self.timer.reset(),
            Command::SwitchMode(mode) => self.timer.switch_mode(mode),
            Command::AddTask(text) => {
                self.tasks.add(&text);
            }
            Command::ToggleTask(id) => {
                self.tasks.toggle(id);
            }
            Command::DeleteTask(id) => {
                self.tasks.delete(id);
            }
        }
        self.observe()
    }

    /// Fire due ticks. Returns a snapshot only when the clock moved.
    pub fn poll(&mut self, now: Instant) -> Option<Snapshot> {
        let mode = self.timer.mode();
        let fired = self.timer.poll(now);
        if fired == 0 {
            return None;
        }

        if mode == Mode::Focus {
            self.stats.focus_seconds += u64::from(fired);
        }
        if self.timer.is_completed() {
            match mode {
                Mode::Focus => self.stats.completed_focus += 1,
                Mode::Break => self.stats.completed_breaks += 1,
            }
        }
        Some(self.observe())
    }

    /// Current state without consuming the completion signal
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mode: self.timer.mode(),
            remaining_seconds: self.timer.remaining(),
            is_running: self.timer.is_running(),
            completed: self.timer.is_completed(),
            tasks: self.tasks.as_slice().to_vec(),
        }
    }

    /// Current state, consuming the completion signal
    pub fn observe(&mut self) -> Snapshot {
        let mut snapshot = self.snapshot();
        snapshot.completed = self.timer.take_completed();
        snapshot
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Mode::Focus)
    }
}
