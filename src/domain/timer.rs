use super::enums::Mode;
use crate::ticker::TickSchedule;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Format remaining seconds as "MM:SS". Minutes are not capped at two digits.
pub fn format_clock(remaining: u32) -> String {
    format!("{:02}:{:02}", remaining / 60, remaining % 60)
}

/// Countdown clock alternating between focus and break intervals.
///
/// The engine is IDLE or RUNNING. While RUNNING it owns an armed
/// [`TickSchedule`]; every transition out of RUNNING cancels it.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    mode: Mode,
    remaining: u32,
    running: bool,
    /// Set by the tick that reaches zero, cleared by the next command
    completed: bool,
    schedule: TickSchedule,
}

impl TimerEngine {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            remaining: mode.full_duration(),
            running: false,
            completed: false,
            schedule: TickSchedule::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the last tick finished the interval
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Start counting down from now
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Start counting down, first tick one period after `now`.
    /// No-op when already running or when the clock is at zero.
    pub fn start_at(&mut self, now: Instant) {
        self.completed = false;
        if self.running {
            return;
        }
        if self.remaining == 0 {
            debug!(mode = %self.mode, "start ignored, clock at zero");
            return;
        }
        self.running = true;
        self.schedule.arm(now);
        debug!(mode = %self.mode, remaining = self.remaining, "timer started");
    }

    /// Stop counting down, keeping the remaining time
    pub fn pause(&mut self) {
        self.completed = false;
        if self.running {
            self.stop();
            debug!(mode = %self.mode, remaining = self.remaining, "timer paused");
        }
    }

    /// Toggle between running and paused
    pub fn toggle_running(&mut self) {
        self.toggle_running_at(Instant::now());
    }

    pub fn toggle_running_at(&mut self, now: Instant) {
        if self.running {
            self.pause();
        } else {
            self.start_at(now);
        }
    }

    /// Back to the full duration of the current mode, idle
    pub fn reset(&mut self) {
        self.completed = false;
        self.stop();
        self.remaining = self.mode.full_duration();
        debug!(mode = %self.mode, "timer reset");
    }

    /// Enter `mode` with a fresh, idle clock. Resets even when the mode is unchanged.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.completed = false;
        self.stop();
        self.mode = mode;
        self.remaining = mode.full_duration();
        info!(mode = %mode, "mode switched");
    }

    /// One-second decrement. Returns false when idle (nothing happens).
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.stop();
            self.completed = true;
            info!(mode = %self.mode, "interval completed");
        }
        true
    }

    /// Fire every tick due at `now`. Returns how many ticks were applied.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let due = self.schedule.due(now);
        let mut fired = 0;
        for _ in 0..due {
            if !self.tick() {
                break;
            }
            fired += 1;
        }
        fired
    }

    /// How long the caller may wait before the next tick is due
    pub fn next_timeout(&self, now: Instant, idle: Duration) -> Duration {
        self.schedule.timeout(now, idle)
    }

    /// Read and clear the completion flag
    pub fn take_completed(&mut self) -> bool {
        std::mem::take(&mut self.completed)
    }

    fn stop(&mut self) {
        self.running = false;
        self.schedule.cancel();
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(Mode::Focus)
    }
}
