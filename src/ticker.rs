use std::time::{Duration, Instant};

/// Countdown step: one decrement per second
pub const TICK_PERIOD_MS: u64 = 1000;

/// How long the event loop waits for input while nothing is scheduled
pub const IDLE_POLL_MS: u64 = 250;

/// Get tick period
pub fn tick_period() -> Duration {
    Duration::from_millis(TICK_PERIOD_MS)
}

/// Get idle poll interval
pub fn idle_poll() -> Duration {
    Duration::from_millis(IDLE_POLL_MS)
}

/// Handle for the periodic tick. Armed only while the timer runs; a cancelled
/// schedule never reports due ticks, so nothing from an earlier run can fire.
#[derive(Debug, Clone)]
pub struct TickSchedule {
    period: Duration,
    next_due: Option<Instant>,
}

impl TickSchedule {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Schedule the first tick one period after `now`
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    /// Drop any pending tick
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Count the ticks due at `now` and move the deadline past them
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(mut deadline) = self.next_due else {
            return 0;
        };

        let mut count = 0;
        while deadline <= now {
            count += 1;
            deadline += self.period;
        }
        self.next_due = Some(deadline);
        count
    }

    /// How long to block on input before the next tick is due
    pub fn timeout(&self, now: Instant, idle: Duration) -> Duration {
        match self.next_due {
            Some(deadline) => deadline.saturating_duration_since(now),
            None => idle,
        }
    }
}

impl Default for TickSchedule {
    fn default() -> Self {
        Self::new(tick_period())
    }
}
