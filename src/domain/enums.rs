use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Full length of a focus interval in seconds (25 minutes)
pub const FOCUS_SECONDS: u32 = 25 * 60;

/// Full length of a break interval in seconds (5 minutes)
pub const BREAK_SECONDS: u32 = 5 * 60;

/// Timer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Focus,
    Break,
}

impl Mode {
    /// Duration the clock is reset to when entering this mode
    pub fn full_duration(&self) -> u32 {
        match self {
            Mode::Focus => FOCUS_SECONDS,
            Mode::Break => BREAK_SECONDS,
        }
    }

    /// Display name for this mode
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Focus => "Focus",
            Mode::Break => "Break",
        }
    }

    /// Get the emoji symbol for this mode
    pub fn symbol(&self) -> &'static str {
        match self {
            Mode::Focus => "🚀",
            Mode::Break => "☕",
        }
    }

    /// Phrase shown under the clock
    pub fn phrase(&self) -> &'static str {
        match self {
            Mode::Focus => "Deep work time!",
            Mode::Break => "Grab a coffee and rest.",
        }
    }

    /// Banner shown when an interval in this mode runs out
    pub fn completion_message(&self) -> &'static str {
        match self {
            Mode::Focus => "Focus session complete",
            Mode::Break => "Break over",
        }
    }

    pub fn all() -> &'static [Mode] {
        &[Mode::Focus, Mode::Break]
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raised when text names neither focus nor break
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode '{0}' (expected 'focus' or 'break')")]
pub struct ModeParseError(pub String);

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "focus" | "work" => Ok(Mode::Focus),
            "break" => Ok(Mode::Break),
            _ => Err(ModeParseError(s.to_string())),
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
}
