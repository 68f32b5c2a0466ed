pub mod enums;
pub mod task;
pub mod timer;

pub use enums::{Mode, UiMode};
pub use task::{Task, TaskId, TaskList};
pub use timer::{format_clock, TimerEngine};
