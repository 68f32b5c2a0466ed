use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Identifier of a task, unique for the lifetime of its list
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A checklist item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Trimmed, never empty
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Local>,
    pub completed_at: Option<DateTime<Local>>,
}

impl Task {
    fn new(id: TaskId, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at: Local::now(),
            completed_at: None,
        }
    }

    /// Flip completion, stamping or clearing the completion time
    fn toggle(&mut self) {
        self.completed = !self.completed;
        self.completed_at = if self.completed {
            Some(Local::now())
        } else {
            None
        };
    }
}

/// Ordered task checklist. Insertion order is kept; only deletion removes entries.
#[derive(Debug, Clone)]
pub struct TaskList {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskList {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a task. Blank text is ignored and yields `None`.
    pub fn add(&mut self, text: &str) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            debug!("ignored blank task text");
            return None;
        }

        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task::new(id, text.to_string()));
        info!(task = %id, "task added");
        Some(id)
    }

    /// Flip completion of `id`. Returns false if no such task.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.toggle();
                debug!(task = %id, completed = task.completed, "task toggled");
                true
            }
            None => false,
        }
    }

    /// Remove `id`, keeping the order of the rest. Returns false if no such task.
    pub fn delete(&mut self, id: TaskId) -> bool {
        match self.tasks.iter().position(|t| t.id == id) {
            Some(idx) => {
                self.tasks.remove(idx);
                info!(task = %id, "task deleted");
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn open_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}
