use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ModelError;

/// Task priority. `P1` is the most urgent, `P4` the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    P1,
    P2,
    P3,
    #[default]
    P4,
}

impl Priority {
    /// The ordinal value, 1 (highest) through 4 (lowest)
    pub fn ordinal(self) -> u8 {
        match self {
            Priority::P1 => 1,
            Priority::P2 => 2,
            Priority::P3 => 3,
            Priority::P4 => 4,
        }
    }

    /// Map a quick-add `!!N` digit to a priority.
    ///
    /// The digit scale is shifted by one: `!!0` is P1, `!!1` P2, `!!2` P3,
    /// and everything else (including `!!3` and `!!4`) is P4.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Priority::P1,
            1 => Priority::P2,
            2 => Priority::P3,
            _ => Priority::P4,
        }
    }

    /// The `!!N` digit that selects this priority
    pub fn code(self) -> u8 {
        self.ordinal() - 1
    }
}

impl TryFrom<u8> for Priority {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::P1),
            2 => Ok(Priority::P2),
            3 => Ok(Priority::P3),
            4 => Ok(Priority::P4),
            other => Err(ModelError::InvalidPriority(other)),
        }
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> u8 {
        p.ordinal()
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.ordinal())
    }
}

/// A task, possibly with nested sub-tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub content: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub priority: Priority,
    /// Due date; `None` means the task is unscheduled
    pub due_date: Option<NaiveDate>,
    pub project_id: String,
    /// Labels without the `#` prefix. Treated as a set.
    pub labels: Vec<String>,
    pub parent_id: Option<String>,
    pub subtasks: Vec<Task>,
    pub created_at: DateTime<Local>,
    /// When the task was last marked complete
    pub completed_at: Option<DateTime<Local>>,
}

impl Task {
    /// Create an open P4 task with no date, labels or sub-tasks
    pub fn new(id: impl Into<String>, content: impl Into<String>, project_id: impl Into<String>, created_at: DateTime<Local>) -> Self {
        Task {
            id: id.into(),
            content: content.into(),
            description: None,
            is_completed: false,
            priority: Priority::default(),
            due_date: None,
            project_id: project_id.into(),
            labels: Vec::new(),
            parent_id: None,
            subtasks: Vec::new(),
            created_at,
            completed_at: None,
        }
    }

    /// Add a label unless it is already present. Returns whether it was added.
    pub fn add_label(&mut self, label: &str) -> bool {
        if self.has_label(label) {
            return false;
        }
        self.labels.push(label.to_string());
        true
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Completed and total counts of direct sub-tasks
    pub fn subtask_progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|t| t.is_completed).count();
        (done, self.subtasks.len())
    }
}
