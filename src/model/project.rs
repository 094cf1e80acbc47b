use serde::{Deserialize, Serialize};

use super::ModelError;
use super::task::Task;

/// A project that groups tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Display color as `#rgb` or `#rrggbb`
    pub color: String,
    pub is_favorite: bool,
    /// Cached count shown next to the project name. Not kept in sync with
    /// actual membership; see [`Project::actual_task_count`].
    pub task_count: usize,
}

impl Project {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        color: &str,
        is_favorite: bool,
        task_count: usize,
    ) -> Result<Self, ModelError> {
        if !is_hex_color(color) {
            return Err(ModelError::InvalidColor(color.to_string()));
        }
        Ok(Project {
            id: id.into(),
            name: name.into(),
            color: color.to_string(),
            is_favorite,
            task_count,
        })
    }

    /// Count top-level tasks that really belong to this project
    pub fn actual_task_count(&self, tasks: &[Task]) -> usize {
        tasks.iter().filter(|t| t.project_id == self.id).count()
    }
}

fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
