use serde::Serialize;

use crate::model::task::Task;

/// Which field of a task matched a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Content,
    Description,
    Label,
}

/// Case-insensitive substring search over a task's content, description and labels.
///
/// Returns the first field that matched, checked in that order.
pub fn match_field(task: &Task, query: &str) -> Option<MatchField> {
    let q = query.to_lowercase();
    if task.content.to_lowercase().contains(&q) {
        return Some(MatchField::Content);
    }
    if task
        .description
        .as_deref()
        .is_some_and(|d| d.to_lowercase().contains(&q))
    {
        return Some(MatchField::Description);
    }
    if task.labels.iter().any(|l| l.to_lowercase().contains(&q)) {
        return Some(MatchField::Label);
    }
    None
}

pub fn matches(task: &Task, query: &str) -> bool {
    match_field(task, query).is_some()
}

/// Linear scan of top-level tasks, keeping input order
pub fn search_tasks<'a>(tasks: &'a [Task], query: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|t| matches(t, query)).collect()
}
