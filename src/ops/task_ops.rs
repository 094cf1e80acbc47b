use chrono::{DateTime, Local};

use crate::model::store::Store;
use crate::model::task::Task;
use crate::parse::editor::Submission;

/// Error type for task operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("unknown project: {0}")]
    UnknownProject(String),
    #[error("no project available to hold the task")]
    NoProjects,
}

/// Flip a task's completion. Returns the new completion state.
pub fn toggle_completed(store: &mut Store, id: &str, now: DateTime<Local>) -> Result<bool, TaskError> {
    let task = store
        .find_task_mut(id)
        .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
    task.is_completed = !task.is_completed;
    task.completed_at = task.is_completed.then_some(now);
    Ok(task.is_completed)
}

/// Create a top-level task from a quick-add submission.
///
/// With no `project_id` the task goes to the store's default project.
pub fn add_task<'a>(
    store: &'a mut Store,
    submission: Submission,
    project_id: Option<&str>,
    now: DateTime<Local>,
) -> Result<&'a Task, TaskError> {
    let project_id = resolve_project(store, project_id)?;
    let task = build_task(store, submission, project_id, now);
    store.tasks.push(task);
    // Just pushed, so the vector is non-empty
    Ok(&store.tasks[store.tasks.len() - 1])
}

/// Create a sub-task under `parent_id`. The sub-task inherits the parent's project.
pub fn add_subtask<'a>(
    store: &'a mut Store,
    parent_id: &str,
    submission: Submission,
    now: DateTime<Local>,
) -> Result<&'a Task, TaskError> {
    let project_id = store
        .find_task(parent_id)
        .map(|p| p.project_id.clone())
        .ok_or_else(|| TaskError::NotFound(parent_id.to_string()))?;
    let mut task = build_task(store, submission, project_id, now);
    task.parent_id = Some(parent_id.to_string());

    let parent = store
        .find_task_mut(parent_id)
        .ok_or_else(|| TaskError::NotFound(parent_id.to_string()))?;
    parent.subtasks.push(task);
    let index = parent.subtasks.len() - 1;
    Ok(&parent.subtasks[index])
}

fn resolve_project(store: &Store, project_id: Option<&str>) -> Result<String, TaskError> {
    match project_id {
        Some(id) if store.project(id).is_some() => Ok(id.to_string()),
        Some(id) => Err(TaskError::UnknownProject(id.to_string())),
        None => store
            .default_project_id()
            .map(str::to_string)
            .ok_or(TaskError::NoProjects),
    }
}

fn build_task(store: &Store, submission: Submission, project_id: String, now: DateTime<Local>) -> Task {
    let mut task = Task::new(store.next_task_id(), submission.content, project_id, now);
    if !submission.description.is_empty() {
        task.description = Some(submission.description);
    }
    task.priority = submission.priority;
    task.due_date = Some(submission.due_date);
    for label in &submission.labels {
        task.add_label(label);
    }
    task
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;
    use chrono::{NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    fn store() -> Store {
        Store::seeded(now().date_naive(), now()).unwrap()
    }

    fn submission(content: &str) -> Submission {
        Submission {
            content: content.to_string(),
            description: String::new(),
            priority: Priority::P2,
            due_date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            labels: vec!["Work".to_string(), "Work".to_string()],
        }
    }

    #[test]
    fn test_toggle_sets_and_clears_completed_at() {
        let mut store = store();
        assert_eq!(toggle_completed(&mut store, "t1", now()), Ok(true));
        assert_eq!(store.find_task("t1").unwrap().completed_at, Some(now()));
        assert_eq!(toggle_completed(&mut store, "t1", now()), Ok(false));
        assert_eq!(store.find_task("t1").unwrap().completed_at, None);
    }

    #[test]
    fn test_toggle_unknown_task() {
        let mut store = store();
        assert_eq!(
            toggle_completed(&mut store, "t99", now()),
            Err(TaskError::NotFound("t99".to_string()))
        );
    }

    #[test]
    fn test_add_task_defaults_to_first_project() {
        let mut store = store();
        let task = add_task(&mut store, submission("Plan sprint"), None, now()).unwrap();
        assert_eq!(task.id, "t5");
        assert_eq!(task.project_id, "p1");
        assert_eq!(task.description, None);
        assert_eq!(task.labels, vec!["Work"]);
        assert_eq!(task.priority, Priority::P2);
        assert_eq!(store.tasks.len(), 5);
    }

    #[test]
    fn test_add_task_to_named_project() {
        let mut store = store();
        let task = add_task(&mut store, submission("Plan sprint"), Some("p3"), now()).unwrap();
        assert_eq!(task.project_id, "p3");
        let err = add_task(&mut store, submission("x"), Some("p42"), now()).unwrap_err();
        assert_eq!(err, TaskError::UnknownProject("p42".to_string()));
    }

    #[test]
    fn test_add_subtask() {
        let mut store = store();
        let sub = add_subtask(&mut store, "t4", submission("Outline"), now()).unwrap();
        assert_eq!(sub.parent_id.as_deref(), Some("t4"));
        assert_eq!(sub.project_id, "p2");
        assert_eq!(store.find_task("t4").unwrap().subtask_progress(), (0, 1));
        // Sub-tasks are not top-level
        assert_eq!(store.tasks.len(), 4);
        assert!(add_subtask(&mut store, "nope", submission("x"), now()).is_err());
    }
}
