use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::model::project::Project;
use crate::model::store::Store;
use crate::model::task::Task;
use crate::model::user::User;
use crate::ops::filter::EmptyState;
use crate::ops::productivity::ProductivitySummary;
use crate::parse::quick_add::QuickAddFields;
use crate::util::unicode::{fit_to_width, truncate_to_width};

/// Width of the due-date column in task lines
const DUE_COLUMN: usize = 10;
/// Task content longer than this is truncated in list output
const CONTENT_COLUMN: usize = 60;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub priority: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub project: String,
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub title: String,
    pub tasks: Vec<TaskJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
}

#[derive(Serialize)]
pub struct ProjectJson {
    #[serde(flatten)]
    pub project: Project,
    /// Real membership count, next to the cached `task_count`
    pub actual_task_count: usize,
}

#[derive(Serialize)]
pub struct ParseJson<'a> {
    pub text: &'a str,
    #[serde(flatten)]
    pub fields: &'a QuickAddFields,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id.clone(),
        content: task.content.clone(),
        description: task.description.clone(),
        completed: task.is_completed,
        priority: task.priority.ordinal(),
        due_date: task.due_date,
        project: task.project_id.clone(),
        labels: task.labels.clone(),
        parent_id: task.parent_id.clone(),
        subtasks: task.subtasks.iter().map(task_to_json).collect(),
    }
}

pub fn project_to_json(project: &Project, store: &Store) -> ProjectJson {
    ProjectJson {
        project: project.clone(),
        actual_task_count: project.actual_task_count(&store.tasks),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// "Today", "Tomorrow", the ISO date, or "no date"
pub fn due_label(due: Option<NaiveDate>, today: NaiveDate) -> String {
    match due {
        None => "no date".to_string(),
        Some(d) if d == today => "Today".to_string(),
        Some(d) if Some(d) == today.checked_add_days(Days::new(1)) => "Tomorrow".to_string(),
        Some(d) => d.format("%Y-%m-%d").to_string(),
    }
}

/// Format a single task as a one-line summary
pub fn format_task_line(task: &Task, today: NaiveDate) -> String {
    let check = if task.is_completed { 'x' } else { ' ' };
    let labels = if task.labels.is_empty() {
        String::new()
    } else {
        format!(
            " {}",
            task.labels
                .iter()
                .map(|l| format!("#{}", l))
                .collect::<Vec<_>>()
                .join(" ")
        )
    };
    let progress = match task.subtask_progress() {
        (_, 0) => String::new(),
        (done, total) => format!(" ({}/{} sub-tasks)", done, total),
    };
    format!(
        "[{}] {} {} {} {}{}{}",
        check,
        task.id,
        task.priority,
        fit_to_width(&due_label(task.due_date, today), DUE_COLUMN),
        truncate_to_width(&task.content, CONTENT_COLUMN),
        labels,
        progress
    )
}

/// Format a task with its sub-tasks, indented
pub fn format_task_tree(task: &Task, today: NaiveDate, indent: usize) -> Vec<String> {
    let mut lines = vec![format!("{}{}", "  ".repeat(indent), format_task_line(task, today))];
    for sub in &task.subtasks {
        lines.extend(format_task_tree(sub, today, indent + 1));
    }
    lines
}

/// Format a list heading, its tasks, and the empty-state message if any
pub fn format_task_list(
    title: &str,
    tasks: &[&Task],
    empty_state: Option<&EmptyState>,
    today: NaiveDate,
) -> Vec<String> {
    let mut lines = vec![format!("== {} ==", title)];
    for task in tasks {
        lines.extend(format_task_tree(task, today, 0));
    }
    if let Some(empty) = empty_state {
        lines.push(empty.message());
    }
    lines
}

/// Format what the quick-add parser read from a line
pub fn format_fields(fields: &QuickAddFields) -> Vec<String> {
    let mut lines = vec![
        format!("priority: {}", fields.priority),
        format!("date: {} ({})", fields.date_label, fields.date_value.format("%Y-%m-%d")),
    ];
    if fields.tags.is_empty() {
        lines.push("tags: 0".to_string());
    } else {
        lines.push(format!(
            "tags: {} ({})",
            fields.tag_count,
            fields
                .tags
                .iter()
                .map(|t| format!("#{}", t))
                .collect::<Vec<_>>()
                .join(" ")
        ));
    }
    lines
}

/// Format a project for the project listing
pub fn format_project_line(project: &Project) -> String {
    let star = if project.is_favorite { '*' } else { ' ' };
    format!(
        "{} {} ({}) {} [{}]",
        star, project.name, project.id, project.color, project.task_count
    )
}

/// Favorites first, then every project in sidebar order
pub fn format_project_list(store: &Store) -> Vec<String> {
    let mut lines = vec!["== Favorites ==".to_string()];
    lines.extend(store.favorites().map(|p| format!("  {} ({})", p.name, p.id)));
    lines.push("== Projects ==".to_string());
    lines.extend(store.projects.values().map(format_project_line));
    lines
}

pub fn format_profile(user: &User) -> Vec<String> {
    let mut lines = vec![
        format!("{} <{}>", user.name, user.email),
        format!("karma: {}", user.karma),
        format!("daily goal: {} tasks", user.daily_goal),
        format!("weekly goal: {} tasks", user.weekly_goal),
    ];
    if let Some(avatar) = &user.avatar {
        lines.push(format!("avatar: {}", avatar));
    }
    lines
}

/// Format the productivity summary with a small bar per weekday
pub fn format_stats(summary: &ProductivitySummary) -> Vec<String> {
    let mut lines = vec![
        format!("karma: {}", summary.karma),
        format!(
            "today: {}/{}{}",
            summary.completed_today,
            summary.daily_goal,
            if summary.daily_goal_met { " (goal met)" } else { "" }
        ),
        format!(
            "week: {}/{} ({}%){}",
            summary.completed_this_week,
            summary.weekly_goal,
            summary.weekly_percent,
            if summary.weekly_goal_met { " (goal met)" } else { "" }
        ),
    ];
    for day in &summary.week {
        lines.push(format!("  {} {}", day.day, "#".repeat(day.completed)).trim_end().to_string());
    }
    lines
}
