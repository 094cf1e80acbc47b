use chrono::NaiveDate;
use serde::Serialize;

use crate::model::store::Store;
use crate::model::task::Task;
use crate::model::view::ViewKind;
use crate::ops::search;

/// Global search box state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

impl SearchState {
    /// Search only filters when it is open and the query has non-blank text
    pub fn is_filtering(&self) -> bool {
        self.active && !self.query.trim().is_empty()
    }
}

/// Where the user is: a named view, optionally a project, and the search box
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    pub view: ViewKind,
    pub selected_project: Option<String>,
    pub search: SearchState,
}

/// Why a list came out empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmptyState {
    /// An open search with a query matched nothing
    NoSearchResults { query: String },
    /// A view or project has no tasks
    AllClear,
}

impl EmptyState {
    pub fn message(&self) -> String {
        match self {
            EmptyState::NoSearchResults { query } => format!(
                "No results found. We couldn't find any tasks matching \"{}\". Try a different keyword or filter.",
                query
            ),
            EmptyState::AllClear => {
                "All clear! Enjoy your free time or start planning your next move.".to_string()
            }
        }
    }
}

/// Compute the tasks visible for the current navigation state.
///
/// The first rule that applies wins:
/// 1. an open search with a non-blank query matches across all tasks,
/// 2. a selected project shows that project's tasks,
/// 3. otherwise the named view decides.
pub fn visible_tasks<'a>(tasks: &'a [Task], nav: &NavState, today: NaiveDate) -> Vec<&'a Task> {
    if nav.search.is_filtering() {
        return search::search_tasks(tasks, &nav.search.query);
    }

    if let Some(project_id) = &nav.selected_project {
        return tasks.iter().filter(|t| &t.project_id == project_id).collect();
    }

    match nav.view {
        ViewKind::Today => tasks.iter().filter(|t| t.due_date == Some(today)).collect(),
        ViewKind::Upcoming => tasks
            .iter()
            .filter(|t| t.due_date.is_some_and(|d| d > today))
            .collect(),
        ViewKind::Inbox | ViewKind::Filters | ViewKind::Project => tasks.iter().collect(),
    }
}

/// Classify an empty result. Returns `None` when there is something to show,
/// and also while search is open with a blank query.
pub fn empty_state(nav: &NavState, visible: &[&Task]) -> Option<EmptyState> {
    if !visible.is_empty() {
        return None;
    }
    if nav.search.active {
        if nav.search.query.trim().is_empty() {
            return None;
        }
        return Some(EmptyState::NoSearchResults {
            query: nav.search.query.clone(),
        });
    }
    Some(EmptyState::AllClear)
}

/// Heading for the current list
pub fn view_title(nav: &NavState, store: &Store) -> String {
    if nav.search.active {
        return "Search".to_string();
    }
    if let Some(project_id) = &nav.selected_project {
        return store
            .project(project_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "Project".to_string());
    }
    nav.view.title().to_string()
}
