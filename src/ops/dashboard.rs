use chrono::{Local, NaiveDate};

use crate::model::store::Store;
use crate::model::task::Task;
use crate::model::view::ViewKind;
use crate::ops::filter::{self, EmptyState, NavState};
use crate::ops::task_ops::{self, TaskError};
use crate::parse::editor::{QuickAddEditor, Submission};

/// Owns the store and everything the user is currently looking at.
///
/// All mutation of session state goes through here.
#[derive(Debug)]
pub struct Dashboard {
    store: Store,
    nav: NavState,
    editor: Option<QuickAddEditor>,
    today: NaiveDate,
}

impl Dashboard {
    pub fn new(store: Store, today: NaiveDate, view: ViewKind) -> Self {
        Dashboard {
            store,
            nav: NavState {
                view,
                ..NavState::default()
            },
            editor: None,
            today,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Switch to a named view. Closes search and deselects any project.
    pub fn select_view(&mut self, view: ViewKind) {
        tracing::debug!(view = view.name(), "view changed");
        self.close_search();
        self.nav.view = view;
        self.nav.selected_project = None;
    }

    /// Show one project's tasks. Closes search.
    pub fn select_project(&mut self, project_id: &str) -> Result<(), TaskError> {
        if self.store.project(project_id).is_none() {
            return Err(TaskError::UnknownProject(project_id.to_string()));
        }
        tracing::debug!(project = project_id, "project selected");
        self.close_search();
        self.nav.view = ViewKind::Project;
        self.nav.selected_project = Some(project_id.to_string());
        Ok(())
    }

    pub fn open_search(&mut self) {
        tracing::debug!("search opened");
        self.nav.search.active = true;
        self.nav.selected_project = None;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.nav.search.query = query.into();
        tracing::debug!(query = %self.nav.search.query, "search query changed");
    }

    /// Close search and forget the query
    pub fn close_search(&mut self) {
        if self.nav.search.active {
            tracing::debug!("search closed");
        }
        self.nav.search.active = false;
        self.nav.search.query.clear();
    }

    // -----------------------------------------------------------------------
    // Derived view state
    // -----------------------------------------------------------------------

    pub fn visible_tasks(&self) -> Vec<&Task> {
        filter::visible_tasks(&self.store.tasks, &self.nav, self.today)
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        filter::empty_state(&self.nav, &self.visible_tasks())
    }

    pub fn title(&self) -> String {
        filter::view_title(&self.nav, &self.store)
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    pub fn toggle_task(&mut self, id: &str) -> Result<bool, TaskError> {
        let completed = task_ops::toggle_completed(&mut self.store, id, Local::now())?;
        tracing::debug!(task = id, completed, "task toggled");
        Ok(completed)
    }

    /// Create a task directly. It goes to the selected project, or the
    /// default project when none is selected.
    pub fn add_task(&mut self, submission: Submission) -> Result<&Task, TaskError> {
        let project_id = self.nav.selected_project.clone();
        let task = task_ops::add_task(&mut self.store, submission, project_id.as_deref(), Local::now())?;
        tracing::debug!(task = %task.id, project = %task.project_id, "task added");
        Ok(task)
    }

    // -----------------------------------------------------------------------
    // Quick-add editor
    // -----------------------------------------------------------------------

    /// Open the quick-add editor, or return the one already open
    pub fn open_editor(&mut self) -> &mut QuickAddEditor {
        let today = self.today;
        self.editor.get_or_insert_with(|| QuickAddEditor::new(today))
    }

    pub fn editor(&self) -> Option<&QuickAddEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut QuickAddEditor> {
        self.editor.as_mut()
    }

    /// Submit the open editor.
    ///
    /// Returns `Ok(None)` when no editor is open or its text is blank; the
    /// editor stays open in the blank case. On success the editor closes.
    pub fn submit_editor(&mut self) -> Result<Option<&Task>, TaskError> {
        let Some(submission) = self.editor.as_mut().and_then(QuickAddEditor::submit) else {
            return Ok(None);
        };
        self.editor = None;
        tracing::debug!(content = %submission.content, "quick-add submitted");
        self.add_task(submission).map(Some)
    }

    pub fn cancel_editor(&mut self) {
        if let Some(mut editor) = self.editor.take() {
            editor.cancel();
            tracing::debug!("quick-add cancelled");
        }
    }
}
