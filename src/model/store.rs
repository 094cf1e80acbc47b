use chrono::{DateTime, Local, NaiveDate};
use indexmap::IndexMap;
use serde::Serialize;

use super::ModelError;
use super::project::Project;
use super::task::{Priority, Task};
use super::user::User;

/// All in-memory state: tasks, projects and the user profile.
///
/// Nothing here is persisted; a store lives as long as the process.
#[derive(Debug, Clone, Serialize)]
pub struct Store {
    /// Top-level tasks in creation order (sub-tasks live inside their parent)
    pub tasks: Vec<Task>,
    /// Projects keyed by ID, in sidebar order
    pub projects: IndexMap<String, Project>,
    pub user: User,
}

impl Store {
    pub fn new(user: User) -> Self {
        Store {
            tasks: Vec::new(),
            projects: IndexMap::new(),
            user,
        }
    }

    /// The demo data set every session starts from
    pub fn seeded(today: NaiveDate, now: DateTime<Local>) -> Result<Self, ModelError> {
        let mut store = Store::new(User {
            id: "u1".to_string(),
            name: "Panagiotis Tsamoudakis".to_string(),
            email: "panos@example.com".to_string(),
            avatar: Some("https://picsum.photos/seed/user/200".to_string()),
            karma: 14904,
            daily_goal: 5,
            weekly_goal: 25,
        });

        for (id, name, color, is_favorite, task_count) in [
            ("p1", "MacStories", "#db4c3f", true, 6),
            ("p2", "Work", "#3182ce", true, 2),
            ("p3", "Personal", "#38a169", false, 0),
            ("p4", "Shopping", "#d69e2e", false, 4),
        ] {
            store.insert_project(Project::new(id, name, color, is_favorite, task_count)?);
        }

        let seed = [
            ("t1", "Todoist Foundations", Some("Learn the basics of task management"), Priority::P1, Some(today), "p1", "Writing"),
            ("t2", "Favorite for MacStories Weekly", Some("Draft the weekly picks section"), Priority::P2, NaiveDate::from_ymd_opt(2025, 10, 24), "p1", "Writing"),
            ("t3", "Monthly Log", None, Priority::P3, NaiveDate::from_ymd_opt(2025, 10, 25), "p1", "Planning"),
            ("t4", "Newsletter Draft", None, Priority::P1, Some(today), "p2", "Work"),
        ];
        for (id, content, description, priority, due_date, project_id, label) in seed {
            let mut task = Task::new(id, content, project_id, now);
            task.description = description.map(str::to_string);
            task.priority = priority;
            task.due_date = due_date;
            task.add_label(label);
            store.tasks.push(task);
        }

        Ok(store)
    }

    pub fn insert_project(&mut self, project: Project) {
        self.projects.insert(project.id.clone(), project);
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.get(id)
    }

    /// Project that receives new tasks when none is selected
    pub fn default_project_id(&self) -> Option<&str> {
        self.projects.keys().next().map(String::as_str)
    }

    pub fn favorites(&self) -> impl Iterator<Item = &Project> {
        self.projects.values().filter(|p| p.is_favorite)
    }

    /// Find a task by ID anywhere in the tree
    pub fn find_task(&self, id: &str) -> Option<&Task> {
        find_in(&self.tasks, id)
    }

    pub fn find_task_mut(&mut self, id: &str) -> Option<&mut Task> {
        find_in_mut(&mut self.tasks, id)
    }

    /// Every task in the tree, parents before their sub-tasks
    pub fn all_tasks(&self) -> Vec<&Task> {
        let mut out = Vec::new();
        collect(&self.tasks, &mut out);
        out
    }

    /// A fresh `t<N>` ID, one past the highest numeric suffix in use
    pub fn next_task_id(&self) -> String {
        let max = self
            .all_tasks()
            .iter()
            .filter_map(|t| t.id.strip_prefix('t').and_then(|n| n.parse::<u64>().ok()))
            .max()
            .unwrap_or(0);
        format!("t{}", max + 1)
    }
}

fn find_in<'a>(tasks: &'a [Task], id: &str) -> Option<&'a Task> {
    for task in tasks {
        if task.id == id {
            return Some(task);
        }
        if let Some(found) = find_in(&task.subtasks, id) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(tasks: &'a mut [Task], id: &str) -> Option<&'a mut Task> {
    for task in tasks.iter_mut() {
        if task.id == id {
            return Some(task);
        }
        if let Some(found) = find_in_mut(&mut task.subtasks, id) {
            return Some(found);
        }
    }
    None
}

fn collect<'a>(tasks: &'a [Task], out: &mut Vec<&'a Task>) {
    for task in tasks {
        out.push(task);
        collect(&task.subtasks, out);
    }
}
