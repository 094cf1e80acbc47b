use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Named list views in the navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Inbox,
    #[default]
    Today,
    Upcoming,
    Filters,
    Project,
}

impl ViewKind {
    pub const ALL: [ViewKind; 5] = [
        ViewKind::Inbox,
        ViewKind::Today,
        ViewKind::Upcoming,
        ViewKind::Filters,
        ViewKind::Project,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ViewKind::Inbox => "inbox",
            ViewKind::Today => "today",
            ViewKind::Upcoming => "upcoming",
            ViewKind::Filters => "filters",
            ViewKind::Project => "project",
        }
    }

    /// Capitalized name used as a heading
    pub fn title(self) -> &'static str {
        match self {
            ViewKind::Inbox => "Inbox",
            ViewKind::Today => "Today",
            ViewKind::Upcoming => "Upcoming",
            ViewKind::Filters => "Filters",
            ViewKind::Project => "Project",
        }
    }
}

impl FromStr for ViewKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewKind::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| ModelError::UnknownView(s.to_string()))
    }
}

impl std::fmt::Display for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
