use serde::{Deserialize, Serialize};

use super::view::ViewKind;

/// Configuration read from an optional TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub user: UserConfig,
    #[serde(default)]
    pub quick_add: QuickAddConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Overrides applied on top of the seeded profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub daily_goal: Option<u32>,
    #[serde(default)]
    pub weekly_goal: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickAddConfig {
    /// Tags offered by the tag picker
    #[serde(default = "default_suggested_tags")]
    pub suggested_tags: Vec<String>,
}

impl Default for QuickAddConfig {
    fn default() -> Self {
        QuickAddConfig {
            suggested_tags: default_suggested_tags(),
        }
    }
}

fn default_suggested_tags() -> Vec<String> {
    ["Writing", "Work", "Personal", "Planning", "Grocery", "Urgent"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// View shown when a session starts
    #[serde(default)]
    pub default_view: ViewKind,
}
