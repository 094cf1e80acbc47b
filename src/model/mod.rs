pub mod config;
pub mod project;
pub mod store;
pub mod task;
pub mod user;
pub mod view;

pub use config::*;
pub use project::*;
pub use store::*;
pub use task::*;
pub use user::*;
pub use view::*;

/// Validation errors for model values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("invalid priority {0} (expected 1-4)")]
    InvalidPriority(u8),
    #[error("invalid goal: {0}")]
    InvalidGoal(String),
    #[error("invalid color '{0}' (expected #rgb or #rrggbb)")]
    InvalidColor(String),
    #[error("unknown view '{0}' (expected: inbox, today, upcoming, filters, project)")]
    UnknownView(String),
}
