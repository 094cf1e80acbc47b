pub mod editor;
pub mod quick_add;

pub use editor::{QuickAddEditor, Submission};
pub use quick_add::{PriorityCode, QuickAddFields, QuickToken, TokenCategory, add_tag, apply_token, derive};
