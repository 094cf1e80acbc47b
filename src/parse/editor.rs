use chrono::NaiveDate;
use serde::Serialize;

use super::quick_add::{self, QuickAddFields, QuickToken};
use crate::model::task::Priority;

/// A task ready to be created, produced by [`QuickAddEditor::submit`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    /// The text exactly as typed, tokens included
    pub content: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: NaiveDate,
    /// Tags parsed from the text
    pub labels: Vec<String>,
}

/// Quick-add editor: a text buffer plus the fields derived from it.
///
/// `derived` is recomputed on every change to the text, so it never goes
/// stale. Pickers go through [`QuickAddEditor::apply`] and
/// [`QuickAddEditor::add_tag`], which rewrite the text.
#[derive(Debug, Clone)]
pub struct QuickAddEditor {
    raw_text: String,
    description: String,
    derived: QuickAddFields,
    today: NaiveDate,
}

impl QuickAddEditor {
    pub fn new(today: NaiveDate) -> Self {
        QuickAddEditor {
            raw_text: String::new(),
            description: String::new(),
            derived: quick_add::derive("", today),
            today,
        }
    }

    pub fn text(&self) -> &str {
        &self.raw_text
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn fields(&self) -> &QuickAddFields {
        &self.derived
    }

    /// Whether submit would be accepted
    pub fn can_submit(&self) -> bool {
        !self.raw_text.trim().is_empty()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.raw_text = text.into();
        self.rederive();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Write a priority or date token into the text
    pub fn apply(&mut self, token: &QuickToken) {
        let text = quick_add::apply_token(&self.raw_text, token);
        self.set_text(text);
    }

    pub fn add_tag(&mut self, tag: &str) {
        let text = quick_add::add_tag(&self.raw_text, tag);
        self.set_text(text);
    }

    /// Take the current task out of the editor.
    ///
    /// Returns `None` and leaves the editor untouched when the text is blank.
    /// Otherwise the editor is reset.
    pub fn submit(&mut self) -> Option<Submission> {
        if !self.can_submit() {
            return None;
        }
        let submission = Submission {
            content: std::mem::take(&mut self.raw_text),
            description: std::mem::take(&mut self.description),
            priority: self.derived.priority,
            due_date: self.derived.date_value,
            labels: std::mem::take(&mut self.derived.tags),
        };
        self.rederive();
        Some(submission)
    }

    pub fn cancel(&mut self) {
        self.raw_text.clear();
        self.description.clear();
        self.rederive();
    }

    fn rederive(&mut self) {
        self.derived = quick_add::derive(&self.raw_text, self.today);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::quick_add::PriorityCode;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_fields_follow_text() {
        let mut editor = QuickAddEditor::new(today());
        assert_eq!(editor.fields().priority, Priority::P4);
        editor.set_text("Review PR !!0 @tomorrow #Work #Work #Urgent");
        assert_eq!(editor.fields().priority, Priority::P1);
        assert_eq!(editor.fields().date_label, "Tomorrow");
        assert_eq!(editor.fields().tag_count, 2);
        editor.set_text("Review PR");
        assert_eq!(editor.fields().priority, Priority::P4);
        assert_eq!(editor.fields().tag_count, 0);
    }

    #[test]
    fn test_pickers_write_through_text() {
        let mut editor = QuickAddEditor::new(today());
        editor.set_text("Review PR");
        editor.apply(&QuickToken::Priority(PriorityCode::new(1).unwrap()));
        editor.apply(&QuickToken::Tomorrow);
        editor.add_tag("Work");
        assert_eq!(editor.text(), "Review PR !!1 @tomorrow #Work");
        assert_eq!(editor.fields().priority, Priority::P2);

        editor.apply(&QuickToken::Today);
        assert_eq!(editor.text(), "Review PR !!1 @today #Work");
        assert_eq!(editor.fields().date_value, today());
    }

    #[test]
    fn test_blank_submit_is_rejected() {
        let mut editor = QuickAddEditor::new(today());
        assert_eq!(editor.submit(), None);
        editor.set_text("   \t ");
        editor.set_description("kept");
        assert_eq!(editor.submit(), None);
        assert_eq!(editor.text(), "   \t ");
        assert_eq!(editor.description(), "kept");
    }

    #[test]
    fn test_submit_emits_and_resets() {
        let mut editor = QuickAddEditor::new(today());
        editor.set_text("Buy milk !!2 @2024-01-05 #Grocery");
        editor.set_description("2 liters");
        let submission = editor.submit().unwrap();
        assert_eq!(
            submission,
            Submission {
                content: "Buy milk !!2 @2024-01-05 #Grocery".to_string(),
                description: "2 liters".to_string(),
                priority: Priority::P3,
                due_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                labels: vec!["Grocery".to_string()],
            }
        );
        assert_eq!(editor.text(), "");
        assert_eq!(editor.description(), "");
        assert_eq!(editor.fields().tag_count, 0);
        assert!(!editor.can_submit());
    }

    #[test]
    fn test_cancel_clears_buffers() {
        let mut editor = QuickAddEditor::new(today());
        editor.set_text("Something !!0");
        editor.set_description("notes");
        editor.cancel();
        assert_eq!(editor.text(), "");
        assert_eq!(editor.description(), "");
        assert_eq!(editor.fields().priority, Priority::P4);
    }
}
