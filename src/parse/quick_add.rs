//! Inline quick-add syntax.
//!
//! A new task is typed as one line of free text. Three kinds of token are
//! recognized anywhere in it:
//!
//! - `!!N` with `N` in `0..=4` sets the priority (`!!0` is P1).
//! - `@today`, `@tomorrow` or `@YYYY-MM-DD` sets the due date.
//! - `#word` adds a tag.
//!
//! The text is the only state. Pickers change metadata by rewriting the text
//! through [`apply_token`] and [`add_tag`], and [`derive`] reads it back.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use regex::{NoExpand, Regex};
use serde::Serialize;

use crate::model::task::Priority;

static PRIORITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!!([0-4])").expect("valid regex"));
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@today|@tomorrow|@[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("valid regex"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#([0-9A-Za-z_]+)").expect("valid regex"));

/// Metadata derived from the quick-add text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickAddFields {
    pub priority: Priority,
    /// "Today", "Tomorrow" or the literal `YYYY-MM-DD`
    pub date_label: String,
    pub date_value: NaiveDate,
    /// Number of distinct tags
    pub tag_count: usize,
    /// Distinct tags without `#`, in order of first appearance
    pub tags: Vec<String>,
}

/// Which kind of token a picker rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    Priority,
    Date,
}

impl TokenCategory {
    fn pattern(self) -> &'static Regex {
        match self {
            TokenCategory::Priority => &*PRIORITY_RE,
            TokenCategory::Date => &*DATE_RE,
        }
    }
}

/// A `!!N` digit, always in `0..=4`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityCode(u8);

impl PriorityCode {
    pub fn new(code: u8) -> Option<Self> {
        (code <= 4).then_some(PriorityCode(code))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// A token a picker writes into the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickToken {
    Priority(PriorityCode),
    Today,
    Tomorrow,
    On(NaiveDate),
}

impl QuickToken {
    pub fn category(&self) -> TokenCategory {
        match self {
            QuickToken::Priority(_) => TokenCategory::Priority,
            QuickToken::Today | QuickToken::Tomorrow | QuickToken::On(_) => TokenCategory::Date,
        }
    }

    /// Parse a date picker value: `today`, `tomorrow` or `YYYY-MM-DD`
    pub fn parse_date(s: &str) -> Option<Self> {
        match s {
            "today" => Some(QuickToken::Today),
            "tomorrow" => Some(QuickToken::Tomorrow),
            other => NaiveDate::parse_from_str(other, "%Y-%m-%d").ok().map(QuickToken::On),
        }
    }
}

impl std::fmt::Display for QuickToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuickToken::Priority(code) => write!(f, "!!{}", code.get()),
            QuickToken::Today => f.write_str("@today"),
            QuickToken::Tomorrow => f.write_str("@tomorrow"),
            QuickToken::On(date) => write!(f, "@{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Derive priority, date and tags from quick-add text.
///
/// Only the first priority and first date token count. Anything that does
/// not parse falls back to the defaults (P4, today).
pub fn derive(raw: &str, today: NaiveDate) -> QuickAddFields {
    let priority = PRIORITY_RE
        .captures(raw)
        .and_then(|caps| caps[1].parse::<u8>().ok())
        .map(Priority::from_code)
        .unwrap_or_default();

    let (date_label, date_value) = DATE_RE
        .find(raw)
        .and_then(|m| resolve_date(m.as_str(), today))
        .unwrap_or_else(|| ("Today".to_string(), today));

    let tags = parse_tags(raw);

    QuickAddFields {
        priority,
        date_label,
        date_value,
        tag_count: tags.len(),
        tags,
    }
}

fn resolve_date(token: &str, today: NaiveDate) -> Option<(String, NaiveDate)> {
    match token {
        "@today" => Some(("Today".to_string(), today)),
        "@tomorrow" => today
            .checked_add_days(Days::new(1))
            .map(|d| ("Tomorrow".to_string(), d)),
        other => {
            let text = other.strip_prefix('@')?;
            let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
            Some((text.to_string(), date))
        }
    }
}

/// Distinct `#word` tags in order of first appearance
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for caps in TAG_RE.captures_iter(raw) {
        let tag = &caps[1];
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Write a token into the text.
///
/// The first existing token of the same category is replaced in place;
/// if there is none the token is appended after a single space.
pub fn apply_token(raw: &str, token: &QuickToken) -> String {
    let re = token.category().pattern();
    let replacement = token.to_string();
    if re.is_match(raw) {
        re.replace(raw, NoExpand(&replacement)).into_owned()
    } else {
        append(raw, &replacement)
    }
}

/// Append `#tag` unless the text already contains `#tag` as a substring.
///
/// The check is case-sensitive and does not look at word boundaries, so
/// `#Work` is not added to text holding `#Workshop`. Tags that are not a
/// single word are ignored, since they would not parse back out of the text.
pub fn add_tag(raw: &str, tag: &str) -> String {
    let tag = tag.strip_prefix('#').unwrap_or(tag);
    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return raw.to_string();
    }
    let token = format!("#{}", tag);
    if raw.contains(&token) {
        return raw.to_string();
    }
    append(raw, &token)
}

fn append(raw: &str, token: &str) -> String {
    format!("{} {}", raw.trim(), token).trim().to_string()
}
