use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

use crate::model::store::Store;

/// Completions on one day of the current week
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    /// Short weekday name, `Mon` through `Sun`
    pub day: String,
    pub date: NaiveDate,
    pub completed: usize,
}

/// Karma, goal progress and the weekly completion chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductivitySummary {
    pub karma: u64,
    pub completed_today: usize,
    pub completed_this_week: usize,
    pub daily_goal: u32,
    pub weekly_goal: u32,
    pub daily_goal_met: bool,
    pub weekly_goal_met: bool,
    /// Weekly progress toward the goal, capped at 100
    pub weekly_percent: u32,
    pub week: Vec<DayCount>,
}

/// Summarize completions for the ISO week (Monday to Sunday) containing `today`
pub fn summary(store: &Store, today: NaiveDate) -> ProductivitySummary {
    let monday = today.week(Weekday::Mon).first_day();
    let completed_dates: Vec<NaiveDate> = store
        .all_tasks()
        .into_iter()
        .filter(|t| t.is_completed)
        .filter_map(|t| t.completed_at.map(|at| at.date_naive()))
        .collect();

    let week: Vec<DayCount> = (0..7)
        .filter_map(|offset| monday.checked_add_days(Days::new(offset)))
        .map(|date| DayCount {
            day: date.weekday().to_string(),
            date,
            completed: completed_dates.iter().filter(|d| **d == date).count(),
        })
        .collect();

    let completed_today = completed_dates.iter().filter(|d| **d == today).count();
    let completed_this_week: usize = week.iter().map(|d| d.completed).sum();
    let user = &store.user;
    let weekly_percent = if user.weekly_goal == 0 {
        100
    } else {
        ((completed_this_week as u64 * 100) / user.weekly_goal as u64).min(100) as u32
    };

    ProductivitySummary {
        karma: user.karma,
        completed_today,
        completed_this_week,
        daily_goal: user.daily_goal,
        weekly_goal: user.weekly_goal,
        daily_goal_met: completed_today as u64 >= user.daily_goal as u64,
        weekly_goal_met: completed_this_week as u64 >= user.weekly_goal as u64,
        weekly_percent,
        week,
    }
}
