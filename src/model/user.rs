use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::ModelError;

pub const DAILY_GOAL_RANGE: RangeInclusive<u32> = 1..=20;
pub const WEEKLY_GOAL_RANGE: RangeInclusive<u32> = 5..=100;
pub const WEEKLY_GOAL_STEP: u32 = 5;

/// The single local user and their productivity goals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub karma: u64,
    pub daily_goal: u32,
    pub weekly_goal: u32,
}

impl User {
    /// Replace both goals after checking their ranges. On error neither goal changes.
    pub fn set_goals(&mut self, daily: u32, weekly: u32) -> Result<(), ModelError> {
        validate_goals(daily, weekly)?;
        self.daily_goal = daily;
        self.weekly_goal = weekly;
        Ok(())
    }
}

pub fn validate_goals(daily: u32, weekly: u32) -> Result<(), ModelError> {
    if !DAILY_GOAL_RANGE.contains(&daily) {
        return Err(ModelError::InvalidGoal(format!(
            "daily goal {} is outside {}..={}",
            daily,
            DAILY_GOAL_RANGE.start(),
            DAILY_GOAL_RANGE.end()
        )));
    }
    if !WEEKLY_GOAL_RANGE.contains(&weekly) || weekly % WEEKLY_GOAL_STEP != 0 {
        return Err(ModelError::InvalidGoal(format!(
            "weekly goal {} must be a multiple of {} in {}..={}",
            weekly,
            WEEKLY_GOAL_STEP,
            WEEKLY_GOAL_RANGE.start(),
            WEEKLY_GOAL_RANGE.end()
        )));
    }
    Ok(())
}
