// src/goals/mod.rs

//! Daily goals: counters that reset every day, and the streak of days on
//! which all of them were met.

pub mod database;
mod streak;
pub mod tracker;

pub use database::GoalDatabase;
pub use streak::compute_streak;
pub use tracker::GoalTracker;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::quest::percentage_of;

/// A goal as declared in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalDefinition {
    pub key: String,
    pub title: String,
    pub target: u32,
    #[serde(default)]
    pub unit: String,
}

/// One goal's counter for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyGoal {
    pub key: String,
    pub title: String,
    pub unit: String,
    pub target: u32,
    pub current: u32,
    pub day: NaiveDate,
}

impl DailyGoal {
    pub fn new(definition: &GoalDefinition, day: NaiveDate, current: u32) -> Self {
        Self {
            key: definition.key.clone(),
            title: definition.title.clone(),
            unit: definition.unit.clone(),
            target: definition.target,
            current: current.min(definition.target),
            day,
        }
    }

    /// Returns false when the counter is already at the target.
    pub fn increment(&mut self) -> bool {
        if self.current >= self.target {
            return false;
        }
        self.current += 1;
        true
    }

    /// Returns false when the counter is already at zero.
    pub fn decrement(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.target
    }

    pub fn progress_percentage(&self) -> u8 {
        percentage_of(self.current as usize, self.target as usize)
    }
}

/// Share of goals met today; 0 when no goals are configured.
pub fn daily_completion_percentage(goals: &[DailyGoal]) -> u8 {
    let done = goals.iter().filter(|g| g.is_complete()).count();
    percentage_of(done, goals.len())
}
