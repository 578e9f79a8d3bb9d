// src/goals/tracker.rs

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use crate::error::{BoardError, Result};
use crate::util::io::bus::{messages, MessageBus};
use crate::log_debug;
use super::{compute_streak, DailyGoal, GoalDatabase, GoalDefinition};

/// Daily goal counters for one owner against a fixed set of definitions.
#[derive(Debug)]
pub struct GoalTracker<D: GoalDatabase> {
    database: D,
    owner_id: Uuid,
    definitions: Vec<GoalDefinition>,
    message_bus: MessageBus,
}

impl<D: GoalDatabase> GoalTracker<D> {
    pub fn new(database: D, owner_id: Uuid, definitions: Vec<GoalDefinition>, message_bus: MessageBus) -> Self {
        Self {
            database,
            owner_id,
            definitions,
            message_bus,
        }
    }

    pub fn definitions(&self) -> &[GoalDefinition] {
        &self.definitions
    }

    /// All configured goals with their counters for `day` (0 when untouched).
    pub fn goals_for(&self, day: NaiveDate) -> Result<Vec<DailyGoal>> {
        let stored = self.database.goal_progress(self.owner_id, day)?;

        Ok(self
            .definitions
            .iter()
            .map(|def| DailyGoal::new(def, day, stored.get(&def.key).copied().unwrap_or(0)))
            .collect())
    }

    pub async fn increment(&self, key: &str, day: NaiveDate) -> Result<DailyGoal> {
        self.adjust(key, day, DailyGoal::increment).await
    }

    pub async fn decrement(&self, key: &str, day: NaiveDate) -> Result<DailyGoal> {
        self.adjust(key, day, DailyGoal::decrement).await
    }

    async fn adjust(&self, key: &str, day: NaiveDate, step: fn(&mut DailyGoal) -> bool) -> Result<DailyGoal> {
        let mut goal = self
            .goals_for(day)?
            .into_iter()
            .find(|g| g.key == key)
            .ok_or_else(|| BoardError::Validation(format!("unknown daily goal '{}'", key)))?;

        if !step(&mut goal) {
            log_debug!("Goal '{}' already at bound ({}/{})", key, goal.current, goal.target);
            return Ok(goal);
        }

        self.database.set_goal_progress(self.owner_id, key, day, goal.current)?;
        self.message_bus
            .publish(messages::board_event(
                messages::GOAL_UPDATED,
                json!({
                    "goal": goal.key,
                    "current": goal.current,
                    "target": goal.target,
                    "complete": goal.is_complete(),
                }),
            ))
            .await;

        Ok(goal)
    }

    /// Streak of days on which every configured goal was met.
    pub fn streak(&self, today: NaiveDate) -> Result<u32> {
        if self.definitions.is_empty() {
            return Ok(0);
        }

        let targets: HashMap<&str, u32> = self
            .definitions
            .iter()
            .map(|d| (d.key.as_str(), d.target))
            .collect();

        let mut met: HashMap<NaiveDate, usize> = HashMap::new();
        for (day, key, current) in self.database.goal_history(self.owner_id)? {
            if targets.get(key.as_str()).is_some_and(|target| current >= *target) {
                *met.entry(day).or_insert(0) += 1;
            }
        }

        let complete_days: BTreeSet<NaiveDate> = met
            .into_iter()
            .filter(|(_, count)| *count == targets.len())
            .map(|(day, _)| day)
            .collect();

        Ok(compute_streak(&complete_days, today))
    }
}
