// src/goals/database.rs
// Per-day goal counters

use std::collections::HashMap;

use chrono::NaiveDate;
use rusqlite::params;
use uuid::Uuid;

use crate::error::Result;
use crate::quest::database::{conversion_failure, DATE_FORMAT};
use crate::util::database::Database;

/// One stored counter: (day, goal key, current value)
pub type GoalRecord = (NaiveDate, String, u32);

pub trait GoalDatabase: Send + Sync {
    /// Counters recorded for `day`, keyed by goal key.
    fn goal_progress(&self, owner_id: Uuid, day: NaiveDate) -> Result<HashMap<String, u32>>;
    fn set_goal_progress(&self, owner_id: Uuid, goal_key: &str, day: NaiveDate, current: u32) -> Result<()>;
    /// Every stored counter, oldest day first.
    fn goal_history(&self, owner_id: Uuid) -> Result<Vec<GoalRecord>>;
}

impl Database {
    pub(crate) fn init_goals_schema(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS daily_goal_progress (
                owner_id TEXT NOT NULL,
                goal_key TEXT NOT NULL,
                day TEXT NOT NULL,
                current INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (owner_id, goal_key, day)
            )",
            [],
        )?;

        Ok(())
    }
}

impl GoalDatabase for Database {
    fn goal_progress(&self, owner_id: Uuid, day: NaiveDate) -> Result<HashMap<String, u32>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT goal_key, current FROM daily_goal_progress
             WHERE owner_id = ?1 AND day = ?2",
        )?;

        let rows = stmt
            .query_map(
                params![owner_id.to_string(), day.format(DATE_FORMAT).to_string()],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?)),
            )?
            .collect::<rusqlite::Result<HashMap<_, _>>>()?;

        Ok(rows)
    }

    fn set_goal_progress(&self, owner_id: Uuid, goal_key: &str, day: NaiveDate, current: u32) -> Result<()> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO daily_goal_progress (owner_id, goal_key, day, current)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(owner_id, goal_key, day) DO UPDATE SET current = excluded.current",
            params![
                owner_id.to_string(),
                goal_key,
                day.format(DATE_FORMAT).to_string(),
                current,
            ],
        )?;

        Ok(())
    }

    fn goal_history(&self, owner_id: Uuid) -> Result<Vec<GoalRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT day, goal_key, current FROM daily_goal_progress
             WHERE owner_id = ?1
             ORDER BY day ASC, goal_key ASC",
        )?;

        let records: Vec<GoalRecord> = stmt
            .query_map([owner_id.to_string()], |row| {
                let day: String = row.get(0)?;
                let day = NaiveDate::parse_from_str(&day, DATE_FORMAT)
                    .map_err(|e| conversion_failure(0, e))?;
                Ok((day, row.get(1)?, row.get(2)?))
            })?
            .collect::<rusqlite::Result<_>>()?;

        Ok(records)
    }
}
