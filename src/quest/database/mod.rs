// src/quest/database/mod.rs
// Quest and sub-task persistence on top of the shared SQLite connection

mod complete_quest;
mod create_quest;
mod init_schema;
mod list_active_quests;
mod sub_tasks;
mod update_quest;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use uuid::Uuid;

use crate::error::Result;
use crate::log_warn;
use crate::util::database::Database;
use super::{Quest, QuestId, QuestUpdate, Scoring, ScoredDraft, StatWeights, SubTask, SubTaskId};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) const QUEST_COLUMNS: &str = "id, owner_id, title, description, deadline, \
     weight_int, weight_wlt, weight_str, score, rank, is_completed, created_at, completed_at";

pub(crate) const SUB_TASK_COLUMNS: &str = "id, quest_id, title, is_completed, created_at";

/// Persistence boundary for quests and their sub-tasks.
///
/// Score and rank arrive precomputed (`ScoredDraft`, `QuestUpdate`); an
/// implementation stores them as given and never derives them itself.
pub trait QuestGateway: Send + Sync {
    fn list_active_quests(&self, owner_id: Uuid) -> Result<Vec<Quest>>;
    fn get_quest(&self, owner_id: Uuid, quest_id: QuestId) -> Result<Option<Quest>>;
    fn list_sub_tasks(&self, quest_id: QuestId) -> Result<Vec<SubTask>>;

    fn create_quest(&self, owner_id: Uuid, draft: &ScoredDraft) -> Result<Quest>;
    fn update_quest(&self, owner_id: Uuid, quest_id: QuestId, update: &QuestUpdate) -> Result<()>;
    fn complete_quest(&self, quest_id: QuestId, owner_id: Uuid) -> Result<()>;

    fn create_sub_task(&self, quest_id: QuestId, title: &str) -> Result<SubTask>;
    /// Toggle and delete only touch sub-tasks of `owner_id`'s quests.
    fn toggle_sub_task(&self, owner_id: Uuid, sub_task_id: SubTaskId) -> Result<SubTask>;
    fn delete_sub_task(&self, owner_id: Uuid, sub_task_id: SubTaskId) -> Result<()>;
}

impl QuestGateway for Database {
    fn list_active_quests(&self, owner_id: Uuid) -> Result<Vec<Quest>> {
        self.select_active_quests(owner_id)
    }

    fn get_quest(&self, owner_id: Uuid, quest_id: QuestId) -> Result<Option<Quest>> {
        self.select_quest(owner_id, quest_id)
    }

    fn list_sub_tasks(&self, quest_id: QuestId) -> Result<Vec<SubTask>> {
        self.select_sub_tasks(quest_id)
    }

    fn create_quest(&self, owner_id: Uuid, draft: &ScoredDraft) -> Result<Quest> {
        self.insert_quest(owner_id, draft)
    }

    fn update_quest(&self, owner_id: Uuid, quest_id: QuestId, update: &QuestUpdate) -> Result<()> {
        self.update_quest_row(owner_id, quest_id, update)
    }

    fn complete_quest(&self, quest_id: QuestId, owner_id: Uuid) -> Result<()> {
        self.mark_quest_completed(quest_id, owner_id)
    }

    fn create_sub_task(&self, quest_id: QuestId, title: &str) -> Result<SubTask> {
        self.insert_sub_task(quest_id, title)
    }

    fn toggle_sub_task(&self, owner_id: Uuid, sub_task_id: SubTaskId) -> Result<SubTask> {
        self.flip_sub_task(owner_id, sub_task_id)
    }

    fn delete_sub_task(&self, owner_id: Uuid, sub_task_id: SubTaskId) -> Result<()> {
        self.remove_sub_task(owner_id, sub_task_id)
    }
}

// Helper function to parse a quest row selected with QUEST_COLUMNS
pub(crate) fn parse_quest_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Quest> {
    let id: QuestId = row.get(0)?;

    let owner: String = row.get(1)?;
    let owner_id = Uuid::parse_str(&owner).map_err(|e| conversion_failure(1, e))?;

    let deadline: Option<String> = row.get(4)?;
    let deadline = deadline
        .map(|s| NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(|e| conversion_failure(4, e)))
        .transpose()?;

    // Score and rank are always rebuilt from the weights
    let scoring = Scoring::new(StatWeights::new(row.get(5)?, row.get(6)?, row.get(7)?));
    let stored_score: i64 = row.get(8)?;
    let stored_rank: String = row.get(9)?;
    if stored_score != scoring.score() || stored_rank != scoring.rank().as_str() {
        log_warn!(
            "Quest {} stored as {} / {}, weights give {} / {}",
            id,
            stored_score,
            stored_rank,
            scoring.score(),
            scoring.rank()
        );
    }

    let created_at: String = row.get(11)?;
    let completed_at: Option<String> = row.get(12)?;

    Ok(Quest {
        id,
        owner_id,
        title: row.get(2)?,
        description: row.get(3)?,
        deadline,
        scoring,
        is_completed: row.get(10)?,
        created_at: parse_timestamp(11, &created_at)?,
        completed_at: completed_at.map(|s| parse_timestamp(12, &s)).transpose()?,
    })
}

pub(crate) fn parse_sub_task_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SubTask> {
    let created_at: String = row.get(4)?;

    Ok(SubTask {
        id: row.get(0)?,
        quest_id: row.get(1)?,
        title: row.get(2)?,
        is_completed: row.get(3)?,
        created_at: parse_timestamp(4, &created_at)?,
    })
}

pub(crate) fn parse_timestamp(idx: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_failure(idx, e))
}

pub(crate) fn conversion_failure<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}
