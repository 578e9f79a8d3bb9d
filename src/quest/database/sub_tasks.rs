use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use crate::error::{BoardError, Result};
use crate::quest::{required_title, QuestId, SubTask, SubTaskId};
use crate::util::database::Database;
use crate::{log_debug, log_info};
use super::{parse_sub_task_row, SUB_TASK_COLUMNS};

// Restricts a sub-task statement to tasks of the owner's quests (?2)
const OWNED_BY: &str = "quest_id IN (SELECT id FROM quests WHERE owner_id = ?2)";

impl Database {
    /// Sub-tasks of one quest in creation order.
    pub(crate) fn select_sub_tasks(&self, quest_id: QuestId) -> Result<Vec<SubTask>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM quest_tasks WHERE quest_id = ?1 ORDER BY created_at ASC, id ASC",
            SUB_TASK_COLUMNS
        ))?;

        let tasks = stmt
            .query_map([quest_id], parse_sub_task_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(tasks)
    }

    pub(crate) fn insert_sub_task(&self, quest_id: QuestId, title: &str) -> Result<SubTask> {
        let title = required_title(title)?;
        let now = Utc::now();
        let conn = self.conn()?;

        let quest_exists: bool = conn
            .query_row("SELECT 1 FROM quests WHERE id = ?1", [quest_id], |_| Ok(true))
            .optional()?
            .unwrap_or(false);
        if !quest_exists {
            return Err(BoardError::not_found("quest", quest_id));
        }

        conn.execute(
            "INSERT INTO quest_tasks (quest_id, title, is_completed, created_at)
             VALUES (?1, ?2, 0, ?3)",
            params![quest_id, title, now.to_rfc3339()],
        )?;

        let id = conn.last_insert_rowid();
        log_info!("Added sub-task {} to quest {}", id, quest_id);

        Ok(SubTask {
            id,
            quest_id,
            title,
            is_completed: false,
            created_at: now,
        })
    }

    /// Flip Open <-> Done and return the task as stored afterwards.
    pub(crate) fn flip_sub_task(&self, owner_id: Uuid, sub_task_id: SubTaskId) -> Result<SubTask> {
        let conn = self.conn()?;

        let changed = conn.execute(
            &format!(
                "UPDATE quest_tasks SET is_completed = 1 - is_completed WHERE id = ?1 AND {}",
                OWNED_BY
            ),
            params![sub_task_id, owner_id.to_string()],
        )?;
        if changed == 0 {
            return Err(BoardError::not_found("sub-task", sub_task_id));
        }

        let task = conn.query_row(
            &format!("SELECT {} FROM quest_tasks WHERE id = ?1", SUB_TASK_COLUMNS),
            [sub_task_id],
            parse_sub_task_row,
        )?;

        log_debug!("Sub-task {} is now {}", task.id, if task.is_completed { "done" } else { "open" });
        Ok(task)
    }

    pub(crate) fn remove_sub_task(&self, owner_id: Uuid, sub_task_id: SubTaskId) -> Result<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            &format!("DELETE FROM quest_tasks WHERE id = ?1 AND {}", OWNED_BY),
            params![sub_task_id, owner_id.to_string()],
        )?;

        if changed == 0 {
            return Err(BoardError::not_found("sub-task", sub_task_id));
        }

        log_info!("Deleted sub-task {}", sub_task_id);
        Ok(())
    }
}
