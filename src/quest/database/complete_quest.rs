use chrono::Utc;
use rusqlite::params;
use uuid::Uuid;

use crate::error::{BoardError, Result};
use crate::log_info;
use crate::quest::QuestId;
use crate::util::database::Database;

impl Database {
    /// Active -> Completed in one statement. Completing an already completed
    /// quest matches no row and is reported as not found.
    pub(crate) fn mark_quest_completed(&self, quest_id: QuestId, owner_id: Uuid) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let conn = self.conn()?;

        let changed = conn.execute(
            "UPDATE quests
             SET is_completed = 1, completed_at = ?1
             WHERE id = ?2 AND owner_id = ?3 AND is_completed = 0",
            params![now, quest_id, owner_id.to_string()],
        )?;

        if changed == 0 {
            return Err(BoardError::not_found("active quest", quest_id));
        }

        log_info!("Completed quest {}", quest_id);
        Ok(())
    }
}
