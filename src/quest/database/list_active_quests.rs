use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use crate::error::Result;
use crate::quest::{Quest, QuestId};
use crate::util::database::Database;
use super::{parse_quest_row, QUEST_COLUMNS};

impl Database {
    /// Active quests, highest score first; equal scores keep id order.
    pub(crate) fn select_active_quests(&self, owner_id: Uuid) -> Result<Vec<Quest>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM quests
             WHERE owner_id = ?1 AND is_completed = 0
             ORDER BY score DESC, id ASC",
            QUEST_COLUMNS
        ))?;

        let quests = stmt
            .query_map([owner_id.to_string()], parse_quest_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(quests)
    }

    pub(crate) fn select_quest(&self, owner_id: Uuid, quest_id: QuestId) -> Result<Option<Quest>> {
        let conn = self.conn()?;
        let quest = conn
            .query_row(
                &format!("SELECT {} FROM quests WHERE id = ?1 AND owner_id = ?2", QUEST_COLUMNS),
                params![quest_id, owner_id.to_string()],
                parse_quest_row,
            )
            .optional()?;

        Ok(quest)
    }
}
