use rusqlite::{params_from_iter, ToSql};
use uuid::Uuid;

use crate::error::{BoardError, Result};
use crate::log_debug;
use crate::quest::{QuestId, QuestUpdate, StatKind};
use crate::util::database::Database;
use super::DATE_FORMAT;

impl Database {
    /// Write only the fields present in `update`. Score, rank and the
    /// `gives_*` flags move together with the weights.
    pub(crate) fn update_quest_row(
        &self,
        owner_id: Uuid,
        quest_id: QuestId,
        update: &QuestUpdate,
    ) -> Result<()> {
        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(title) = &update.title {
            assignments.push("title = ?");
            values.push(Box::new(title.clone()));
        }
        if let Some(description) = &update.description {
            assignments.push("description = ?");
            values.push(Box::new(description.clone()));
        }
        if let Some(deadline) = &update.deadline {
            assignments.push("deadline = ?");
            values.push(Box::new(deadline.map(|d| d.format(DATE_FORMAT).to_string())));
        }
        if let Some(scoring) = &update.scoring {
            let weights = scoring.weights();
            assignments.extend([
                "weight_int = ?",
                "weight_wlt = ?",
                "weight_str = ?",
                "gives_int = ?",
                "gives_wlt = ?",
                "gives_str = ?",
                "score = ?",
                "rank = ?",
            ]);
            values.push(Box::new(weights.intelligence));
            values.push(Box::new(weights.wealth));
            values.push(Box::new(weights.strength));
            values.push(Box::new(scoring.gives(StatKind::Intelligence)));
            values.push(Box::new(scoring.gives(StatKind::Wealth)));
            values.push(Box::new(scoring.gives(StatKind::Strength)));
            values.push(Box::new(scoring.score()));
            values.push(Box::new(scoring.rank().as_str().to_string()));
        }

        let conn = self.conn()?;

        let changed = if assignments.is_empty() {
            // Nothing to write, but an unknown id is still an error
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM quests WHERE id = ?1 AND owner_id = ?2",
                rusqlite::params![quest_id, owner_id.to_string()],
                |row| row.get(0),
            )?;
            count as usize
        } else {
            values.push(Box::new(quest_id));
            values.push(Box::new(owner_id.to_string()));
            let sql = format!(
                "UPDATE quests SET {} WHERE id = ? AND owner_id = ?",
                assignments.join(", ")
            );
            conn.execute(&sql, params_from_iter(values.iter()))?
        };

        if changed == 0 {
            return Err(BoardError::not_found("quest", quest_id));
        }

        log_debug!("Updated quest {} ({} columns)", quest_id, assignments.len());
        Ok(())
    }
}
