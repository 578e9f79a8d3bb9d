use chrono::Utc;
use rusqlite::params;
use uuid::Uuid;

use crate::error::Result;
use crate::log_info;
use crate::quest::{Quest, ScoredDraft, StatKind};
use crate::util::database::Database;
use super::DATE_FORMAT;

impl Database {
    pub(crate) fn insert_quest(&self, owner_id: Uuid, draft: &ScoredDraft) -> Result<Quest> {
        let now = Utc::now();
        let weights = draft.scoring.weights();
        let deadline_str = draft.deadline.map(|d| d.format(DATE_FORMAT).to_string());
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO quests (owner_id, title, description, deadline,
                                 weight_int, weight_wlt, weight_str,
                                 gives_int, gives_wlt, gives_str,
                                 score, rank, is_completed, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, 0, ?13)",
            params![
                owner_id.to_string(),
                draft.title,
                draft.description,
                deadline_str,
                weights.intelligence,
                weights.wealth,
                weights.strength,
                draft.scoring.gives(StatKind::Intelligence),
                draft.scoring.gives(StatKind::Wealth),
                draft.scoring.gives(StatKind::Strength),
                draft.scoring.score(),
                draft.scoring.rank().as_str(),
                now.to_rfc3339(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        log_info!(
            "Created quest {} '{}' ({} pts, {})",
            id,
            draft.title,
            draft.scoring.score(),
            draft.scoring.rank()
        );

        Ok(Quest {
            id,
            owner_id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            deadline: draft.deadline,
            scoring: draft.scoring,
            is_completed: false,
            created_at: now,
            completed_at: None,
        })
    }
}
