use std::collections::HashMap;

use crate::board::{rank_active_quests, BoardSummary};
use crate::error::Result;
use crate::quest::QuestGateway;
use crate::{log_debug, log_error, log_warn};
use super::QuestBoard;

impl<G: QuestGateway> QuestBoard<G> {
    /// Re-fetch active quests and their sub-tasks and rebuild the summary.
    ///
    /// On a failed read the previous summary stays in place and the error is
    /// returned.
    pub fn refresh(&mut self) -> Result<&BoardSummary> {
        match self.load_summary() {
            Ok(summary) => {
                self.replace_summary(summary);
                Ok(&self.summary)
            }
            Err(e) => {
                log_error!("Failed to refresh quest board: {}", e);
                Err(e)
            }
        }
    }

    fn replace_summary(&mut self, summary: BoardSummary) {
        log_debug!(
            "Board refreshed: {} quests, average progress {}%",
            summary.top_quests.len(),
            summary.average_progress
        );
        self.summary = summary;
    }

    fn load_summary(&self) -> Result<BoardSummary> {
        let active = self.gateway.list_active_quests(self.owner_id)?;

        let mut sub_tasks = HashMap::new();
        for quest in rank_active_quests(&active, self.limit) {
            sub_tasks.insert(quest.id, self.gateway.list_sub_tasks(quest.id)?);
        }

        Ok(BoardSummary::build(&active, &sub_tasks, self.limit))
    }

    /// Refresh after a write that already succeeded. A failing re-fetch is
    /// logged and leaves the old summary; the write itself is not undone.
    pub(super) fn refresh_after_write(&mut self) {
        match self.load_summary() {
            Ok(summary) => self.replace_summary(summary),
            Err(e) => log_warn!("Write succeeded but the board could not be re-read: {}", e),
        }
    }
}
