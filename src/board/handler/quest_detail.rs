use crate::error::{BoardError, Result};
use crate::quest::{QuestDetail, QuestGateway, QuestId};
use super::QuestBoard;

impl<G: QuestGateway> QuestBoard<G> {
    /// Quest with its checklist. Completed quests can still be inspected.
    pub fn quest_detail(&self, quest_id: QuestId) -> Result<QuestDetail> {
        let quest = self
            .gateway
            .get_quest(self.owner_id, quest_id)?
            .ok_or_else(|| BoardError::not_found("quest", quest_id))?;
        let sub_tasks = self.gateway.list_sub_tasks(quest_id)?;

        Ok(QuestDetail::new(quest, sub_tasks))
    }
}
