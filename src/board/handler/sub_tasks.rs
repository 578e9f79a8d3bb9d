use serde_json::json;

use crate::error::{BoardError, Result};
use crate::quest::{QuestGateway, QuestId, SubTask, SubTaskId};
use crate::util::io::bus::messages;
use super::QuestBoard;

impl<G: QuestGateway> QuestBoard<G> {
    pub async fn add_sub_task(&mut self, quest_id: QuestId, title: &str) -> Result<SubTask> {
        // Only the owner's quests take new checklist items
        if self.gateway.get_quest(self.owner_id, quest_id)?.is_none() {
            return Err(BoardError::not_found("quest", quest_id));
        }

        let task = self.gateway.create_sub_task(quest_id, title)?;
        self.publish_event(
            messages::SUBTASK_CREATED,
            json!({ "quest_id": quest_id, "sub_task_id": task.id }),
        )
        .await;

        self.refresh_after_write();
        Ok(task)
    }

    pub async fn toggle_sub_task(&mut self, sub_task_id: SubTaskId) -> Result<SubTask> {
        let task = self.gateway.toggle_sub_task(self.owner_id, sub_task_id)?;
        self.publish_event(
            messages::SUBTASK_TOGGLED,
            json!({
                "quest_id": task.quest_id,
                "sub_task_id": task.id,
                "is_completed": task.is_completed,
            }),
        )
        .await;

        self.refresh_after_write();
        Ok(task)
    }

    pub async fn delete_sub_task(&mut self, sub_task_id: SubTaskId) -> Result<()> {
        self.gateway.delete_sub_task(self.owner_id, sub_task_id)?;
        self.publish_event(messages::SUBTASK_DELETED, json!({ "sub_task_id": sub_task_id }))
            .await;

        self.refresh_after_write();
        Ok(())
    }
}
