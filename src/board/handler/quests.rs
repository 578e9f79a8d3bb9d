use serde_json::json;

use crate::error::{BoardError, Result};
use crate::quest::{Quest, QuestChanges, QuestDraft, QuestGateway, QuestId};
use crate::util::io::bus::messages;
use super::QuestBoard;

impl<G: QuestGateway> QuestBoard<G> {
    /// Validate the draft, score it and persist it.
    pub async fn create_quest(&mut self, draft: QuestDraft) -> Result<Quest> {
        let scored = draft.score()?;
        let quest = self.gateway.create_quest(self.owner_id, &scored)?;

        self.publish_event(
            messages::QUEST_CREATED,
            json!({
                "quest_id": quest.id,
                "title": quest.title,
                "score": quest.score(),
                "rank": quest.rank(),
            }),
        )
        .await;

        self.refresh_after_write();
        Ok(quest)
    }

    /// Apply detail-editor changes. New weights come with a freshly computed
    /// score and rank; the gateway never derives them.
    pub async fn update_quest(&mut self, quest_id: QuestId, changes: QuestChanges) -> Result<()> {
        if changes.is_empty() {
            return Err(BoardError::Validation("no changes given".to_string()));
        }

        let update = changes.resolve()?;
        self.gateway.update_quest(self.owner_id, quest_id, &update)?;

        let mut payload = json!({ "quest_id": quest_id });
        if let Some(scoring) = &update.scoring {
            payload["score"] = json!(scoring.score());
            payload["rank"] = json!(scoring.rank());
        }
        self.publish_event(messages::QUEST_UPDATED, payload).await;

        self.refresh_after_write();
        Ok(())
    }

    /// Active -> Completed. There is no way back.
    pub async fn complete_quest(&mut self, quest_id: QuestId) -> Result<()> {
        self.gateway.complete_quest(quest_id, self.owner_id)?;

        self.publish_event(messages::QUEST_COMPLETED, json!({ "quest_id": quest_id }))
            .await;

        self.refresh_after_write();
        Ok(())
    }
}
