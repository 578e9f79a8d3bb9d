use crate::quest::QuestGateway;
use crate::util::io::bus::messages::board_event;
use super::QuestBoard;

impl<G: QuestGateway> QuestBoard<G> {
    pub(super) async fn publish_event(&self, topic: &str, payload: serde_json::Value) {
        self.message_bus.publish(board_event(topic, payload)).await;
    }
}
