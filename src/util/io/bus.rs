use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use std::collections::HashMap;
use crate::log_debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusMessage {
    pub topic: String,
    pub payload: String,
    pub source: String,
    pub timestamp: i64,
}

impl BusMessage {
    pub fn new(topic: String, payload: String, source: String) -> Self {
        Self {
            topic,
            payload,
            source,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

pub type BusReceiver = mpsc::UnboundedReceiver<BusMessage>;
pub type BusSender = mpsc::UnboundedSender<BusMessage>;

#[derive(Debug, Clone)]
pub struct MessageBus {
    sender: BusSender,
    // Use Arc<RwLock> so the bus can be cloned and subscribers can be modified
    subscribers: Arc<RwLock<HashMap<String, Vec<BusSender>>>>,
}

impl MessageBus {
    pub fn new() -> (Self, BusReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();

        (
            Self {
                sender,
                subscribers: Arc::new(RwLock::new(HashMap::new())),
            },
            receiver,
        )
    }

    /// Deliver to the main receiver and every subscriber of `message.topic`.
    ///
    /// Closed receivers are skipped; publishing never fails.
    pub async fn publish(&self, message: BusMessage) {
        log_debug!("bus publish: {} {}", message.topic, message.payload);

        if self.sender.send(message.clone()).is_err() {
            log_debug!("main bus receiver closed, dropping {}", message.topic);
        }

        let subscribers = self.subscribers.read().await;
        if let Some(subs) = subscribers.get(&message.topic) {
            for subscriber in subs {
                let _ = subscriber.send(message.clone());
            }
        }
    }

    pub async fn subscribe(&self, topic: String) -> BusReceiver {
        let (sender, receiver) = mpsc::unbounded_channel();

        let mut subscribers = self.subscribers.write().await;
        subscribers
            .entry(topic)
            .or_insert_with(Vec::new)
            .push(sender);

        receiver
    }
}

// Helpers for the board's event messages
pub mod messages {
    use super::BusMessage;

    pub const SOURCE: &str = "quest_board";

    pub const QUEST_CREATED: &str = "quest.created";
    pub const QUEST_UPDATED: &str = "quest.updated";
    pub const QUEST_COMPLETED: &str = "quest.completed";
    pub const SUBTASK_CREATED: &str = "subtask.created";
    pub const SUBTASK_TOGGLED: &str = "subtask.toggled";
    pub const SUBTASK_DELETED: &str = "subtask.deleted";
    pub const GOAL_UPDATED: &str = "goal.updated";

    pub fn board_event(topic: &str, payload: serde_json::Value) -> BusMessage {
        BusMessage::new(topic.to_string(), payload.to_string(), SOURCE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_main_receiver_and_subscribers() {
        let (bus, mut main_rx) = MessageBus::new();
        let mut completed_rx = bus.subscribe(messages::QUEST_COMPLETED.to_string()).await;
        let mut created_rx = bus.subscribe(messages::QUEST_CREATED.to_string()).await;

        bus.publish(messages::board_event(
            messages::QUEST_COMPLETED,
            serde_json::json!({ "quest_id": 7 }),
        ))
        .await;

        let main = main_rx.recv().await.unwrap();
        assert_eq!(main.topic, "quest.completed");
        assert_eq!(main.source, "quest_board");

        let sub = completed_rx.recv().await.unwrap();
        assert_eq!(sub.payload, r#"{"quest_id":7}"#);

        assert!(created_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_with_closed_main_receiver() {
        let (bus, main_rx) = MessageBus::new();
        drop(main_rx);

        let mut rx = bus.subscribe(messages::GOAL_UPDATED.to_string()).await;
        bus.publish(messages::board_event(messages::GOAL_UPDATED, serde_json::json!({}))).await;

        assert!(rx.recv().await.is_some());
    }
}
