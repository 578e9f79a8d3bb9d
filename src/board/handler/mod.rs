// src/board/handler/mod.rs

mod publish_event;
mod quest_detail;
mod quests;
mod refresh;
mod sub_tasks;

use uuid::Uuid;

use crate::quest::QuestGateway;
use crate::util::io::bus::MessageBus;
use super::BoardSummary;

/// The quest board service: writes through the gateway, then re-fetches and
/// recomputes the summary. The summary only ever reflects data that was
/// successfully read back.
#[derive(Debug)]
pub struct QuestBoard<G: QuestGateway> {
    gateway: G,
    owner_id: Uuid,
    limit: usize,
    message_bus: MessageBus,
    summary: BoardSummary,
}

impl<G: QuestGateway> QuestBoard<G> {
    pub fn new(gateway: G, owner_id: Uuid, limit: usize, message_bus: MessageBus) -> Self {
        Self {
            gateway,
            owner_id,
            limit,
            message_bus,
            summary: BoardSummary::default(),
        }
    }

    /// Last successfully computed summary.
    pub fn summary(&self) -> &BoardSummary {
        &self.summary
    }

    pub fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}
