use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::quest::{Quest, QuestId, SubTask, TaskProgress};
use super::{average_completion, nearest_deadline, rank_active_quests};

/// Everything the board view shows, derived from one consistent fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoardSummary {
    pub top_quests: Vec<Quest>,
    pub per_quest_completion: BTreeMap<QuestId, u8>,
    pub task_counts: BTreeMap<QuestId, TaskProgress>,
    pub nearest_deadline: Option<Quest>,
    /// Mean completion of the board quests that have sub-tasks
    pub average_progress: u8,
}

impl BoardSummary {
    /// `active` is every active quest of the owner; `sub_tasks` needs entries
    /// for the quests that make it onto the board.
    pub fn build(active: &[Quest], sub_tasks: &HashMap<QuestId, Vec<SubTask>>, limit: usize) -> Self {
        let top_quests = rank_active_quests(active, limit);

        let task_counts: BTreeMap<QuestId, TaskProgress> = top_quests
            .iter()
            .map(|q| {
                let progress = sub_tasks
                    .get(&q.id)
                    .map(|tasks| TaskProgress::of(tasks))
                    .unwrap_or_default();
                (q.id, progress)
            })
            .collect();

        let per_quest_completion = task_counts
            .iter()
            .map(|(id, progress)| (*id, progress.percentage()))
            .collect();

        Self {
            average_progress: average_completion(&top_quests, sub_tasks),
            nearest_deadline: nearest_deadline(active).cloned(),
            top_quests,
            per_quest_completion,
            task_counts,
        }
    }

    pub fn completion_of(&self, quest_id: QuestId) -> u8 {
        self.per_quest_completion.get(&quest_id).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.top_quests.is_empty()
    }
}
