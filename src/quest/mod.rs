// src/quest/mod.rs

pub mod database;
mod deadline;
mod draft;
mod progress;
mod score;
mod stat_weights;

pub use database::QuestGateway;
pub use deadline::{DeadlineStatus, DeadlineUrgency};
pub use draft::{QuestChanges, QuestDraft, QuestUpdate, ScoredDraft};
pub use progress::{completion_percentage, mean_percentage, percentage_of, TaskProgress};
pub use score::{compute_rank, compute_score, QuestRank, Scoring};
pub use stat_weights::{StatKind, StatWeights};

pub(crate) use draft::required_title;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

pub type QuestId = i64;
pub type SubTaskId = i64;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quest {
    pub id: QuestId,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,    // Calendar date, no time component
    #[serde(flatten)]
    pub scoring: Scoring,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Quest {
    pub fn score(&self) -> i64 {
        self.scoring.score()
    }

    pub fn rank(&self) -> QuestRank {
        self.scoring.rank()
    }

    pub fn weights(&self) -> StatWeights {
        self.scoring.weights()
    }

    pub fn is_active(&self) -> bool {
        !self.is_completed
    }

    pub fn deadline_status(&self, today: NaiveDate) -> Option<DeadlineStatus> {
        self.deadline.map(|d| DeadlineStatus::new(d, today))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubTask {
    pub id: SubTaskId,
    pub quest_id: QuestId,
    pub title: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

/// A quest together with its checklist, as shown by the detail editor.
#[derive(Debug, Clone, Serialize)]
pub struct QuestDetail {
    pub quest: Quest,
    pub sub_tasks: Vec<SubTask>,
    pub progress: TaskProgress,
}

impl QuestDetail {
    pub fn new(quest: Quest, sub_tasks: Vec<SubTask>) -> Self {
        let progress = TaskProgress::of(&sub_tasks);
        Self { quest, sub_tasks, progress }
    }

    pub fn completion_percentage(&self) -> u8 {
        self.progress.percentage()
    }
}
