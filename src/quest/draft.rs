use chrono::NaiveDate;

use crate::error::{BoardError, Result};
use super::{Scoring, StatWeights};

/// Fields entered on the creation form.
#[derive(Debug, Clone, Default)]
pub struct QuestDraft {
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub weights: StatWeights,
}

/// A validated draft with its score and rank already computed.
#[derive(Debug, Clone)]
pub struct ScoredDraft {
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub scoring: Scoring,
}

impl QuestDraft {
    pub fn new(title: impl Into<String>, weights: StatWeights) -> Self {
        Self {
            title: title.into(),
            weights,
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Trim text fields, reject an empty title and compute score/rank.
    pub fn score(self) -> Result<ScoredDraft> {
        Ok(ScoredDraft {
            title: required_title(&self.title)?,
            description: optional_text(self.description),
            deadline: self.deadline,
            scoring: Scoring::new(self.weights),
        })
    }
}

/// Edits from the detail editor. `None` leaves a field untouched; for the
/// nullable fields `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct QuestChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub deadline: Option<Option<NaiveDate>>,
    pub weights: Option<StatWeights>,
}

/// Resolved partial update handed to the gateway. When the weights change,
/// `scoring` carries the recomputed score and rank.
#[derive(Debug, Clone, Default)]
pub struct QuestUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub deadline: Option<Option<NaiveDate>>,
    pub scoring: Option<Scoring>,
}

impl QuestChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.deadline.is_none()
            && self.weights.is_none()
    }

    pub fn resolve(self) -> Result<QuestUpdate> {
        let title = match self.title {
            Some(title) => Some(required_title(&title)?),
            None => None,
        };

        Ok(QuestUpdate {
            title,
            description: self.description.map(optional_text),
            deadline: self.deadline,
            scoring: self.weights.map(Scoring::new),
        })
    }
}

impl QuestUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.deadline.is_none()
            && self.scoring.is_none()
    }
}

pub(crate) fn required_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(BoardError::Validation("title must not be empty".to_string()));
    }
    Ok(title.to_string())
}

fn optional_text(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
