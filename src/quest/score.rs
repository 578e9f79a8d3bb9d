// src/quest/score.rs
// Score and rank for a quest. Every mutation path goes through `Scoring::new`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StatKind, StatWeights};

/// Score thresholds: above `EPIC_ABOVE` is EPIC, above `LEGENDARY_ABOVE` is LEGENDARY.
pub const EPIC_ABOVE: i64 = 10;
pub const LEGENDARY_ABOVE: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuestRank {
    Common,
    Epic,
    Legendary,
}

impl QuestRank {
    pub fn as_str(&self) -> &str {
        match self {
            QuestRank::Common => "COMMON",
            QuestRank::Epic => "EPIC",
            QuestRank::Legendary => "LEGENDARY",
        }
    }

    /// Legend entry, e.g. `EPIC (11-15 pts)`
    pub fn legend(&self) -> String {
        match self {
            QuestRank::Common => format!("COMMON (0-{} pts)", EPIC_ABOVE),
            QuestRank::Epic => format!("EPIC ({}-{} pts)", EPIC_ABOVE + 1, LEGENDARY_ABOVE),
            QuestRank::Legendary => format!("LEGENDARY ({}+ pts)", LEGENDARY_ABOVE + 1),
        }
    }

    pub fn all() -> Vec<QuestRank> {
        vec![
            QuestRank::Legendary,
            QuestRank::Epic,
            QuestRank::Common,
        ]
    }
}

impl fmt::Display for QuestRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestRank {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COMMON" => Ok(QuestRank::Common),
            "EPIC" => Ok(QuestRank::Epic),
            "LEGENDARY" => Ok(QuestRank::Legendary),
            other => Err(format!("unknown quest rank '{}'", other)),
        }
    }
}

/// Sum of the three weights, widened so any `i32` inputs fit.
pub fn compute_score(weights: &StatWeights) -> i64 {
    i64::from(weights.intelligence) + i64::from(weights.wealth) + i64::from(weights.strength)
}

pub fn compute_rank(score: i64) -> QuestRank {
    if score > LEGENDARY_ABOVE {
        QuestRank::Legendary
    } else if score > EPIC_ABOVE {
        QuestRank::Epic
    } else {
        QuestRank::Common
    }
}

/// Weights together with the score and rank derived from them.
///
/// The fields are private so a `Scoring` can only be built from weights,
/// which keeps `score == INT + WLT + STR` and `rank == compute_rank(score)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scoring {
    weights: StatWeights,
    score: i64,
    rank: QuestRank,
}

impl Scoring {
    pub fn new(weights: StatWeights) -> Self {
        let score = compute_score(&weights);
        Self {
            weights,
            score,
            rank: compute_rank(score),
        }
    }

    pub fn weights(&self) -> StatWeights {
        self.weights
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn rank(&self) -> QuestRank {
        self.rank
    }

    pub fn gives(&self, stat: StatKind) -> bool {
        self.weights.gives(stat)
    }
}

impl From<StatWeights> for Scoring {
    fn from(weights: StatWeights) -> Self {
        Scoring::new(weights)
    }
}
