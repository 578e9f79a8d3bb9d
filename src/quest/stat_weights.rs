use serde::{Deserialize, Serialize};

/// One of the three attributes a quest can train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    #[serde(rename = "INT")]
    Intelligence,
    #[serde(rename = "WLT")]
    Wealth,
    #[serde(rename = "STR")]
    Strength,
}

impl StatKind {
    pub fn as_str(&self) -> &str {
        match self {
            StatKind::Intelligence => "INT",
            StatKind::Wealth => "WLT",
            StatKind::Strength => "STR",
        }
    }

    pub fn all() -> Vec<StatKind> {
        vec![
            StatKind::Intelligence,
            StatKind::Wealth,
            StatKind::Strength,
        ]
    }
}

/// Stat weights assigned to a quest.
///
/// Any integer is accepted here. Keeping each weight in `0..=20` is the
/// producer's job (the CLI range-checks its arguments).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatWeights {
    #[serde(rename = "INT")]
    pub intelligence: i32,
    #[serde(rename = "WLT")]
    pub wealth: i32,
    #[serde(rename = "STR")]
    pub strength: i32,
}

impl StatWeights {
    pub fn new(intelligence: i32, wealth: i32, strength: i32) -> Self {
        Self { intelligence, wealth, strength }
    }

    pub fn get(&self, stat: StatKind) -> i32 {
        match stat {
            StatKind::Intelligence => self.intelligence,
            StatKind::Wealth => self.wealth,
            StatKind::Strength => self.strength,
        }
    }

    /// A quest "gives" a stat when that weight is positive.
    pub fn gives(&self, stat: StatKind) -> bool {
        self.get(stat) > 0
    }

    /// Stat tags shown next to a quest, in INT, WLT, STR order.
    pub fn contributing_stats(&self) -> Vec<StatKind> {
        StatKind::all()
            .into_iter()
            .filter(|stat| self.gives(*stat))
            .collect()
    }
}
