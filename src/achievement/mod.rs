// src/achievement/mod.rs

//! Achievement catalog. Unlock state is declared in configuration; nothing
//! here decides when an achievement unlocks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::quest::percentage_of;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    pub fn color_code(&self) -> &str {
        match self {
            Rarity::Common => "gray",
            Rarity::Rare => "blue",
            Rarity::Epic => "purple",
            Rarity::Legendary => "amber",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default)]
    pub unlocked_on: Option<NaiveDate>,
}

pub fn unlocked_count(achievements: &[Achievement]) -> usize {
    achievements.iter().filter(|a| a.unlocked).count()
}

/// `round(100 * unlocked / total)`; an empty catalog counts as 0%.
pub fn achievement_unlock_rate(achievements: &[Achievement]) -> u8 {
    percentage_of(unlocked_count(achievements), achievements.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn badge(title: &str, unlocked: bool) -> Achievement {
        Achievement {
            title: title.to_string(),
            description: String::new(),
            rarity: Rarity::Rare,
            unlocked,
            unlocked_on: None,
        }
    }

    #[test]
    fn test_unlock_rate() {
        let catalog: Vec<Achievement> = (0..8).map(|i| badge(&format!("a{}", i), i < 6)).collect();
        assert_eq!(unlocked_count(&catalog), 6);
        assert_eq!(achievement_unlock_rate(&catalog), 75);

        let catalog = vec![badge("one", true), badge("two", false), badge("three", false)];
        assert_eq!(achievement_unlock_rate(&catalog), 33);
    }

    #[test]
    fn test_empty_catalog() {
        assert_eq!(achievement_unlock_rate(&[]), 0);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let yaml = "title: First Quest\nunlocked: true\nunlocked_on: 2025-12-15\n";
        let achievement: Achievement = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(achievement.rarity, Rarity::Common);
        assert_eq!(achievement.unlocked_on, NaiveDate::from_ymd_opt(2025, 12, 15));
    }
}
