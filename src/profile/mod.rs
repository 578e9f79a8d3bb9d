// src/profile/mod.rs

pub mod database;
pub use database::ProfileDatabase;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::quest::StatKind;

/// Character attribute values shown on the profile card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStats {
    #[serde(rename = "INT")]
    pub intelligence: u32,
    #[serde(rename = "WLT")]
    pub wealth: u32,
    #[serde(rename = "STR")]
    pub strength: u32,
}

impl ProfileStats {
    pub fn get(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Intelligence => self.intelligence,
            StatKind::Wealth => self.wealth,
            StatKind::Strength => self.strength,
        }
    }

    /// Fill of the stat bar, capped at 100.
    pub fn bar_percentage(&self, stat: StatKind) -> u8 {
        self.get(stat).min(100) as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub owner_id: Uuid,
    pub username: String,
    pub class: String,
    pub level: u32,
    pub xp: u32,
    pub stats: ProfileStats,
}

/// Profile fields from configuration, used the first time an owner is seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDefaults {
    pub username: String,
    pub class: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub stats: ProfileStats,
}

fn default_level() -> u32 {
    1
}

impl ProfileDefaults {
    pub fn for_owner(&self, owner_id: Uuid) -> Profile {
        Profile {
            owner_id,
            username: self.username.clone(),
            class: self.class.clone(),
            level: self.level,
            xp: self.xp,
            stats: self.stats,
        }
    }
}
