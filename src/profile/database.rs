// src/profile/database.rs
// Database operations for the character profile

use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use crate::error::Result;
use crate::log_info;
use crate::quest::database::conversion_failure;
use crate::util::database::Database;
use super::{Profile, ProfileDefaults, ProfileStats};

/// Trait to add profile-specific database operations to Database
pub trait ProfileDatabase {
    fn get_profile(&self, owner_id: Uuid) -> Result<Option<Profile>>;
    fn save_profile(&self, profile: &Profile) -> Result<()>;

    /// Existing profile, or a new one created from `defaults`.
    fn ensure_profile(&self, owner_id: Uuid, defaults: &ProfileDefaults) -> Result<Profile> {
        if let Some(profile) = self.get_profile(owner_id)? {
            return Ok(profile);
        }

        let profile = defaults.for_owner(owner_id);
        self.save_profile(&profile)?;
        log_info!("Created profile '{}' for {}", profile.username, owner_id);
        Ok(profile)
    }
}

impl Database {
    pub(crate) fn init_profile_schema(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS profiles (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL,
                class TEXT NOT NULL,
                level INTEGER NOT NULL DEFAULT 1,
                xp INTEGER NOT NULL DEFAULT 0,
                stats TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }
}

impl ProfileDatabase for Database {
    fn get_profile(&self, owner_id: Uuid) -> Result<Option<Profile>> {
        let conn = self.conn()?;

        let profile = conn
            .query_row(
                "SELECT username, class, level, xp, stats FROM profiles WHERE id = ?1",
                [owner_id.to_string()],
                |row| {
                    let stats: String = row.get(4)?;
                    let stats: ProfileStats =
                        serde_json::from_str(&stats).map_err(|e| conversion_failure(4, e))?;

                    Ok(Profile {
                        owner_id,
                        username: row.get(0)?,
                        class: row.get(1)?,
                        level: row.get(2)?,
                        xp: row.get(3)?,
                        stats,
                    })
                },
            )
            .optional()?;

        Ok(profile)
    }

    fn save_profile(&self, profile: &Profile) -> Result<()> {
        let stats = serde_json::to_string(&profile.stats)?;
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO profiles (id, username, class, level, xp, stats)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET
                username = excluded.username,
                class = excluded.class,
                level = excluded.level,
                xp = excluded.xp,
                stats = excluded.stats",
            params![
                profile.owner_id.to_string(),
                profile.username,
                profile.class,
                profile.level,
                profile.xp,
                stats,
            ],
        )?;

        Ok(())
    }
}
