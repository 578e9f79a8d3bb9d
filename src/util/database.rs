// src/util/database.rs
// Core database struct with connection management only

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{BoardError, Result};
use crate::log_debug;

#[derive(Clone)]
pub struct Database {
    pub(crate) app_conn: Arc<Mutex<Connection>>,
}

// Manual Debug implementation since Mutex<Connection> doesn't implement Debug
impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("app_conn", &"Arc<Mutex<Connection>>")
            .finish()
    }
}

impl Database {
    /// Open (or create) the board database at `path`, creating parent directories as needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
        }

        log_debug!("Opening quest board database at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    /// Private in-memory database, used by tests and dry runs.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let db = Database {
            app_conn: Arc::new(Mutex::new(conn)),
        };

        db.init_all_schemas()?;

        Ok(db)
    }

    pub(crate) fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.app_conn.lock().map_err(|_| BoardError::LockPoisoned)
    }

    fn init_all_schemas(&self) -> Result<()> {
        self.init_quest_schema()?;
        self.init_profile_schema()?;
        self.init_goals_schema()?;

        Ok(())
    }
}
