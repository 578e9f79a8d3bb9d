use crate::error::Result;
use crate::util::database::Database;

impl Database {
    pub(crate) fn init_quest_schema(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS quests (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                deadline TEXT,
                weight_int INTEGER NOT NULL DEFAULT 0,
                weight_wlt INTEGER NOT NULL DEFAULT 0,
                weight_str INTEGER NOT NULL DEFAULT 0,
                gives_int INTEGER NOT NULL DEFAULT 0,
                gives_wlt INTEGER NOT NULL DEFAULT 0,
                gives_str INTEGER NOT NULL DEFAULT 0,
                score INTEGER NOT NULL DEFAULT 0,
                rank TEXT NOT NULL DEFAULT 'COMMON',
                is_completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                completed_at TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_quests_board
                ON quests(owner_id, is_completed, score DESC);

            CREATE TABLE IF NOT EXISTS quest_tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                quest_id INTEGER NOT NULL REFERENCES quests(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                is_completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_quest_tasks_quest
                ON quest_tasks(quest_id);",
        )?;

        Ok(())
    }
}
