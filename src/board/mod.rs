// src/board/mod.rs

mod aggregate;
pub mod handler;
mod summary;

pub use aggregate::{average_completion, nearest_deadline, rank_active_quests};
pub use crate::achievement::achievement_unlock_rate;
pub use handler::QuestBoard;
pub use summary::BoardSummary;

/// Number of slots on the board grid
pub const DEFAULT_BOARD_LIMIT: usize = 25;
