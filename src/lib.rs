pub mod achievement;
pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod goals;
pub mod profile;
pub mod quest;
pub mod util;

pub use board::{BoardSummary, QuestBoard};
pub use config::BoardConfig;
pub use error::{BoardError, Result};
pub use quest::{Quest, QuestDraft, QuestGateway, QuestRank, StatWeights, SubTask};
pub use util::database::Database;
