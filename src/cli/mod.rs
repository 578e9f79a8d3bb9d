// src/cli/mod.rs
// Command line front end: argument parsing and command dispatch

pub mod render;

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use serde::Serialize;

use crate::board::QuestBoard;
use crate::config::BoardConfig;
use crate::goals::GoalTracker;
use crate::profile::ProfileDatabase;
use crate::quest::{QuestChanges, QuestDraft, QuestId, StatWeights, SubTaskId};
use crate::util::database::Database;
use crate::util::io::bus::MessageBus;

#[derive(Parser, Debug)]
#[command(name = "quest-board")]
#[command(version, about = "Score, rank and track personal quests")]
pub struct Cli {
    /// Configuration file (defaults to ./config.yml, then built-in settings)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the top quests by score
    Board,

    /// Create a quest
    Add {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Calendar date, YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        deadline: Option<NaiveDate>,
        #[arg(long = "int", default_value_t = 0, value_parser = weight_parser())]
        intelligence: i32,
        #[arg(long = "wlt", default_value_t = 0, value_parser = weight_parser())]
        wealth: i32,
        #[arg(long = "str", default_value_t = 0, value_parser = weight_parser())]
        strength: i32,
    },

    /// Edit a quest; unspecified fields are left alone
    Edit {
        id: QuestId,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long)]
        clear_description: bool,
        #[arg(long, value_parser = parse_date, conflicts_with = "clear_deadline")]
        deadline: Option<NaiveDate>,
        #[arg(long)]
        clear_deadline: bool,
        #[arg(long = "int", value_parser = weight_parser())]
        intelligence: Option<i32>,
        #[arg(long = "wlt", value_parser = weight_parser())]
        wealth: Option<i32>,
        #[arg(long = "str", value_parser = weight_parser())]
        strength: Option<i32>,
    },

    /// Show one quest with its sub-tasks
    Show { id: QuestId },

    /// Mark a quest completed
    Complete { id: QuestId },

    /// Manage a quest's sub-tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// List the achievement catalog
    Achievements,

    /// Show today's goals, or bump one up or down
    Goals {
        #[command(subcommand)]
        action: Option<GoalAction>,
    },

    /// Show the character profile
    Profile,
}

#[derive(Subcommand, Debug)]
pub enum TaskAction {
    Add { quest_id: QuestId, title: String },
    Toggle { id: SubTaskId },
    Delete { id: SubTaskId },
}

#[derive(Subcommand, Debug)]
pub enum GoalAction {
    Inc { key: String },
    Dec { key: String },
}

fn weight_parser() -> clap::builder::RangedI64ValueParser<i32> {
    clap::value_parser!(i32).range(0..=20)
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn print_output<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text());
    }
    Ok(())
}

pub async fn run(cli: Cli, config: BoardConfig) -> Result<()> {
    let database = Database::open(&config.database_path)
        .wrap_err_with(|| format!("Failed to open database at {}", config.database_path.display()))?;
    let (message_bus, _bus_rx) = MessageBus::new();
    let today = Local::now().date_naive();
    let owner_id = config.owner_id;
    let limit = config.board_limit;

    let mut board = QuestBoard::new(database.clone(), owner_id, limit, message_bus.clone());

    match cli.command {
        Commands::Board => {
            let summary = board.refresh()?;
            print_output(cli.json, summary, || render::render_board(summary, limit, today))?;
        }

        Commands::Add { title, description, deadline, intelligence, wealth, strength } => {
            let mut draft = QuestDraft::new(title, StatWeights::new(intelligence, wealth, strength));
            draft.description = description;
            draft.deadline = deadline;

            let quest = board.create_quest(draft).await?;
            print_output(cli.json, &quest, || {
                format!("Created quest #{} ({} pts, {})\n", quest.id, quest.score(), quest.rank())
            })?;
        }

        Commands::Edit {
            id,
            title,
            description,
            clear_description,
            deadline,
            clear_deadline,
            intelligence,
            wealth,
            strength,
        } => {
            let weights = if intelligence.is_some() || wealth.is_some() || strength.is_some() {
                let current = board.quest_detail(id)?.quest.weights();
                Some(StatWeights::new(
                    intelligence.unwrap_or(current.intelligence),
                    wealth.unwrap_or(current.wealth),
                    strength.unwrap_or(current.strength),
                ))
            } else {
                None
            };

            let changes = QuestChanges {
                title,
                description: if clear_description { Some(None) } else { description.map(Some) },
                deadline: if clear_deadline { Some(None) } else { deadline.map(Some) },
                weights,
            };

            board.update_quest(id, changes).await?;
            let detail = board.quest_detail(id)?;
            print_output(cli.json, &detail, || render::render_detail(&detail, today))?;
        }

        Commands::Show { id } => {
            let detail = board.quest_detail(id)?;
            print_output(cli.json, &detail, || render::render_detail(&detail, today))?;
        }

        Commands::Complete { id } => {
            board.complete_quest(id).await?;
            print_output(cli.json, &serde_json::json!({ "completed": id }), || {
                format!("Quest #{} completed\n", id)
            })?;
        }

        Commands::Task { action } => {
            let quest_id = match action {
                TaskAction::Add { quest_id, title } => board.add_sub_task(quest_id, &title).await?.quest_id,
                TaskAction::Toggle { id } => board.toggle_sub_task(id).await?.quest_id,
                TaskAction::Delete { id } => {
                    board.delete_sub_task(id).await?;
                    print_output(cli.json, &serde_json::json!({ "deleted": id }), || {
                        format!("Sub-task {} deleted\n", id)
                    })?;
                    return Ok(());
                }
            };

            let detail = board.quest_detail(quest_id)?;
            print_output(cli.json, &detail, || render::render_detail(&detail, today))?;
        }

        Commands::Achievements => {
            print_output(cli.json, &config.achievements, || {
                render::render_achievements(&config.achievements)
            })?;
        }

        Commands::Goals { action } => {
            let tracker = GoalTracker::new(database, owner_id, config.daily_goals.clone(), message_bus);
            match action {
                Some(GoalAction::Inc { key }) => {
                    tracker.increment(&key, today).await?;
                }
                Some(GoalAction::Dec { key }) => {
                    tracker.decrement(&key, today).await?;
                }
                None => {}
            }

            let goals = tracker.goals_for(today)?;
            let streak = tracker.streak(today)?;
            print_output(
                cli.json,
                &serde_json::json!({ "goals": goals, "streak": streak }),
                || render::render_goals(&goals, streak),
            )?;
        }

        Commands::Profile => {
            let profile = database
                .ensure_profile(owner_id, &config.profile)
                .wrap_err("Failed to load profile")?;
            print_output(cli.json, &profile, || render::render_profile(&profile))?;
        }
    }

    Ok(())
}
