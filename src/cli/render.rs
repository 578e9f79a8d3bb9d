//! Plain-text rendering for the command line

use std::fmt::Write;

use chrono::NaiveDate;

use crate::achievement::{achievement_unlock_rate, unlocked_count, Achievement};
use crate::board::BoardSummary;
use crate::goals::{daily_completion_percentage, DailyGoal};
use crate::profile::Profile;
use crate::quest::{Quest, QuestDetail, QuestRank, StatKind};

const GRID_COLUMNS: usize = 5;
const BAR_WIDTH: usize = 20;

fn bar(percentage: u8) -> String {
    let filled = (percentage as usize * BAR_WIDTH + 50) / 100;
    format!("[{}{}] {:>3}%", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled), percentage)
}

fn stat_tags(quest: &Quest) -> String {
    let tags: Vec<String> = quest
        .weights()
        .contributing_stats()
        .iter()
        .map(|s| s.as_str().to_string())
        .collect();
    if tags.is_empty() {
        "-".to_string()
    } else {
        tags.join("/")
    }
}

fn slot(quest: Option<&Quest>, summary: &BoardSummary) -> String {
    match quest {
        Some(q) => format!(
            "#{:<4} {:<24} {:>2} pts {:<9} {:>3}% {}",
            q.id,
            truncate(&q.title, 24),
            q.score(),
            q.rank().as_str(),
            summary.completion_of(q.id),
            stat_tags(q)
        ),
        None => "EMPTY".to_string(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(3)).collect();
    short.push_str("...");
    short
}

/// The board grid, padded with empty slots up to `limit`.
pub fn render_board(summary: &BoardSummary, limit: usize, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "QUEST BOARD  {} active", summary.top_quests.len());
    let _ = writeln!(out);

    for index in 0..limit {
        let quest = summary.top_quests.get(index);
        let _ = writeln!(out, "{:>2}. {}", index + 1, slot(quest, summary));
        if (index + 1) % GRID_COLUMNS == 0 && index + 1 < limit {
            let _ = writeln!(out);
        }
    }

    let _ = writeln!(out);
    let legend: Vec<String> = QuestRank::all().iter().map(|r| r.legend()).collect();
    let _ = writeln!(out, "Legend: {}", legend.join(" | "));

    match &summary.nearest_deadline {
        Some(q) => {
            let label = q
                .deadline_status(today)
                .map(|s| format!("{} ({})", s.label(), s.urgency().as_str()))
                .unwrap_or_default();
            let _ = writeln!(out, "Next deadline: #{} {} - {}", q.id, q.title, label);
        }
        None => {
            let _ = writeln!(out, "Next deadline: none");
        }
    }
    let _ = writeln!(out, "Average progress: {}", bar(summary.average_progress));
    out
}

pub fn render_detail(detail: &QuestDetail, today: NaiveDate) -> String {
    let quest = &detail.quest;
    let mut out = String::new();

    let _ = writeln!(out, "#{} {}", quest.id, quest.title);
    if let Some(description) = &quest.description {
        let _ = writeln!(out, "  {}", description);
    }
    let weights = quest.weights();
    let _ = writeln!(
        out,
        "  INT {}  WLT {}  STR {}  = {} pts ({})",
        weights.get(StatKind::Intelligence),
        weights.get(StatKind::Wealth),
        weights.get(StatKind::Strength),
        quest.score(),
        quest.rank()
    );
    if let Some(status) = quest.deadline_status(today) {
        let _ = writeln!(out, "  Deadline: {} ({})", status.deadline, status.label());
    }
    if quest.is_completed {
        let _ = writeln!(out, "  Completed");
    }

    let _ = writeln!(
        out,
        "  Tasks {}/{} {}",
        detail.progress.done,
        detail.progress.total,
        bar(detail.completion_percentage())
    );
    for task in &detail.sub_tasks {
        let mark = if task.is_completed { "x" } else { " " };
        let _ = writeln!(out, "    [{}] {:<5} {}", mark, task.id, task.title);
    }
    out
}

pub fn render_achievements(achievements: &[Achievement]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Achievements {}/{} unlocked {}",
        unlocked_count(achievements),
        achievements.len(),
        bar(achievement_unlock_rate(achievements))
    );

    for a in achievements {
        let state = match (a.unlocked, a.unlocked_on) {
            (true, Some(day)) => format!("unlocked {}", day),
            (true, None) => "unlocked".to_string(),
            (false, _) => "locked".to_string(),
        };
        let _ = writeln!(
            out,
            "  {:<10} {:<22} {:<14} {}",
            a.rarity.as_str(),
            a.title,
            state,
            a.description
        );
    }
    out
}

pub fn render_goals(goals: &[DailyGoal], streak: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Daily goals {}  streak {} day{}",
        bar(daily_completion_percentage(goals)),
        streak,
        if streak == 1 { "" } else { "s" }
    );

    for goal in goals {
        let _ = writeln!(
            out,
            "  {:<12} {:<22} {:>3}/{:<3} {:<9} {}",
            goal.key,
            goal.title,
            goal.current,
            goal.target,
            goal.unit,
            if goal.is_complete() { "done" } else { "" }
        );
    }
    out
}

pub fn render_profile(profile: &Profile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  {}  LVL {}  XP {}", profile.username, profile.class, profile.level, profile.xp);
    for stat in StatKind::all() {
        let _ = writeln!(out, "  {} {}", stat.as_str(), bar(profile.stats.bar_percentage(stat)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::fixtures::{quest, sub_task};
    use crate::quest::StatWeights;
    use std::collections::HashMap;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn test_board_is_padded_to_limit() {
        let quests = vec![quest(1, StatWeights::new(10, 3, 4)), quest(2, StatWeights::new(2, 0, 0))];
        let summary = BoardSummary::build(&quests, &HashMap::new(), 25);

        let text = render_board(&summary, 25, today());
        assert_eq!(text.matches("EMPTY").count(), 23);
        assert!(text.contains("LEGENDARY"));
        assert!(text.contains("INT/WLT/STR"));
        assert!(text.contains("Next deadline: none"));
    }

    #[test]
    fn test_board_shows_nearest_deadline() {
        let mut q = quest(4, StatWeights::new(1, 1, 1));
        q.deadline = NaiveDate::from_ymd_opt(2026, 3, 11);
        let summary = BoardSummary::build(&[q], &HashMap::new(), 5);

        let text = render_board(&summary, 5, today());
        assert!(text.contains("Due tomorrow"));
    }

    #[test]
    fn test_detail_lists_tasks() {
        let detail = QuestDetail::new(
            quest(1, StatWeights::new(10, 3, 4)),
            vec![sub_task(1, 1, true), sub_task(2, 1, false)],
        );
        let text = render_detail(&detail, today());
        assert!(text.contains("Tasks 1/2"));
        assert!(text.contains("[x]"));
        assert!(text.contains("17 pts (LEGENDARY)"));
    }

    #[test]
    fn test_bar_fill() {
        assert_eq!(bar(0), format!("[{}]   0%", ".".repeat(20)));
        assert_eq!(bar(100), format!("[{}] 100%", "#".repeat(20)));
        assert!(bar(50).starts_with("[##########.........."));
    }

    #[test]
    fn test_truncate_long_titles() {
        assert_eq!(truncate("short", 24), "short");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
    }
}
