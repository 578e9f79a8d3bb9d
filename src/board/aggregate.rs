// src/board/aggregate.rs
// Board-level aggregation over already fetched quests. Pure and total.

use std::collections::HashMap;

use crate::quest::{completion_percentage, mean_percentage, Quest, QuestId, SubTask};

/// Active quests by score, highest first, at most `limit` of them.
///
/// Equal scores are ordered by quest id so the board is stable across refreshes.
/// A short result is returned as is; padding the grid is the caller's job.
pub fn rank_active_quests(quests: &[Quest], limit: usize) -> Vec<Quest> {
    let mut active: Vec<&Quest> = quests.iter().filter(|q| q.is_active()).collect();
    active.sort_by(|a, b| b.score().cmp(&a.score()).then(a.id.cmp(&b.id)));

    active.into_iter().take(limit).cloned().collect()
}

/// The active quest with the earliest deadline; lowest id wins a tie.
pub fn nearest_deadline(quests: &[Quest]) -> Option<&Quest> {
    quests
        .iter()
        .filter(|q| q.is_active())
        .filter_map(|q| q.deadline.map(|d| (d, q)))
        .min_by_key(|(deadline, q)| (*deadline, q.id))
        .map(|(_, q)| q)
}

/// Mean completion over the quests that have at least one sub-task.
///
/// Quests without sub-tasks are left out entirely rather than counted as 0%.
pub fn average_completion(quests: &[Quest], sub_tasks: &HashMap<QuestId, Vec<SubTask>>) -> u8 {
    mean_percentage(
        quests
            .iter()
            .filter_map(|q| sub_tasks.get(&q.id))
            .filter(|tasks| !tasks.is_empty())
            .map(|tasks| completion_percentage(tasks.iter().map(|t| t.is_completed))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::fixtures::{quest, sub_task};
    use crate::quest::StatWeights;
    use chrono::NaiveDate;

    fn scored(id: QuestId, score: i32) -> Quest {
        quest(id, StatWeights::new(score, 0, 0))
    }

    #[test]
    fn test_rank_sorts_and_skips_completed() {
        let mut done = scored(2, 20);
        done.is_completed = true;
        let quests = vec![scored(1, 5), done, scored(3, 12), scored(4, 12), scored(5, 18)];

        let ranked = rank_active_quests(&quests, 25);
        let ids: Vec<QuestId> = ranked.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![5, 3, 4, 1]);
        assert!(ranked.iter().all(|q| !q.is_completed));
        assert!(ranked.windows(2).all(|w| w[0].score() >= w[1].score()));
    }

    #[test]
    fn test_rank_respects_limit() {
        let quests: Vec<Quest> = (1..=30).map(|id| scored(id, (id % 7) as i32)).collect();
        let ranked = rank_active_quests(&quests, 25);
        assert_eq!(ranked.len(), 25);
        assert!(rank_active_quests(&quests, 0).is_empty());
    }

    #[test]
    fn test_tie_break_is_id_order_regardless_of_input_order() {
        let quests = vec![scored(9, 10), scored(3, 10), scored(6, 10)];
        let ids: Vec<QuestId> = rank_active_quests(&quests, 5).iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![3, 6, 9]);
    }

    #[test]
    fn test_nearest_deadline() {
        let day = |d: u32| NaiveDate::from_ymd_opt(2026, 5, d).unwrap();

        let mut a = scored(1, 1);
        a.deadline = Some(day(20));
        let mut b = scored(2, 1);
        b.deadline = Some(day(12));
        let mut finished = scored(3, 1);
        finished.deadline = Some(day(1));
        finished.is_completed = true;
        let mut tie = scored(4, 1);
        tie.deadline = Some(day(12));
        let no_deadline = scored(5, 1);

        let quests = vec![a, tie, finished, b, no_deadline];
        assert_eq!(nearest_deadline(&quests).map(|q| q.id), Some(2));
        assert!(nearest_deadline(&[scored(7, 3)]).is_none());
    }

    #[test]
    fn test_average_excludes_quests_without_sub_tasks() {
        let quests = vec![scored(1, 3), scored(2, 3)];
        let mut tasks = HashMap::new();
        tasks.insert(1, vec![sub_task(1, 1, true), sub_task(2, 1, true)]);
        tasks.insert(2, Vec::new());

        assert_eq!(average_completion(&quests, &tasks), 100);
    }

    #[test]
    fn test_average_of_mixed_progress() {
        let quests = vec![scored(1, 3), scored(2, 3), scored(3, 3)];
        let mut tasks = HashMap::new();
        tasks.insert(1, vec![sub_task(1, 1, true), sub_task(2, 1, false)]);
        tasks.insert(2, vec![sub_task(3, 2, false)]);

        // 50% and 0%; quest 3 has no entry at all
        assert_eq!(average_completion(&quests, &tasks), 25);
        assert_eq!(average_completion(&quests, &HashMap::new()), 0);
    }
}
