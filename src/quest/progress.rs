use serde::Serialize;

use super::SubTask;

/// `round(100 * part / total)` with halves rounded up; 0 when `total` is 0.
pub fn percentage_of(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let part = part.min(total) as u64;
    let total = total as u64;
    ((200 * part + total) / (2 * total)) as u8
}

/// Rounded (half-up) mean of integer percentages; 0 for an empty input.
pub fn mean_percentage<I>(percentages: I) -> u8
where
    I: IntoIterator<Item = u8>,
{
    let (sum, count) = percentages
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), p| (sum + p as u64, count + 1));

    if count == 0 {
        return 0;
    }
    ((2 * sum + count) / (2 * count)) as u8
}

/// Completion percentage of a checklist given each item's done flag.
pub fn completion_percentage<I>(flags: I) -> u8
where
    I: IntoIterator<Item = bool>,
{
    let (done, total) = flags
        .into_iter()
        .fold((0, 0), |(done, total), flag| (done + flag as usize, total + 1));
    percentage_of(done, total)
}

/// Done / total counts for one quest's sub-tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskProgress {
    pub done: usize,
    pub total: usize,
}

impl TaskProgress {
    pub fn of(sub_tasks: &[SubTask]) -> Self {
        Self {
            done: sub_tasks.iter().filter(|t| t.is_completed).count(),
            total: sub_tasks.len(),
        }
    }

    pub fn percentage(&self) -> u8 {
        percentage_of(self.done, self.total)
    }

    pub fn has_tasks(&self) -> bool {
        self.total > 0
    }
}
