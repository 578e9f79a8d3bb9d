use chrono::NaiveDate;
use serde::Serialize;

/// How close a deadline is, bucketed the way the board highlights it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeadlineUrgency {
    Overdue,  // Past due
    DueToday,
    Soon,     // Within 3 days
    ThisWeek, // Within 7 days
    Later,
}

impl DeadlineUrgency {
    pub fn as_str(&self) -> &str {
        match self {
            DeadlineUrgency::Overdue => "Overdue",
            DeadlineUrgency::DueToday => "Due today",
            DeadlineUrgency::Soon => "Soon",
            DeadlineUrgency::ThisWeek => "This week",
            DeadlineUrgency::Later => "Later",
        }
    }

    pub fn color_code(&self) -> &str {
        match self {
            DeadlineUrgency::Overdue => "red",
            DeadlineUrgency::DueToday => "amber",
            DeadlineUrgency::Soon => "orange",
            DeadlineUrgency::ThisWeek => "yellow",
            DeadlineUrgency::Later => "green",
        }
    }
}

/// A deadline seen from a particular day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeadlineStatus {
    pub deadline: NaiveDate,
    /// Negative once the deadline has passed
    pub days_until: i64,
}

impl DeadlineStatus {
    pub fn new(deadline: NaiveDate, today: NaiveDate) -> Self {
        Self {
            deadline,
            days_until: (deadline - today).num_days(),
        }
    }

    pub fn urgency(&self) -> DeadlineUrgency {
        match self.days_until {
            d if d < 0 => DeadlineUrgency::Overdue,
            0 => DeadlineUrgency::DueToday,
            1..=3 => DeadlineUrgency::Soon,
            4..=7 => DeadlineUrgency::ThisWeek,
            _ => DeadlineUrgency::Later,
        }
    }

    pub fn label(&self) -> String {
        match self.days_until {
            -1 => "1 day overdue".to_string(),
            d if d < 0 => format!("{} days overdue", d.abs()),
            0 => "Due today".to_string(),
            1 => "Due tomorrow".to_string(),
            d => format!("{} days remaining", d),
        }
    }
}
