//! Habit tracking models.
//!
//! Habit logs are append-only on the server. The client only ever writes
//! today's entry.

pub mod day;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use day::{HabitDay, LevelSelection};

/// Daily completion level, `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CompletionLevel(u8);

impl CompletionLevel {
    pub const MAX: u8 = 3;

    pub fn new(level: u8) -> Option<Self> {
        (level <= Self::MAX).then_some(Self(level))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for CompletionLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("completion level {value} out of range 0..=3"))
    }
}

impl From<CompletionLevel> for u8 {
    fn from(level: CompletionLevel) -> Self {
        level.0
    }
}

/// A habit the user is tracking, as returned by `GET /api/habits/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedHabit {
    pub tracker_id: u64,
    pub habit_id: u64,
    pub name: String,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    /// Level already logged today, if any.
    #[serde(default)]
    pub today_level: Option<CompletionLevel>,
}

/// Body of `POST /api/habits/log/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitLogRequest {
    pub tracker_id: u64,
    pub habit_id: u64,
    pub date: NaiveDate,
    pub level: CompletionLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitHistoryEntry {
    pub date: NaiveDate,
    pub level: CompletionLevel,
}

/// Result of `GET /api/habits/check-completion/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionCheck {
    #[serde(default)]
    pub all_completed: bool,
    #[serde(default)]
    pub modal_shown: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyNote {
    pub date: NaiveDate,
    pub content: String,
}

/// Result of `GET /api/habits/daily-notes/monthly/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyNotes {
    #[serde(default)]
    pub notes: Vec<DailyNote>,
}

/// Result of `GET /api/habits/daily-notes/summary/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotesSummary {
    #[serde(default)]
    pub total_notes: u32,
    #[serde(default)]
    pub days_with_notes: u32,
    #[serde(default)]
    pub latest: Option<DailyNote>,
}

/// Per-habit statistics assembled from history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitStats {
    pub habit: TrackedHabit,
    pub history: Vec<HabitHistoryEntry>,
    /// Mean level over the fetched history, `None` without entries.
    pub average_level: Option<f64>,
}

impl HabitStats {
    pub fn new(habit: TrackedHabit, history: Vec<HabitHistoryEntry>) -> Self {
        let average_level = if history.is_empty() {
            None
        } else {
            let sum: u32 = history.iter().map(|e| u32::from(e.level.value())).sum();
            Some(f64::from(sum) / history.len() as f64)
        };
        Self {
            habit,
            history,
            average_level,
        }
    }
}
