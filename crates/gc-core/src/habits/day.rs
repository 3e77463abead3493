//! Today's habit checklist.
//!
//! Selecting a level for the displayed habit records it and moves the
//! cursor to the next habit. The celebration fires once, the first time every
//! habit has a level, and never if the server already showed it today.

use serde::Serialize;

use super::{CompletionCheck, CompletionLevel, TrackedHabit};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitDay {
    habits: Vec<TrackedHabit>,
    levels: Vec<Option<CompletionLevel>>,
    current: usize,
    /// Set once the day's list has been fully completed in this session.
    all_completed: bool,
    /// Server flag: the celebration was already shown today.
    modal_shown: bool,
}

/// Outcome of one level selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelSelection {
    pub logged_index: usize,
    pub current: usize,
    pub percentage: u8,
    pub show_celebration: bool,
}

impl HabitDay {
    pub fn new(habits: Vec<TrackedHabit>, check: CompletionCheck) -> Self {
        let levels: Vec<_> = habits.iter().map(|h| h.today_level).collect();
        let current = levels.iter().position(Option::is_none).unwrap_or(0);
        Self {
            habits,
            levels,
            current,
            all_completed: check.all_completed,
            modal_shown: check.modal_shown,
        }
    }

    pub fn habits(&self) -> &[TrackedHabit] {
        &self.habits
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_habit(&self) -> Option<&TrackedHabit> {
        self.habits.get(self.current)
    }

    pub fn level(&self, index: usize) -> Option<CompletionLevel> {
        self.levels.get(index).copied().flatten()
    }

    /// Move the cursor without logging anything.
    pub fn focus(&mut self, index: usize) -> bool {
        if index < self.habits.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    pub fn completed_count(&self) -> usize {
        self.levels.iter().filter(|l| l.is_some()).count()
    }

    /// `round(completed / n * 100)`, 0 for an empty list.
    pub fn percentage(&self) -> u8 {
        if self.habits.is_empty() {
            return 0;
        }
        let ratio = self.completed_count() as f64 / self.habits.len() as f64;
        (ratio * 100.0).round() as u8
    }

    pub fn is_complete(&self) -> bool {
        !self.habits.is_empty() && self.levels.iter().all(Option::is_some)
    }

    pub fn celebration_pending(&self) -> bool {
        !self.all_completed && !self.modal_shown
    }

    /// Record `level` for the displayed habit.
    ///
    /// The caller persists the log entry first and only applies it here once
    /// the server accepted it.
    pub fn apply_level(&mut self, level: CompletionLevel) -> Option<LevelSelection> {
        let logged_index = self.current;
        let slot = self.levels.get_mut(logged_index)?;
        *slot = Some(level);

        if logged_index + 1 < self.habits.len() {
            self.current = logged_index + 1;
        }

        let show_celebration = self.is_complete() && self.celebration_pending();
        if self.is_complete() {
            self.all_completed = true;
        }

        Some(LevelSelection {
            logged_index,
            current: self.current,
            percentage: self.percentage(),
            show_celebration,
        })
    }
}
