//! Habit tracking use cases.

mod notes;
mod stats;
mod tracker;

pub use notes::{GetNotesSummary, ListMonthlyNotes, NoteError, SaveDailyNote};
pub use stats::CollectHabitStats;
pub use tracker::DailyHabitTracker;
