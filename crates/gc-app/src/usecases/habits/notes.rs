//! Daily notes attached to the habit tracker.

use std::sync::Arc;

use chrono::Datelike;
use thiserror::Error;
use tracing::{info, info_span, Instrument};

use gc_core::habits::{DailyNote, MonthlyNotes, NotesSummary};
use gc_core::ports::{ApiError, ApiResult, ClockPort, HabitApiPort};

#[derive(Debug, Error, PartialEq)]
pub enum NoteError {
    #[error("note is empty")]
    Empty,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Save today's note. Like habit logs, notes are only written for today.
pub struct SaveDailyNote {
    habit_api: Arc<dyn HabitApiPort>,
    clock: Arc<dyn ClockPort>,
}

impl SaveDailyNote {
    pub fn new(habit_api: Arc<dyn HabitApiPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { habit_api, clock }
    }

    pub async fn execute(&self, content: &str) -> Result<DailyNote, NoteError> {
        let span = info_span!("usecase.save_daily_note.execute");
        async {
            let content = content.trim();
            if content.is_empty() {
                return Err(NoteError::Empty);
            }
            let note = DailyNote {
                date: self.clock.today(),
                content: content.to_string(),
            };
            let saved = self.habit_api.save_daily_note(&note).await?;
            info!(date = %saved.date, "daily note saved");
            Ok(saved)
        }
        .instrument(span)
        .await
    }
}

pub struct ListMonthlyNotes {
    habit_api: Arc<dyn HabitApiPort>,
    clock: Arc<dyn ClockPort>,
}

impl ListMonthlyNotes {
    pub fn new(habit_api: Arc<dyn HabitApiPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { habit_api, clock }
    }

    pub async fn execute(&self, year: i32, month: u32) -> ApiResult<MonthlyNotes> {
        self.habit_api.monthly_notes(year, month).await
    }

    pub async fn current_month(&self) -> ApiResult<MonthlyNotes> {
        let today = self.clock.today();
        self.execute(today.year(), today.month()).await
    }
}

pub struct GetNotesSummary {
    habit_api: Arc<dyn HabitApiPort>,
}

impl GetNotesSummary {
    pub fn new(habit_api: Arc<dyn HabitApiPort>) -> Self {
        Self { habit_api }
    }

    pub async fn execute(&self) -> ApiResult<NotesSummary> {
        self.habit_api.notes_summary().await
    }
}
