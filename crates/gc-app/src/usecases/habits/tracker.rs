//! Daily habit tracker.

use std::sync::Arc;

use tracing::{debug, info, info_span, Instrument};

use gc_core::habits::{CompletionLevel, HabitDay, HabitLogRequest, LevelSelection};
use gc_core::ports::{ApiError, ApiResult, ClockPort, HabitApiPort};

/// Today's checklist plus the calls that keep it in sync with the server.
///
/// Entries are only ever written for [`ClockPort::today`].
pub struct DailyHabitTracker {
    habit_api: Arc<dyn HabitApiPort>,
    clock: Arc<dyn ClockPort>,
    day: Option<HabitDay>,
}

impl DailyHabitTracker {
    pub fn new(habit_api: Arc<dyn HabitApiPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            habit_api,
            clock,
            day: None,
        }
    }

    pub fn day(&self) -> Option<&HabitDay> {
        self.day.as_ref()
    }

    /// Fetch the habit list and today's completion check.
    pub async fn load(&mut self) -> ApiResult<&HabitDay> {
        let span = info_span!("usecase.daily_habit_tracker.load");
        let day = async {
            let habits = self.habit_api.list_habits().await?;
            let check = self.habit_api.check_completion().await?;
            debug!(
                habits = habits.len(),
                all_completed = check.all_completed,
                modal_shown = check.modal_shown,
                "habit day loaded"
            );
            Ok::<_, ApiError>(HabitDay::new(habits, check))
        }
        .instrument(span)
        .await?;
        Ok(self.day.insert(day))
    }

    /// Log `level` for the displayed habit, then advance.
    ///
    /// Returns `Ok(None)` before [`load`](Self::load) or when the day has no
    /// habits. Nothing changes locally when the server rejects the entry.
    pub async fn select_level(&mut self, level: CompletionLevel) -> ApiResult<Option<LevelSelection>> {
        let Some(day) = self.day.as_mut() else {
            return Ok(None);
        };
        let Some(habit) = day.current_habit() else {
            return Ok(None);
        };

        let entry = HabitLogRequest {
            tracker_id: habit.tracker_id,
            habit_id: habit.habit_id,
            date: self.clock.today(),
            level,
        };
        self.habit_api.log_habit(&entry).await?;

        let selection = day.apply_level(level);
        if let Some(selection) = &selection {
            info!(
                habit_id = entry.habit_id,
                level = level.value(),
                percentage = selection.percentage,
                celebrate = selection.show_celebration,
                "habit logged"
            );
        }
        Ok(selection)
    }

    /// Move the cursor to `index` without logging.
    pub fn focus(&mut self, index: usize) -> bool {
        self.day.as_mut().is_some_and(|day| day.focus(index))
    }
}
