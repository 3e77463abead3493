use std::sync::Arc;

use tracing::{debug, info_span, Instrument};

use gc_core::habits::HabitStats;
use gc_core::ports::{ApiResult, HabitApiPort};

/// Per-habit statistics for the stats screen.
pub struct CollectHabitStats {
    habit_api: Arc<dyn HabitApiPort>,
}

impl CollectHabitStats {
    pub fn new(habit_api: Arc<dyn HabitApiPort>) -> Self {
        Self { habit_api }
    }

    /// Histories are fetched one habit at a time, in list order.
    pub async fn execute(&self) -> ApiResult<Vec<HabitStats>> {
        let span = info_span!("usecase.collect_habit_stats.execute");
        async {
            let habits = self.habit_api.list_habits().await?;
            let mut stats = Vec::with_capacity(habits.len());
            for habit in habits {
                let history = self.habit_api.habit_history(habit.tracker_id).await?;
                debug!(tracker_id = habit.tracker_id, entries = history.len(), "habit history fetched");
                stats.push(HabitStats::new(habit, history));
            }
            Ok(stats)
        }
        .instrument(span)
        .await
    }
}
