use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};

use gc_core::ports::{ClockPort, SleeperPort};

/// Wall clock in the device's local timezone.
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

pub struct TokioSleeper;

#[async_trait]
impl SleeperPort for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
