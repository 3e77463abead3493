use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

pub trait ClockPort: Send + Sync {
    /// Today's date in the device's local timezone.
    fn today(&self) -> NaiveDate;
}

#[async_trait]
pub trait SleeperPort: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
