use cadence_core::ReportZone;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Inclusive `[oldest, latest]` bounds, in Unix seconds, for one history fetch.
pub struct HistoryWindow {
    pub oldest: i64,
    pub latest: i64,
}

impl HistoryWindow {
    /// From the start of the current local day up to `now`.
    pub fn today_until(now: DateTime<Utc>, zone: &ReportZone) -> Self {
        Self {
            oldest: zone.start_of_day(now).timestamp(),
            latest: now.timestamp(),
        }
    }

    pub fn oldest_param(&self) -> String {
        self.oldest.to_string()
    }

    pub fn latest_param(&self) -> String {
        self.latest.to_string()
    }
}
