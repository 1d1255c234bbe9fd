/// Local calendar source for date stamps and capture timestamps
use chrono::{Local, NaiveDate};
use std::sync::Mutex;

/// Format of the date stamp stored alongside the report
pub const DATE_STAMP_FORMAT: &str = "%Y-%m-%d";

/// Format of the date prefix used in exported photo filenames
pub const FILE_DATE_FORMAT: &str = "%Y%m%d";

pub trait Clock: Send + Sync {
    /// Current local calendar date
    fn today(&self) -> NaiveDate;

    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;

    fn date_stamp(&self) -> String {
        self.today().format(DATE_STAMP_FORMAT).to_string()
    }

    fn file_date(&self) -> String {
        self.today().format(FILE_DATE_FORMAT).to_string()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        Local::now().timestamp_millis()
    }
}

/// Clock pinned to a settable date, for tests and replays
#[derive(Debug)]
pub struct FixedClock {
    date: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Mutex::new(date),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        if let Ok(mut current) = self.date.lock() {
            *current = date;
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
            .lock()
            .map(|d| *d)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }

    fn now_millis(&self) -> i64 {
        self.today()
            .and_hms_opt(12, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamps() {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
        assert_eq!(clock.date_stamp(), "2024-03-07");
        assert_eq!(clock.file_date(), "20240307");

        clock.set(NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());
        assert_eq!(clock.date_stamp(), "2024-03-08");
    }
}
