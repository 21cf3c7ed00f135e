//! Injectable source of "today".
//!
//! Domain code never reads the process clock directly; it asks a `Clock`, which
//! tests replace with a `FixedClock`.

use chrono::{Local, NaiveDate};

/// Supplies the current calendar date.
pub trait Clock: Send + Sync + core::fmt::Debug {
    fn today(&self) -> NaiveDate;
}

/// Reads the local date from the operating system.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedClock(NaiveDate);

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Convenience constructor; `None` when the calendar date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_its_date() {
        let clock = FixedClock::from_ymd(2020, 2, 24).unwrap();
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2020, 2, 24).unwrap());
    }

    #[test]
    fn fixed_clock_rejects_impossible_dates() {
        assert!(FixedClock::from_ymd(2021, 2, 29).is_none());
    }

    #[test]
    fn system_clock_is_close_to_local_now() {
        let before = Local::now().date_naive();
        let today = SystemClock.today();
        let after = Local::now().date_naive();
        assert!(before <= today && today <= after);
    }
}
