use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Source of "now" and of the caller's current calendar date.
///
/// Domain code never reads the system clock directly; the date that anchors a
/// streak is always injected through this trait.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate;
}

/// Clock pinned to a single calendar day.
///
/// `now()` reports noon UTC of that day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.today.and_time(NaiveTime::MIN).and_utc() + chrono::Duration::hours(12)
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
