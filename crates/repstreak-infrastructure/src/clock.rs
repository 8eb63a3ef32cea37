use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use repstreak_domain::clock::Clock;
use repstreak_domain::shared::DomainError;

/// Wall clock that reports "today" in a fixed UTC offset.
///
/// Users logging near midnight get the calendar day of their configured
/// offset, not the server's.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(utc_offset_minutes: i32) -> Result<Self, DomainError> {
        let offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "UTC offset out of range: {} minutes",
                    utc_offset_minutes
                ))
            })?;

        Ok(Self { offset })
    }

    /// Calendar date of `instant` in this clock's offset.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }
}
