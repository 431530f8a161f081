//! Where "now" and "today" come from

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};

/// A source of the current time
pub trait Clock {
    /// The current timestamp, used as a creation date
    fn now(&self) -> DateTime<Utc>;
    /// The current calendar date of the user, used to validate and label dates
    fn today(&self) -> NaiveDate;
}

/// The system clock. "Today" is computed in the local timezone
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stuck on a given day, useful in tests
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedClock {
    today: NaiveDate,
    now: DateTime<Utc>,
}

impl FixedClock {
    /// A clock stuck at the start of the given day
    pub fn new(today: NaiveDate) -> Self {
        let now = Utc.from_utc_datetime(&today.and_time(NaiveTime::default()));
        Self { today, now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
