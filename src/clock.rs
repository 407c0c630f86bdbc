use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Time source for the scheduler. Injected so interval, backoff and day
/// rollover behavior can be tested without real time passing.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
    /// Today's date in local time; thread rollover follows the local calendar.
    fn today(&self) -> NaiveDate;
    fn sleep(&self, duration: Duration);
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
