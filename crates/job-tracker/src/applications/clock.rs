use chrono::{Local, NaiveDate, Utc};

/// Calendar-date source for the future-date rules.
pub trait Clock: Send + Sync {
    /// Today's date in UTC; the service-level rule compares against this.
    fn utc_today(&self) -> NaiveDate;
    /// Today's date in the server's local time zone; field validation compares against this.
    fn local_today(&self) -> NaiveDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn utc_today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    fn local_today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date for both time zones.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn utc_today(&self) -> NaiveDate {
        self.0
    }

    fn local_today(&self) -> NaiveDate {
        self.0
    }
}
