use chrono::{DateTime, Utc};

/// Represents an entity responsible for providing dates across application. Entries get their
/// timestamps from here, so tests can control time.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Sync + Send + 'static {
    fn time(&self) -> DateTime<Utc>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
