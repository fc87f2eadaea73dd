use chrono::{DateTime, Utc};

/// Time source injected into the volition core.
///
/// The core reads the clock exactly once per intent, so every comparison
/// within a call sees the same instant and tests can drive time manually.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation wired in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
