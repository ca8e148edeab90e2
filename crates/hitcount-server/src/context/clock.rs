use chrono::{DateTime, SecondsFormat, Utc};

/// Process start instant, captured once at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartTime(DateTime<Utc>);

impl StartTime {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn at(t: DateTime<Utc>) -> Self {
        Self(t)
    }

    pub fn unix(&self) -> i64 {
        self.0.timestamp()
    }

    /// `2026-10-17T09:30:00Z`
    pub fn rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// `Sat Oct 17 09:30:00 UTC 2026`
    pub fn unix_date(&self) -> String {
        self.0.format("%a %b %e %H:%M:%S UTC %Y").to_string()
    }
}
