use chrono::{DateTime, Utc};

/// The current point in time. All membership and
/// deposit timestamps are taken from here.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
