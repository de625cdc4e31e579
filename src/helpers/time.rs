use chrono::{DateTime, Duration, Utc};
use tokio::time::Instant;

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// `from + seconds`, saturating instead of overflowing on absurd hints.
pub fn add_seconds(from: DateTime<Utc>, seconds: u64) -> DateTime<Utc> {
    let seconds = i64::try_from(seconds).unwrap_or(i64::MAX);
    Duration::try_seconds(seconds)
        .and_then(|delta| from.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

pub fn get_instant() -> Instant {
    Instant::now()
}
