use chrono::{DateTime, Utc};

/// All persisted timestamps are epoch milliseconds.
pub type EpochMillis = i64;

pub fn to_epoch_millis(at: DateTime<Utc>) -> EpochMillis {
    at.timestamp_millis()
}
