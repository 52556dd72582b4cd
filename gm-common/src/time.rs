//! Timestamp utilities

use chrono::{DateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Session identifier derived from a timestamp (milliseconds since epoch)
pub fn session_id_at(timestamp: DateTime<Utc>) -> String {
    timestamp.timestamp_millis().to_string()
}

/// Session identifier for the current instant
pub fn session_id_now() -> String {
    session_id_at(now())
}
