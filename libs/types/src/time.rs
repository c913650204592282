//! Wall-clock timestamps as unix nanos.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current time as nanoseconds since the unix epoch.
pub fn now_nanos() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as i64)
        .unwrap_or(0)
}
