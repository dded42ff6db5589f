use chrono::{NaiveDateTime, Timelike, Utc};
use uuid::Uuid;

use super::error::ModelError;

/// Serialized timestamp layout, microsecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time truncated to what the serialized form can carry, so a
/// timestamp survives a write/read cycle unchanged.
pub fn now() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, ModelError> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).map_err(|source| ModelError::Timestamp {
        value: raw.to_string(),
        source,
    })
}
