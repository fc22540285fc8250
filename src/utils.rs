use chrono::{DateTime, FixedOffset, Offset, Utc};
use uuid::Uuid;

/// Asia/Tokyo has no daylight saving, so a fixed +09:00 offset is exact.
const TOKYO_OFFSET_SECS: i32 = 9 * 3600;

fn tokyo_offset() -> FixedOffset {
    FixedOffset::east_opt(TOKYO_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

pub(crate) fn format_tokyo(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&tokyo_offset())
        .format("%Y-%m-%dT%H:%M:%S%z")
        .to_string()
}

/// Current time as `YYYY-MM-DDTHH:mm:ss+0900`, the format the app sends as `requestAt`.
pub(crate) fn tokyo_timestamp() -> String {
    format_tokyo(Utc::now())
}

pub(crate) fn new_request_id() -> String {
    Uuid::new_v4().to_string().to_uppercase()
}
