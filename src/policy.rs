//! Retention policy: pure functions deciding when a paste may be reclaimed.

use crate::core::Paste;
use chrono::{DateTime, Duration, Utc};

/// Lifetime applied when a paste is created without one.
pub const DEFAULT_LIFETIME_HOURS: u32 = 48;

/// Seconds after creation during which a delete-on-read paste survives
/// being served.
///
/// The very first read usually comes from the creator's own
/// redirect-and-view immediately after submission; without the grace
/// window that view would consume the paste before anyone else could see
/// it. Only reads after the window trigger deletion.
pub const READ_GRACE_SECONDS: i64 = 10;

/// The instant at which a paste becomes eligible for sweeping.
pub fn expires_at(paste: &Paste) -> DateTime<Utc> {
    paste.created + Duration::hours(i64::from(paste.lifetime_hours))
}

/// True once `now` has passed the paste's expiration instant.
pub fn is_expired(paste: &Paste, now: DateTime<Utc>) -> bool {
    now > expires_at(paste)
}

/// True when serving the paste at `now` should be followed by deletion.
pub fn is_read_once_deletable(paste: &Paste, now: DateTime<Utc>) -> bool {
    paste.delete_on_read && now > paste.created + Duration::seconds(READ_GRACE_SECONDS)
}
