//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for controller cycle times.
pub type Timestamp = DateTime<Utc>;

/// Hours in a day; valid hours are `0..HOURS_PER_DAY`.
pub const HOURS_PER_DAY: u8 = 24;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }
}
