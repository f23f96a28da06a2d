//! Wall clock in the host's local time zone.

use chrono::Timelike;

use acrules_app::ports::Clock;

/// Reads the hour from the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_hour(&self) -> u8 {
        // `hour()` is always below 24
        u8::try_from(chrono::Local::now().hour()).unwrap_or_default()
    }
}
