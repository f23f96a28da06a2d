//! Clock port.

use std::sync::Arc;

use acrules_domain::time::Timestamp;

/// Source of the local wall-clock hour.
pub trait Clock {
    /// Current local hour in `0..=23`.
    fn current_hour(&self) -> u8;

    /// Current instant, used to stamp controller cycles.
    fn now(&self) -> Timestamp {
        acrules_domain::time::now()
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn current_hour(&self) -> u8 {
        (**self).current_hour()
    }

    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
