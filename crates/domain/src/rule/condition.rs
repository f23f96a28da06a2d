//! Conditions: the time window and temperature range a rule is guarded by.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::HOURS_PER_DAY;

/// An hour-granular window within the day.
///
/// `start` is inclusive, `end` is exclusive. When `start > end` the window
/// spans midnight (e.g. `19..8`). When `start == end` it covers the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    start: u8,
    end: u8,
}

impl TimeWindow {
    /// Create a window from two hours in `0..=23`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::HourOutOfRange`] when either hour is 24 or more.
    pub fn new(start: u8, end: u8) -> Result<Self, ValidationError> {
        for hour in [start, end] {
            if hour >= HOURS_PER_DAY {
                return Err(ValidationError::HourOutOfRange(hour));
            }
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(self) -> u8 {
        self.start
    }

    #[must_use]
    pub fn end(self) -> u8 {
        self.end
    }

    /// Whether the window crosses midnight.
    #[must_use]
    pub fn is_overnight(self) -> bool {
        self.start > self.end
    }

    /// Whether `hour` falls inside the window.
    #[must_use]
    pub fn contains(self, hour: u8) -> bool {
        if self.start < self.end {
            self.start <= hour && hour < self.end
        } else {
            hour >= self.start || hour < self.end
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:00-{:02}:00", self.start, self.end)
    }
}

/// Inclusive temperature bounds in °C. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TempRange {
    pub min: Option<f32>,
    pub max: Option<f32>,
}

impl TempRange {
    /// A range with no bounds, matching every reading.
    pub const UNBOUNDED: Self = Self {
        min: None,
        max: None,
    };

    #[must_use]
    pub fn is_unbounded(self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Whether `temperature` lies within the bounds.
    ///
    /// A NaN reading never satisfies a present bound.
    #[must_use]
    pub fn contains(self, temperature: f32) -> bool {
        let above_min = self.min.is_none_or(|min| temperature >= min);
        let below_max = self.max.is_none_or(|max| temperature <= max);
        above_min && below_max
    }

    /// Check that the bounds are not inverted.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvertedTempRange`] when `min > max`.
    pub fn validate(self) -> Result<(), ValidationError> {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(ValidationError::InvertedTempRange { min, max });
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for TempRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.min, self.max) {
            (None, None) => write!(f, "any"),
            (Some(min), None) => write!(f, ">={min}°C"),
            (None, Some(max)) => write!(f, "<={max}°C"),
            (Some(min), Some(max)) => write!(f, "{min}°C..={max}°C"),
        }
    }
}
