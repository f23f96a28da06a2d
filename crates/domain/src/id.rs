//! Typed rule identifier.
//!
//! Rule ids are small positive integers handed out by the rule store, so the
//! newtype wraps a `u32` rather than a UUID.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Unique identifier for a [`Rule`](crate::rule::Rule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(NonZeroU32);

impl RuleId {
    /// Wrap a raw id, rejecting zero.
    #[must_use]
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// Access the raw integer.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RuleId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| ValidationError::InvalidId(s.to_string()))
    }
}

impl TryFrom<i64> for RuleId {
    type Error = ValidationError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        u32::try_from(raw)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| ValidationError::InvalidId(raw.to_string()))
    }
}
