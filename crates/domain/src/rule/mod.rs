//! Rule: a named time/temperature condition paired with an AC action.
//!
//! A rule is *matched* when the current hour lies in its [`TimeWindow`] (if
//! any) and the current temperature lies in its [`TempRange`]. Among enabled
//! matching rules the [evaluation engine](crate::evaluation) picks one.
//!
//! Rules are created as a [`NewRule`] (no id yet); the rule store assigns a
//! [`RuleId`] and returns the full [`Rule`].

mod action;
mod condition;

pub use action::{AcAction, AcMode, FanSpeed, MAX_SET_TEMP, MIN_SET_TEMP, Swing};
pub use condition::{TempRange, TimeWindow};

use serde::{Deserialize, Serialize};

use crate::error::{AcRulesError, ValidationError};
use crate::id::RuleId;

/// A persisted automation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    pub name: String,
    pub enabled: bool,
    pub schedule: Option<TimeWindow>,
    pub temperature: TempRange,
    pub action: AcAction,
}

/// A rule that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRule {
    pub name: String,
    pub enabled: bool,
    pub schedule: Option<TimeWindow>,
    pub temperature: TempRange,
    pub action: AcAction,
}

impl Rule {
    /// Create a builder for constructing a [`NewRule`].
    #[must_use]
    pub fn builder() -> RuleBuilder {
        RuleBuilder::default()
    }

    /// Whether the rule's conditions hold for `hour` and `temperature`.
    ///
    /// Ignores `enabled`; the engine filters on that separately.
    #[must_use]
    pub fn matches(&self, hour: u8, temperature: f32) -> bool {
        let time_ok = self.schedule.is_none_or(|window| window.contains(hour));
        time_ok && self.temperature.contains(temperature)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AcRulesError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - the temperature range is inverted ([`ValidationError::InvertedTempRange`])
    /// - the set temperature is out of range ([`ValidationError::SetTempOutOfRange`])
    pub fn validate(&self) -> Result<(), AcRulesError> {
        validate_parts(&self.name, self.temperature, &self.action)
    }

    /// Split off the id, e.g. to feed the fields back through validation.
    #[must_use]
    pub fn into_new(self) -> (RuleId, NewRule) {
        (
            self.id,
            NewRule {
                name: self.name,
                enabled: self.enabled,
                schedule: self.schedule,
                temperature: self.temperature,
                action: self.action,
            },
        )
    }
}

impl NewRule {
    /// Check domain invariants. See [`Rule::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`AcRulesError::Validation`] on the first violated invariant.
    pub fn validate(&self) -> Result<(), AcRulesError> {
        validate_parts(&self.name, self.temperature, &self.action)
    }

    /// Attach the identifier assigned by the store.
    #[must_use]
    pub fn with_id(self, id: RuleId) -> Rule {
        Rule {
            id,
            name: self.name,
            enabled: self.enabled,
            schedule: self.schedule,
            temperature: self.temperature,
            action: self.action,
        }
    }
}

fn validate_parts(name: &str, temperature: TempRange, action: &AcAction) -> Result<(), AcRulesError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName.into());
    }
    temperature.validate()?;
    action.validate()?;
    Ok(())
}

/// Step-by-step builder for [`NewRule`].
#[derive(Debug, Default)]
pub struct RuleBuilder {
    name: Option<String>,
    enabled: Option<bool>,
    hours: Option<(u8, u8)>,
    min_temp: Option<f32>,
    max_temp: Option<f32>,
    action: AcAction,
}

impl RuleBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Restrict the rule to `start..end` (hours, end exclusive).
    #[must_use]
    pub fn hours(mut self, start: u8, end: u8) -> Self {
        self.hours = Some((start, end));
        self
    }

    #[must_use]
    pub fn min_temp(mut self, min: f32) -> Self {
        self.min_temp = Some(min);
        self
    }

    #[must_use]
    pub fn max_temp(mut self, max: f32) -> Self {
        self.max_temp = Some(max);
        self
    }

    #[must_use]
    pub fn action(mut self, action: AcAction) -> Self {
        self.action = action;
        self
    }

    /// Turn the AC on at `set_temp`, keeping the other settings.
    #[must_use]
    pub fn turn_on(mut self, set_temp: f32) -> Self {
        self.action.power = true;
        self.action.set_temp = set_temp;
        self
    }

    #[must_use]
    pub fn turn_off(mut self) -> Self {
        self.action.power = false;
        self
    }

    #[must_use]
    pub fn fan_speed(mut self, fan_speed: FanSpeed) -> Self {
        self.action.fan_speed = fan_speed;
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: AcMode) -> Self {
        self.action.mode = mode;
        self
    }

    #[must_use]
    pub fn swing(mut self, vertical: Swing, horizontal: Swing) -> Self {
        self.action.v_swing = vertical;
        self.action.h_swing = horizontal;
        self
    }

    /// Consume the builder, validate, and return a [`NewRule`].
    ///
    /// # Errors
    ///
    /// Returns [`AcRulesError::Validation`] if the name is missing, an hour is
    /// out of range, or another invariant fails.
    pub fn build(self) -> Result<NewRule, AcRulesError> {
        let schedule = self
            .hours
            .map(|(start, end)| TimeWindow::new(start, end))
            .transpose()?;
        let rule = NewRule {
            name: self.name.unwrap_or_default(),
            enabled: self.enabled.unwrap_or(true),
            schedule,
            temperature: TempRange {
                min: self.min_temp,
                max: self.max_temp,
            },
            action: self.action,
        };
        rule.validate()?;
        Ok(rule)
    }
}

/// A partial update: every `Some` field replaces the stored value.
///
/// The hours and temperature bounds use a nested `Option` so a patch can
/// clear a constraint (`Some(None)`) as well as leave it alone (`None`).
/// Clearing either hour removes the whole time window. Setting one hour keeps
/// the other end of the stored window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RulePatch {
    pub name: Option<String>,
    pub enabled: Option<bool>,
    pub start_hour: Option<Option<u8>>,
    pub end_hour: Option<Option<u8>>,
    pub min_temp: Option<Option<f32>>,
    pub max_temp: Option<Option<f32>>,
    pub power: Option<bool>,
    pub set_temp: Option<f32>,
    pub fan_speed: Option<FanSpeed>,
    pub mode: Option<AcMode>,
    pub v_swing: Option<Swing>,
    pub h_swing: Option<Swing>,
}

impl RulePatch {
    /// Apply the patch to `rule` and re-check invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AcRulesError::Validation`] if the patched rule is invalid or
    /// a patched hour is out of range.
    pub fn apply(self, rule: &mut Rule) -> Result<(), AcRulesError> {
        if let Some(name) = self.name {
            rule.name = name;
        }
        if let Some(enabled) = self.enabled {
            rule.enabled = enabled;
        }
        if self.start_hour.is_some() || self.end_hour.is_some() {
            rule.schedule = patch_schedule(rule.schedule, self.start_hour, self.end_hour)?;
        }
        if let Some(min) = self.min_temp {
            rule.temperature.min = min;
        }
        if let Some(max) = self.max_temp {
            rule.temperature.max = max;
        }
        if let Some(power) = self.power {
            rule.action.power = power;
        }
        if let Some(set_temp) = self.set_temp {
            rule.action.set_temp = set_temp;
        }
        if let Some(fan_speed) = self.fan_speed {
            rule.action.fan_speed = fan_speed;
        }
        if let Some(mode) = self.mode {
            rule.action.mode = mode;
        }
        if let Some(v_swing) = self.v_swing {
            rule.action.v_swing = v_swing;
        }
        if let Some(h_swing) = self.h_swing {
            rule.action.h_swing = h_swing;
        }
        rule.validate()
    }
}

fn patch_schedule(
    current: Option<TimeWindow>,
    start: Option<Option<u8>>,
    end: Option<Option<u8>>,
) -> Result<Option<TimeWindow>, ValidationError> {
    if matches!(start, Some(None)) || matches!(end, Some(None)) {
        return Ok(None);
    }
    let start = start.flatten().or(current.map(TimeWindow::start));
    let end = end.flatten().or(current.map(TimeWindow::end));
    match (start, end) {
        (Some(start), Some(end)) => TimeWindow::new(start, end).map(Some),
        // Half a window on an unconstrained rule stays unconstrained.
        _ => Ok(None),
    }
}
