//! AC state: the settings last transmitted to the unit.
//!
//! The controller keeps the previously applied [`AcState`] and only
//! re-transmits when a newly selected rule commands a different one.

use serde::{Deserialize, Serialize};

use crate::rule::{AcAction, AcMode, FanSpeed, MAX_SET_TEMP, MIN_SET_TEMP, Swing};

/// Settings of the AC unit as the remote would send them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AcState {
    pub power: bool,
    /// Target temperature in whole °C.
    pub temperature: u8,
    pub fan_speed: FanSpeed,
    pub mode: AcMode,
    pub v_swing: Swing,
    pub h_swing: Swing,
}

impl Default for AcState {
    /// Powered off, 24 °C, everything else on auto / cool.
    fn default() -> Self {
        Self {
            power: false,
            temperature: 24,
            fan_speed: FanSpeed::Auto,
            mode: AcMode::Cool,
            v_swing: Swing::Auto,
            h_swing: Swing::Auto,
        }
    }
}

impl AcState {
    /// Whether transmitting `self` would change anything relative to `previous`.
    #[must_use]
    pub fn differs_from(&self, previous: &Self) -> bool {
        self != previous
    }
}

impl From<&AcAction> for AcState {
    /// Any "off" action maps to [`AcState::default`], so two off-rules with
    /// different leftover settings do not count as a change.
    fn from(action: &AcAction) -> Self {
        if !action.power {
            return Self::default();
        }
        Self {
            power: true,
            temperature: whole_degrees(action.set_temp),
            fan_speed: action.fan_speed,
            mode: action.mode,
            v_swing: action.v_swing,
            h_swing: action.h_swing,
        }
    }
}

/// Drop the fraction (26.6 becomes 26), as the remote protocol expects.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_degrees(celsius: f32) -> u8 {
    // Clamped into 16..=30 first, so the cast cannot wrap.
    celsius.trunc().clamp(MIN_SET_TEMP, MAX_SET_TEMP) as u8
}

impl std::fmt::Display for AcState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.power {
            write!(
                f,
                "ON {}°C fan={:?} mode={:?} vswing={:?} hswing={:?}",
                self.temperature, self.fan_speed, self.mode, self.v_swing, self.h_swing
            )
        } else {
            write!(f, "OFF")
        }
    }
}
