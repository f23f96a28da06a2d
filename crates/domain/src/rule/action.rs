//! Action: the AC settings a rule commands when it is active.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Lowest target temperature the unit accepts, in °C.
pub const MIN_SET_TEMP: f32 = 16.0;
/// Highest target temperature the unit accepts, in °C.
pub const MAX_SET_TEMP: f32 = 30.0;

macro_rules! wire_enum {
    ($(#[doc = $doc:expr])* $name:ident { $($variant:ident = $value:literal),+ $(,)? }) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        #[repr(u8)]
        pub enum $name {
            #[default]
            $($variant = $value),+
        }

        impl $name {
            /// Numeric code used by the wire format and the database.
            #[must_use]
            pub fn code(self) -> u8 {
                self as u8
            }
        }

        impl TryFrom<u8> for $name {
            type Error = u8;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                match code {
                    $($value => Ok(Self::$variant),)+
                    other => Err(other),
                }
            }
        }
    };
}

wire_enum!(
    /// Fan speed.
    FanSpeed { Auto = 0, Low = 1, Med = 2, High = 3 }
);

wire_enum!(
    /// Operating mode.
    AcMode { Cool = 0, Heat = 1, Dry = 2, Fan = 3, Auto = 4 }
);

wire_enum!(
    /// Vane position, shared by the vertical and horizontal swing.
    Swing { Auto = 0, First = 1, Mid = 2, Last = 3 }
);

/// What the AC should do while a rule is active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcAction {
    pub power: bool,
    /// Target temperature in °C; ignored when `power` is off.
    pub set_temp: f32,
    pub fan_speed: FanSpeed,
    pub mode: AcMode,
    #[serde(default)]
    pub v_swing: Swing,
    #[serde(default)]
    pub h_swing: Swing,
}

impl AcAction {
    /// Power off, all other settings at their defaults.
    #[must_use]
    pub fn off() -> Self {
        Self {
            power: false,
            ..Self::default()
        }
    }

    /// Check that the target temperature is within the unit's range.
    ///
    /// Only enforced when `power` is on.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::SetTempOutOfRange`] otherwise.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.power && !(MIN_SET_TEMP..=MAX_SET_TEMP).contains(&self.set_temp) {
            return Err(ValidationError::SetTempOutOfRange(self.set_temp));
        }
        Ok(())
    }
}

impl Default for AcAction {
    fn default() -> Self {
        Self {
            power: true,
            set_temp: 24.0,
            fan_speed: FanSpeed::Auto,
            mode: AcMode::Cool,
            v_swing: Swing::Auto,
            h_swing: Swing::Auto,
        }
    }
}

impl std::fmt::Display for AcAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.power {
            write!(
                f,
                "on({}°C, fan {:?}, {:?})",
                self.set_temp, self.fan_speed, self.mode
            )
        } else {
            write!(f, "off")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_codes_to_variants() {
        assert_eq!(FanSpeed::try_from(3), Ok(FanSpeed::High));
        assert_eq!(AcMode::try_from(2), Ok(AcMode::Dry));
        assert_eq!(Swing::try_from(2), Ok(Swing::Mid));
        assert_eq!(AcMode::Auto.code(), 4);
    }

    #[test]
    fn should_reject_unknown_codes() {
        assert_eq!(FanSpeed::try_from(4), Err(4));
        assert_eq!(AcMode::try_from(9), Err(9));
    }

    #[test]
    fn should_reject_set_temp_outside_unit_range_when_on() {
        let action = AcAction {
            set_temp: 35.0,
            ..AcAction::default()
        };
        assert_eq!(
            action.validate(),
            Err(ValidationError::SetTempOutOfRange(35.0))
        );
    }

    #[test]
    fn should_ignore_set_temp_when_off() {
        let action = AcAction {
            power: false,
            set_temp: 0.0,
            ..AcAction::default()
        };
        assert!(action.validate().is_ok());
    }

    #[test]
    fn should_default_swing_when_missing_from_json() {
        let json = serde_json::json!({
            "power": true,
            "set_temp": 26.0,
            "fan_speed": "low",
            "mode": "cool"
        });
        let action: AcAction = serde_json::from_value(json).unwrap();
        assert_eq!(action.v_swing, Swing::Auto);
        assert_eq!(action.h_swing, Swing::Auto);
        assert_eq!(action.fan_speed, FanSpeed::Low);
    }

    #[test]
    fn should_display_off_action() {
        assert_eq!(AcAction::off().to_string(), "off");
    }
}
