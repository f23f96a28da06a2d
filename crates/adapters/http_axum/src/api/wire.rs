//! Wire format shared with the browser UI.
//!
//! Field names are camelCase. Absent constraints travel as sentinels
//! (`-1` for hours, `-999` for temperatures) and enums as numeric codes.
//! Conversion into domain types happens here and nowhere else.

use serde::{Deserialize, Serialize};

use acrules_domain::ac_state::AcState;
use acrules_domain::error::ValidationError;
use acrules_domain::rule::{AcAction, NewRule, Rule, RulePatch, TempRange};
use acrules_domain::sentinel::{
    HOUR_UNSET, TEMP_UNSET, decode_hour, decode_temp, decode_window, encode_temp,
    encode_window,
};

/// A rule as the UI sends and receives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRule {
    /// Ignored on input; the path or the store decides the id.
    #[serde(default)]
    pub id: u32,
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default = "hour_unset")]
    pub start_hour: i32,
    #[serde(default = "hour_unset")]
    pub end_hour: i32,
    #[serde(default = "temp_unset")]
    pub min_temp: f32,
    #[serde(default = "temp_unset")]
    pub max_temp: f32,
    pub ac_on: bool,
    pub set_temp: f32,
    #[serde(default)]
    pub fan_speed: u8,
    #[serde(default)]
    pub mode: u8,
    #[serde(default)]
    pub v_swing: u8,
    #[serde(default)]
    pub h_swing: u8,
}

fn enabled_by_default() -> bool {
    true
}

fn hour_unset() -> i32 {
    HOUR_UNSET
}

fn temp_unset() -> f32 {
    TEMP_UNSET
}

fn decode_code<T: TryFrom<u8, Error = u8>>(
    field: &'static str,
    code: u8,
) -> Result<T, ValidationError> {
    T::try_from(code).map_err(|code| ValidationError::UnknownCode { field, code })
}

impl From<&Rule> for WireRule {
    fn from(rule: &Rule) -> Self {
        let (start_hour, end_hour) = encode_window(rule.schedule);
        Self {
            id: rule.id.get(),
            name: rule.name.clone(),
            enabled: rule.enabled,
            start_hour,
            end_hour,
            min_temp: encode_temp(rule.temperature.min),
            max_temp: encode_temp(rule.temperature.max),
            ac_on: rule.action.power,
            set_temp: rule.action.set_temp,
            fan_speed: rule.action.fan_speed.code(),
            mode: rule.action.mode.code(),
            v_swing: rule.action.v_swing.code(),
            h_swing: rule.action.h_swing.code(),
        }
    }
}

impl TryFrom<WireRule> for NewRule {
    type Error = ValidationError;

    fn try_from(wire: WireRule) -> Result<Self, Self::Error> {
        Ok(Self {
            name: wire.name,
            enabled: wire.enabled,
            schedule: decode_window(wire.start_hour, wire.end_hour),
            temperature: TempRange {
                min: decode_temp(wire.min_temp),
                max: decode_temp(wire.max_temp),
            },
            action: AcAction {
                power: wire.ac_on,
                set_temp: wire.set_temp,
                fan_speed: decode_code("fanSpeed", wire.fan_speed)?,
                mode: decode_code("mode", wire.mode)?,
                v_swing: decode_code("vSwing", wire.v_swing)?,
                h_swing: decode_code("hSwing", wire.h_swing)?,
            },
        })
    }
}

/// Partial update; every field is optional.
///
/// A `startHour` or `endHour` of `-1` clears the time window. Sending only one
/// valid hour moves that end of the stored window.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRulePatch {
    pub name: Option<String>,
    pub enabled: Option<bool>,
    pub start_hour: Option<i32>,
    pub end_hour: Option<i32>,
    pub min_temp: Option<f32>,
    pub max_temp: Option<f32>,
    pub ac_on: Option<bool>,
    pub set_temp: Option<f32>,
    pub fan_speed: Option<u8>,
    pub mode: Option<u8>,
    pub v_swing: Option<u8>,
    pub h_swing: Option<u8>,
}

impl TryFrom<WireRulePatch> for RulePatch {
    type Error = ValidationError;

    fn try_from(wire: WireRulePatch) -> Result<Self, Self::Error> {
        Ok(Self {
            name: wire.name,
            enabled: wire.enabled,
            start_hour: wire.start_hour.map(decode_hour),
            end_hour: wire.end_hour.map(decode_hour),
            min_temp: wire.min_temp.map(decode_temp),
            max_temp: wire.max_temp.map(decode_temp),
            power: wire.ac_on,
            set_temp: wire.set_temp,
            fan_speed: wire
                .fan_speed
                .map(|code| decode_code("fanSpeed", code))
                .transpose()?,
            mode: wire.mode.map(|code| decode_code("mode", code)).transpose()?,
            v_swing: wire
                .v_swing
                .map(|code| decode_code("vSwing", code))
                .transpose()?,
            h_swing: wire
                .h_swing
                .map(|code| decode_code("hSwing", code))
                .transpose()?,
        })
    }
}

/// Form-encoded partial update as the browser editor submits it: the rule id
/// travels in the body next to the changed fields.
///
/// Fields are spelled out rather than flattened from [`WireRulePatch`]:
/// `serde_urlencoded` only parses numbers and booleans for direct fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRuleForm {
    pub id: String,
    pub name: Option<String>,
    pub enabled: Option<bool>,
    pub start_hour: Option<i32>,
    pub end_hour: Option<i32>,
    pub min_temp: Option<f32>,
    pub max_temp: Option<f32>,
    pub ac_on: Option<bool>,
    pub set_temp: Option<f32>,
    pub fan_speed: Option<u8>,
    pub mode: Option<u8>,
    pub v_swing: Option<u8>,
    pub h_swing: Option<u8>,
}

impl WireRuleForm {
    /// Split into the raw id and the patch it carries.
    #[must_use]
    pub fn into_parts(self) -> (String, WireRulePatch) {
        let patch = WireRulePatch {
            name: self.name,
            enabled: self.enabled,
            start_hour: self.start_hour,
            end_hour: self.end_hour,
            min_temp: self.min_temp,
            max_temp: self.max_temp,
            ac_on: self.ac_on,
            set_temp: self.set_temp,
            fan_speed: self.fan_speed,
            mode: self.mode,
            v_swing: self.v_swing,
            h_swing: self.h_swing,
        };
        (self.id, patch)
    }
}

/// AC settings as last transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAcState {
    pub ac_on: bool,
    pub set_temp: u8,
    pub fan_speed: u8,
    pub mode: u8,
    pub v_swing: u8,
    pub h_swing: u8,
}

impl From<AcState> for WireAcState {
    fn from(state: AcState) -> Self {
        Self {
            ac_on: state.power,
            set_temp: state.temperature,
            fan_speed: state.fan_speed.code(),
            mode: state.mode.code(),
            v_swing: state.v_swing.code(),
            h_swing: state.h_swing.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acrules_domain::defaults::default_rules;
    use acrules_domain::id::RuleId;
    use acrules_domain::rule::{FanSpeed, Swing};

    fn cool_night() -> Rule {
        default_rules()
            .into_iter()
            .nth(1)
            .unwrap()
            .with_id(RuleId::new(2).unwrap())
    }

    #[test]
    fn should_encode_rule_in_legacy_shape() {
        let json = serde_json::to_value(WireRule::from(&cool_night())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 2,
                "name": "Cool Night",
                "enabled": true,
                "startHour": 19,
                "endHour": 8,
                "minTemp": 26.0,
                "maxTemp": -999.0,
                "acOn": true,
                "setTemp": 28.0,
                "fanSpeed": 1,
                "mode": 0,
                "vSwing": 2,
                "hSwing": 2,
            })
        );
    }

    #[test]
    fn should_decode_sentinels_to_absent_constraints() {
        let wire: WireRule = serde_json::from_value(serde_json::json!({
            "name": "Turn Off When Cool",
            "startHour": -1,
            "endHour": -1,
            "minTemp": -999,
            "maxTemp": 25.9,
            "acOn": false,
            "setTemp": 24,
            "fanSpeed": 1,
            "mode": 0,
        }))
        .unwrap();

        let rule = NewRule::try_from(wire).unwrap();
        assert!(rule.enabled);
        assert!(rule.schedule.is_none());
        assert_eq!(rule.temperature.min, None);
        assert_eq!(rule.temperature.max, Some(25.9));
        assert_eq!(rule.action.fan_speed, FanSpeed::Low);
        assert_eq!(rule.action.v_swing, Swing::Auto);
    }

    #[test]
    fn should_treat_missing_constraint_fields_as_unset() {
        let wire: WireRule =
            serde_json::from_value(serde_json::json!({"name": "x", "acOn": true, "setTemp": 25}))
                .unwrap();
        let rule = NewRule::try_from(wire).unwrap();
        assert!(rule.schedule.is_none());
        assert!(rule.temperature.is_unbounded());
    }

    #[test]
    fn should_reject_unknown_enum_code() {
        let mut wire = WireRule::from(&cool_night());
        wire.mode = 7;
        let err = NewRule::try_from(wire).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownCode {
                field: "mode",
                code: 7
            }
        );
    }

    #[test]
    fn should_build_patch_with_cleared_bounds() {
        let wire: WireRulePatch = serde_json::from_value(serde_json::json!({
            "enabled": false,
            "minTemp": -999,
            "endHour": -1,
        }))
        .unwrap();

        let patch = RulePatch::try_from(wire).unwrap();
        assert_eq!(patch.enabled, Some(false));
        assert_eq!(patch.min_temp, Some(None));
        assert_eq!(patch.max_temp, None);
        assert_eq!(patch.start_hour, None);
        assert_eq!(patch.end_hour, Some(None));
    }

    #[test]
    fn should_keep_stored_end_hour_when_patching_start_hour() {
        let wire: WireRulePatch =
            serde_json::from_value(serde_json::json!({"startHour": 6})).unwrap();
        let patch = RulePatch::try_from(wire).unwrap();
        assert_eq!(patch.start_hour, Some(Some(6)));
        assert_eq!(patch.end_hour, None);

        let mut rule = cool_night();
        patch.apply(&mut rule).unwrap();
        let wire = WireRule::from(&rule);
        assert_eq!((wire.start_hour, wire.end_hour), (6, 8));
    }

    #[test]
    fn should_encode_ac_state_codes() {
        let wire = WireAcState::from(AcState::default());
        assert!(!wire.ac_on);
        assert_eq!(wire.set_temp, 24);
        assert_eq!(wire.fan_speed, 0);
    }
}
