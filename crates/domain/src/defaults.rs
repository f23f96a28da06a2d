//! Built-in rules: the starter set seeded into an empty store, and the
//! template used when a client asks for a blank rule.

use crate::rule::{AcAction, AcMode, FanSpeed, NewRule, Swing, TempRange, TimeWindow};

/// Starter rules: cool during hot days, quieter cooling on hot nights, and
/// switch off once the room is cool.
#[must_use]
pub fn default_rules() -> Vec<NewRule> {
    vec![
        NewRule {
            name: "Cool Day".to_string(),
            enabled: true,
            schedule: TimeWindow::new(8, 19).ok(),
            temperature: TempRange {
                min: Some(26.0),
                max: None,
            },
            action: AcAction {
                power: true,
                set_temp: 27.0,
                fan_speed: FanSpeed::High,
                mode: AcMode::Cool,
                v_swing: Swing::Auto,
                h_swing: Swing::Auto,
            },
        },
        NewRule {
            name: "Cool Night".to_string(),
            enabled: true,
            schedule: TimeWindow::new(19, 8).ok(),
            temperature: TempRange {
                min: Some(26.0),
                max: None,
            },
            action: AcAction {
                power: true,
                set_temp: 28.0,
                fan_speed: FanSpeed::Low,
                mode: AcMode::Cool,
                v_swing: Swing::Mid,
                h_swing: Swing::Mid,
            },
        },
        NewRule {
            name: "Turn Off When Cool".to_string(),
            enabled: true,
            schedule: None,
            temperature: TempRange {
                min: None,
                max: Some(25.9),
            },
            action: AcAction::off(),
        },
    ]
}

/// A blank rule for the editor to fill in.
///
/// Starts disabled and unconstrained so it cannot take over the AC before the
/// user has configured it.
#[must_use]
pub fn rule_template() -> NewRule {
    NewRule {
        name: "New Rule".to_string(),
        enabled: false,
        schedule: None,
        temperature: TempRange::UNBOUNDED,
        action: AcAction::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_provide_three_valid_default_rules() {
        let rules = default_rules();
        assert_eq!(rules.len(), 3);
        for rule in &rules {
            rule.validate().unwrap();
        }
    }

    #[test]
    fn should_use_overnight_window_for_night_rule() {
        let rules = default_rules();
        let night = rules[1].schedule.unwrap();
        assert!(night.is_overnight());
    }

    #[test]
    fn should_provide_disabled_template() {
        let template = rule_template();
        template.validate().unwrap();
        assert!(!template.enabled);
        assert!(template.schedule.is_none());
        assert!(template.temperature.is_unbounded());
    }
}
