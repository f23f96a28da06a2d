//! Rule evaluation engine: decides which single rule is active.
//!
//! Evaluation is a pure function of the rule list, the current hour and the
//! current temperature:
//!
//! 1. Disabled rules are skipped.
//! 2. A rule matches when the hour is inside its [`TimeWindow`](crate::rule::TimeWindow)
//!    (or it has none) and the temperature is inside its
//!    [`TempRange`](crate::rule::TempRange).
//! 3. The **first** matching rule in sequence order wins. Rule stores return
//!    rules ordered by ascending id, so this is definition order.
//!
//! No match is a valid outcome meaning "leave the AC alone".

use serde::{Deserialize, Serialize};

use crate::id::RuleId;
use crate::rule::Rule;

/// Select the active rule among `rules` for `hour` and `temperature`.
#[must_use]
pub fn evaluate(rules: &[Rule], hour: u8, temperature: f32) -> Option<&Rule> {
    rules
        .iter()
        .filter(|rule| rule.enabled)
        .find(|rule| rule.matches(hour, temperature))
}

/// The inputs of one evaluation together with its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub hour: u8,
    pub temperature: f32,
    pub active: Option<Rule>,
}

impl Evaluation {
    /// Run [`evaluate`] and keep an owned copy of the winner.
    #[must_use]
    pub fn run(rules: &[Rule], hour: u8, temperature: f32) -> Self {
        Self {
            hour,
            temperature,
            active: evaluate(rules, hour, temperature).cloned(),
        }
    }

    #[must_use]
    pub fn active_id(&self) -> Option<RuleId> {
        self.active.as_ref().map(|rule| rule.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_rules;
    use crate::rule::NewRule;

    fn stored(rules: Vec<NewRule>) -> Vec<Rule> {
        rules
            .into_iter()
            .zip(1..)
            .map(|(rule, raw)| rule.with_id(RuleId::new(raw).unwrap()))
            .collect()
    }

    fn always(name: &str) -> NewRule {
        Rule::builder().name(name).build().unwrap()
    }

    fn active_id(rules: &[Rule], hour: u8, temperature: f32) -> Option<u32> {
        evaluate(rules, hour, temperature).map(|rule| rule.id.get())
    }

    #[test]
    fn should_return_none_for_empty_rule_set() {
        assert!(evaluate(&[], 12, 25.0).is_none());
    }

    #[test]
    fn should_return_none_when_all_rules_disabled() {
        let mut a = always("a");
        a.enabled = false;
        let mut b = always("b");
        b.enabled = false;
        let rules = stored(vec![a, b]);
        for hour in 0..24 {
            assert!(evaluate(&rules, hour, 25.0).is_none());
        }
    }

    #[test]
    fn should_match_every_input_when_rule_unconstrained() {
        let rules = stored(vec![always("any")]);
        for hour in 0..24 {
            for temperature in [-20.0, 0.0, 25.5, 50.0] {
                assert_eq!(active_id(&rules, hour, temperature), Some(1));
            }
        }
    }

    #[test]
    fn should_pick_first_matching_rule_in_sequence_order() {
        let rules = stored(vec![always("first"), always("second")]);
        assert_eq!(active_id(&rules, 9, 22.0), Some(1));
        // Repeated calls give the same answer.
        assert_eq!(active_id(&rules, 9, 22.0), Some(1));
    }

    #[test]
    fn should_skip_disabled_rule_even_when_it_matches() {
        let mut first = always("disabled");
        first.enabled = false;
        let rules = stored(vec![first, always("fallback")]);
        assert_eq!(active_id(&rules, 9, 22.0), Some(2));
    }

    #[test]
    fn should_treat_temperature_bounds_as_inclusive() {
        let rules = stored(vec![
            Rule::builder()
                .name("band")
                .min_temp(20.0)
                .max_temp(26.0)
                .build()
                .unwrap(),
        ]);
        assert_eq!(active_id(&rules, 0, 20.0), Some(1));
        assert_eq!(active_id(&rules, 0, 26.0), Some(1));
        assert_eq!(active_id(&rules, 0, 26.01), None);
    }

    #[test]
    fn should_include_start_hour_and_exclude_end_hour() {
        let rules = stored(vec![Rule::builder().name("day").hours(8, 18).build().unwrap()]);
        assert_eq!(active_id(&rules, 8, 25.0), Some(1));
        assert_eq!(active_id(&rules, 18, 25.0), None);
    }

    #[test]
    fn should_select_daytime_rule_at_ten_and_nothing_at_twenty() {
        let rules = stored(vec![
            Rule::builder()
                .name("Office hours")
                .hours(8, 18)
                .turn_on(24.0)
                .build()
                .unwrap(),
        ]);
        assert_eq!(active_id(&rules, 10, 30.0), Some(1));
        assert_eq!(active_id(&rules, 20, 30.0), None);
    }

    #[test]
    fn should_only_match_unbounded_rules_when_reading_is_nan() {
        let rules = stored(vec![
            Rule::builder().name("hot").min_temp(26.0).build().unwrap(),
            always("any"),
        ]);
        assert_eq!(active_id(&rules, 12, f32::NAN), Some(2));
    }

    #[test]
    fn should_follow_default_rules_through_a_day() {
        let rules = stored(default_rules());
        // Hot afternoon: "Cool Day".
        assert_eq!(active_id(&rules, 14, 29.0), Some(1));
        // Hot night, before and after midnight: "Cool Night".
        assert_eq!(active_id(&rules, 23, 27.0), Some(2));
        assert_eq!(active_id(&rules, 3, 27.0), Some(2));
        // Cool room at any time: "Turn Off When Cool".
        assert_eq!(active_id(&rules, 14, 24.0), Some(3));
        // Between 25.9 and 26: nothing.
        assert_eq!(active_id(&rules, 14, 25.95), None);
    }

    #[test]
    fn should_report_inputs_and_winner_in_evaluation() {
        let rules = stored(vec![always("any")]);
        let evaluation = Evaluation::run(&rules, 7, 21.5);
        assert_eq!(evaluation.hour, 7);
        assert_eq!(evaluation.active_id(), RuleId::new(1));

        let none = Evaluation::run(&[], 7, 21.5);
        assert!(none.active.is_none());
        assert!(none.active_id().is_none());
    }
}
