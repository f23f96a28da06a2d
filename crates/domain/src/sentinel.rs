//! Legacy sentinel encoding of rule constraints.
//!
//! The browser UI exchanges rules with magic numbers instead of absent
//! values: `-1` for "no hour" and `-999` for "no temperature bound". These
//! helpers convert between that encoding and the optional domain fields.
//!
//! Decoding is permissive: a half-set time window, or an hour outside
//! `0..=23`, decodes to "no time constraint" rather than an error.

use crate::rule::TimeWindow;

/// Wire value for an unset hour.
pub const HOUR_UNSET: i32 = -1;
/// Wire value for an unset temperature bound.
pub const TEMP_UNSET: f32 = -999.0;

/// Decode a `(startHour, endHour)` pair.
#[must_use]
pub fn decode_window(start: i32, end: i32) -> Option<TimeWindow> {
    let start = u8::try_from(start).ok()?;
    let end = u8::try_from(end).ok()?;
    TimeWindow::new(start, end).ok()
}

/// Decode a single hour from a partial update.
///
/// Any negative value means "unset". Values above 23 are kept so the caller's
/// validation rejects them.
#[must_use]
pub fn decode_hour(value: i32) -> Option<u8> {
    if value < 0 {
        None
    } else {
        Some(u8::try_from(value).unwrap_or(u8::MAX))
    }
}

/// Encode an optional window back to `(startHour, endHour)`.
#[must_use]
pub fn encode_window(window: Option<TimeWindow>) -> (i32, i32) {
    window.map_or((HOUR_UNSET, HOUR_UNSET), |w| {
        (i32::from(w.start()), i32::from(w.end()))
    })
}

/// Decode a temperature bound. Anything at or below `-999` is unset.
#[must_use]
pub fn decode_temp(value: f32) -> Option<f32> {
    if value.is_nan() || value <= TEMP_UNSET {
        None
    } else {
        Some(value)
    }
}

/// Encode an optional temperature bound.
#[must_use]
pub fn encode_temp(value: Option<f32>) -> f32 {
    value.unwrap_or(TEMP_UNSET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_decode_both_unset_as_no_window() {
        assert_eq!(decode_window(-1, -1), None);
    }

    #[test]
    fn should_decode_half_set_window_as_unconstrained() {
        assert_eq!(decode_window(8, -1), None);
        assert_eq!(decode_window(-1, 18), None);
    }

    #[test]
    fn should_decode_out_of_range_hour_as_unconstrained() {
        assert_eq!(decode_window(8, 24), None);
    }

    #[test]
    fn should_decode_valid_window() {
        let window = decode_window(19, 8).unwrap();
        assert_eq!((window.start(), window.end()), (19, 8));
    }

    #[test]
    fn should_decode_single_hour() {
        assert_eq!(decode_hour(-1), None);
        assert_eq!(decode_hour(6), Some(6));
        assert_eq!(decode_hour(24), Some(24));
        assert_eq!(decode_hour(1000), Some(u8::MAX));
    }

    #[test]
    fn should_encode_missing_window_as_sentinels() {
        assert_eq!(encode_window(None), (-1, -1));
        assert_eq!(encode_window(TimeWindow::new(8, 19).ok()), (8, 19));
    }

    #[test]
    fn should_decode_temperature_sentinel() {
        assert_eq!(decode_temp(-999.0), None);
        assert_eq!(decode_temp(f32::NAN), None);
        assert_eq!(decode_temp(25.9), Some(25.9));
        assert_eq!(decode_temp(-5.0), Some(-5.0));
    }

    #[test]
    fn should_encode_missing_temperature_as_sentinel() {
        assert!((encode_temp(None) - TEMP_UNSET).abs() < f32::EPSILON);
        assert!((encode_temp(Some(26.0)) - 26.0).abs() < f32::EPSILON);
    }
}
