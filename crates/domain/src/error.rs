//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`AcRulesError`] via `#[from]`. Storage failures are boxed so the domain
//! never depends on a concrete database crate.

/// Top-level error returned by application services and ports.
#[derive(Debug, thiserror::Error)]
pub enum AcRulesError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A domain invariant was violated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("hour {0} is outside 0..=23")]
    HourOutOfRange(u8),

    #[error("set temperature {0}°C is outside {min}..={max}", min = crate::rule::MIN_SET_TEMP, max = crate::rule::MAX_SET_TEMP)]
    SetTempOutOfRange(f32),

    #[error("minimum temperature {min}°C is above maximum {max}°C")]
    InvertedTempRange { min: f32, max: f32 },

    #[error("rule limit of {max} reached")]
    RuleLimitReached { max: usize },

    #[error("invalid identifier {0:?}")]
    InvalidId(String),

    #[error("unknown {field} code {code}")]
    UnknownCode { field: &'static str, code: u8 },
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_top_level_error() {
        let err: AcRulesError = ValidationError::EmptyName.into();
        assert!(matches!(err, AcRulesError::Validation(ValidationError::EmptyName)));
    }

    #[test]
    fn should_display_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Rule",
            id: "7".to_string(),
        };
        assert_eq!(err.to_string(), "Rule 7 not found");
    }

    #[test]
    fn should_display_set_temp_bounds() {
        let err = ValidationError::SetTempOutOfRange(40.0);
        assert_eq!(err.to_string(), "set temperature 40°C is outside 16..=30");
    }
}
