//! Structural validation of inbound write payloads

use std::ops::RangeInclusive;

use crate::model::{NewWord, WordPayload};
use crate::responses::ValidationError;

/// Field is missing or blank
pub const REQUIRED: &str = "REQUIRED";
/// Field exceeds its maximum length
pub const TOO_LONG: &str = "TOO_LONG";
/// Numeric field outside its allowed range
pub const OUT_OF_RANGE: &str = "OUT_OF_RANGE";

/// Checks a payload and converts it into validated data
///
/// All field errors are collected before returning, so a client sees every
/// problem with its payload at once.
pub trait Validator<P> {
    /// The validated form of the payload
    type Output;

    /// Validate `payload`, returning field-level errors on failure
    fn validate(&self, payload: P) -> Result<Self::Output, ValidationError>;
}

/// Validation rules for word payloads
#[derive(Debug, Clone)]
pub struct WordValidator {
    max_name_len: usize,
    score_range: RangeInclusive<i64>,
}

impl Default for WordValidator {
    fn default() -> Self {
        Self {
            max_name_len: 150,
            score_range: 0..=1000,
        }
    }
}

impl WordValidator {
    /// Validator with the default rules
    pub fn new() -> Self {
        Self::default()
    }
}

impl Validator<WordPayload> for WordValidator {
    type Output = NewWord;

    fn validate(&self, payload: WordPayload) -> Result<NewWord, ValidationError> {
        let mut errors = ValidationError::new("Validation failed");

        let name = payload
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());
        match name {
            None => errors.add_field_error("name", REQUIRED, "Name is required"),
            Some(name) if name.chars().count() > self.max_name_len => errors.add_field_error(
                "name",
                TOO_LONG,
                format!("Name must be at most {} characters", self.max_name_len),
            ),
            Some(_) => {}
        }

        let score = match payload.score {
            None => {
                errors.add_field_error("score", REQUIRED, "Score is required");
                None
            }
            Some(score) if !self.score_range.contains(&score) => {
                errors.add_field_error(
                    "score",
                    OUT_OF_RANGE,
                    format!(
                        "Score must be between {} and {}",
                        self.score_range.start(),
                        self.score_range.end()
                    ),
                );
                None
            }
            Some(score) => i32::try_from(score).ok(),
        };

        match (name, score) {
            (Some(name), Some(score)) if !errors.has_errors() => Ok(NewWord {
                name: name.to_string(),
                score,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: Option<&str>, score: Option<i64>) -> WordPayload {
        WordPayload {
            name: name.map(str::to_string),
            score,
        }
    }

    fn codes(err: &ValidationError, field: &str) -> Vec<String> {
        err.errors
            .get(field)
            .map(|errors| errors.iter().map(|e| e.code.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_valid_payload_is_trimmed() {
        let word = WordValidator::new()
            .validate(payload(Some("  hello "), Some(10)))
            .unwrap();
        assert_eq!(word.name, "hello");
        assert_eq!(word.score, 10);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let validator = WordValidator::new();
        assert!(validator.validate(payload(Some("a"), Some(0))).is_ok());
        assert!(validator.validate(payload(Some("a"), Some(1000))).is_ok());
        let max_name = "x".repeat(150);
        assert!(validator.validate(payload(Some(&max_name), Some(1))).is_ok());
    }

    #[test]
    fn test_missing_fields_collect_all_errors() {
        let err = WordValidator::new().validate(payload(None, None)).unwrap_err();
        assert_eq!(err.errors.len(), 2);
        assert_eq!(codes(&err, "name"), vec![REQUIRED]);
        assert_eq!(codes(&err, "score"), vec![REQUIRED]);
    }

    #[test]
    fn test_blank_name_is_required() {
        let err = WordValidator::new()
            .validate(payload(Some("   "), Some(5)))
            .unwrap_err();
        assert_eq!(codes(&err, "name"), vec![REQUIRED]);
        assert!(codes(&err, "score").is_empty());
    }

    #[test]
    fn test_long_name() {
        let name = "é".repeat(151);
        let err = WordValidator::new()
            .validate(payload(Some(&name), Some(5)))
            .unwrap_err();
        assert_eq!(codes(&err, "name"), vec![TOO_LONG]);
    }

    #[test]
    fn test_score_out_of_range() {
        let validator = WordValidator::new();
        for score in [-1, 1001, i64::MAX] {
            let err = validator
                .validate(payload(Some("a"), Some(score)))
                .unwrap_err();
            assert_eq!(codes(&err, "score"), vec![OUT_OF_RANGE]);
        }
    }
}
