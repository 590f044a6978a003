//! Format validation of extracted code values.
//!
//! Two independent rules, both always evaluated: total digit length and
//! decimal prefix. A single value can violate both at once.

use serde::{Deserialize, Serialize};

use crate::config::ValidationConfig;

/// One format rule violation, carrying everything the message template needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FormatViolation {
    /// Rendered length differs from the required length
    Length {
        field: String,
        expected: usize,
        actual: usize,
        rendered: String,
    },
    /// Rendered value does not start with the required prefix
    Prefix {
        field: String,
        expected: String,
        rendered: String,
        value: i32,
    },
}

impl FormatViolation {
    /// Human-readable diagnostic text.
    pub fn message(&self) -> String {
        match self {
            Self::Length {
                field,
                expected,
                actual,
                rendered,
            } => format!(
                "Error code field '{}' length should be {} digits, actual is {} digits (value: {})",
                field, expected, actual, rendered
            ),
            Self::Prefix {
                field,
                expected,
                rendered,
                value,
            } => format!(
                "Error code field '{}' must start with {}, actual is {} (value: {})",
                field, expected, rendered, value
            ),
        }
    }
}

/// Minimal decimal rendering of a code value.
///
/// No leading zeros; a leading `-` counts toward the length of negative
/// values. This string is also the uniqueness key.
pub fn render_code(value: i32) -> String {
    value.to_string()
}

/// Checks a value against the length and prefix rules.
///
/// Both rules run unconditionally; the result can hold zero, one, or two
/// violations. Deterministic: the same value always yields the same list.
pub fn validate_format(value: i32, config: &ValidationConfig) -> Vec<FormatViolation> {
    let rendered = render_code(value);
    let mut violations = Vec::new();

    if rendered.len() != config.length {
        violations.push(FormatViolation::Length {
            field: config.code_field.clone(),
            expected: config.length,
            actual: rendered.len(),
            rendered: rendered.clone(),
        });
    }

    if !rendered.starts_with(&config.prefix) {
        violations.push(FormatViolation::Prefix {
            field: config.code_field.clone(),
            expected: config.prefix.clone(),
            rendered,
            value,
        });
    }

    violations
}

/// Whether a value is exempt from validation and registration.
pub fn should_exclude(value: i32, exclude_values: &[i32]) -> bool {
    exclude_values.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ValidationConfig {
        ValidationConfig::default()
    }

    #[test]
    fn test_valid_code_passes_both_rules() {
        assert!(validate_format(11220001, &config()).is_empty());
    }

    #[test]
    fn test_wrong_length_and_prefix_both_fire() {
        // 7 digits, starts with "99": both rules violated at once.
        let violations = validate_format(9912345, &config());
        assert_eq!(violations.len(), 2);
        assert!(matches!(
            violations[0],
            FormatViolation::Length {
                expected: 8,
                actual: 7,
                ..
            }
        ));
        assert!(matches!(violations[1], FormatViolation::Prefix { .. }));
    }

    #[test]
    fn test_right_length_wrong_prefix() {
        let violations = validate_format(99220001, &config());
        assert_eq!(violations.len(), 1);
        assert!(matches!(violations[0], FormatViolation::Prefix { .. }));
    }

    #[test]
    fn test_negative_sign_counts_toward_length() {
        // "-1122001" is 8 chars but starts with '-', not the prefix.
        let violations = validate_format(-1122001, &config());
        assert_eq!(violations.len(), 1);
        assert!(matches!(violations[0], FormatViolation::Prefix { .. }));
    }

    #[test]
    fn test_validation_is_deterministic() {
        let first = validate_format(9912345, &config());
        let second = validate_format(9912345, &config());
        assert_eq!(first, second);
    }

    #[test]
    fn test_should_exclude() {
        assert!(should_exclude(0, &[0]));
        assert!(should_exclude(-1, &[0, -1]));
        assert!(!should_exclude(1, &[0]));
        assert!(!should_exclude(0, &[]));
    }

    #[test]
    fn test_message_templates() {
        let violations = validate_format(9912345, &config());
        assert_eq!(
            violations[0].message(),
            "Error code field 'code' length should be 8 digits, actual is 7 digits (value: 9912345)"
        );
        assert_eq!(
            violations[1].message(),
            "Error code field 'code' must start with 1122, actual is 9912345 (value: 9912345)"
        );
    }
}
