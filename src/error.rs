//! Error types for the Booking Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! The pricing and refund calculations themselves never fail; these errors
//! come from loading configuration, decoding requests and building the
//! typed inputs those calculations consume.

use thiserror::Error;

/// The main error type for the Booking Engine.
///
/// # Example
///
/// ```
/// use booking_engine::error::EngineError;
///
/// let error = EngineError::BusinessNotFound {
///     id: "hotel-unknown".to_string(),
/// };
/// assert_eq!(error.to_string(), "Business not found: hotel-unknown");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No business with the given id is configured.
    #[error("Business not found: {id}")]
    BusinessNotFound {
        /// The business id that was not found.
        id: String,
    },

    /// Cancellation tiers were not ordered by days before check-in, descending.
    #[error(
        "Cancellation tiers must be sorted by days before check-in (descending): \
         tier {position} ({days} days) follows a tier with {previous_days} days"
    )]
    UnsortedTiers {
        /// Index of the first tier that breaks the ordering.
        position: usize,
        /// Days before check-in of the offending tier.
        days: u32,
        /// Days before check-in of the tier preceding it.
        previous_days: u32,
    },

    /// A cancellation tier carried an out-of-range value.
    #[error("Invalid cancellation tier {position}: {message}")]
    InvalidTier {
        /// Index of the invalid tier.
        position: usize,
        /// A description of what made the tier invalid.
        message: String,
    },

    /// A clock time could not be parsed as `HH:MM`.
    #[error("Invalid clock time '{value}': expected HH:MM")]
    InvalidClockTime {
        /// The raw value that failed to parse.
        value: String,
    },

    /// A request was structurally valid JSON but semantically unusable.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_business_not_found_displays_id() {
        let error = EngineError::BusinessNotFound {
            id: "bistro-unknown".to_string(),
        };
        assert_eq!(error.to_string(), "Business not found: bistro-unknown");
    }

    #[test]
    fn test_unsorted_tiers_displays_position_and_days() {
        let error = EngineError::UnsortedTiers {
            position: 1,
            days: 7,
            previous_days: 2,
        };
        let message = error.to_string();
        assert!(message.contains("tier 1 (7 days)"));
        assert!(message.contains("with 2 days"));
    }

    #[test]
    fn test_invalid_tier_displays_position_and_message() {
        let error = EngineError::InvalidTier {
            position: 2,
            message: "refund percentage 120 is outside 0..=100".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid cancellation tier 2: refund percentage 120 is outside 0..=100"
        );
    }

    #[test]
    fn test_invalid_clock_time_displays_value() {
        let error = EngineError::InvalidClockTime {
            value: "25:99".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid clock time '25:99': expected HH:MM");
    }

    #[test]
    fn test_invalid_request_displays_field_and_message() {
        let error = EngineError::InvalidRequest {
            field: "guests".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid request field 'guests': must not be negative"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_business_not_found() -> EngineResult<()> {
            Err(EngineError::BusinessNotFound {
                id: "missing".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_business_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
