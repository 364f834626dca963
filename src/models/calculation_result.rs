//! Calculation result envelope and audit trace models.
//!
//! Every calculation served by the engine is wrapped in a
//! [`CalculationResult`] carrying an id, the business context it ran under,
//! and an [`AuditTrace`] of the rules applied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag inputs that were substituted or looked suspicious. They
/// never stop a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use booking_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 12,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The envelope returned for every calculation.
///
/// `T` is the calculation's own result, e.g. a
/// [`BookingQuote`](super::BookingQuote) or a
/// [`CancellationDecision`](super::CancellationDecision).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult<T> {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The business the calculation ran for, if any.
    pub business_id: Option<String>,
    /// Currency every amount in `result` is expressed in.
    pub currency: String,
    /// The calculation output.
    pub result: T,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AddOn, BookingQuote};
    use rust_decimal::Decimal;

    fn sample_step() -> AuditStep {
        AuditStep {
            step_number: 1,
            rule_id: "night_count".to_string(),
            rule_name: "Night Count".to_string(),
            input: serde_json::json!({"check_in": "2026-03-01T15:00:00"}),
            output: serde_json::json!({"nights": 2}),
            reasoning: "2 nights between check-in and check-out".to_string(),
        }
    }

    #[test]
    fn test_audit_step_serialization() {
        let json = serde_json::to_string(&sample_step()).unwrap();
        assert!(json.contains("\"step_number\":1"));
        assert!(json.contains("\"rule_id\":\"night_count\""));
        assert!(json.contains("\"rule_name\":\"Night Count\""));
    }

    #[test]
    fn test_audit_warning_new() {
        let warning = AuditWarning::new("MISSING_BASE_RATE", "no rate", "medium");
        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"MISSING_BASE_RATE\""));
        assert!(json.contains("\"severity\":\"medium\""));
    }

    #[test]
    fn test_calculation_result_round_trips_generic_payload() {
        let result = CalculationResult {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            business_id: Some("hotel-lumiere".to_string()),
            currency: "EUR".to_string(),
            result: BookingQuote {
                nights: 1,
                base_rate: Decimal::from(100),
                selected_add_ons: vec![AddOn::new("Parking", Decimal::from(15))],
                base_amount: Decimal::from(100),
                add_ons_total: Decimal::from(15),
                tax_and_fees: Decimal::from(10),
                total: Decimal::from(125),
            },
            audit_trace: AuditTrace {
                steps: vec![sample_step()],
                warnings: vec![],
                duration_us: 3,
            },
        };

        let json = serde_json::to_string(&result).unwrap();
        let parsed: CalculationResult<BookingQuote> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
