//! Cancellation policy and refund decision models.
//!
//! A business owns an ordered list of [`CancellationPolicyTier`]s. The
//! resolver takes the first tier whose threshold is met, so the list must be
//! ordered by `days_before_check_in`, largest first. [`SortedTiers`] is the
//! only way to hand tiers to the resolver and can only be built from a list
//! in that order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One row of a cancellation policy.
///
/// Cancelling at least `days_before_check_in` whole days ahead refunds
/// `refund_percentage` percent of the booking total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationPolicyTier {
    /// Minimum whole days before check-in.
    #[serde(alias = "days_before")]
    pub days_before_check_in: u32,
    /// Refund percentage in `[0, 100]`.
    pub refund_percentage: Decimal,
}

impl CancellationPolicyTier {
    /// Creates a tier.
    pub fn new(days_before_check_in: u32, refund_percentage: Decimal) -> Self {
        Self {
            days_before_check_in,
            refund_percentage,
        }
    }

    fn validate(&self, position: usize) -> EngineResult<()> {
        if self.refund_percentage < Decimal::ZERO || self.refund_percentage > Decimal::ONE_HUNDRED
        {
            return Err(EngineError::InvalidTier {
                position,
                message: format!(
                    "refund percentage {} is outside 0..=100",
                    self.refund_percentage
                ),
            });
        }
        Ok(())
    }
}

/// Cancellation tiers ordered by `days_before_check_in`, descending.
///
/// Tiers with equal thresholds may appear; the earlier one wins.
///
/// # Example
///
/// ```
/// use booking_engine::models::{CancellationPolicyTier, SortedTiers};
/// use rust_decimal::Decimal;
///
/// let tiers = SortedTiers::new(vec![
///     CancellationPolicyTier::new(7, Decimal::from(100)),
///     CancellationPolicyTier::new(2, Decimal::from(50)),
/// ])
/// .unwrap();
/// assert_eq!(tiers.len(), 2);
///
/// // Out-of-order input is rejected rather than silently misread.
/// assert!(SortedTiers::new(vec![
///     CancellationPolicyTier::new(2, Decimal::from(50)),
///     CancellationPolicyTier::new(7, Decimal::from(100)),
/// ])
/// .is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SortedTiers(Vec<CancellationPolicyTier>);

impl SortedTiers {
    /// Wraps tiers that are already in descending order.
    ///
    /// Returns `UnsortedTiers` if any tier has a larger threshold than the
    /// one before it, and `InvalidTier` for percentages outside `[0, 100]`.
    pub fn new(tiers: Vec<CancellationPolicyTier>) -> EngineResult<Self> {
        for (position, tier) in tiers.iter().enumerate() {
            tier.validate(position)?;
        }
        for (position, pair) in tiers.windows(2).enumerate() {
            if pair[1].days_before_check_in > pair[0].days_before_check_in {
                return Err(EngineError::UnsortedTiers {
                    position: position + 1,
                    days: pair[1].days_before_check_in,
                    previous_days: pair[0].days_before_check_in,
                });
            }
        }
        Ok(Self(tiers))
    }

    /// Sorts tiers into descending order before wrapping them.
    ///
    /// The sort is stable, so tiers sharing a threshold keep their relative
    /// order.
    pub fn from_unordered(mut tiers: Vec<CancellationPolicyTier>) -> EngineResult<Self> {
        for (position, tier) in tiers.iter().enumerate() {
            tier.validate(position)?;
        }
        tiers.sort_by(|a, b| b.days_before_check_in.cmp(&a.days_before_check_in));
        Ok(Self(tiers))
    }

    /// Returns the tiers in order.
    pub fn as_slice(&self) -> &[CancellationPolicyTier] {
        &self.0
    }

    /// Returns an iterator over the tiers in order.
    pub fn iter(&self) -> std::slice::Iter<'_, CancellationPolicyTier> {
        self.0.iter()
    }

    /// Returns the number of tiers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no tiers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Whether a refund figure is a local estimate or the booking service's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundSource {
    /// Computed locally from the policy tiers.
    #[default]
    Estimated,
    /// Reported by the booking service after the cancellation went through.
    ServerConfirmed,
}

/// How much time is left before check-in, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum TimeRemaining {
    /// At least one whole day remains.
    Days(u32),
    /// Less than a day but at least one whole hour remains.
    Hours(u32),
    /// Check-in is less than an hour away or has passed.
    PastCheckIn,
}

/// The outcome of a cancel-reservation call to the booking service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationOutcome {
    /// Whether the cancellation was accepted.
    pub success: bool,
    /// Refund the service actually issued, if it reported one.
    #[serde(default)]
    pub refund_amount: Option<Decimal>,
}

/// The refund a guest is entitled to when cancelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationDecision {
    /// Whole days until check-in (0 once check-in has passed).
    pub days_before: u32,
    /// Whole hours until check-in (0 once check-in has passed).
    pub hours_before: u32,
    /// Refund percentage of the first matching tier, or 0.
    pub refund_percentage: Decimal,
    /// Refund amount.
    pub refund_amount: Decimal,
    /// Index of the tier that matched, if any.
    #[serde(default)]
    pub matched_tier: Option<usize>,
    /// Origin of `refund_amount`.
    #[serde(default)]
    pub refund_source: RefundSource,
}

impl CancellationDecision {
    /// Returns the remaining time in the coarsest non-zero unit.
    pub fn time_remaining(&self) -> TimeRemaining {
        if self.days_before > 0 {
            TimeRemaining::Days(self.days_before)
        } else if self.hours_before > 0 {
            TimeRemaining::Hours(self.hours_before)
        } else {
            TimeRemaining::PastCheckIn
        }
    }

    /// Applies the booking service's response to this estimate.
    ///
    /// A successful outcome marks the decision as server confirmed, and a
    /// reported refund amount replaces the local figure. An unsuccessful
    /// outcome leaves the estimate untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use booking_engine::models::{CancellationDecision, CancellationOutcome, RefundSource};
    /// use rust_decimal::Decimal;
    ///
    /// let estimate = CancellationDecision {
    ///     days_before: 5,
    ///     hours_before: 120,
    ///     refund_percentage: Decimal::from(50),
    ///     refund_amount: Decimal::from(100),
    ///     matched_tier: Some(1),
    ///     refund_source: RefundSource::Estimated,
    /// };
    ///
    /// let confirmed = estimate.confirm(&CancellationOutcome {
    ///     success: true,
    ///     refund_amount: Some(Decimal::from(95)),
    /// });
    /// assert_eq!(confirmed.refund_amount, Decimal::from(95));
    /// assert_eq!(confirmed.refund_source, RefundSource::ServerConfirmed);
    /// ```
    pub fn confirm(&self, outcome: &CancellationOutcome) -> Self {
        if !outcome.success {
            return self.clone();
        }
        Self {
            refund_amount: outcome.refund_amount.unwrap_or(self.refund_amount),
            refund_source: RefundSource::ServerConfirmed,
            ..self.clone()
        }
    }
}
