//! Cancellation refund resolution.
//!
//! This module turns the time remaining before check-in and a business's
//! cancellation tiers into a refund percentage and amount. The result is a
//! pre-confirmation estimate; see [`CancellationDecision::confirm`] for
//! applying the booking service's final figure.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{CancellationDecision, RefundSource, SortedTiers};

/// Whole days and whole hours remaining before check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBeforeCheckIn {
    /// Whole days remaining.
    pub days: u32,
    /// Whole hours remaining.
    pub hours: u32,
    /// False once check-in has been reached.
    pub before_check_in: bool,
}

/// Measures the time from `now` until `check_in`, truncated to whole units.
///
/// Both fields are zero once check-in has been reached.
pub fn time_before_check_in(now: DateTime<Utc>, check_in: DateTime<Utc>) -> TimeBeforeCheckIn {
    let remaining = check_in - now;
    if remaining <= chrono::Duration::zero() {
        return TimeBeforeCheckIn {
            days: 0,
            hours: 0,
            before_check_in: false,
        };
    }

    TimeBeforeCheckIn {
        days: u32::try_from(remaining.num_days()).unwrap_or(u32::MAX),
        hours: u32::try_from(remaining.num_hours()).unwrap_or(u32::MAX),
        before_check_in: true,
    }
}

/// Resolves the refund due when a reservation is cancelled at `now`.
///
/// The first tier (in the order held by `tiers`) whose
/// `days_before_check_in` is at most the whole days remaining supplies the
/// refund percentage. Once check-in has been reached no tier applies and the
/// refund is zero, even if a zero-day tier exists. A missing
/// `total_amount` is treated as zero.
///
/// # Arguments
///
/// * `now` - The moment of cancellation
/// * `check_in` - The reservation's check-in time
/// * `total_amount` - The reservation total, if known
/// * `tiers` - The business's cancellation tiers, largest threshold first
///
/// # Examples
///
/// ```
/// use booking_engine::calculation::resolve_refund;
/// use booking_engine::models::{CancellationPolicyTier, SortedTiers};
/// use chrono::{Duration, TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let tiers = SortedTiers::new(vec![
///     CancellationPolicyTier::new(7, Decimal::from(100)),
///     CancellationPolicyTier::new(2, Decimal::from(50)),
///     CancellationPolicyTier::new(0, Decimal::from(0)),
/// ])
/// .unwrap();
///
/// let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
/// let check_in = now + Duration::days(5) + Duration::hours(3);
///
/// let decision = resolve_refund(now, check_in, Some(Decimal::from(200)), &tiers);
/// assert_eq!(decision.days_before, 5);
/// assert_eq!(decision.refund_percentage, Decimal::from(50));
/// assert_eq!(decision.refund_amount, Decimal::from(100));
/// ```
pub fn resolve_refund(
    now: DateTime<Utc>,
    check_in: DateTime<Utc>,
    total_amount: Option<Decimal>,
    tiers: &SortedTiers,
) -> CancellationDecision {
    let remaining = time_before_check_in(now, check_in);

    let matched = if remaining.before_check_in {
        tiers
            .iter()
            .enumerate()
            .find(|(_, tier)| remaining.days >= tier.days_before_check_in)
    } else {
        None
    };

    let refund_percentage = matched.map_or(Decimal::ZERO, |(_, tier)| tier.refund_percentage);
    let total_amount = total_amount.unwrap_or(Decimal::ZERO);

    CancellationDecision {
        days_before: remaining.days,
        hours_before: remaining.hours,
        refund_percentage,
        // The factor is in [0, 1], so the product never exceeds the total.
        refund_amount: total_amount * (refund_percentage / Decimal::ONE_HUNDRED),
        matched_tier: matched.map(|(index, _)| index),
        refund_source: RefundSource::Estimated,
    }
}
