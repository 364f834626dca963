//! Hotel stay pricing.
//!
//! This module computes the total for a prospective stay from a per-night
//! room rate, the selected add-ons, and a flat per-night tax/fee.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::models::{AddOn, BookingQuote};

use super::nights::count_nights;

/// Computes a quote for a hotel stay.
///
/// `total = nights * base_rate + Σ add_on prices + nights * nightly_tax`,
/// where `nights` comes from [`count_nights`]. Add-ons without a price count
/// as zero. The function never fails and does not validate its inputs; a
/// negative rate produces a correspondingly lower total. Amounts beyond the
/// `Decimal` range saturate at `Decimal::MAX` / `Decimal::MIN`.
///
/// # Arguments
///
/// * `check_in` - Arrival date and time
/// * `check_out` - Departure date and time
/// * `base_rate` - Per-night room rate
/// * `add_ons` - Selected extras, options and views, in selection order
/// * `nightly_tax` - Flat tax/fee charged per night
///
/// # Examples
///
/// ```
/// use booking_engine::calculation::compute_quote;
/// use booking_engine::models::AddOn;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
///
/// let quote = compute_quote(
///     at("2026-03-01 15:00"),
///     at("2026-03-04 11:00"),
///     Decimal::from(120),
///     &[AddOn::new("Breakfast", Decimal::from(18)), AddOn::new("Parking", Decimal::from(12))],
///     Decimal::from(10),
/// );
///
/// assert_eq!(quote.nights, 3);
/// assert_eq!(quote.base_amount, Decimal::from(360));
/// assert_eq!(quote.add_ons_total, Decimal::from(30));
/// assert_eq!(quote.tax_and_fees, Decimal::from(30));
/// assert_eq!(quote.total, Decimal::from(420));
/// ```
pub fn compute_quote(
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
    base_rate: Decimal,
    add_ons: &[AddOn],
    nightly_tax: Decimal,
) -> BookingQuote {
    let nights = count_nights(check_in, check_out);
    let night_multiplier = Decimal::from(nights);

    let base_amount = night_multiplier.saturating_mul(base_rate);
    let add_ons_total = add_ons
        .iter()
        .map(AddOn::effective_price)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let tax_and_fees = night_multiplier.saturating_mul(nightly_tax);

    BookingQuote {
        nights,
        base_rate,
        selected_add_ons: add_ons.to_vec(),
        base_amount,
        add_ons_total,
        tax_and_fees,
        total: base_amount
            .saturating_add(add_ons_total)
            .saturating_add(tax_and_fees),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn test_total_sums_rate_add_ons_and_tax() {
        let add_ons = vec![
            AddOn::new("Breakfast", dec("18.50")),
            AddOn::new("Spa", dec("40")),
        ];
        let quote = compute_quote(day(1), day(3), dec("99.90"), &add_ons, dec("10"));

        assert_eq!(quote.nights, 2);
        assert_eq!(quote.base_amount, dec("199.80"));
        assert_eq!(quote.add_ons_total, dec("58.50"));
        assert_eq!(quote.tax_and_fees, dec("20"));
        assert_eq!(quote.total, dec("278.30"));
        assert_eq!(quote.selected_add_ons, add_ons);
    }

    #[test]
    fn test_missing_add_on_price_counts_as_zero() {
        let add_ons = vec![
            AddOn::new("Breakfast", dec("18")),
            AddOn {
                name: "Garden view".to_string(),
                price: None,
            },
        ];
        let quote = compute_quote(day(1), day(2), dec("100"), &add_ons, dec("10"));

        assert_eq!(quote.add_ons_total, dec("18"));
        assert_eq!(quote.total, dec("128"));
        assert_eq!(quote.selected_add_ons.len(), 2);
    }

    #[test]
    fn test_zero_length_stay_bills_one_night() {
        let quote = compute_quote(day(5), day(5), dec("80"), &[], dec("10"));
        assert_eq!(quote.nights, 1);
        assert_eq!(quote.total, dec("90"));
    }

    #[test]
    fn test_reversed_stay_bills_one_night() {
        let quote = compute_quote(day(9), day(2), dec("80"), &[], dec("0"));
        assert_eq!(quote.nights, 1);
        assert_eq!(quote.total, dec("80"));
    }

    #[test]
    fn test_zero_rate_still_charges_tax_and_add_ons() {
        let add_ons = vec![AddOn::new("Crib", dec("5"))];
        let quote = compute_quote(day(1), day(4), Decimal::ZERO, &add_ons, dec("10"));
        assert_eq!(quote.total, dec("35"));
    }

    #[test]
    fn test_same_inputs_give_identical_quotes() {
        let add_ons = vec![AddOn::new("Breakfast", dec("18.25"))];
        let first = compute_quote(day(1), day(4), dec("120.10"), &add_ons, dec("10"));
        let second = compute_quote(day(1), day(4), dec("120.10"), &add_ons, dec("10"));
        assert_eq!(first, second);
        assert_eq!(first.total.serialize(), second.total.serialize());
    }

    #[test]
    fn test_huge_rate_saturates_instead_of_panicking() {
        let rate = dec("50000000000000000000000000000");
        let quote = compute_quote(day(1), day(3), rate, &[], dec("10"));
        assert_eq!(quote.nights, 2);
        assert_eq!(quote.base_amount, Decimal::MAX);
        assert_eq!(quote.total, Decimal::MAX);
        assert_eq!(quote.tax_and_fees, dec("20"));
    }

    #[test]
    fn test_huge_add_ons_saturate() {
        let add_ons = vec![
            AddOn::new("Gold plating", Decimal::MAX),
            AddOn::new("Diamonds", Decimal::MAX),
        ];
        let quote = compute_quote(day(1), day(2), dec("100"), &add_ons, dec("10"));
        assert_eq!(quote.add_ons_total, Decimal::MAX);
        assert_eq!(quote.total, Decimal::MAX);
    }

    fn money() -> impl Strategy<Value = Decimal> {
        (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    proptest! {
        #[test]
        fn prop_total_matches_breakdown(
            hours in -200i64..2_000,
            base_rate in money(),
            prices in prop::collection::vec(proptest::option::of(money()), 0..6),
            nightly_tax in money(),
        ) {
            let check_out = day(1) + Duration::hours(hours);
            let add_ons: Vec<AddOn> = prices
                .into_iter()
                .enumerate()
                .map(|(i, price)| AddOn { name: format!("extra_{}", i), price })
                .collect();

            let quote = compute_quote(day(1), check_out, base_rate, &add_ons, nightly_tax);
            let nights = Decimal::from(quote.nights);
            let add_on_sum: Decimal = add_ons.iter().map(|a| a.price.unwrap_or(Decimal::ZERO)).sum();

            prop_assert!(quote.nights >= 1);
            prop_assert_eq!(quote.total, nights * base_rate + add_on_sum + nights * nightly_tax);
            prop_assert_eq!(quote.tax_and_fees, nights * nightly_tax);
        }

        #[test]
        fn prop_total_is_monotonic_in_stay_length(
            first_days in 0i64..60,
            extra_days in 0i64..60,
            base_rate in money(),
            nightly_tax in money(),
            add_on in money(),
        ) {
            let add_ons = vec![AddOn::new("extra", add_on)];
            let shorter = compute_quote(day(1), day(1) + Duration::days(first_days), base_rate, &add_ons, nightly_tax);
            let longer = compute_quote(
                day(1),
                day(1) + Duration::days(first_days + extra_days),
                base_rate,
                &add_ons,
                nightly_tax,
            );

            prop_assert!(longer.nights >= shorter.nights);
            prop_assert!(longer.total >= shorter.total);
        }
    }
}
