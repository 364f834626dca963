//! Restaurant per-person pricing.
//!
//! Restaurants price a table per guest. The per-person price depends on
//! which opening-hour window the reservation time falls in, with a fixed
//! default when no window applies. Privatisations use a flat rate instead.

use rust_decimal::Decimal;

use crate::models::{
    ClockTime, PartyQuote, PerPersonPrice, PriceSource, ReservationKind, RestaurantRates,
    TimeWindow,
};

/// Resolves the per-person price for a reservation time.
///
/// Windows are scanned in order and the first one containing `time` is
/// taken. If that window has a positive price it is used; otherwise, or if
/// no window matches, `default_rate` applies. Windows after the first match
/// are never consulted, so callers must not pass overlapping windows.
///
/// # Examples
///
/// ```
/// use booking_engine::calculation::resolve_per_person_price;
/// use booking_engine::models::{PriceSource, TimeWindow};
/// use rust_decimal::Decimal;
///
/// let windows = vec![
///     TimeWindow::new("18:00".parse().unwrap(), "21:00".parse().unwrap(), Decimal::from(80)),
///     TimeWindow::new("21:00".parse().unwrap(), "23:00".parse().unwrap(), Decimal::from(60)),
/// ];
///
/// let dinner = resolve_per_person_price(&windows, "20:30".parse().unwrap(), Decimal::from(75));
/// assert_eq!(dinner.amount, Decimal::from(80));
/// assert_eq!(dinner.source, PriceSource::TimeWindow { index: 0 });
///
/// let late = resolve_per_person_price(&windows, "23:30".parse().unwrap(), Decimal::from(75));
/// assert_eq!(late.amount, Decimal::from(75));
/// assert_eq!(late.source, PriceSource::Default);
/// ```
pub fn resolve_per_person_price(
    windows: &[TimeWindow],
    time: ClockTime,
    default_rate: Decimal,
) -> PerPersonPrice {
    let default_price = PerPersonPrice {
        amount: default_rate,
        source: PriceSource::Default,
    };

    match windows.iter().position(|window| window.contains(time)) {
        Some(index) => match windows[index].price {
            Some(price) if price > Decimal::ZERO => PerPersonPrice {
                amount: price,
                source: PriceSource::TimeWindow { index },
            },
            _ => default_price,
        },
        None => default_price,
    }
}

/// Prices a restaurant reservation for a party.
///
/// Privatisations always use `rates.privatisation_per_person`. Standard
/// reservations use [`resolve_per_person_price`], falling back to
/// `rates.default_per_person` when the reservation time is unknown.
///
/// # Arguments
///
/// * `kind` - Standard table or privatisation
/// * `time` - Reservation time, if known
/// * `guests` - Party size
/// * `windows` - The restaurant's priced opening-hour windows
/// * `rates` - Default and privatisation per-person rates
pub fn price_restaurant_reservation(
    kind: ReservationKind,
    time: Option<ClockTime>,
    guests: u32,
    windows: &[TimeWindow],
    rates: &RestaurantRates,
) -> PartyQuote {
    let price_per_person = match (kind, time) {
        (ReservationKind::Privatisation, _) => PerPersonPrice {
            amount: rates.privatisation_per_person,
            source: PriceSource::Privatisation,
        },
        (ReservationKind::Standard, Some(time)) => {
            resolve_per_person_price(windows, time, rates.default_per_person)
        }
        (ReservationKind::Standard, None) => PerPersonPrice {
            amount: rates.default_per_person,
            source: PriceSource::Default,
        },
    };

    PartyQuote {
        kind,
        guests,
        price_per_person,
        total: Decimal::from(guests).saturating_mul(price_per_person.amount),
    }
}
