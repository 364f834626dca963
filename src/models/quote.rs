//! Price quote models.
//!
//! A quote is computed fresh from its inputs every time and never mutated
//! afterwards. [`BookingQuote`] covers hotel stays and [`PartyQuote`] covers
//! restaurant reservations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An optional extra selected on a booking (amenity, option, view).
///
/// Catalog entries do not always carry a price; a missing price counts as
/// zero in every total.
///
/// # Example
///
/// ```
/// use booking_engine::models::AddOn;
/// use rust_decimal::Decimal;
///
/// let breakfast = AddOn::new("Breakfast", Decimal::from(18));
/// assert_eq!(breakfast.effective_price(), Decimal::from(18));
///
/// let sea_view = AddOn { name: "Sea view".to_string(), price: None };
/// assert_eq!(sea_view.effective_price(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOn {
    /// Display name of the add-on.
    pub name: String,
    /// Price of the add-on, if the catalog provides one.
    #[serde(default)]
    pub price: Option<Decimal>,
}

impl AddOn {
    /// Creates a priced add-on.
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price: Some(price),
        }
    }

    /// Returns the price used in totals.
    pub fn effective_price(&self) -> Decimal {
        self.price.unwrap_or(Decimal::ZERO)
    }
}

/// A computed quote for a hotel stay.
///
/// `total == nights * base_rate + add_ons_total + tax_and_fees` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingQuote {
    /// Number of billable nights (at least 1).
    pub nights: u32,
    /// Per-night room rate.
    pub base_rate: Decimal,
    /// The add-ons included in the quote, in selection order.
    pub selected_add_ons: Vec<AddOn>,
    /// `nights * base_rate`.
    pub base_amount: Decimal,
    /// Sum of add-on prices.
    pub add_ons_total: Decimal,
    /// `nights * nightly_tax`.
    pub tax_and_fees: Decimal,
    /// Grand total.
    pub total: Decimal,
}

/// Kind of restaurant reservation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationKind {
    /// A table reservation priced from the opening-hour windows.
    #[default]
    Standard,
    /// A private hire of the venue at a flat per-person rate.
    Privatisation,
}

/// Where a per-person price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PriceSource {
    /// The price of the window at `index` in the scanned list.
    TimeWindow {
        /// Position of the matching window.
        index: usize,
    },
    /// The default per-person rate.
    Default,
    /// The flat privatisation rate.
    Privatisation,
}

/// A resolved per-person price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerPersonPrice {
    /// Price charged per guest.
    pub amount: Decimal,
    /// How the price was resolved.
    pub source: PriceSource,
}

/// A computed quote for a restaurant reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyQuote {
    /// Kind of reservation.
    pub kind: ReservationKind,
    /// Number of guests.
    pub guests: u32,
    /// Resolved per-person price.
    pub price_per_person: PerPersonPrice,
    /// `guests * price_per_person.amount`.
    pub total: Decimal,
}
