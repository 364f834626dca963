//! Business identity and the explicit pricing context handed to calculations.
//!
//! Calculations never read ambient session state. Everything a business
//! contributes to a price (currency, nightly tax, per-person defaults) is
//! carried in a [`BusinessContext`] that the caller builds and passes in.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The business vertical a tenant operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vertical {
    /// Hotel stays priced per night.
    Hotel,
    /// Restaurant tables priced per person.
    Restaurant,
    /// Salon appointments.
    Salon,
}

impl std::fmt::Display for Vertical {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vertical::Hotel => write!(f, "hotel"),
            Vertical::Restaurant => write!(f, "restaurant"),
            Vertical::Salon => write!(f, "salon"),
        }
    }
}

/// Per-person rates used when pricing a restaurant reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantRates {
    /// Rate used when no opening-hour window supplies a positive price.
    pub default_per_person: Decimal,
    /// Flat rate used for privatisations.
    pub privatisation_per_person: Decimal,
}

impl Default for RestaurantRates {
    fn default() -> Self {
        Self {
            default_per_person: Decimal::from(75),
            privatisation_per_person: Decimal::from(100),
        }
    }
}

/// Explicit per-call business context.
///
/// # Example
///
/// ```
/// use booking_engine::models::BusinessContext;
/// use rust_decimal::Decimal;
///
/// let context = BusinessContext::default();
/// assert_eq!(context.currency, "EUR");
/// assert_eq!(context.nightly_tax, Decimal::from(10));
/// assert!(context.business_id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessContext {
    /// The business the calculation is for, if any.
    pub business_id: Option<String>,
    /// The business vertical, if known.
    pub vertical: Option<Vertical>,
    /// ISO currency code amounts are expressed in.
    pub currency: String,
    /// Flat tax/fee charged per night on hotel stays.
    pub nightly_tax: Decimal,
    /// Restaurant per-person rates.
    pub restaurant_rates: RestaurantRates,
}

impl Default for BusinessContext {
    fn default() -> Self {
        Self {
            business_id: None,
            vertical: None,
            currency: "EUR".to_string(),
            nightly_tax: Decimal::from(10),
            restaurant_rates: RestaurantRates::default(),
        }
    }
}

impl BusinessContext {
    /// Returns true if the context belongs to a business of another vertical.
    ///
    /// An anonymous context (no vertical) never mismatches.
    pub fn is_other_vertical(&self, expected: Vertical) -> bool {
        self.vertical.is_some_and(|v| v != expected)
    }
}
