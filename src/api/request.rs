//! Request types for the Booking Engine API.
//!
//! This module defines the JSON request structures for the quote and
//! cancellation endpoints. Monetary fields the booking service may omit are
//! optional here. The handlers substitute zero and record a warning.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    AddOn, CancellationDecision, CancellationOutcome, CancellationPolicyTier, ClockTime,
    ReservationKind, TimeWindow,
};

/// A date or timestamp as sent by the booking front end.
///
/// Accepts an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS` datetime, or
/// a bare `YYYY-MM-DD` date (taken as midnight). Naive values are read as
/// UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookingInstant {
    /// A timestamp with an offset.
    Zoned(DateTime<Utc>),
    /// A datetime without an offset.
    Naive(NaiveDateTime),
    /// A date without a time.
    Date(NaiveDate),
}

impl BookingInstant {
    /// Returns the instant as a naive datetime.
    pub fn to_naive(self) -> NaiveDateTime {
        match self {
            BookingInstant::Zoned(dt) => dt.naive_utc(),
            BookingInstant::Naive(dt) => dt,
            BookingInstant::Date(date) => date.and_time(NaiveTime::default()),
        }
    }

    /// Returns the instant in UTC.
    pub fn to_utc(self) -> DateTime<Utc> {
        match self {
            BookingInstant::Zoned(dt) => dt,
            other => other.to_naive().and_utc(),
        }
    }
}

/// Request body for `POST /quotes/stay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StayQuoteRequest {
    /// The hotel the stay is at; engine defaults apply when absent.
    #[serde(default)]
    pub business_id: Option<String>,
    /// Arrival.
    pub check_in: BookingInstant,
    /// Departure.
    pub check_out: BookingInstant,
    /// Per-night room rate from the catalog.
    #[serde(default)]
    pub base_rate: Option<Decimal>,
    /// Selected extras, options and views.
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
    /// Per-night tax override; falls back to the business configuration.
    #[serde(default)]
    pub nightly_tax: Option<Decimal>,
}

/// Request body for `POST /quotes/restaurant`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantQuoteRequest {
    /// The restaurant; engine defaults apply when absent.
    #[serde(default)]
    pub business_id: Option<String>,
    /// Standard table or privatisation.
    #[serde(default)]
    pub kind: ReservationKind,
    /// Reservation time as `HH:MM`.
    #[serde(default)]
    pub time: Option<ClockTime>,
    /// Party size.
    #[serde(default)]
    pub guests: Option<u32>,
    /// Windows to price against instead of the restaurant's configured ones.
    #[serde(default)]
    pub windows: Option<Vec<TimeWindow>>,
}

/// Request body for `POST /cancellations/estimate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancellationEstimateRequest {
    /// The business whose cancellation policy applies.
    #[serde(default)]
    pub business_id: Option<String>,
    /// Moment of cancellation; the server clock is used when absent.
    #[serde(default)]
    pub now: Option<BookingInstant>,
    /// Reservation check-in.
    pub check_in: BookingInstant,
    /// Reservation total.
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    /// Tiers to use instead of the business's. Must already be sorted by
    /// days before check-in, descending.
    #[serde(default)]
    pub tiers: Option<Vec<CancellationPolicyTier>>,
}

/// Request body for `POST /cancellations/confirm`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancellationConfirmRequest {
    /// The business the reservation belongs to.
    #[serde(default)]
    pub business_id: Option<String>,
    /// The estimate shown before the guest confirmed.
    pub estimate: CancellationDecision,
    /// What the booking service returned.
    pub outcome: CancellationOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_booking_instant_accepts_three_shapes() {
        let zoned: BookingInstant = serde_json::from_str("\"2026-03-01T15:00:00+02:00\"").unwrap();
        assert_eq!(
            zoned.to_utc(),
            Utc.with_ymd_and_hms(2026, 3, 1, 13, 0, 0).unwrap()
        );

        let naive: BookingInstant = serde_json::from_str("\"2026-03-01T15:00:00\"").unwrap();
        assert_eq!(
            naive.to_utc(),
            Utc.with_ymd_and_hms(2026, 3, 1, 15, 0, 0).unwrap()
        );

        let date: BookingInstant = serde_json::from_str("\"2026-03-01\"").unwrap();
        assert_eq!(
            date.to_naive(),
            NaiveDate::from_ymd_opt(2026, 3, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_booking_instant_rejects_garbage() {
        assert!(serde_json::from_str::<BookingInstant>("\"next tuesday\"").is_err());
    }

    #[test]
    fn test_deserialize_stay_quote_request() {
        let json = r#"{
            "business_id": "hotel-lumiere",
            "check_in": "2026-03-01",
            "check_out": "2026-03-04",
            "base_rate": "120.00",
            "add_ons": [{"name": "Breakfast", "price": "18"}, {"name": "Sea view"}]
        }"#;

        let request: StayQuoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.business_id.as_deref(), Some("hotel-lumiere"));
        assert_eq!(request.add_ons.len(), 2);
        assert_eq!(request.add_ons[1].price, None);
        assert_eq!(request.nightly_tax, None);
    }

    #[test]
    fn test_deserialize_minimal_restaurant_request() {
        let request: RestaurantQuoteRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.kind, ReservationKind::Standard);
        assert!(request.time.is_none());
        assert!(request.guests.is_none());
        assert!(request.windows.is_none());
    }

    #[test]
    fn test_restaurant_request_rejects_bad_time() {
        let json = r#"{"time": "8pm", "guests": 2}"#;
        assert!(serde_json::from_str::<RestaurantQuoteRequest>(json).is_err());
    }

    #[test]
    fn test_deserialize_cancellation_estimate_request() {
        let json = r#"{
            "check_in": "2026-03-10T14:00:00Z",
            "now": "2026-03-05T09:00:00Z",
            "total_amount": 200,
            "tiers": [
                {"days_before": 7, "refund_percentage": 100},
                {"days_before": 2, "refund_percentage": 50}
            ]
        }"#;

        let request: CancellationEstimateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.total_amount, Some(Decimal::from(200)));
        assert_eq!(request.tiers.unwrap().len(), 2);
        assert!(request.now.is_some());
    }
}
