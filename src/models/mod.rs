//! Core data models for the Booking Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod business;
mod calculation_result;
mod cancellation;
mod clock_time;
mod quote;

pub use business::{BusinessContext, RestaurantRates, Vertical};
pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, CalculationResult};
pub use cancellation::{
    CancellationDecision, CancellationOutcome, CancellationPolicyTier, RefundSource, SortedTiers,
    TimeRemaining,
};
pub use clock_time::{ClockTime, MINUTES_PER_DAY, TimeWindow};
pub use quote::{AddOn, BookingQuote, PartyQuote, PerPersonPrice, PriceSource, ReservationKind};
