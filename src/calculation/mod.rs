//! Calculation logic for the Booking Engine.
//!
//! This module contains the pure pricing and refund functions: night
//! counting and stay totals for hotels, per-person pricing for restaurant
//! reservations, and tiered cancellation refunds. None of them perform I/O,
//! read the clock, or fail.

mod nights;
mod per_person;
mod refund;
mod stay_quote;

pub use nights::{SECONDS_PER_DAY, count_nights};
pub use per_person::{price_restaurant_reservation, resolve_per_person_price};
pub use refund::{TimeBeforeCheckIn, resolve_refund, time_before_check_in};
pub use stay_quote::compute_quote;
