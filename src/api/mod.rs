//! HTTP API module for the Booking Engine.
//!
//! This module provides the REST API endpoints for stay and restaurant
//! quotes and for cancellation refunds.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BookingInstant, CancellationConfirmRequest, CancellationEstimateRequest,
    RestaurantQuoteRequest, StayQuoteRequest,
};
pub use response::{ApiError, CancellationEstimate};
pub use state::AppState;
