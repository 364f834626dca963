//! Booking Engine for hotels, restaurants and salons
//!
//! This crate prices hotel stays and restaurant reservations and resolves
//! cancellation refunds from a business's tiered policy. Every calculation
//! takes its business context explicitly and returns an audit trace.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
