//! HTTP request handlers for the Booking Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::borrow::Cow;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    compute_quote, count_nights, price_restaurant_reservation, resolve_refund,
};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, BookingQuote, BusinessContext, CalculationResult,
    PartyQuote, PriceSource, SortedTiers, TimeWindow, Vertical,
};

use super::request::{
    CancellationConfirmRequest, CancellationEstimateRequest, RestaurantQuoteRequest,
    StayQuoteRequest,
};
use super::response::{ApiError, ApiErrorResponse, CancellationEstimate};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/quotes/stay", post(stay_quote_handler))
        .route("/quotes/restaurant", post(restaurant_quote_handler))
        .route("/cancellations/estimate", post(cancellation_estimate_handler))
        .route("/cancellations/confirm", post(cancellation_confirm_handler))
        .with_state(state)
}

/// Handler for POST /quotes/stay.
async fn stay_quote_handler(
    State(state): State<AppState>,
    payload: Result<Json<StayQuoteRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing stay quote request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match perform_stay_quote(&request, state.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                business_id = ?result.business_id,
                nights = result.result.nights,
                total = %result.result.total,
                duration_us = start_time.elapsed().as_micros(),
                "Stay quote completed"
            );
            json_response(StatusCode::OK, &result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /quotes/restaurant.
async fn restaurant_quote_handler(
    State(state): State<AppState>,
    payload: Result<Json<RestaurantQuoteRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing restaurant quote request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match perform_restaurant_quote(&request, state.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                business_id = ?result.business_id,
                guests = result.result.guests,
                total = %result.result.total,
                duration_us = start_time.elapsed().as_micros(),
                "Restaurant quote completed"
            );
            json_response(StatusCode::OK, &result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /cancellations/estimate.
async fn cancellation_estimate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CancellationEstimateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing cancellation estimate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match perform_cancellation_estimate(&request, state.config(), state.now()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                business_id = ?result.business_id,
                days_before = result.result.decision.days_before,
                refund_amount = %result.result.decision.refund_amount,
                duration_us = start_time.elapsed().as_micros(),
                "Cancellation estimate completed"
            );
            json_response(StatusCode::OK, &result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /cancellations/confirm.
async fn cancellation_confirm_handler(
    State(state): State<AppState>,
    payload: Result<Json<CancellationConfirmRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing cancellation confirmation");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match perform_cancellation_confirm(&request, state.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                business_id = ?result.business_id,
                success = request.outcome.success,
                refund_amount = %result.result.decision.refund_amount,
                "Cancellation confirmation applied"
            );
            json_response(StatusCode::OK, &result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, &error)
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    let api_error: ApiErrorResponse = err.into();
    api_error.into_response()
}

/// Collects audit steps and warnings while a calculation runs.
struct TraceRecorder {
    steps: Vec<AuditStep>,
    warnings: Vec<AuditWarning>,
    started: Instant,
}

impl TraceRecorder {
    fn start() -> Self {
        Self {
            steps: Vec::new(),
            warnings: Vec::new(),
            started: Instant::now(),
        }
    }

    fn step(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        self.steps.push(AuditStep {
            step_number: self.steps.len() as u32 + 1,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
    }

    fn warn(&mut self, code: &str, message: String, severity: &str) {
        self.warnings.push(AuditWarning::new(code, message, severity));
    }

    fn check_vertical(&mut self, context: &BusinessContext, expected: Vertical) {
        if context.is_other_vertical(expected) {
            let actual = context
                .vertical
                .map(|v| v.to_string())
                .unwrap_or_default();
            self.warn(
                "VERTICAL_MISMATCH",
                format!(
                    "Business is a {} but a {} calculation was requested",
                    actual, expected
                ),
                "medium",
            );
        }
    }

    fn check_saturated(&mut self, field: &str, amount: Decimal) {
        if amount == Decimal::MAX || amount == Decimal::MIN {
            self.warn(
                "AMOUNT_SATURATED",
                format!("{} exceeds the representable range and was capped", field),
                "high",
            );
        }
    }

    fn finish<T>(self, context: BusinessContext, result: T) -> CalculationResult<T> {
        CalculationResult {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            business_id: context.business_id,
            currency: context.currency,
            result,
            audit_trace: AuditTrace {
                steps: self.steps,
                warnings: self.warnings,
                duration_us: self.started.elapsed().as_micros() as u64,
            },
        }
    }
}

/// Prices a hotel stay.
fn perform_stay_quote(
    request: &StayQuoteRequest,
    config: &ConfigLoader,
) -> EngineResult<CalculationResult<BookingQuote>> {
    let context = config.business_context(request.business_id.as_deref())?;
    let mut trace = TraceRecorder::start();
    trace.check_vertical(&context, Vertical::Hotel);

    let base_rate = match request.base_rate {
        Some(rate) => rate,
        None => {
            trace.warn(
                "MISSING_BASE_RATE",
                "No base rate supplied; nights priced at 0".to_string(),
                "high",
            );
            Decimal::ZERO
        }
    };
    for add_on in request.add_ons.iter().filter(|a| a.price.is_none()) {
        trace.warn(
            "MISSING_ADD_ON_PRICE",
            format!("Add-on '{}' has no price; counted as 0", add_on.name),
            "low",
        );
    }
    let nightly_tax = request.nightly_tax.unwrap_or(context.nightly_tax);

    let check_in = request.check_in.to_naive();
    let check_out = request.check_out.to_naive();
    let nights = count_nights(check_in, check_out);
    trace.step(
        "night_count",
        "Night Count",
        json!({ "check_in": check_in, "check_out": check_out }),
        json!({ "nights": nights }),
        format!(
            "Stay spans {} started day(s), minimum one night",
            nights
        ),
    );

    let quote = compute_quote(check_in, check_out, base_rate, &request.add_ons, nightly_tax);
    trace.step(
        "stay_total",
        "Stay Total",
        json!({
            "nights": quote.nights,
            "base_rate": base_rate,
            "add_on_count": request.add_ons.len(),
            "nightly_tax": nightly_tax,
        }),
        json!({
            "base_amount": quote.base_amount,
            "add_ons_total": quote.add_ons_total,
            "tax_and_fees": quote.tax_and_fees,
            "total": quote.total,
        }),
        format!(
            "{} x {} + {} add-ons + {} x {} tax = {}",
            quote.nights,
            base_rate,
            quote.add_ons_total,
            quote.nights,
            nightly_tax,
            quote.total
        ),
    );

    trace.check_saturated("total", quote.total);

    Ok(trace.finish(context, quote))
}

/// Prices a restaurant reservation.
fn perform_restaurant_quote(
    request: &RestaurantQuoteRequest,
    config: &ConfigLoader,
) -> EngineResult<CalculationResult<PartyQuote>> {
    let context = config.business_context(request.business_id.as_deref())?;
    let mut trace = TraceRecorder::start();
    trace.check_vertical(&context, Vertical::Restaurant);

    let windows: &[TimeWindow] = match (&request.windows, &request.business_id) {
        (Some(windows), _) => windows,
        (None, Some(id)) => config.time_windows(id)?,
        (None, None) => &[],
    };
    let guests = match request.guests {
        Some(guests) => guests,
        None => {
            trace.warn(
                "MISSING_GUEST_COUNT",
                "No guest count supplied; party total is 0".to_string(),
                "high",
            );
            0
        }
    };

    let quote = price_restaurant_reservation(
        request.kind,
        request.time,
        guests,
        windows,
        &context.restaurant_rates,
    );

    let reasoning = match quote.price_per_person.source {
        PriceSource::TimeWindow { index } => {
            format!("Reservation time falls in opening window {}", index)
        }
        PriceSource::Default => {
            "No priced window applies; default per-person rate used".to_string()
        }
        PriceSource::Privatisation => "Privatisation flat per-person rate".to_string(),
    };
    trace.step(
        "per_person_price",
        "Per-Person Price",
        json!({
            "kind": request.kind,
            "time": request.time,
            "window_count": windows.len(),
        }),
        json!({ "price_per_person": quote.price_per_person }),
        reasoning,
    );
    trace.step(
        "party_total",
        "Party Total",
        json!({ "guests": guests, "price_per_person": quote.price_per_person.amount }),
        json!({ "total": quote.total }),
        format!(
            "{} guest(s) x {} = {}",
            guests, quote.price_per_person.amount, quote.total
        ),
    );
    trace.check_saturated("total", quote.total);

    Ok(trace.finish(context, quote))
}

/// Estimates the refund for cancelling a reservation.
///
/// `server_now` is used when the request does not carry its own `now`.
fn perform_cancellation_estimate(
    request: &CancellationEstimateRequest,
    config: &ConfigLoader,
    server_now: DateTime<Utc>,
) -> EngineResult<CalculationResult<CancellationEstimate>> {
    let context = config.business_context(request.business_id.as_deref())?;
    let tiers: Cow<'_, SortedTiers> = match (&request.tiers, &request.business_id) {
        (Some(inline), _) => Cow::Owned(SortedTiers::new(inline.clone())?),
        (None, Some(id)) => Cow::Borrowed(config.cancellation_tiers(id)?),
        (None, None) => Cow::Owned(SortedTiers::default()),
    };

    let mut trace = TraceRecorder::start();
    if request.total_amount.is_none() {
        trace.warn(
            "MISSING_TOTAL_AMOUNT",
            "No reservation total supplied; refund computed on 0".to_string(),
            "high",
        );
    }

    let now = request.now.map_or(server_now, |instant| instant.to_utc());
    let check_in = request.check_in.to_utc();
    let decision = resolve_refund(now, check_in, request.total_amount, &tiers);
    let time_remaining = decision.time_remaining();

    trace.step(
        "time_before_check_in",
        "Time Before Check-In",
        json!({ "now": now, "check_in": check_in }),
        json!({
            "days_before": decision.days_before,
            "hours_before": decision.hours_before,
            "time_remaining": time_remaining,
        }),
        if now < check_in {
            format!(
                "{} whole day(s), {} whole hour(s) before check-in",
                decision.days_before, decision.hours_before
            )
        } else {
            "Check-in has passed".to_string()
        },
    );
    trace.step(
        "tier_match",
        "Cancellation Tier Match",
        json!({ "days_before": decision.days_before, "tiers": tiers.as_ref() }),
        json!({
            "matched_tier": decision.matched_tier,
            "refund_percentage": decision.refund_percentage,
        }),
        match decision.matched_tier {
            Some(index) => format!("First tier met is tier {}", index),
            None => "No tier applies; no refund".to_string(),
        },
    );
    trace.step(
        "refund_amount",
        "Refund Amount",
        json!({
            "total_amount": request.total_amount.unwrap_or(Decimal::ZERO),
            "refund_percentage": decision.refund_percentage,
        }),
        json!({ "refund_amount": decision.refund_amount }),
        format!(
            "{}% of the reservation total",
            decision.refund_percentage
        ),
    );

    Ok(trace.finish(
        context,
        CancellationEstimate {
            decision,
            time_remaining,
        },
    ))
}

/// Applies the booking service's cancellation outcome to an estimate.
fn perform_cancellation_confirm(
    request: &CancellationConfirmRequest,
    config: &ConfigLoader,
) -> EngineResult<CalculationResult<CancellationEstimate>> {
    let context = config.business_context(request.business_id.as_deref())?;
    if request
        .outcome
        .refund_amount
        .is_some_and(|amount| amount < Decimal::ZERO)
    {
        return Err(EngineError::InvalidRequest {
            field: "outcome.refund_amount".to_string(),
            message: "must not be negative".to_string(),
        });
    }

    let mut trace = TraceRecorder::start();
    let decision = request.estimate.confirm(&request.outcome);
    if !request.outcome.success {
        trace.warn(
            "CANCELLATION_NOT_CONFIRMED",
            "Booking service rejected the cancellation; estimate unchanged".to_string(),
            "high",
        );
    }
    trace.step(
        "server_confirmation",
        "Server Confirmation",
        json!({
            "estimated_refund": request.estimate.refund_amount,
            "outcome": request.outcome,
        }),
        json!({
            "refund_amount": decision.refund_amount,
            "refund_source": decision.refund_source,
        }),
        match (request.outcome.success, request.outcome.refund_amount) {
            (true, Some(_)) => "Server-reported refund replaces the estimate".to_string(),
            (true, None) => "Cancellation confirmed without a refund figure".to_string(),
            (false, _) => "Cancellation failed".to_string(),
        },
    );

    let time_remaining = decision.time_remaining();
    Ok(trace.finish(
        context,
        CancellationEstimate {
            decision,
            time_remaining,
        },
    ))
}
