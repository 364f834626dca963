//! Performance benchmarks for the Booking Engine.
//!
//! Covers the pure calculation paths and a full request through the router:
//! - Stay quote with a growing number of add-ons
//! - Refund resolution against a growing tier list
//! - Per-person window lookup
//! - Cancellation estimate over HTTP
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use booking_engine::api::{AppState, create_router};
use booking_engine::calculation::{compute_quote, resolve_per_person_price, resolve_refund};
use booking_engine::config::ConfigLoader;
use booking_engine::models::{AddOn, CancellationPolicyTier, ClockTime, SortedTiers, TimeWindow};

use axum::{body::Body, http::Request};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_add_ons(count: usize) -> Vec<AddOn> {
    (0..count)
        .map(|i| AddOn::new(format!("Extra {}", i), Decimal::new(1250 + i as i64, 2)))
        .collect()
}

/// Tiers one day apart, largest first.
fn create_tiers(count: u32) -> SortedTiers {
    let tiers = (0..count)
        .rev()
        .map(|days| CancellationPolicyTier::new(days, Decimal::from(days.min(100))))
        .collect();
    SortedTiers::new(tiers).expect("tiers are descending")
}

/// Half-hour windows from 00:00 to 24:00.
fn create_windows() -> Vec<TimeWindow> {
    (0..48u16)
        .map(|slot| {
            let open = ClockTime::from_hm((slot / 2) as u8, ((slot % 2) * 30) as u8)
                .expect("valid slot start");
            let close_minutes = (slot + 1) * 30;
            let close = ClockTime::from_hm((close_minutes / 60) as u8, (close_minutes % 60) as u8)
                .expect("valid slot end");
            TimeWindow::new(open, close, Decimal::from(40 + slot))
        })
        .collect()
}

fn bench_stay_quote(c: &mut Criterion) {
    let check_in = NaiveDate::from_ymd_opt(2026, 7, 1)
        .unwrap()
        .and_hms_opt(15, 0, 0)
        .unwrap();
    let check_out = check_in + Duration::days(6) - Duration::hours(4);

    let mut group = c.benchmark_group("stay_quote");
    for add_on_count in [0usize, 5, 50] {
        let add_ons = create_add_ons(add_on_count);
        group.throughput(Throughput::Elements(add_on_count as u64));
        group.bench_with_input(
            BenchmarkId::new("add_ons", add_on_count),
            &add_ons,
            |b, add_ons| {
                b.iter(|| {
                    black_box(compute_quote(
                        black_box(check_in),
                        black_box(check_out),
                        Decimal::from(145),
                        add_ons,
                        Decimal::from(10),
                    ))
                })
            },
        );
    }
    group.finish();
}

fn bench_resolve_refund(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap();
    // Nothing before the last tier matches, so the scan is worst case.
    let check_in = now + Duration::hours(5);

    let mut group = c.benchmark_group("resolve_refund");
    for tier_count in [3u32, 30, 300] {
        let tiers = create_tiers(tier_count);
        group.bench_with_input(
            BenchmarkId::new("tiers", tier_count),
            &tiers,
            |b, tiers| {
                b.iter(|| {
                    black_box(resolve_refund(
                        black_box(now),
                        black_box(check_in),
                        Some(Decimal::from(480)),
                        tiers,
                    ))
                })
            },
        );
    }
    group.finish();
}

fn bench_per_person_lookup(c: &mut Criterion) {
    let windows = create_windows();
    let late: ClockTime = "23:45".parse().expect("valid time");

    c.bench_function("per_person_lookup_48_windows", |b| {
        b.iter(|| {
            black_box(resolve_per_person_price(
                &windows,
                black_box(late),
                Decimal::from(75),
            ))
        })
    });
}

fn bench_cancellation_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::json!({
        "business_id": "hotel-lumiere",
        "now": "2026-07-01T12:00:00Z",
        "check_in": "2026-07-06T15:00:00Z",
        "total_amount": "640.00"
    })
    .to_string();

    c.bench_function("cancellation_estimate_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/cancellations/estimate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_stay_quote,
    bench_resolve_refund,
    bench_per_person_lookup,
    bench_cancellation_endpoint,
);
criterion_main!(benches);
