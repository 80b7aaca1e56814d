//! Performance benchmarks for the Incentive Engine.
//!
//! This benchmark suite covers:
//! - A single direct engine call
//! - A single-row request through the HTTP router
//! - Batches of 100 and 1000 rows through the router
//! - Scaling of the direct batch operation with row count
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::hint::black_box;
use std::str::FromStr;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rust_decimal::Decimal;

use incentive_engine::api::{AppState, create_router};
use incentive_engine::calculation::{BatchEntry, calculate_batch, calculate_incentive};
use incentive_engine::config::ConfigLoader;
use incentive_engine::models::{MonthlyPeriod, SalesRecord};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const POSITIONS: [&str; 4] = ["기사", "선임기사", "팀장", "공장장"];
const CATEGORIES: [&str; 2] = ["택시", "빵빵"];

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/service_center").expect("Failed to load config");
    AppState::new(config)
}

/// Creates a sales row that varies by index across positions, categories and tiers.
fn create_record(i: usize) -> SalesRecord {
    let net_sales = 15_000_000 + (i as i64 % 50) * 1_000_000;
    let margin_tenths = 340 + (i as i64 % 16) * 10;
    SalesRecord {
        employee_name: format!("직원{:04}", i),
        position: POSITIONS[i % POSITIONS.len()].to_string(),
        category: CATEGORIES[i % CATEGORIES.len()].to_string(),
        net_sales: Decimal::from(net_sales),
        profit_margin: Decimal::new(margin_tenths, 1),
    }
}

/// Creates a `/calculate` request body with `row_count` rows.
fn create_request_body(row_count: usize) -> String {
    let rows: Vec<serde_json::Value> = (0..row_count)
        .map(|i| {
            let record = create_record(i);
            serde_json::json!({
                "employee_name": record.employee_name,
                "position": record.position,
                "category": record.category,
                "net_sales": record.net_sales.to_string(),
                "profit_margin": record.profit_margin.to_string()
            })
        })
        .collect();

    serde_json::json!({
        "period": { "year": 2024, "month": 5 },
        "rows": rows
    })
    .to_string()
}

/// Benchmark: one direct engine call for a three-tier row.
fn bench_single_row_engine(c: &mut Criterion) {
    let record = SalesRecord {
        employee_name: "서인영".to_string(),
        position: "팀장".to_string(),
        category: "택시".to_string(),
        net_sales: Decimal::from(58_691_900),
        profit_margin: Decimal::from_str("37.6").unwrap(),
    };

    c.bench_function("single_row_engine", |b| {
        b.iter(|| black_box(calculate_incentive(black_box(&record), None, None)))
    });
}

/// Benchmark: a single-row request through the router.
fn bench_single_row_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = create_request_body(1);

    c.bench_function("single_row_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
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

/// Benchmark: batches of 100 and 1000 rows in one request each.
fn bench_batch_requests(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());

    let mut group = c.benchmark_group("batch_processing");
    for row_count in [100usize, 1000] {
        let body = create_request_body(row_count);
        group.throughput(Throughput::Elements(row_count as u64));
        group.bench_with_input(
            BenchmarkId::new("batch_request", row_count),
            &row_count,
            |b, _| {
                b.to_async(&rt).iter(|| async {
                    let router = router.clone();
                    let response = router
                        .oneshot(
                            Request::builder()
                                .method("POST")
                                .uri("/calculate")
                                .header("Content-Type", "application/json")
                                .body(Body::from(body.clone()))
                                .unwrap(),
                        )
                        .await
                        .unwrap();
                    black_box(response)
                })
            },
        );
    }
    group.finish();
}

/// Benchmark: direct batch operation scaling with row count.
fn bench_scaling(c: &mut Criterion) {
    let loader = create_test_state().config().clone();
    let period = MonthlyPeriod::new(2024, 5).unwrap();

    let mut group = c.benchmark_group("scaling");
    for row_count in [10usize, 100, 1000] {
        let entries: Vec<BatchEntry> = (0..row_count).map(|i| create_record(i).into()).collect();

        group.throughput(Throughput::Elements(row_count as u64));
        group.bench_with_input(BenchmarkId::new("rows", row_count), &entries, |b, entries| {
            b.iter(|| {
                black_box(calculate_batch(
                    period,
                    entries.clone(),
                    loader.config().roster(),
                    loader.override_thresholds(),
                ))
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_single_row_engine,
    bench_single_row_request,
    bench_batch_requests,
    bench_scaling,
);
criterion_main!(benches);
