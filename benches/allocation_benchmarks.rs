//! Performance benchmarks for the tip pool engine.
//!
//! This benchmark suite tracks two paths:
//! - The pure allocator at various roster sizes
//! - The full HTTP /calculate round trip
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use std::str::FromStr;

use tip_engine::allocation::{allocate, weigh_records};
use tip_engine::api::{AppState, create_router};
use tip_engine::config::{AllocationPolicy, ConfigLoader, RoleWeightTable};
use tip_engine::models::{AllocationInput, HoursRecord};
use tip_engine::store::Store;

use axum::{body::Body, http::Request};
use tower::ServiceExt;
use uuid::Uuid;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Builds a roster of the given size with a mix of roles.
fn build_roster(size: usize) -> Vec<HoursRecord> {
    let roles = ["waiter", "experienced waiter", "kitchen", "new"];
    (0..size)
        .map(|i| HoursRecord {
            employee_id: format!("emp_{:04}", i),
            name: format!("Employee {}", i),
            total_hours: dec("38") + Decimal::from(i as u32 % 7),
            role: Some(roles[i % roles.len()].to_string()),
            multiplier: None,
        })
        .collect()
}

/// Benchmark: the pure allocator at increasing roster sizes.
fn bench_allocate_scaling(c: &mut Criterion) {
    let table = RoleWeightTable::standard();

    let mut group = c.benchmark_group("allocate");

    for roster_size in [2usize, 10, 50, 200].iter() {
        let records = build_roster(*roster_size);
        let contributions = weigh_records(&records, &table);
        let input = AllocationInput {
            total_pool: dec("5000"),
            house_share: dec("0.02"),
            contributions,
        };

        group.throughput(Throughput::Elements(*roster_size as u64));
        group.bench_with_input(
            BenchmarkId::new("roster", roster_size),
            roster_size,
            |b, _| b.iter(|| black_box(allocate(&input, dec("5")).unwrap())),
        );
    }

    group.finish();
}

/// Benchmark: weighing a roster against the role table.
fn bench_weighting(c: &mut Criterion) {
    let table = RoleWeightTable::standard();
    let records = build_roster(50);

    c.bench_function("weigh_records_50", |b| {
        b.iter(|| black_box(weigh_records(&records, &table)))
    });
}

/// Benchmark: the full HTTP /calculate round trip.
fn bench_http_calculate(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let config = ConfigLoader::from_parts(RoleWeightTable::standard(), AllocationPolicy::default());
    let url = format!(
        "sqlite:file:memdb_{}?mode=memory&cache=shared",
        Uuid::new_v4().simple()
    );
    let store = rt
        .block_on(Store::new(&url))
        .expect("Failed to create store");
    let state = AppState::new(config, store);
    let router = create_router(state);

    let employees: Vec<serde_json::Value> = build_roster(10)
        .into_iter()
        .map(|r| {
            serde_json::json!({
                "id": r.employee_id,
                "name": r.name,
                "hours": r.total_hours.to_string(),
                "role": r.role,
            })
        })
        .collect();
    let body = serde_json::json!({
        "total_pool": "5000",
        "employees": employees,
    })
    .to_string();

    c.bench_function("http_calculate_10", |b| {
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

criterion_group!(
    benches,
    bench_allocate_scaling,
    bench_weighting,
    bench_http_calculate,
);
criterion_main!(benches);
