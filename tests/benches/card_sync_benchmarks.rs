//! # Card-Sync Benchmarks
//!
//! Hot paths on every request:
//!
//! | Component | Path | Target |
//! |-----------|------|--------|
//! | cs-01 KeyDeriver | derive per render / webhook | < 10µs |
//! | cs-02 CardCatalog | filter + paginate per listing | < 1ms for 1k cards |
//! | cs-05 payload | parse per webhook | < 50µs for 4KB |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cs_01_card_state::KeyDeriver;
use cs_02_card_catalog::{paginate, CardCatalog};
use cs_05_webhook_dispatch::{parse_payload, PayloadEncoding};
use shared_types::{CardDescriptor, UrlParams};

fn bench_key_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("cs-01-key-derivation");

    for count in [0usize, 4, 16, 64] {
        let params: UrlParams = (0..count)
            .map(|i| (format!("param{:02}", i), format!("value {}", i)))
            .collect();
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(count), &params, |b, params| {
            b.iter(|| KeyDeriver::derive(black_box("weather"), black_box("forecast"), params))
        });
    }

    group.finish();
}

fn bench_catalog_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("cs-02-catalog");

    let descriptors: Vec<CardDescriptor> = (0..1000)
        .map(|i| {
            CardDescriptor::new(format!("pack{}", i % 20), format!("card{}", i))
                .with_meta("description", format!("Card number {} of the bench pack", i))
        })
        .collect();
    let catalog = CardCatalog::new(descriptors);

    for filter in ["", "card9", "bench", "absent"] {
        group.bench_with_input(BenchmarkId::new("filter_page", filter), filter, |b, filter| {
            b.iter(|| paginate(catalog.cards(black_box(filter)), 2))
        });
    }

    group.finish();
}

fn bench_payload_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("cs-05-payload");

    let json = serde_json::json!({
        "params": {"label": "lobby"},
        "items": (0..100).map(|i| serde_json::json!({"id": i, "text": "x".repeat(24)})).collect::<Vec<_>>()
    })
    .to_string();
    let form = form_urlencoded::Serializer::new(String::new())
        .append_pair("payload", &json)
        .finish();

    group.throughput(Throughput::Bytes(json.len() as u64));
    group.bench_function("json", |b| {
        b.iter(|| parse_payload(black_box(json.as_bytes()), PayloadEncoding::Json))
    });
    group.bench_function("form", |b| {
        b.iter(|| parse_payload(black_box(form.as_bytes()), PayloadEncoding::Form))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_key_derivation,
    bench_catalog_listing,
    bench_payload_parsing
);
criterion_main!(benches);
