use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};
use xpo_rdf::rdf::{NamespaceManager, RdfFormat, RdfSerializer};
use xpo_rdf::{Converter, ConverterConfig, RdfStore, SequentialIdGenerator, XpoDocument};

/// Synthetic export with `size` events, each carrying every nested field kind
fn build_document(size: usize) -> XpoDocument {
    let mut events = serde_json::Map::new();
    for i in 0..size {
        let record: Value = json!({
            "name": format!("Event{}", i),
            "wd_node": format!("Q{}", i),
            "overlay_parents": [{"wd_node": "Q123", "name": "Conflict"}],
            "similar_nodes": [{"wd_node": "Q9", "name": "X", "similarity_type": "exact"}],
            "ldc_types": [{
                "name": "Conflict.Attack",
                "ldc_code": "LDC_1",
                "ldc_arguments": [{"ldc_name": "Attacker", "dwd_arg_name": "A0"}]
            }],
            "arguments": [{"name": "A0", "constraints": [{"name": "person", "wd_node": "Q215627"}]}]
        });
        events.insert(format!("DWD_EVE_{}", i), record);
    }
    let doc = json!({
        "events": events,
        "entities": {},
        "relations": {},
        "temporal_relations": {}
    });
    XpoDocument::from_json(&doc.to_string()).unwrap()
}

/// Benchmark record flattening throughput
fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");
    let converter = Converter::new(ConverterConfig::default()).unwrap();

    for size in [100, 1000, 10_000].iter() {
        let doc = build_document(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut store = RdfStore::new();
                let summary = converter.convert_document(&doc, &mut store, &mut SequentialIdGenerator::new());
                criterion::black_box(summary.triples);
            });
        });
    }
    group.finish();
}

/// Benchmark serialization of a flattened graph
fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    let converter = Converter::new(ConverterConfig::default()).unwrap();
    let namespaces: NamespaceManager = converter.namespaces();

    let doc = build_document(1000);
    let mut store = RdfStore::new();
    converter.convert_document(&doc, &mut store, &mut SequentialIdGenerator::new());

    for format in [RdfFormat::Turtle, RdfFormat::NTriples] {
        group.bench_function(format.extension(), |b| {
            b.iter(|| {
                let text = RdfSerializer::serialize_store(&store, format, &namespaces).unwrap();
                criterion::black_box(text.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_flatten, bench_serialize);
criterion_main!(benches);
