//! Benchmarks for naming transformation and directive processing

use std::fs;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scaffolder_engine::directives::DirectiveProcessor;
use scaffolder_engine::naming::{ConceptPair, NamingTransformer};
use scaffolder_integration_tests::templates_dir;

const MODEL: &str = "app/models/scaffolding/completely_concrete/tangible_thing.rb";

fn benchmark_transform(c: &mut Criterion) {
    let template = fs::read_to_string(templates_dir().join(MODEL)).unwrap();
    let large = template.repeat(50);
    let transformer = NamingTransformer::new(ConceptPair::new("Projects::Deliverable", "Project"));

    c.bench_function("transform_model_template", |b| {
        b.iter(|| black_box(transformer.transform(black_box(&template))))
    });

    c.bench_function("transform_large_text", |b| {
        b.iter(|| black_box(transformer.transform(black_box(&large))))
    });

    c.bench_function("build_transformer", |b| {
        b.iter(|| black_box(NamingTransformer::new(ConceptPair::new(black_box("Order"), "Team"))))
    });
}

fn benchmark_directives(c: &mut Criterion) {
    let template = fs::read_to_string(templates_dir().join(MODEL)).unwrap();
    let processor = DirectiveProcessor::new(
        ConceptPair::new("Deliverable", "Project"),
        vec!["Project".to_string(), "Team".to_string()],
    );

    c.bench_function("process_model_template", |b| {
        b.iter(|| black_box(processor.process(black_box(&template)).unwrap()))
    });
}

criterion_group!(benches, benchmark_transform, benchmark_directives);
criterion_main!(benches);
