//! Graph construction and ranking benchmarks
//!
//! Run with: cargo bench --bench disambiguation_benchmarks

use std::sync::Arc;

use cellrank::prelude::*;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const DIMENSIONS: usize = 32;

/// Deterministic pseudo-random vector for entity `n`
fn vector(n: usize) -> Vec<f32> {
    let mut state = (n as u64).wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..DIMENSIONS)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((state >> 33) as f32 / u32::MAX as f32) - 0.25
        })
        .collect()
}

/// `mentions` mentions with `candidates` candidates each, four cells per row
fn fixture(mentions: usize, candidates: usize) -> (SurfaceForms, KeyedVectors, Table) {
    let mut index = SurfaceForms::new();
    let mut model = KeyedVectors::new(DIMENSIONS);
    let mut cells = Vec::with_capacity(mentions);

    for m in 0..mentions {
        let surface = format!("mention{}", m);
        for c in 0..candidates {
            let id = format!("Q{}", m * candidates + c);
            model
                .insert(id.clone(), vector(m * candidates + c))
                .expect("fixture vectors have the model's dimensions");
            index.insert(surface.clone(), id);
        }
        cells.push(surface);
    }

    let rows = cells.chunks(4).map(<[String]>::to_vec).collect();
    (index, model, Table::from_rows(rows))
}

fn candidate_sets(mentions: usize, candidates: usize) -> Vec<CandidateIds> {
    (0..mentions)
        .map(|m| {
            (0..candidates)
                .map(|c| format!("Q{}", m * candidates + c))
                .collect()
        })
        .collect()
}

fn bench_graph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");

    for mentions in [5, 10, 20] {
        let (_, model, _) = fixture(mentions, 5);
        let sets = candidate_sets(mentions, 5);

        group.bench_with_input(BenchmarkId::from_parameter(mentions), &sets, |b, sets| {
            b.iter(|| GraphBuilder::new(&model).build(black_box(sets)));
        });
    }

    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");

    for mentions in [5, 10, 20] {
        let (_, model, _) = fixture(mentions, 5);
        let graph = GraphBuilder::new(&model).build(&candidate_sets(mentions, 5));
        let ranker = Ranker::default();

        group.bench_with_input(BenchmarkId::from_parameter(mentions), &graph, |b, graph| {
            b.iter(|| ranker.rank(black_box(graph)));
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for scope in [GraphScope::Table, GraphScope::Row] {
        let (index, model, table) = fixture(12, 4);
        let config = DisambiguationConfig {
            graph: cellrank::disambiguation::GraphConfig { scope },
            ..DisambiguationConfig::default()
        };
        let disambiguator = Disambiguator::new(Arc::new(index), Arc::new(model), config)
            .expect("default ranker parameters are valid");

        group.bench_function(scope.to_string(), |b| {
            b.iter(|| disambiguator.disambiguate_table(black_box(&table)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_graph_build, bench_rank, bench_pipeline);
criterion_main!(benches);
