//! Constraint generation benchmarks.
//!
//! Measures strict and collision-injecting generation on sparse fixtures
//! with one constraint per vertex, plus parsing of the encoded sets.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use chromagen_benches::{
    error::BenchSetupError,
    fixtures::{banded_graph, bench_rng, required_colors},
    params::ConstraintBenchParams,
};
use chromagen_core::{
    ColorPolicy, ConstraintBuilder, ConstraintMode, DensityMode, encode_constraints,
    parse_constraints,
};

/// Fixture sizes to benchmark.
const NODE_COUNTS: &[usize] = &[100, 250, 500];

fn builder_for(params: ConstraintBenchParams, colors: usize) -> ConstraintBuilder {
    ConstraintBuilder::new(params.count)
        .with_colors(ColorPolicy::FixedCount(colors))
        .with_mode(ConstraintMode::from_flags(true, params.collisions))
}

fn constraint_generate_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("constraint_generate");
    group.sample_size(20);

    for &node_count in NODE_COUNTS {
        let graph = banded_graph(node_count, DensityMode::Sparse)?;
        let colors = required_colors(&graph);
        // Strict generation with at most one pair per vertex never dead-ends.
        for collisions in [0, node_count >> 3] {
            let params = ConstraintBenchParams {
                node_count,
                count: node_count,
                collisions,
            };
            let builder = builder_for(params, colors);
            group.bench_with_input(BenchmarkId::from_parameter(params), &builder, |b, gen_ref| {
                let mut rng = bench_rng();
                b.iter(|| gen_ref.generate(&graph, &mut rng));
            });
        }
    }

    group.finish();
    Ok(())
}

fn constraint_generate(c: &mut Criterion) {
    if let Err(err) = constraint_generate_impl(c) {
        panic!("constraint_generate benchmark setup failed: {err}");
    }
}

fn constraint_parse_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("constraint_parse");

    for &node_count in NODE_COUNTS {
        let graph = banded_graph(node_count, DensityMode::Sparse)?;
        let params = ConstraintBenchParams {
            node_count,
            count: node_count,
            collisions: 0,
        };
        let generated =
            builder_for(params, required_colors(&graph)).generate(&graph, &mut bench_rng())?;
        let text = encode_constraints(generated.constraints());
        group.bench_with_input(BenchmarkId::from_parameter(params), &text, |b, text_ref| {
            b.iter(|| parse_constraints(text_ref));
        });
    }

    group.finish();
    Ok(())
}

fn constraint_parse(c: &mut Criterion) {
    if let Err(err) = constraint_parse_impl(c) {
        panic!("constraint_parse benchmark setup failed: {err}");
    }
}

criterion_group!(benches, constraint_generate, constraint_parse);
criterion_main!(benches);
