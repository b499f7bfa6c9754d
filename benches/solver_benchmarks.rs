use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vincula::solver::{
    domain::Domain,
    engine::{pruned_space_for_all, SolverEngine},
    relation::Relation,
    variable::VariableRegistry,
};

/// A chain `x0 < x1 < ... < x{n-1}` over `{0..domain_size}`, with the first
/// variable pinned to 0. Propagation squeezes every link of the chain.
fn chain_problem(n: usize, domain_size: i64) -> Vec<Relation<i64>> {
    let mut registry = VariableRegistry::new();
    let variables: Vec<_> = (0..n)
        .map(|_| registry.fresh(Domain::discrete(0..domain_size)))
        .collect();

    let mut relations = vec![Relation::new([variables[0].clone()], |v: &[i64]| v[0] == 0)];
    for pair in variables.windows(2) {
        relations.push(Relation::new(
            [pair[0].clone(), pair[1].clone()],
            |v: &[i64]| v[0] < v[1],
        ));
    }
    relations
}

fn propagation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pruned_space_for_all");
    for n in [4, 8, 12] {
        let relations = chain_problem(n, 2 * n as i64);
        group.bench_with_input(BenchmarkId::new("chain", n), &relations, |b, relations| {
            b.iter(|| pruned_space_for_all(black_box(relations)).unwrap());
        });
    }
    group.finish();
}

fn solver_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    for n in [4, 8, 12] {
        let relations = chain_problem(n, 2 * n as i64);
        group.bench_with_input(BenchmarkId::new("chain", n), &relations, |b, relations| {
            let engine = SolverEngine::default();
            b.iter(|| engine.solve(black_box(relations)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, propagation_benchmark, solver_benchmark);
criterion_main!(benches);
