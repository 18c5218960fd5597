//! Performance benchmarks for the three optimizer variants across roster
//! sizes, adapted from the teacher's pairing-performance benchmark suite.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use court_engine::{Engine, EngineConfig, OptimizerKind, Player};

struct BenchmarkConfig {
    player_counts: Vec<usize>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            player_counts: vec![8, 16, 32, 64, 128],
        }
    }
}

fn players(n: usize) -> Vec<Player> {
    (0..n)
        .map(|i| Player::new(format!("p{i}"), format!("Player {i}")))
        .collect()
}

fn config(kind: OptimizerKind) -> EngineConfig {
    EngineConfig {
        engine_type: kind,
        rng_seed: Some(1),
        ..EngineConfig::default()
    }
}

fn bench_variant(c: &mut Criterion, group_name: &str, kind: OptimizerKind) {
    let bench_config = BenchmarkConfig::default();
    let mut group = c.benchmark_group(group_name);
    for &count in &bench_config.player_counts {
        let roster = players(count);
        let number_of_courts = (count as u32) / 4;
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                let mut engine = Engine::new(config(kind));
                let round = engine.generate(black_box(&roster), number_of_courts.max(1), None, None);
                black_box(round);
            });
        });
    }
    group.finish();
}

fn monte_carlo(c: &mut Criterion) {
    bench_variant(c, "monte_carlo", OptimizerKind::Mc);
}

fn simulated_annealing(c: &mut Criterion) {
    bench_variant(c, "simulated_annealing", OptimizerKind::Sa);
}

fn conflict_graph(c: &mut Criterion) {
    bench_variant(c, "conflict_graph", OptimizerKind::Cg);
}

criterion_group!(benches, monte_carlo, simulated_annealing, conflict_graph);
criterion_main!(benches);
