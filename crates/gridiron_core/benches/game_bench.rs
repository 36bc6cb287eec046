use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridiron_core::engine::batch::{simulate_batch, BatchConfig};
use gridiron_core::{simulate_game, GameConfig, PostGameAnalyzer, TeamProfile};

fn config() -> GameConfig {
    GameConfig::new(TeamProfile::with_strength("GB", 0.6), TeamProfile::new("CHI"))
}

fn single_game(c: &mut Criterion) {
    c.bench_function("simulate one game", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            simulate_game(black_box(config()), Some(seed))
        })
    });
}

fn game_and_report(c: &mut Criterion) {
    c.bench_function("simulate and analyze one game", |b| {
        b.iter(|| {
            let result = simulate_game(config(), Some(black_box(42))).ok()?;
            PostGameAnalyzer::analyze(&result).ok()
        })
    });
}

fn batch_of_games(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    group.sample_size(10);
    group.bench_function("100 games", |b| {
        b.iter(|| simulate_batch(&BatchConfig::new(config(), 100, black_box(7))))
    });
    group.finish();
}

criterion_group!(benches, single_game, game_and_report, batch_of_games);
criterion_main!(benches);
