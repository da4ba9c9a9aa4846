use criterion::{criterion_group, criterion_main, Criterion, SamplingMode};
use std::hint::black_box;
use std::time::Duration;
use common::games::SessionRng;
use common::games::snake::{BotController, SessionStatus, SnakeBotType, SnakeSimulator};

fn play_full_game(seed: u64, bot_type: SnakeBotType) -> u32 {
    let mut sim = SnakeSimulator::with_seed(seed);
    let mut bot_rng = SessionRng::new(seed.wrapping_add(1));
    sim.start();

    for _ in 0..10_000 {
        if sim.status() != SessionStatus::Running {
            break;
        }
        if let Some(direction) = BotController::calculate_move(bot_type, &sim, &mut bot_rng) {
            sim.request_direction(direction);
        }
        sim.advance();
    }
    sim.score()
}

fn bench_straight_line_ticks() {
    let mut sim = SnakeSimulator::with_seed(7);
    sim.start();
    while sim.status() == SessionStatus::Running {
        black_box(sim.advance());
    }
}

fn simulator_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("snake_simulator");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(20)
        .measurement_time(Duration::from_secs(10));

    group.bench_function("straight_line_until_wall", |b| {
        b.iter(bench_straight_line_ticks)
    });

    group.bench_function("efficient_bot_full_game", |b| {
        b.iter(|| play_full_game(black_box(42), SnakeBotType::Efficient))
    });

    group.bench_function("random_bot_full_game", |b| {
        b.iter(|| play_full_game(black_box(42), SnakeBotType::Random))
    });

    group.finish();
}

criterion_group!(benches, simulator_bench);
criterion_main!(benches);
