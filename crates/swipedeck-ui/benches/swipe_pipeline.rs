use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use swipedeck_core::Runtime;
use swipedeck_foundation::classifier::{classify, SwipeThresholds};
use swipedeck_foundation::geometry::Size;
use swipedeck_ui::{card_indexes, SwiperConfig, SwiperState};

fn bench_classifier(c: &mut Criterion) {
    let thresholds = SwipeThresholds::new(120.0, 160.0);
    c.bench_function("classify_release_offsets", |b| {
        b.iter(|| {
            for step in 0..256 {
                let dx = step as f32 - 128.0;
                let dy = 128.0 - step as f32;
                black_box(classify(black_box(dx), black_box(dy), thresholds));
            }
        })
    });
}

fn bench_index_arithmetic(c: &mut Criterion) {
    c.bench_function("card_indexes_wraparound", |b| {
        b.iter(|| {
            for active in 0..64usize {
                black_box(card_indexes(black_box(active % 7), black_box(7)));
            }
        })
    });
}

fn bench_commit_cycle(c: &mut Criterion) {
    c.bench_function("gesture_commit_cycle", |b| {
        b.iter_batched(
            || {
                let runtime = Runtime::default();
                let mut config = SwiperConfig::new(Size::new(480.0, 800.0));
                config.infinite = true;
                config.stack_size = 3;
                let swiper = SwiperState::new(
                    runtime.handle(),
                    (0..8).collect::<Vec<u32>>(),
                    config,
                )
                .expect("valid deck");
                (runtime, swiper)
            },
            |(runtime, swiper)| {
                swiper.grant();
                swiper.drag_by(150.0, 0.0);
                swiper.release();
                let handle = runtime.handle();
                let mut time = 0u64;
                while handle.has_frame_callbacks() {
                    time += 16_666_667;
                    handle.drain_frame_callbacks(time);
                }
                black_box(swiper.active_index())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_classifier,
    bench_index_arithmetic,
    bench_commit_cycle
);
criterion_main!(benches);
