// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};
use understory_gesture::rotation::RotationAccumulator;
use understory_gesture::{GestureEngine, GestureKind, TouchFrame, TouchPoint};

/// One contact dragging right with a little vertical jitter.
fn gen_drag(moves: usize, phase: f64) -> Vec<TouchFrame> {
    let mut frames = Vec::with_capacity(moves + 2);
    frames.push(TouchFrame::start(0.0, vec![TouchPoint::new(1, 20.0, 200.0)]));
    for i in 1..=moves {
        let x = 20.0 + 3.0 * i as f64;
        let y = 200.0 + 2.0 * (phase + 1.7 * i as f64).sin();
        frames.push(TouchFrame::moved(
            16.0 * i as f64,
            vec![TouchPoint::new(1, x, y)],
        ));
    }
    frames.push(TouchFrame::end(16.0 * (moves + 1) as f64, vec![]));
    frames
}

/// Two contacts twisting and spreading around a fixed center.
fn gen_twist(moves: usize) -> Vec<TouchFrame> {
    let c = Point::new(200.0, 200.0);
    let pair = |i: usize| {
        let f = i as f64;
        let r = Vec2::from_angle((4.0 * f).to_radians()) * (50.0 + 0.5 * f);
        let (a, b) = (c - r, c + r);
        vec![TouchPoint::new(1, a.x, a.y), TouchPoint::new(2, b.x, b.y)]
    };
    let mut frames = Vec::with_capacity(moves + 2);
    frames.push(TouchFrame::start(0.0, pair(0)));
    for i in 1..=moves {
        frames.push(TouchFrame::moved(16.0 * i as f64, pair(i)));
    }
    frames.push(TouchFrame::end(16.0 * (moves + 1) as f64, vec![]));
    frames
}

fn subscribed_engine() -> GestureEngine {
    let mut engine = GestureEngine::new(Rect::new(0.0, 0.0, 400.0, 400.0));
    for kind in GestureKind::ALL {
        engine.subscribe(kind, |event, history| {
            black_box((event.kind(), history.len()));
        });
    }
    engine
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_session");
    for &n in &[16usize, 64, 256] {
        let frames = gen_drag(n, 0.3);
        group.throughput(Throughput::Elements(frames.len() as u64));
        group.bench_function(format!("moves_n{}", n), |b| {
            b.iter_batched(
                subscribed_engine,
                |mut engine| {
                    for frame in &frames {
                        let _ = black_box(engine.handle(frame));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_twist(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_contact_session");
    for &n in &[16usize, 64, 256] {
        let frames = gen_twist(n);
        group.throughput(Throughput::Elements(frames.len() as u64));
        group.bench_function(format!("moves_n{}", n), |b| {
            b.iter_batched(
                subscribed_engine,
                |mut engine| {
                    for frame in &frames {
                        let _ = black_box(engine.handle(frame));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_taps(c: &mut Criterion) {
    let mut group = c.benchmark_group("taps");
    let mut frames = Vec::new();
    for i in 0..100 {
        let t = 1000.0 * i as f64;
        frames.push(TouchFrame::start(t, vec![TouchPoint::new(i, 50.0, 50.0)]));
        frames.push(TouchFrame::end(t + 60.0, vec![]));
    }
    group.throughput(Throughput::Elements(frames.len() as u64));
    group.bench_function("tap_x100", |b| {
        b.iter_batched(
            subscribed_engine,
            |mut engine| {
                for frame in &frames {
                    let _ = black_box(engine.handle(frame));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_rotation_accumulator(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotation_accumulator");
    let angles: Vec<f64> = (0..4096).map(|i| (7.0 * i as f64) % 360.0).collect();
    group.throughput(Throughput::Elements(angles.len() as u64));
    group.bench_function("push_4096", |b| {
        b.iter(|| {
            let mut acc = RotationAccumulator::new();
            for &a in &angles {
                black_box(acc.push(a));
            }
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_drag,
    bench_twist,
    bench_taps,
    bench_rotation_accumulator,
);
criterion_main!(benches);
