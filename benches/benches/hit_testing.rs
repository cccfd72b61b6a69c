// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use drawboard_geom::ViewPoint;
use drawboard_shape::{Ellipse, Rectangle};
use drawboard_stage::{Stage, StageOptions};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// A stage with `n` shapes scattered over a 4000 x 4000 area around the
/// origin, with the camera centered on the origin.
fn populated_stage(n: usize) -> Stage {
    let mut stage = Stage::new(StageOptions::default());
    stage.camera_mut().translate(-400.0, -300.0);
    let mut rng = Rng::new(0x5EED_0000_D2A4_B0A2);
    for i in 0..n {
        let x = (rng.next_f64() - 0.5) * 4000.0;
        let y = (rng.next_f64() - 0.5) * 4000.0;
        let w = 10.0 + rng.next_f64() * 90.0;
        let h = 10.0 + rng.next_f64() * 90.0;
        let id = if i % 2 == 0 {
            stage.add_shape(Rectangle::new(w, h))
        } else {
            stage.add_shape(Ellipse::new(w * 0.5, h * 0.5))
        };
        let _ = stage.translate_shape_to(&id, x, y);
        let _ = stage.rotate_shape_to(&id, rng.next_f64() * 360.0);
    }
    stage
}

fn gen_view_points(count: usize) -> Vec<ViewPoint> {
    let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
    (0..count)
        .map(|_| ViewPoint::new(rng.next_f64() * 800.0, rng.next_f64() * 600.0))
        .collect()
}

fn bench_hit(c: &mut Criterion) {
    let points = gen_view_points(64);
    let mut group = c.benchmark_group("stage_hit");
    group.sample_size(20);
    for &n in &[100usize, 1000, 5000] {
        let mut stage = populated_stage(n);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(BenchmarkId::new("two_phase", n), |b| {
            b.iter(|| {
                let mut hits = 0;
                for p in &points {
                    if black_box(stage.hit(*p)).is_some() {
                        hits += 1;
                    }
                }
                hits
            });
        });
    }
    group.finish();
}

fn bench_broad_phase(c: &mut Criterion) {
    let points = gen_view_points(256);
    let mut group = c.benchmark_group("stage_broad_phase");
    for &n in &[100usize, 1000, 5000] {
        let stage = populated_stage(n);
        let worlds: Vec<_> = points
            .iter()
            .map(|p| stage.camera().to_world_point(*p))
            .collect();
        group.throughput(Throughput::Elements(worlds.len() as u64));
        group.bench_function(BenchmarkId::new("candidates", n), |b| {
            b.iter(|| {
                let mut found = 0;
                for w in &worlds {
                    found += black_box(stage.collision_detector().candidates(*w)).len();
                }
                found
            });
        });
    }
    group.finish();
}

criterion_group!(hit_benches, bench_hit, bench_broad_phase);
criterion_main!(hit_benches);
