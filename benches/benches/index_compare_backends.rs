// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use drawboard_geom::{Aabb, World, WorldPoint, WorldVector};
use drawboard_index::{FlatIndex, QuadTree, QuadTreeOptions, SpatialIndex};

const WORLD: f64 = 10_000.0;

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

fn world() -> Aabb<World> {
    Aabb::new(-WORLD * 0.5, -WORLD * 0.5, WORLD, WORLD)
}

/// Boxes between 10 and 200 units wide, centered anywhere in the world.
fn gen_random_boxes(count: usize, seed: u64) -> Vec<Aabb<World>> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let cx = (rng.next_f64() - 0.5) * WORLD;
            let cy = (rng.next_f64() - 0.5) * WORLD;
            let w = 10.0 + rng.next_f64() * 190.0;
            let h = 10.0 + rng.next_f64() * 190.0;
            Aabb::from_center(WorldPoint::new(cx, cy), w, h)
        })
        .collect()
}

/// Tight clusters, the layout a user builds when grouping shapes.
fn gen_clustered_boxes(clusters: usize, per_cluster: usize) -> Vec<Aabb<World>> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(clusters * per_cluster);
    for _ in 0..clusters {
        let cx = (rng.next_f64() - 0.5) * WORLD * 0.8;
        let cy = (rng.next_f64() - 0.5) * WORLD * 0.8;
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * 300.0;
            let dy = (rng.next_f64() - 0.5) * 300.0;
            out.push(Aabb::from_center(WorldPoint::new(cx + dx, cy + dy), 24.0, 24.0));
        }
    }
    out
}

fn gen_probes(count: usize) -> Vec<Aabb<World>> {
    let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
    (0..count)
        .map(|_| {
            let x = ((rng.next_f64() - 0.5) * WORLD).floor();
            let y = ((rng.next_f64() - 0.5) * WORLD).floor();
            Aabb::new(x, y, 1.0, 1.0)
        })
        .collect()
}

fn fill<I: SpatialIndex<u32, ()>>(mut index: I, boxes: &[Aabb<World>]) -> I {
    for (i, b) in boxes.iter().copied().enumerate() {
        index.insert(i as u32, b, ());
    }
    index
}

fn bench_insert(c: &mut Criterion, name: &str, make_boxes: impl Fn(usize) -> Vec<Aabb<World>>) {
    let mut group = c.benchmark_group(name);
    for &n in &[256usize, 1024, 4096] {
        let boxes = make_boxes(n);
        group.throughput(Throughput::Elements(boxes.len() as u64));
        group.bench_function(BenchmarkId::new("FlatIndex", n), |b| {
            b.iter_batched(
                || FlatIndex::<u32, ()>::with_region(world()),
                |idx| fill(idx, &boxes),
                BatchSize::SmallInput,
            );
        });
        group.bench_function(BenchmarkId::new("QuadTree", n), |b| {
            b.iter_batched(
                || QuadTree::<u32, ()>::new(world(), QuadTreeOptions::default()),
                |idx| fill(idx, &boxes),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_point_queries(c: &mut Criterion) {
    let probes = gen_probes(512);
    let mut group = c.benchmark_group("point_query_random");
    for &n in &[256usize, 1024, 4096] {
        let boxes = gen_random_boxes(n, 0x3C6E_F35F_4750_2932);
        let flat = fill(FlatIndex::<u32, ()>::with_region(world()), &boxes);
        let tree = fill(
            QuadTree::<u32, ()>::new(world(), QuadTreeOptions::default()),
            &boxes,
        );
        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_function(BenchmarkId::new("FlatIndex", n), |b| {
            b.iter(|| {
                let mut hits = 0;
                for p in &probes {
                    hits += black_box(flat.query(*p)).len();
                }
                hits
            });
        });
        group.bench_function(BenchmarkId::new("QuadTree", n), |b| {
            b.iter(|| {
                let mut hits = 0;
                for p in &probes {
                    hits += black_box(tree.query(*p)).len();
                }
                hits
            });
        });
    }
    group.finish();
}

fn bench_capacity(c: &mut Criterion) {
    let boxes = gen_clustered_boxes(16, 256);
    let probes = gen_probes(512);
    let mut group = c.benchmark_group("quadtree_capacity_clustered");
    for &capacity in &[4usize, 8, 16, 32] {
        let options = QuadTreeOptions {
            capacity,
            ..QuadTreeOptions::default()
        };
        let tree = fill(QuadTree::<u32, ()>::new(world(), options), &boxes);
        group.bench_function(BenchmarkId::new("query", capacity), |b| {
            b.iter(|| {
                let mut hits = 0;
                for p in &probes {
                    tree.visit(*p, |_, _, _| hits += 1);
                }
                black_box(hits)
            });
        });
    }
    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let boxes = gen_random_boxes(2048, 0xFACE_FEED_CAFE_BABE);
    c.bench_function("quadtree_drag_update", |b| {
        b.iter_batched(
            || {
                fill(
                    QuadTree::<u32, ()>::new(world(), QuadTreeOptions::default()),
                    &boxes,
                )
            },
            |mut tree| {
                // One shape dragged across the world in small steps.
                let mut at = boxes[0];
                for _ in 0..200 {
                    at = at.translated(WorldVector::new(20.0, 15.0));
                    tree.update(0, at, ());
                }
                tree
            },
            BatchSize::SmallInput,
        );
    });
}

fn benches(c: &mut Criterion) {
    bench_insert(c, "insert_random", |n| {
        gen_random_boxes(n, 0x3C6E_F35F_4750_2932)
    });
    bench_insert(c, "insert_clustered", |n| gen_clustered_boxes(n / 64, 64));
    bench_point_queries(c);
    bench_capacity(c);
    bench_update(c);
}

criterion_group!(index_benches, benches);
criterion_main!(index_benches);
