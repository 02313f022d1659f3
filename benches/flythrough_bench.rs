//! Benchmarks for the CPU side of the fly-through: per-frame pose lookup
//! and the one-off scene build.
#![allow(clippy::expect_used)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use wormhole::camera::follower::{CameraPathFollower, FollowerConfig};
use wormhole::options::{DisplayOptions, SceneOptions};
use wormhole::path::{wormhole_path, PathProvider};
use wormhole::scene::{self, edges, tube};

fn follower_pose_benchmark(c: &mut Criterion) {
    let path = wormhole_path().expect("wormhole path");
    let follower = CameraPathFollower::new(FollowerConfig::default())
        .expect("default follower");

    let _ = c.bench_function("follower_pose", |b| {
        b.iter(|| black_box(follower.pose(&path, black_box(12_345.0))))
    });

    let _ = c.bench_function("point_at", |b| {
        b.iter(|| black_box(path.point_at(black_box(0.37))))
    });
}

fn scene_build_benchmark(c: &mut Criterion) {
    let path = wormhole_path().expect("wormhole path");
    let options = SceneOptions {
        seed: Some(7),
        ..SceneOptions::default()
    };

    let mut group = c.benchmark_group("scene_build");
    let _ = group.sample_size(20);

    let _ = group.bench_function("tube", |b| {
        b.iter(|| {
            black_box(tube::build_tube(
                &path,
                options.tubular_segments,
                options.tube_radius,
                options.radial_segments,
            ))
        })
    });

    let mesh = tube::build_tube(
        &path,
        options.tubular_segments,
        options.tube_radius,
        options.radial_segments,
    );
    let _ = group.bench_function("feature_edges", |b| {
        b.iter(|| {
            black_box(edges::feature_edges(&mesh, options.edge_threshold_deg))
        })
    });

    let _ = group.bench_function("assemble", |b| {
        b.iter(|| {
            black_box(scene::assemble(
                &path,
                &options,
                &DisplayOptions::default(),
            ))
        })
    });
    group.finish();
}

criterion_group!(benches, follower_pose_benchmark, scene_build_benchmark);
criterion_main!(benches);
