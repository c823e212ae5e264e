//! Benchmarks for the per-frame interpolation path.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use glam::{Quat, Vec3};
use showreel::animation::interpolation::{
    interpolate_pose, slerp_shortest, InterpolationContext, OrbitArc,
};
use showreel::animation::{Keyframe, KeyframeAnimator, KeyframeSequence};
use showreel::camera::{Camera, OrbitControls};
use showreel::options::ControlsOptions;
use web_time::{Duration, Instant};

fn slerp_benchmark(c: &mut Criterion) {
    let a = Quat::from_rotation_y(0.3);
    let b = Quat::from_xyzw(0.0, 0.9893, 0.0, -0.1457);
    let _ = c.bench_function("slerp_shortest", |bench| {
        bench.iter(|| black_box(slerp_shortest(black_box(a), black_box(b), 0.37)));
    });
}

fn pose_benchmark(c: &mut Criterion) {
    let from = Keyframe::new(Vec3::new(-1.28, 4.93, -2.71), Vec3::new(-0.19, 4.93, 0.91))
        .with_fovy(75.0)
        .with_orientation(Quat::from_rotation_y(2.8));
    let to = Keyframe::new(Vec3::new(-1.05, 0.2, -2.78), Vec3::new(0.04, 0.2, 0.84))
        .with_fovy(60.0)
        .with_orientation(Quat::from_rotation_y(3.0));
    let ctx = InterpolationContext::linear(0.5);
    let mut arc = OrbitArc::new();
    let _ = c.bench_function("interpolate_pose", |bench| {
        bench.iter(|| black_box(interpolate_pose(&from, &to, &ctx, &mut arc)));
    });
}

fn animator_step_benchmark(c: &mut Criterion) {
    let sequence: KeyframeSequence = (0..8)
        .map(|i| {
            let angle = i as f32 * 0.7;
            Keyframe::new(Vec3::new(angle.sin(), 0.5, angle.cos()) * 5.0, Vec3::ZERO)
                .with_duration_ms(1000.0)
        })
        .collect();
    let mut camera = Camera::new(75.0, 16.0 / 9.0, 0.01, 1000.0);
    let mut controls = OrbitControls::new(Vec3::ZERO, ControlsOptions::default());
    let mut animator = KeyframeAnimator::default();
    let t0 = Instant::now();
    animator.start(sequence, t0);

    let now = t0 + Duration::from_millis(400);
    let _ = c.bench_function("animator_step", |bench| {
        bench.iter(|| black_box(animator.step(now, &mut camera, &mut controls)));
    });
}

criterion_group!(benches, slerp_benchmark, pose_benchmark, animator_step_benchmark);
criterion_main!(benches);
