use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use std::hint::black_box;
use wire_pole::geometry::{build_polyline, build_sphere_mesh, build_tube_mesh, TubeOptions};
use wire_pole::{CurveKind, RingFrame};

const START: Vec3 = Vec3::new(0.0, 0.0, 9.5);
const END: Vec3 = Vec3::new(48.0, 12.0, 10.5);

fn bench_polyline(c: &mut Criterion) {
    let mut group = c.benchmark_group("polyline");

    for kind in [CurveKind::Parabola, CurveKind::Catenary] {
        for &segments in &[16u32, 256u32] {
            group.bench_with_input(
                BenchmarkId::new(format!("{kind:?}"), segments),
                &segments,
                |b, &segments| {
                    b.iter(|| {
                        let points = build_polyline(
                            black_box(START),
                            black_box(END),
                            kind,
                            black_box(1.5),
                            segments,
                        )
                        .expect("Polyline fehlgeschlagen");
                        black_box(points.len())
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_tube(c: &mut Criterion) {
    let mut group = c.benchmark_group("tube_mesh");
    let polyline =
        build_polyline(START, END, CurveKind::Catenary, 1.5, 128).expect("Polyline fehlgeschlagen");

    for frame in [RingFrame::SegmentAligned, RingFrame::RotationMinimizing] {
        let options = TubeOptions {
            radius: 0.02,
            sides: 12,
            smooth: true,
            ring_frame: frame,
        };
        group.bench_with_input(
            BenchmarkId::new("sides_12", format!("{frame:?}")),
            &options,
            |b, options| {
                b.iter(|| {
                    let mesh = build_tube_mesh(black_box(&polyline), options)
                        .expect("Rohr fehlgeschlagen");
                    black_box(mesh.face_count())
                })
            },
        );
    }

    group.finish();
}

fn bench_sphere(c: &mut Criterion) {
    c.bench_function("sphere_mesh_32", |b| {
        b.iter(|| {
            let mesh = build_sphere_mesh(black_box(Vec3::ZERO), 0.2, black_box(32))
                .expect("Kugel fehlgeschlagen");
            black_box(mesh.vertex_count())
        })
    });
}

criterion_group!(benches, bench_polyline, bench_tube, bench_sphere);
criterion_main!(benches);
