use criterion::{Criterion, black_box, criterion_group, criterion_main};

use isosculpt_geom::Vec3;
use isosculpt_mesh_cpu::{SurfaceMesh, TriangleSoup, extract_into};
use isosculpt_volume::DensityVolume;

fn rolling_volume(sx: usize, sy: usize, sz: usize) -> DensityVolume {
    let mut vol = DensityVolume::new(sx, sy, sz, 0.5, Vec3::ZERO);
    let mid = sy as f32 * 0.25;
    vol.fill_with(|x, y, z| {
        let h = mid + (x as f32 * 0.2).sin() * 2.0 + (z as f32 * 0.15).cos() * 2.0;
        y as f32 * 0.5 - h
    });
    vol
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    for (name, dims) in [
        ("32x16x32", (32, 16, 32)),
        ("64x32x64", (64, 32, 64)),
        ("128x64x128", (128, 64, 128)),
    ] {
        let vol = rolling_volume(dims.0, dims.1, dims.2);
        let mut soup = TriangleSoup::default();
        group.bench_function(name, |b| {
            b.iter(|| {
                let stats = extract_into(&vol, 0.0, &mut soup);
                black_box(stats);
            })
        });
    }
    group.finish();
}

fn bench_colorize(c: &mut Criterion) {
    let vol = rolling_volume(64, 32, 64);
    let mut soup = TriangleSoup::default();
    extract_into(&vol, 0.0, &mut soup);
    c.bench_function("surface_mesh_64x32x64", |b| {
        b.iter(|| black_box(SurfaceMesh::from_soup(soup.clone())))
    });
}

criterion_group!(benches, bench_extract, bench_colorize);
criterion_main!(benches);
