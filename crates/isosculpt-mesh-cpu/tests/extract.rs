use isosculpt_geom::Vec3;
use isosculpt_mesh_cpu::tables::tri_count;
use isosculpt_mesh_cpu::{
    SurfaceMesh, TriangleSoup, cube_config, extract, extract_into, extract_with_stats,
    interpolate_edge, polygonise_cube,
};
use isosculpt_volume::DensityVolume;
use proptest::prelude::*;

fn flat_volume(height: f32) -> DensityVolume {
    let mut vol = DensityVolume::new(4, 4, 4, 1.0, Vec3::new(0.0, -2.0, 0.0));
    let ys: Vec<f32> = (0..=4).map(|y| vol.world_y(y)).collect();
    vol.fill_with(|_, y, _| ys[y] - height);
    vol
}

#[test]
fn flat_ground_is_one_layer_of_upward_quads() {
    let vol = flat_volume(0.0);
    let (soup, stats) = extract_with_stats(&vol, 0.0);
    assert_eq!(stats.cells, 64);
    assert_eq!(stats.active_cells, 16);
    assert_eq!(stats.triangles, 32);
    assert_eq!(soup.vertex_count(), 96);
    assert!(soup.pos.iter().all(|p| p.y.abs() < 1e-6));
    assert!(soup.norm.iter().all(|n| (*n - Vec3::UP).length() < 1e-6));

    let mesh = SurfaceMesh::from_soup(soup);
    assert_eq!(mesh.height_range.min, 0.0);
    assert_eq!(mesh.height_range.max, 1.0);
    assert!(mesh.colors().iter().all(|c| *c == [1.0, 0.0, 0.0, 1.0]));
}

#[test]
fn uniform_volumes_produce_nothing() {
    let mut vol = DensityVolume::new(5, 4, 6, 0.5, Vec3::ZERO);
    vol.fill_with(|_, _, _| 3.0);
    assert!(extract(&vol, 0.0).is_empty());
    vol.fill_with(|_, _, _| -3.0);
    assert!(extract(&vol, 0.0).is_empty());
    // Every sample exactly on the iso level counts as outside
    vol.fill_with(|_, _, _| 0.0);
    assert!(extract(&vol, 0.0).is_empty());
}

#[test]
fn each_config_emits_its_table_triangles() {
    let vol = DensityVolume::new(1, 1, 1, 1.0, Vec3::ZERO);
    let base = vol.cube(0, 0, 0);
    let mut soup = TriangleSoup::default();
    for config in 0..=255u8 {
        let mut cube = base;
        for i in 0..8 {
            cube.val[i] = if config & (1 << i) != 0 { -1.0 } else { 1.0 };
        }
        assert_eq!(cube_config(&cube.val, 0.0), config);
        soup.clear_keep_capacity();
        let n = polygonise_cube(&cube, 0.0, &mut soup);
        assert_eq!(n, tri_count(config), "config {config:#04x}");
        assert_eq!(soup.vertex_count(), n * 3);
        // Symmetric densities put every crossing at an edge midpoint
        for p in &soup.pos {
            let halves = [p.x, p.y, p.z].iter().filter(|c| **c == 0.5).count();
            assert_eq!(halves, 1, "config {config:#04x} vertex {p:?}");
        }
    }
}

#[test]
fn extract_into_reuses_buffer() {
    let vol = flat_volume(0.3);
    let mut soup = TriangleSoup::default();
    let first = extract_into(&vol, 0.0, &mut soup);
    let cap = soup.pos.capacity();
    let second = extract_into(&vol, 0.0, &mut soup);
    assert_eq!(first, second);
    assert_eq!(soup.tri_count(), second.triangles);
    assert_eq!(soup.pos.capacity(), cap);
}

#[test]
fn iso_level_shifts_surface() {
    let vol = flat_volume(0.0);
    let soup = extract(&vol, 0.5);
    assert!(!soup.is_empty());
    assert!(soup.pos.iter().all(|p| (p.y - 0.5).abs() < 1e-5));
}

fn sphere_volume(r: f32) -> DensityVolume {
    let mut vol = DensityVolume::new(12, 12, 12, 0.5, Vec3::splat(-3.0));
    let origin = vol.origin();
    let vs = vol.voxel_size();
    vol.fill_with(|x, y, z| {
        let p = origin + Vec3::new(x as f32, y as f32, z as f32) * vs;
        p.length() - r
    });
    vol
}

#[test]
fn sphere_vertices_hug_the_radius() {
    let vol = sphere_volume(2.0);
    let soup = extract(&vol, 0.0);
    assert!(soup.tri_count() > 50);
    for p in &soup.pos {
        assert!((p.length() - 2.0).abs() < 0.5 * vol.voxel_size());
    }
    // Normals point away from the solid
    for [a, b, c] in soup.triangles() {
        let cr = (b - a).cross(c - a);
        if cr.length() < 1e-4 {
            continue;
        }
        let centre = (a + b + c) / 3.0;
        assert!(centre.dot(cr) > 0.0);
    }
}

proptest! {
    // Interpolated points stay on the segment between the edge endpoints
    #[test]
    fn interpolation_stays_on_segment(
        v1 in -10.0f32..10.0,
        v2 in -10.0f32..10.0,
        iso in -10.0f32..10.0,
        len in 0.1f32..4.0,
    ) {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = a + Vec3::new(len, 0.0, 0.0);
        let p = interpolate_edge(iso, a, b, v1, v2);
        prop_assert!(p.x >= a.x - 1e-5 && p.x <= b.x + 1e-5);
        prop_assert_eq!(p.y, a.y);
        prop_assert_eq!(p.z, a.z);
    }

    // A tilted plane meshes into triangles facing up its gradient
    #[test]
    fn plane_normals_follow_gradient(
        nx in -1.0f32..1.0,
        ny in 0.2f32..1.0,
        nz in -1.0f32..1.0,
        d in 0.5f32..2.5,
    ) {
        let g = Vec3::new(nx, ny, nz).normalized();
        let mut vol = DensityVolume::new(6, 6, 6, 0.5, Vec3::ZERO);
        let (origin, vs) = (vol.origin(), vol.voxel_size());
        vol.fill_with(|x, y, z| {
            let p = origin + Vec3::new(x as f32, y as f32, z as f32) * vs;
            p.dot(g) - d
        });
        let soup = extract(&vol, 0.0);
        prop_assert_eq!(soup.pos.len() % 3, 0);
        for [a, b, c] in soup.triangles() {
            let cr = (b - a).cross(c - a);
            if cr.length() < 1e-3 {
                continue;
            }
            prop_assert!(cr.normalized().dot(g) > 0.99);
        }
    }
}
