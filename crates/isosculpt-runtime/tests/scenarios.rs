use isosculpt_edit::BrushMode;
use isosculpt_geom::Vec3;
use isosculpt_runtime::Sculptor;
use isosculpt_world::TerrainConfig;
use proptest::prelude::*;

fn grid(n: usize, origin: [f32; 3]) -> TerrainConfig {
    let mut cfg = TerrainConfig::default();
    cfg.grid.size_x = n;
    cfg.grid.size_y = n;
    cfg.grid.size_z = n;
    cfg.grid.voxel_size = 1.0;
    cfg.grid.origin = origin;
    cfg
}

fn max_y(s: &Sculptor) -> f32 {
    s.mesh()
        .positions()
        .iter()
        .map(|p| p.y)
        .fold(f32::NEG_INFINITY, f32::max)
}

#[test]
fn flatten_gives_upward_plane() {
    let mut s = Sculptor::new(grid(4, [0.0, -2.0, 0.0])).unwrap();
    s.flatten(0.0);
    let mesh = s.mesh();
    assert_eq!(mesh.vertex_count(), 2 * 4 * 4 * 3);
    assert!(mesh.positions().iter().all(|p| p.y.abs() < 1e-6));
    assert!(mesh.normals().iter().all(|n| (*n - Vec3::UP).length() < 1e-6));
    assert_eq!(mesh.colors().len(), mesh.vertex_count());
    assert_eq!(mesh.indices().len(), mesh.vertex_count());
    let bb = mesh.soup.bounds().unwrap();
    assert_eq!(bb.min, Vec3::new(0.0, 0.0, 0.0));
    assert_eq!(bb.max, Vec3::new(4.0, 0.0, 4.0));
}

#[test]
fn brush_at_centre_raises_surface_locally() {
    let mut s = Sculptor::new(grid(8, [0.0; 3])).unwrap();
    s.flatten(4.0);
    let baseline = s.volume().clone();
    let flat_top = max_y(&s);
    assert!((flat_top - 4.0).abs() < 1e-6);

    let fp = s.apply_brush(Vec3::new(4.0, 4.0, 4.0), 2.0, 1.0, true);
    assert!(fp.touched > 0);
    assert!(max_y(&s) > flat_top + 0.5);

    // Raised vertices sit over the brush, not at the rim of the grid
    for p in s.mesh().positions() {
        if p.y > 4.0 + 1e-4 {
            let d = ((p.x - 4.0).powi(2) + (p.z - 4.0).powi(2)).sqrt();
            assert!(d < 2.0 + 1e-4, "raised vertex at {p:?}");
        }
    }

    let [sx, sy, sz] = s.volume().samples();
    for y in 0..sy {
        for z in 0..sz {
            for x in 0..sx {
                if !fp.bounds.contains(x, y, z) {
                    assert_eq!(baseline.get(x, y, z), s.volume().get(x, y, z));
                }
            }
        }
    }
}

#[test]
fn zero_strength_brush_keeps_mesh() {
    let mut s = Sculptor::new(grid(8, [0.0; 3])).unwrap();
    let before = s.mesh().positions().to_vec();
    s.apply_brush(Vec3::new(4.0, 4.0, 4.0), 3.0, 0.0, false);
    assert_eq!(s.mesh().positions(), &before[..]);
}

#[test]
fn generate_random_is_repeatable() {
    let mut a = Sculptor::new(grid(8, [0.0; 3])).unwrap();
    let mut b = Sculptor::new(grid(8, [0.0; 3])).unwrap();
    a.generate_random(42, 0.08, 0.8, 3, 0.5);
    b.flatten(1.0);
    b.generate_random(42, 0.08, 0.8, 3, 0.5);
    assert_eq!(a.volume().values(), b.volume().values());
    assert_eq!(a.mesh().positions(), b.mesh().positions());
    assert_eq!(a.noise_params().seed, 42);
}

#[test]
fn dig_stroke_carves_into_plane() {
    let mut s = Sculptor::new(grid(8, [0.0; 3])).unwrap();
    s.flatten(5.0);
    {
        let b = s.brush_settings_mut();
        b.radius = 1.5;
        b.strength = 2.0;
    }
    let stroke = s.stroke(Vec3::new(4.0, 5.0, 4.0), Vec3::new(0.0, -1.0, 0.0), BrushMode::Dig, false);
    let expected = stroke.points().count();
    let rev = s.revision();
    let applied = s.apply_stroke(&stroke);
    assert_eq!(applied, expected);
    assert_eq!(s.revision(), rev + applied as u64);
    // The hole bottoms out below the flat plane
    let min_y = s
        .mesh()
        .positions()
        .iter()
        .map(|p| p.y)
        .fold(f32::INFINITY, f32::min);
    assert!(min_y < 5.0 - 0.5);
}

#[test]
fn density_export_is_normalized_y_major() {
    let mut s = Sculptor::new(grid(4, [0.0; 3])).unwrap();
    s.flatten(2.0);
    let out = s.density_export();
    assert_eq!(out.len(), 5 * 5 * 5);
    assert!(out.iter().all(|v| (0.0..=1.0).contains(v)));
    // Row y has density y - 2, so rows map to 0, 0.25, 0.5, 0.75, 1
    for y in 0..5 {
        let row = &out[y * 25..(y + 1) * 25];
        let want = (y as f32 - 2.0 + 2.0) / 4.0;
        assert!(row.iter().all(|v| (*v - want).abs() < 1e-6));
    }
}

#[test]
fn reload_config_applies_or_rejects() {
    let mut s = Sculptor::new(grid(8, [0.0; 3])).unwrap();
    let mut next = grid(6, [1.0, 0.0, 1.0]);
    next.noise.seed = 7;
    next.brush.radius = 4.0;
    s.reload_config(next).unwrap();
    assert_eq!(s.volume().cells(), [6, 6, 6]);
    assert_eq!(s.volume().origin(), Vec3::new(1.0, 0.0, 1.0));
    assert_eq!(s.noise_params().seed, 7);
    assert_eq!(s.brush_settings().radius, 4.0);

    let mut bad = grid(6, [0.0; 3]);
    bad.grid.voxel_size = 0.0;
    assert!(s.reload_config(bad).is_err());
    assert_eq!(s.config().noise.seed, 7);
}

#[test]
fn configure_grid_reallocates_and_regenerates() {
    let mut s = Sculptor::new(grid(8, [0.0; 3])).unwrap();
    s.configure_grid(10, 6, 12, 0.5).unwrap();
    assert_eq!(s.volume().cells(), [10, 6, 12]);
    assert_eq!(s.volume().voxel_size(), 0.5);
    assert_eq!(s.stats().cells, 10 * 6 * 12);
}

#[test]
fn extreme_brush_inputs_do_not_corrupt_mesh() {
    let mut s = Sculptor::new(grid(8, [0.0; 3])).unwrap();
    s.flatten(4.0);
    let before = s.volume().values().to_vec();
    s.apply_brush(Vec3::new(-1e20, 4.0, 4.0), 2.0, 1.0, true);
    s.apply_brush(Vec3::splat(4.0), 1e20, 1.0, true);
    s.apply_brush(Vec3::splat(4.0), 1e-30, 1.0, false);
    assert_eq!(s.volume().values(), &before[..]);
    assert!(s.mesh().positions().iter().all(|p| p.is_finite()));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // Digging with the same brush undoes an add, up to float rounding
    #[test]
    fn add_then_dig_restores_density(
        cx in -2.0f32..10.0,
        cy in -2.0f32..10.0,
        cz in -2.0f32..10.0,
        radius in 0.5f32..4.0,
        strength in 0.0f32..3.0,
    ) {
        let mut s = Sculptor::new(grid(8, [0.0; 3])).unwrap();
        s.flatten(4.0);
        let before = s.volume().values().to_vec();
        let at = Vec3::new(cx, cy, cz);
        let added = s.apply_brush(at, radius, strength, true);
        let dug = s.apply_brush(at, radius, strength, false);
        prop_assert_eq!(added, dug);
        for (a, b) in before.iter().zip(s.volume().values()) {
            prop_assert!((a - b).abs() < 1e-5, "{} vs {}", a, b);
        }
    }
}
