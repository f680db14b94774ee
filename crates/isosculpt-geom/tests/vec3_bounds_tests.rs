use isosculpt_geom::{Aabb, GridBox, Vec3, inverse_lerp, lerp};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_constants() {
    assert!(vec3_approx_eq(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.0), 1e-6));
    assert!(vec3_approx_eq(Vec3::ONE, Vec3::splat(1.0), 1e-6));
    assert!(vec3_approx_eq(Vec3::UP, Vec3::new(0.0, 1.0, 0.0), 1e-6));
}

#[test]
fn vec3_arithmetic() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    assert!(vec3_approx_eq(a + b, Vec3::new(-3.0, 7.0, -3.0), 1e-6));
    assert!(vec3_approx_eq((a + b) - a, b, 1e-6));
    assert!(vec3_approx_eq(-a, Vec3::new(-1.0, -2.0, -3.0), 1e-6));
    assert!(vec3_approx_eq(a * 2.0 / 2.0, a, 1e-6));

    let mut v = Vec3::ONE;
    v += Vec3::new(2.0, 3.0, 4.0);
    v -= Vec3::new(1.0, 1.0, 1.0);
    assert!(vec3_approx_eq(v, Vec3::new(2.0, 3.0, 4.0), 1e-6));
}

#[test]
fn vec3_cross_basis_and_normalize() {
    let i = Vec3::new(1.0, 0.0, 0.0);
    let j = Vec3::new(0.0, 1.0, 0.0);
    let k = Vec3::new(0.0, 0.0, 1.0);
    assert!(vec3_approx_eq(i.cross(j), k, 1e-6));
    assert!(vec3_approx_eq(j.cross(k), i, 1e-6));
    assert!(vec3_approx_eq(k.cross(i), j, 1e-6));

    let n = Vec3::new(3.0, 4.0, 0.0).normalized();
    assert!(vec3_approx_eq(n, Vec3::new(0.6, 0.8, 0.0), 1e-6));

    // Zero vector normalization is a no-op rather than NaN
    assert!(vec3_approx_eq(Vec3::ZERO.normalized(), Vec3::ZERO, 1e-6));
}

#[test]
fn vec3_lerp_endpoints_and_midpoint() {
    let a = Vec3::new(-2.0, 0.0, 4.0);
    let b = Vec3::new(2.0, 8.0, 0.0);
    assert!(vec3_approx_eq(a.lerp(b, 0.0), a, 1e-6));
    assert!(vec3_approx_eq(a.lerp(b, 1.0), b, 1e-6));
    assert!(vec3_approx_eq(a.lerp(b, 0.5), Vec3::new(0.0, 4.0, 2.0), 1e-6));
}

#[test]
fn aabb_from_points() {
    assert!(Aabb::from_points(&[]).is_none());
    let pts = [
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(-3.0, 2.0, 5.0),
        Vec3::new(0.0, 0.5, -2.0),
    ];
    let bb = Aabb::from_points(&pts).unwrap();
    assert!(vec3_approx_eq(bb.min, Vec3::new(-3.0, -1.0, -2.0), 1e-6));
    assert!(vec3_approx_eq(bb.max, Vec3::new(1.0, 2.0, 5.0), 1e-6));
    assert!(vec3_approx_eq(bb.size(), Vec3::new(4.0, 3.0, 7.0), 1e-6));
}

#[test]
fn grid_box_contains_and_volume() {
    let b = GridBox::new([1, 0, 2], [3, 1, 2]);
    assert_eq!(b.volume(), 3 * 2 * 1);
    assert!(b.contains(1, 0, 2));
    assert!(b.contains(3, 1, 2));
    assert!(!b.contains(0, 0, 2));
    assert!(!b.contains(3, 2, 2));

    let inverted = GridBox::new([4, 0, 0], [2, 5, 5]);
    assert_eq!(inverted.volume(), 0);
}

#[test]
fn scalar_lerp_and_inverse() {
    assert!(approx_eq(lerp(2.0, 6.0, 0.25), 3.0, 1e-6));
    assert!(approx_eq(inverse_lerp(-2.0, 2.0, 0.0), 0.5, 1e-6));
    assert!(approx_eq(inverse_lerp(-2.0, 2.0, -5.0), 0.0, 1e-6));
    assert!(approx_eq(inverse_lerp(-2.0, 2.0, 9.0), 1.0, 1e-6));
    // Degenerate range collapses to zero instead of dividing by zero
    assert!(approx_eq(inverse_lerp(1.0, 1.0, 3.0), 0.0, 1e-6));
}
