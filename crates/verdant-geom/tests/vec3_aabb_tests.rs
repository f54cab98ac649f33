use verdant_geom::{Aabb, Vec2i, Vec3, round_to_i32};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_constants() {
    assert!(vec3_approx_eq(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.0), 1e-6));
    assert!(vec3_approx_eq(Vec3::UP, Vec3::new(0.0, 1.0, 0.0), 1e-6));
}

#[test]
fn vec3_add_sub() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    let c = a + b;
    assert!(vec3_approx_eq(c, Vec3::new(-3.0, 7.0, -3.0), 1e-6));

    let d = c - a;
    assert!(vec3_approx_eq(d, b, 1e-6));
}

#[test]
fn vec3_scalar_mul_div() {
    let v = Vec3::new(1.5, -2.0, 4.0);
    let m = v * 2.0;
    assert!(vec3_approx_eq(m, Vec3::new(3.0, -4.0, 8.0), 1e-6));

    let d = m / 2.0;
    assert!(vec3_approx_eq(d, v, 1e-6));
}

#[test]
fn vec3_cross_and_normalized() {
    let i = Vec3::new(1.0, 0.0, 0.0);
    let k = Vec3::new(0.0, 0.0, 1.0);
    // Right-handed: z × x = y
    assert!(vec3_approx_eq(k.cross(i), Vec3::UP, 1e-6));

    let n = Vec3::new(3.0, 4.0, 0.0).normalized();
    assert!(vec3_approx_eq(n, Vec3::new(0.6, 0.8, 0.0), 1e-6));

    // Zero vector normalization should be a no-op (not NaN, unchanged)
    assert!(vec3_approx_eq(Vec3::ZERO.normalized(), Vec3::ZERO, 1e-6));
}

#[test]
fn planar_distance_ignores_height() {
    let a = Vec3::new(0.0, 100.0, 0.0);
    let b = Vec3::new(3.0, -50.0, 4.0);
    assert!(approx_eq(a.planar_distance(b), 5.0, 1e-6));
}

#[test]
fn rounding_ties_to_even() {
    assert_eq!(round_to_i32(0.5), 0);
    assert_eq!(round_to_i32(1.5), 2);
    assert_eq!(round_to_i32(2.5), 2);
    assert_eq!(round_to_i32(-0.5), 0);
    assert_eq!(round_to_i32(2.49), 2);
    assert_eq!(round_to_i32(2.51), 3);
}

#[test]
fn cell_of_rounds_xz() {
    let c = Vec2i::cell_of(Vec3::new(3.4, 9.0, -1.6));
    assert_eq!(c, Vec2i::new(3, -2));
    assert_eq!(c + Vec2i::new(1, 1), Vec2i::new(4, -1));
}

#[test]
fn neighbors_are_distinct_and_exclude_origin() {
    let n = Vec2i::NEIGHBORS_8;
    for (i, a) in n.iter().enumerate() {
        assert_ne!(*a, Vec2i::new(0, 0));
        assert!(a.x.abs() <= 1 && a.z.abs() <= 1);
        for b in &n[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn aabb_from_center_size_and_contains() {
    let aabb = Aabb::from_center_size(Vec3::new(5.0, 0.0, 5.0), Vec3::new(4.0, 2.0, 6.0));
    assert!(vec3_approx_eq(aabb.min, Vec3::new(3.0, -1.0, 2.0), 1e-6));
    assert!(vec3_approx_eq(aabb.max, Vec3::new(7.0, 1.0, 8.0), 1e-6));
    assert!(vec3_approx_eq(aabb.center(), Vec3::new(5.0, 0.0, 5.0), 1e-6));

    assert!(aabb.contains(Vec3::new(3.0, 1.0, 8.0)));
    assert!(!aabb.contains(Vec3::new(5.0, 1.5, 5.0)));
    assert!(aabb.contains_xz(Vec3::new(5.0, 1.5, 5.0)));
    assert!(!aabb.contains_xz(Vec3::new(7.01, 0.0, 5.0)));
}
