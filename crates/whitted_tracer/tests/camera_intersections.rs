//! Counts of camera rays meeting simple geometries on a 3x3 view plane.

use whitted_tracer::{Camera, Geometries, Geometry, Plane, Sphere, Triangle, Vec3};

fn camera() -> Camera {
    Camera::builder()
        .location(Vec3::new(0.0, 0.0, 0.5))
        .direction(-Vec3::Z, Vec3::Y)
        .vp_distance(1.0)
        .vp_size(3.0, 3.0)
        .resolution(3, 3)
        .build()
        .unwrap()
}

fn count_intersections(geometry: impl Into<Geometry>) -> usize {
    let camera = camera();
    let geometry: Geometry = geometry.into();
    let mut geometries = Geometries::new();
    geometries.add(geometry);

    let mut count = 0;
    for row in 0..3 {
        for col in 0..3 {
            let ray = camera.construct_ray(row, col);
            count += geometries.find_intersections(&ray).map_or(0, |hits| hits.len());
        }
    }
    count
}

fn sphere(radius: f32, center: Vec3) -> Sphere {
    Sphere::new(center, radius).unwrap()
}

#[test]
fn test_camera_ray_sphere_intersections() {
    // Small sphere in front of the view plane
    assert_eq!(count_intersections(sphere(1.0, Vec3::new(0.0, 0.0, -3.0))), 2);
    // Big sphere every ray passes through
    assert_eq!(count_intersections(sphere(2.5, Vec3::new(0.0, 0.0, -2.5))), 18);
    // Medium sphere: corner rays miss
    assert_eq!(count_intersections(sphere(2.0, Vec3::new(0.0, 0.0, -2.0))), 10);
    // Camera inside the sphere
    assert_eq!(count_intersections(sphere(4.0, Vec3::new(0.0, 0.0, -1.0))), 9);
    // Sphere behind the camera
    assert_eq!(count_intersections(sphere(0.2, Vec3::new(0.0, 0.0, 1.0))), 0);
    // Sphere off to the side
    assert_eq!(count_intersections(sphere(0.5, Vec3::new(2.0, 2.0, -4.0))), 0);
}

#[test]
fn test_camera_ray_plane_intersections() {
    let q0 = Vec3::new(0.0, 0.0, -5.0);
    // Facing the camera
    assert_eq!(count_intersections(Plane::new(q0, Vec3::Z).unwrap()), 9);
    // Slightly tilted
    assert_eq!(count_intersections(Plane::new(q0, Vec3::new(0.0, -0.5, 1.0)).unwrap()), 9);
    // Steep tilt: the top row runs parallel-ish and misses
    assert_eq!(count_intersections(Plane::new(q0, Vec3::new(0.0, 10.0, 1.0)).unwrap()), 6);
}

#[test]
fn test_camera_ray_triangle_intersections() {
    let small = Triangle::new(
        Vec3::new(0.0, 1.0, -2.0),
        Vec3::new(1.0, -1.0, -2.0),
        Vec3::new(-1.0, -1.0, -2.0),
    )
    .unwrap();
    assert_eq!(count_intersections(small), 1);

    let tall = Triangle::new(
        Vec3::new(0.0, 20.0, -2.0),
        Vec3::new(1.0, -1.0, -2.0),
        Vec3::new(-1.0, -1.0, -2.0),
    )
    .unwrap();
    assert_eq!(count_intersections(tall), 2);
}
