//! End-to-end renders through the camera, tracer and render strategies.

use std::sync::atomic::{AtomicUsize, Ordering};

use whitted_tracer::{
    AmbientLight, Camera, CameraBuilder, Color, Geometries, Geometry, LightSource, Material, Plane,
    PointLight, Ray, RayTracer, Scene, SpotLight, Sphere, Threading, Vec3,
};

/// Tracer that returns a fixed color and counts calls.
struct CountingTracer {
    color: Color,
    calls: AtomicUsize,
}

impl CountingTracer {
    fn new(color: Color) -> Self {
        Self {
            color,
            calls: AtomicUsize::new(0),
        }
    }
}

impl RayTracer for CountingTracer {
    fn trace_ray(&self, _ray: &Ray) -> Color {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.color
    }
}

/// White to the right of the view axis, black elsewhere.
struct SplitTracer {
    calls: AtomicUsize,
}

impl RayTracer for SplitTracer {
    fn trace_ray(&self, ray: &Ray) -> Color {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if ray.direction().x > 0.0 {
            Color::ONE
        } else {
            Color::ZERO
        }
    }
}

fn looking_down_z(location: Vec3) -> CameraBuilder {
    Camera::builder()
        .location(location)
        .direction(-Vec3::Z, Vec3::Y)
        .vp_distance(1.0)
        .vp_size(2.0, 2.0)
}

fn showcase_scene() -> Scene {
    let mut geometries = Geometries::new();
    geometries
        .add(
            Geometry::new(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0).unwrap())
                .with_emission(Color::new(0.2, 0.0, 0.1))
                .with_material(Material::new().with_kd(0.5).with_ks(0.5).with_shininess(30).with_kt(0.3)),
        )
        .add(
            Geometry::new(Sphere::new(Vec3::new(1.5, 0.5, -4.0), 0.7).unwrap())
                .with_material(Material::new().with_kd(0.3).with_kr(0.6)),
        )
        .add(
            Geometry::new(Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y).unwrap())
                .with_material(Material::new().with_kd(0.6).with_kr(0.2)),
        );

    Scene::new("showcase")
        .with_background(Color::new(0.1, 0.1, 0.2))
        .with_ambient_light(AmbientLight::new(Color::splat(0.05)))
        .with_geometries(geometries)
        .with_lights([
            LightSource::from(
                PointLight::new(Color::splat(0.8), Vec3::new(-2.0, 3.0, 0.0)).with_kl(0.01),
            ),
            LightSource::from(
                SpotLight::new(Color::splat(0.6), Vec3::new(2.0, 4.0, -1.0), Vec3::new(-0.3, -1.0, -0.5))
                    .unwrap()
                    .with_narrow_beam(4),
            ),
        ])
}

#[test]
fn test_unit_sphere_silhouette() {
    let mut geometries = Geometries::new();
    geometries.add(Geometry::new(Sphere::new(Vec3::ZERO, 1.0).unwrap()));
    let scene = Scene::new("silhouette")
        .with_background(Color::ONE)
        .with_geometries(geometries);

    let camera = Camera::builder()
        .location(Vec3::new(0.0, 0.0, 5.0))
        .direction(-Vec3::Z, Vec3::Y)
        .vp_distance(5.0)
        .vp_size(2.0, 2.0)
        .resolution(5, 5)
        .build()
        .unwrap();
    let image = camera.render(&scene);

    assert_eq!(image.get(2, 2), Color::ZERO);
    for (x, y) in [(0, 0), (4, 0), (0, 4), (4, 4)] {
        assert_eq!(image.get(x, y), Color::ONE, "corner ({}, {}) should miss", x, y);
    }
    for color in &image.pixels {
        assert!(*color == Color::ZERO || *color == Color::ONE);
    }
}

#[test]
fn test_point_light_falloff_on_plane() {
    let mut geometries = Geometries::new();
    geometries.add(
        Geometry::new(Plane::new(Vec3::ZERO, Vec3::Z).unwrap())
            .with_material(Material::new().with_kd(1.0).with_ks(0.0)),
    );
    let scene = Scene::new("falloff")
        .with_geometries(geometries)
        .with_lights([PointLight::new(Color::ONE, Vec3::new(0.0, 0.0, 2.0))]);

    // The view plane lies on the floor, one pixel per unit along x
    let camera = Camera::builder()
        .location(Vec3::new(0.0, 0.0, 10.0))
        .direction(-Vec3::Z, Vec3::Y)
        .vp_distance(10.0)
        .vp_size(9.0, 1.0)
        .resolution(9, 1)
        .build()
        .unwrap();
    let image = camera.render(&scene);

    let center = image.get(4, 0);
    assert!(center.abs_diff_eq(Color::ONE, 1e-5), "got {:?}", center);
    for x in 4..8 {
        assert!(
            image.get(x, 0).x > image.get(x + 1, 0).x,
            "intensity should fall off between {} and {}",
            x,
            x + 1
        );
    }
}

#[test]
fn test_single_sample_matches_single_ray() {
    let scene = showcase_scene();
    let plain = looking_down_z(Vec3::ZERO).resolution(12, 12).build().unwrap();
    let expected = plain.render(&scene);

    // 2 and 3 samples round down to a single grid cell
    for samples in [2, 3] {
        let one_cell = looking_down_z(Vec3::ZERO)
            .resolution(12, 12)
            .anti_aliasing(samples)
            .build()
            .unwrap();
        assert_eq!(one_cell.render(&scene), expected, "{} samples", samples);
    }
}

#[test]
fn test_anti_aliasing_traces_grid() {
    let tracer = CountingTracer::new(Color::new(0.25, 0.5, 0.75));
    let camera = looking_down_z(Vec3::ZERO)
        .resolution(3, 2)
        .anti_aliasing(9)
        .build()
        .unwrap();

    let image = camera.render_with(&tracer);
    assert_eq!(tracer.calls.load(Ordering::Relaxed), 3 * 2 * 9);
    for color in &image.pixels {
        assert!(color.abs_diff_eq(tracer.color, 1e-6));
    }
}

#[test]
fn test_adaptive_flat_background_stops_at_corners() {
    let tracer = CountingTracer::new(Color::new(0.3, 0.6, 0.9));
    let camera = looking_down_z(Vec3::ZERO)
        .resolution(2, 2)
        .adaptive_super_sampling(3)
        .build()
        .unwrap();

    let image = camera.render_with(&tracer);

    // Four corners per pixel, no subdivision
    assert_eq!(tracer.calls.load(Ordering::Relaxed), 2 * 2 * 4);
    for color in &image.pixels {
        assert_eq!(*color, tracer.color);
    }
}

#[test]
fn test_adaptive_subdivides_edges() {
    let tracer = SplitTracer {
        calls: AtomicUsize::new(0),
    };
    let camera = looking_down_z(Vec3::ZERO)
        .resolution(1, 1)
        .adaptive_super_sampling(1)
        .build()
        .unwrap();

    let color = camera.cast_ray(&tracer, 0, 0);

    // Left quadrants are black; right quadrants have a black edge on the axis
    assert!(color.abs_diff_eq(Color::splat(0.25), 1e-6), "got {:?}", color);
    assert_eq!(tracer.calls.load(Ordering::Relaxed), 4 + 4 * 4);
}

#[test]
fn test_threading_strategies_agree() {
    let scene = showcase_scene();
    let builder = looking_down_z(Vec3::new(0.0, 0.5, 2.0))
        .resolution(40, 30)
        .vp_size(2.0, 1.5);

    let sequential = builder.clone().build().unwrap().render(&scene);
    for threading in [Threading::DataParallel, Threading::Workers(3), Threading::Auto] {
        let image = builder.clone().threading(threading).build().unwrap().render(&scene);
        assert_eq!(image, sequential, "{:?} differs from sequential", threading);
    }
}

#[test]
fn test_threading_from_count_builds() {
    for count in [0, -1, -2, 4] {
        let threading = Threading::from_count(count).unwrap();
        let camera = looking_down_z(Vec3::ZERO)
            .resolution(4, 4)
            .threading(threading)
            .build()
            .unwrap();
        let image = camera.render(&Scene::new("empty").with_background(Color::X));
        assert!(image.pixels.iter().all(|&c| c == Color::X));
    }
    assert!(Threading::from_count(-3).is_err());
}
