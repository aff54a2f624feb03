//! Built-in demo scenes.
//!
//! Each scene comes with a camera aimed at it; the caller adds resolution,
//! sampling and threading.

use anyhow::Result;
use whitted_tracer::{
    AmbientLight, Camera, CameraBuilder, Color, Cylinder, DirectionalLight, Geometries, Geometry,
    LightSource, Material, Plane, PointLight, Polygon, Ray, Scene, Sphere, SpotLight, Triangle,
    Tube, Vec3,
};

use crate::cli::SceneChoice;

/// A scene and a camera framing it.
pub struct Demo {
    pub scene: Scene,
    pub camera: CameraBuilder,
    /// View plane width; the height follows the image aspect ratio
    pub vp_width: f32,
}

pub fn build(choice: SceneChoice) -> Result<Demo> {
    match choice {
        SceneChoice::Spheres => spheres(),
        SceneChoice::Snowman => snowman(),
        SceneChoice::Mirrors => mirrors(),
    }
}

fn spheres() -> Result<Demo> {
    let mut geometries = Geometries::new();
    geometries
        .add(
            Geometry::new(Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y)?)
                .with_emission(Color::splat(0.05))
                .with_material(Material::new().with_kd(0.4).with_ks(0.2).with_shininess(20).with_kr(0.3)),
        )
        .add(
            Geometry::new(Sphere::new(Vec3::new(-2.2, 0.0, -6.0), 1.0)?)
                .with_emission(Color::new(0.3, 0.05, 0.05))
                .with_material(Material::new().with_kd(0.5).with_ks(0.5).with_shininess(60)),
        )
        .add(
            Geometry::new(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0)?)
                .with_emission(Color::new(0.02, 0.05, 0.15))
                .with_material(Material::new().with_kd(0.2).with_ks(0.6).with_shininess(100).with_kt(0.6)),
        )
        .add(
            Geometry::new(Sphere::new(Vec3::new(2.2, 0.0, -6.5), 1.0)?)
                .with_material(Material::new().with_kd(0.1).with_ks(0.3).with_shininess(200).with_kr(0.8)),
        )
        .add(
            Geometry::new(Cylinder::new(
                Ray::new(Vec3::new(-4.0, -1.0, -9.0), Vec3::Y),
                0.5,
                3.0,
            )?)
            .with_emission(Color::new(0.1, 0.1, 0.02))
            .with_material(Material::new().with_kd(0.6).with_ks(0.2).with_shininess(30)),
        )
        .add(
            Geometry::new(Polygon::new(vec![
                Vec3::new(-6.0, -1.0, -12.0),
                Vec3::new(6.0, -1.0, -12.0),
                Vec3::new(6.0, 5.0, -12.0),
                Vec3::new(-6.0, 5.0, -12.0),
            ])?)
            .with_emission(Color::new(0.05, 0.08, 0.05))
            .with_material(Material::new().with_kd(0.5)),
        );

    let scene = Scene::new("spheres")
        .with_background(Color::new(0.05, 0.05, 0.1))
        .with_ambient_light(AmbientLight::new(Color::splat(0.1)))
        .with_geometries(geometries)
        .with_lights([
            LightSource::from(
                PointLight::new(Color::new(1.0, 0.9, 0.8), Vec3::new(-3.0, 4.0, -2.0))
                    .with_kl(0.02)
                    .with_kq(0.005),
            ),
            LightSource::from(DirectionalLight::new(Color::splat(0.25), Vec3::new(1.0, -1.0, -1.0))?),
        ]);

    let camera = Camera::builder()
        .location(Vec3::new(0.0, 1.0, 2.0))
        .look_at(Vec3::new(0.0, 0.0, -5.0))
        .vp_distance(1.0);

    Ok(Demo {
        scene,
        camera,
        vp_width: 1.2,
    })
}

fn snowman() -> Result<Demo> {
    let snow = Color::splat(0.55);
    let snow_material = Material::new().with_kd(0.4).with_ks(0.3).with_shininess(20);
    let coal = Color::new(0.02, 0.02, 0.15);
    let wood = Color::new(0.35, 0.18, 0.0);

    let ball = |center: Vec3, radius: f32| -> Result<Geometry> {
        Ok(Geometry::new(Sphere::new(center, radius)?)
            .with_emission(snow)
            .with_material(snow_material))
    };

    let mut geometries = Geometries::new();
    geometries
        .add(
            Geometry::new(Plane::new(Vec3::ZERO, Vec3::Z)?)
                .with_material(Material::new().with_kd(0.1).with_ks(0.1).with_kr(0.3)),
        )
        .add(ball(Vec3::new(0.0, 0.0, 0.45), 0.55)?)
        .add(ball(Vec3::new(0.0, 0.0, 1.23), 0.27)?)
        .add(ball(Vec3::new(0.0, 0.0, 1.62), 0.18)?)
        .add(
            Geometry::new(Triangle::new(
                Vec3::new(0.17, 0.0, 1.72),
                Vec3::new(0.17, 0.0, 1.58),
                Vec3::new(0.5, 0.0, 1.65),
            )?)
            .with_emission(Color::new(1.0, 0.55, 0.0)),
        )
        .add(
            Geometry::new(Triangle::new(
                Vec3::new(0.0, 0.2, 1.2),
                Vec3::new(0.0, 0.2, 1.3),
                Vec3::new(0.0, 1.0, 1.4),
            )?)
            .with_emission(wood),
        )
        .add(
            Geometry::new(Triangle::new(
                Vec3::new(0.0, -0.2, 1.2),
                Vec3::new(0.0, -0.2, 1.3),
                Vec3::new(0.0, -1.0, 1.4),
            )?)
            .with_emission(wood),
        )
        .add(Geometry::new(Sphere::new(Vec3::new(0.15, 0.1, 1.72), 0.02)?).with_emission(coal))
        .add(Geometry::new(Sphere::new(Vec3::new(0.13, -0.1, 1.72), 0.02)?).with_emission(coal));

    let scene = Scene::new("snowman")
        .with_background(Color::new(0.75, 0.85, 1.0))
        .with_geometries(geometries)
        .with_lights([
            LightSource::from(
                SpotLight::new(Color::ONE, Vec3::new(1.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 3.0))?
                    .with_kl(0.0005)
                    .with_kq(0.0005),
            ),
            LightSource::from(
                PointLight::new(Color::ONE, Vec3::new(0.0, 0.0, 30.0))
                    .with_kl(0.0005)
                    .with_kq(0.0005),
            ),
            LightSource::from(DirectionalLight::new(Color::new(0.5, 0.5, 0.0), Vec3::new(0.0, -1.0, -1.0))?),
        ]);

    let camera = Camera::builder()
        .location(Vec3::new(30.0, 15.0, 10.0))
        .direction_to_target(Vec3::new(0.0, 0.0, 0.9), Vec3::Z)
        .vp_distance(1000.0);

    Ok(Demo {
        scene,
        camera,
        vp_width: 90.0,
    })
}

fn mirrors() -> Result<Demo> {
    let mirror = Material::new().with_kd(0.05).with_kr(0.9);

    let mut geometries = Geometries::new();
    geometries
        .add(Geometry::new(Plane::new(Vec3::new(-3.0, 0.0, 0.0), Vec3::X)?).with_material(mirror))
        .add(Geometry::new(Plane::new(Vec3::new(3.0, 0.0, 0.0), -Vec3::X)?).with_material(mirror))
        .add(
            Geometry::new(Triangle::new(
                Vec3::new(-3.0, -1.0, 4.0),
                Vec3::new(3.0, -1.0, 4.0),
                Vec3::new(0.0, -1.0, -12.0),
            )?)
            .with_emission(Color::new(0.1, 0.1, 0.1))
            .with_material(Material::new().with_kd(0.6).with_ks(0.3).with_shininess(40)),
        )
        .add(
            Geometry::new(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0)?)
                .with_emission(Color::new(0.0, 0.1, 0.2))
                .with_material(Material::new().with_kd(0.2).with_ks(0.7).with_shininess(80).with_kt(0.5)),
        )
        .add(
            Geometry::new(Tube::new(Ray::new(Vec3::new(1.5, 0.0, -4.0), Vec3::Y), 0.3)?)
                .with_emission(Color::new(0.2, 0.05, 0.0))
                .with_material(Material::new().with_kd(0.5).with_ks(0.4).with_shininess(30)),
        );

    let scene = Scene::new("mirrors")
        .with_background(Color::new(0.02, 0.02, 0.02))
        .with_ambient_light(AmbientLight::new(Color::splat(0.08)))
        .with_geometries(geometries)
        .with_lights([
            LightSource::from(
                SpotLight::new(Color::new(0.9, 0.8, 0.6), Vec3::new(0.0, 4.0, 1.0), Vec3::new(0.0, -1.0, -0.6))?
                    .with_kl(0.01)
                    .with_narrow_beam(8),
            ),
            LightSource::from(PointLight::new(Color::splat(0.4), Vec3::new(-1.5, 2.0, 3.0)).with_kq(0.01)),
        ]);

    let camera = Camera::builder()
        .location(Vec3::new(0.5, 0.5, 6.0))
        .look_at(Vec3::new(0.0, 0.0, -2.0))
        .vp_distance(1.0);

    Ok(Demo {
        scene,
        camera,
        vp_width: 0.9,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_scene_builds_and_frames() {
        for choice in [SceneChoice::Spheres, SceneChoice::Snowman, SceneChoice::Mirrors] {
            let demo = build(choice).unwrap();
            assert!(!demo.scene.geometries.is_empty());
            assert!(!demo.scene.lights.is_empty());

            let camera = demo
                .camera
                .vp_size(demo.vp_width, demo.vp_width)
                .resolution(8, 8)
                .build()
                .unwrap();
            let image = camera.render(&demo.scene);
            assert_eq!(image.pixels.len(), 64);
        }
    }
}
