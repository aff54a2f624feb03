//! Recursive Whitted-style shading.
//!
//! Local effects follow the Phong model with transmission-weighted shadows;
//! global effects follow one reflected and one refracted ray per hit until
//! the recursion depth runs out or the accumulated attenuation becomes
//! negligible.

use crate::intersection::closest_intersection;
use crate::material::below;
use crate::{Color, Intersection, LightSource, Scene};
use whitted_math::{align_zero, Ray, Vec3};

/// Maximum recursion depth of a single primary ray.
pub const MAX_CALC_COLOR_LEVEL: u32 = 10;

/// Attenuation below which a branch is no longer traced.
pub const MIN_CALC_COLOR_K: f32 = 0.001;

/// Attenuation of a primary ray.
pub const INITIAL_K: Vec3 = Vec3::ONE;

/// Maps rays to colors.
pub trait RayTracer: Send + Sync {
    /// Color seen along one ray.
    fn trace_ray(&self, ray: &Ray) -> Color;

    /// Mean color of a beam of rays; black for an empty beam.
    fn trace_beam(&self, rays: &[Ray]) -> Color {
        if rays.is_empty() {
            return Color::ZERO;
        }
        let sum = rays
            .iter()
            .fold(Color::ZERO, |acc, ray| acc + self.trace_ray(ray));
        sum / rays.len() as f32
    }
}

/// Per-hit values shared by every light and secondary ray of that hit.
#[derive(Debug, Clone, Copy)]
struct ShadingContext {
    /// Incoming ray direction
    v: Vec3,
    /// Surface normal
    n: Vec3,
    /// `n · v`, never zero
    nv: f32,
}

/// Per-light values at one hit.
#[derive(Debug, Clone, Copy)]
struct LightContext<'l> {
    light: &'l LightSource,
    /// Unit vector from the light to the hit
    l: Vec3,
    nl: f32,
}

/// Build the shading context of a hit seen along `v`.
///
/// Returns `None` for grazing hits (`n · v ≈ 0`), which contribute black.
fn preprocess(hit: &Intersection<'_>, v: Vec3) -> Option<ShadingContext> {
    let n = hit.normal()?;
    let nv = align_zero(n.dot(v));
    if nv == 0.0 {
        return None;
    }
    Some(ShadingContext { v, n, nv })
}

/// Ray tracer over a borrowed scene.
#[derive(Debug, Clone, Copy)]
pub struct SimpleRayTracer<'a> {
    scene: &'a Scene,
}

impl<'a> SimpleRayTracer<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }

    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    fn find_closest_intersection(&self, ray: &Ray) -> Option<Intersection<'a>> {
        let hits = self.scene.geometries.calculate_intersections(ray)?;
        closest_intersection(ray, hits)
    }

    fn calc_color(
        &self,
        hit: &Intersection<'a>,
        ctx: &ShadingContext,
        level: u32,
        k: Vec3,
    ) -> Color {
        let local = self.calc_local_effects(hit, ctx);
        if level == 1 {
            local
        } else {
            local + self.calc_global_effects(hit, ctx, level, k)
        }
    }

    fn calc_local_effects(&self, hit: &Intersection<'a>, ctx: &ShadingContext) -> Color {
        let material = &hit.material;
        let mut color = self.scene.ambient_light.intensity() * material.ka + hit.emission();

        for light in &self.scene.lights {
            let l = light.direction_to(hit.point);
            let nl = align_zero(ctx.n.dot(l));
            // Light and viewer must be on the same side of the surface
            if align_zero(ctx.nv * nl) <= 0.0 {
                continue;
            }
            let lctx = LightContext { light, l, nl };
            let ktr = self.transparency(hit, ctx, &lctx);
            if below(ktr, MIN_CALC_COLOR_K) {
                continue;
            }
            let intensity = light.intensity_at(hit.point) * ktr;
            color += intensity * (self.diffusive(hit, &lctx) + self.specular(hit, ctx, &lctx));
        }

        color
    }

    fn diffusive(&self, hit: &Intersection<'a>, lctx: &LightContext<'_>) -> Vec3 {
        hit.material.kd * lctx.nl.abs()
    }

    fn specular(&self, hit: &Intersection<'a>, ctx: &ShadingContext, lctx: &LightContext<'_>) -> Vec3 {
        let r = lctx.l - ctx.n * (2.0 * lctx.nl);
        let minus_vr = -align_zero(ctx.v.dot(r));
        if minus_vr <= 0.0 {
            return Vec3::ZERO;
        }
        hit.material.ks * minus_vr.powi(hit.material.shininess as i32)
    }

    /// Fraction of a light that reaches the hit through the surfaces between
    /// them. Zero once the product of their `kt` becomes negligible.
    fn transparency(
        &self,
        hit: &Intersection<'a>,
        ctx: &ShadingContext,
        lctx: &LightContext<'_>,
    ) -> Vec3 {
        let shadow_ray = Ray::with_offset(hit.point, -lctx.l, ctx.n);
        let Some(blockers) = self.scene.geometries.calculate_intersections(&shadow_ray) else {
            return Vec3::ONE;
        };

        let light_distance = lctx.light.distance(hit.point);
        let mut ktr = Vec3::ONE;
        for blocker in blockers {
            if align_zero(blocker.point.distance(hit.point) - light_distance) >= 0.0 {
                continue;
            }
            ktr *= blocker.material.kt;
            if below(ktr, MIN_CALC_COLOR_K) {
                return Vec3::ZERO;
            }
        }
        ktr
    }

    fn calc_global_effects(
        &self,
        hit: &Intersection<'a>,
        ctx: &ShadingContext,
        level: u32,
        k: Vec3,
    ) -> Color {
        let material = &hit.material;
        let reflected = ctx.v - ctx.n * (2.0 * ctx.nv);
        let reflected = Ray::with_offset(hit.point, reflected, ctx.n);
        let refracted = Ray::with_offset(hit.point, ctx.v, ctx.n);

        self.calc_global_effect(&reflected, level, k, material.kr)
            + self.calc_global_effect(&refracted, level, k, material.kt)
    }

    fn calc_global_effect(&self, ray: &Ray, level: u32, k: Vec3, kx: Vec3) -> Color {
        let kkx = k * kx;
        if below(kkx, MIN_CALC_COLOR_K) {
            return Color::ZERO;
        }
        let Some(hit) = self.find_closest_intersection(ray) else {
            return self.scene.background * kx;
        };
        match preprocess(&hit, ray.direction()) {
            Some(ctx) => self.calc_color(&hit, &ctx, level - 1, kkx) * kx,
            None => Color::ZERO,
        }
    }
}

impl RayTracer for SimpleRayTracer<'_> {
    fn trace_ray(&self, ray: &Ray) -> Color {
        let Some(hit) = self.find_closest_intersection(ray) else {
            return self.scene.background;
        };
        match preprocess(&hit, ray.direction()) {
            Some(ctx) => self.calc_color(&hit, &ctx, MAX_CALC_COLOR_LEVEL, INITIAL_K),
            None => Color::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Geometries, Geometry, Material, Plane, PointLight, Sphere};

    /// Floor at z = 0 lit from straight above, optionally with a blocker
    /// sphere between floor and light.
    fn shadow_scene(blocker: Option<Material>) -> Scene {
        let mut geometries = Geometries::new();
        geometries.add(
            Geometry::new(Plane::new(Vec3::ZERO, Vec3::Z).unwrap())
                .with_material(Material::new().with_kd(1.0)),
        );
        if let Some(material) = blocker {
            geometries.add(
                Geometry::new(Sphere::new(Vec3::new(0.0, 0.0, 7.0), 1.0).unwrap())
                    .with_material(material),
            );
        }
        Scene::new("shadow")
            .with_geometries(geometries)
            .with_lights([PointLight::new(Color::ONE, Vec3::new(0.0, 0.0, 10.0))])
    }

    fn trace_floor(scene: &Scene) -> Color {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);
        SimpleRayTracer::new(scene).trace_ray(&ray)
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = Scene::new("empty").with_background(Color::new(0.1, 0.2, 0.3));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(SimpleRayTracer::new(&scene).trace_ray(&ray), Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_unblocked_diffuse() {
        let color = trace_floor(&shadow_scene(None));
        assert!(color.abs_diff_eq(Color::ONE, 1e-5), "got {:?}", color);
    }

    #[test]
    fn test_opaque_blocker_casts_full_shadow() {
        let color = trace_floor(&shadow_scene(Some(Material::new())));
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_transparent_blocker_passes_light() {
        let unblocked = trace_floor(&shadow_scene(None));
        let color = trace_floor(&shadow_scene(Some(Material::new().with_kt(1.0))));
        assert!(color.abs_diff_eq(unblocked, 1e-5), "got {:?}", color);
    }

    #[test]
    fn test_partial_transparency_scales_light() {
        let color = trace_floor(&shadow_scene(Some(Material::new().with_kt(0.5))));
        // Two surfaces of the blocker sphere
        assert!(color.abs_diff_eq(Color::splat(0.25), 1e-5), "got {:?}", color);
    }

    #[test]
    fn test_blocker_behind_light_is_ignored() {
        let mut scene = shadow_scene(None);
        scene.geometries.add(Geometry::new(Sphere::new(Vec3::new(0.0, 0.0, 20.0), 1.0).unwrap()));
        let color = trace_floor(&scene);
        assert!(color.abs_diff_eq(Color::ONE, 1e-5), "got {:?}", color);
    }

    #[test]
    fn test_parallel_mirrors_terminate() {
        let mirror = Material::new().with_kr(1.0);
        let emission = Color::splat(0.1);
        let mut geometries = Geometries::new();
        geometries
            .add(
                Geometry::new(Plane::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Z).unwrap())
                    .with_material(mirror)
                    .with_emission(emission),
            )
            .add(
                Geometry::new(Plane::new(Vec3::new(0.0, 0.0, -1.0), Vec3::Z).unwrap())
                    .with_material(mirror)
                    .with_emission(emission),
            );
        let scene = Scene::new("mirrors").with_geometries(geometries);

        let color = SimpleRayTracer::new(&scene).trace_ray(&Ray::new(Vec3::ZERO, Vec3::Z));

        // One emission per recursion level
        let expected = emission * MAX_CALC_COLOR_LEVEL as f32;
        assert!(color.abs_diff_eq(expected, 1e-4), "got {:?}", color);
    }

    /// Black surface with material `material` on the plane z = 1, seen from
    /// the origin along +Z, optionally with an emissive sphere behind it.
    fn layered_scene(material: Material, sphere_emission: Option<Color>) -> Scene {
        let mut geometries = Geometries::new();
        geometries.add(
            Geometry::new(Plane::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Z).unwrap()).with_material(material),
        );
        if let Some(emission) = sphere_emission {
            geometries.add(
                Geometry::new(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0).unwrap()).with_emission(emission),
            );
        }
        Scene::new("layered")
            .with_background(Color::new(0.2, 0.4, 0.8))
            .with_geometries(geometries)
    }

    #[test]
    fn test_refracted_miss_returns_scaled_background() {
        let scene = layered_scene(Material::new().with_kt(0.5), None);
        let color = SimpleRayTracer::new(&scene).trace_ray(&Ray::new(Vec3::ZERO, Vec3::Z));
        assert!(color.abs_diff_eq(Color::new(0.1, 0.2, 0.4), 1e-6), "got {:?}", color);
    }

    #[test]
    fn test_refraction_shows_emissive_sphere() {
        let scene = layered_scene(Material::new().with_kt(0.5), Some(Color::splat(0.4)));
        let color = SimpleRayTracer::new(&scene).trace_ray(&Ray::new(Vec3::ZERO, Vec3::Z));
        assert!(color.abs_diff_eq(Color::splat(0.2), 1e-6), "got {:?}", color);
    }

    #[test]
    fn test_mirror_reflects_emissive_sphere() {
        let emission = Color::new(0.3, 0.6, 0.9);
        let mut geometries = Geometries::new();
        geometries
            .add(Geometry::new(Plane::new(Vec3::ZERO, Vec3::Z).unwrap()).with_material(Material::new().with_kr(1.0)))
            .add(Geometry::new(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0).unwrap()).with_emission(emission));
        let scene = Scene::new("mirror")
            .with_background(Color::X)
            .with_geometries(geometries);

        // The sphere lies behind the ray origin, so only the reflection sees it
        let color = SimpleRayTracer::new(&scene).trace_ray(&Ray::new(Vec3::new(0.0, 0.0, 1.0), -Vec3::Z));
        assert!(color.abs_diff_eq(emission, 1e-6), "got {:?}", color);
    }

    #[test]
    fn test_grazing_view_is_invalid() {
        let plane = Geometry::new(Plane::new(Vec3::ZERO, Vec3::Z).unwrap());
        let hit = Intersection::new(Some(&plane), Vec3::ZERO);

        assert!(preprocess(&hit, Vec3::X).is_none());
        let ctx = preprocess(&hit, -Vec3::Z).unwrap();
        assert_eq!(ctx.nv, -1.0);
    }

    #[test]
    fn test_trace_beam_is_mean() {
        let scene = Scene::new("empty").with_background(Color::splat(0.4));
        let tracer = SimpleRayTracer::new(&scene);
        let rays = [Ray::new(Vec3::ZERO, Vec3::X), Ray::new(Vec3::ZERO, Vec3::Y)];

        assert!(tracer.trace_beam(&rays).abs_diff_eq(Color::splat(0.4), 1e-6));
        assert_eq!(tracer.trace_beam(&[]), Color::ZERO);
    }
}
