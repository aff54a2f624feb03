//! Sphere primitive.

use crate::error::{GeometryError, GeometryResult};
use whitted_math::{align_zero, Ray, Vec3};

/// A sphere given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> GeometryResult<Self> {
        if !(radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize()
    }

    /// Intersect by projecting the origin-to-center vector on the ray.
    ///
    /// `tm` is the projection length and `d` the distance from the center to
    /// the ray line. Tangent rays (`d == radius`) miss.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec<Vec3>> {
        let origin = ray.origin();
        if origin == self.center {
            return Some(vec![ray.at(self.radius)]);
        }

        let u = self.center - origin;
        let tm = ray.direction().dot(u);
        let d2 = (u.length_squared() - tm * tm).max(0.0);
        if align_zero(d2.sqrt() - self.radius) >= 0.0 {
            return None;
        }

        let th = (self.radius * self.radius - d2).sqrt();
        let hits: Vec<Vec3> = [tm - th, tm + th]
            .into_iter()
            .map(align_zero)
            .filter(|&t| t > 0.0)
            .map(|t| ray.at(t))
            .collect();

        (!hits.is_empty()).then_some(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere() -> Sphere {
        Sphere::new(Vec3::new(1.0, 0.0, 0.0), 1.0).unwrap()
    }

    #[test]
    fn test_sphere_rejects_bad_radius() {
        assert_eq!(
            Sphere::new(Vec3::ZERO, 0.0),
            Err(GeometryError::NonPositiveRadius(0.0))
        );
        assert!(Sphere::new(Vec3::ZERO, -1.0).is_err());
        assert!(Sphere::new(Vec3::ZERO, f32::NAN).is_err());
    }

    #[test]
    fn test_sphere_normal() {
        let sphere = unit_sphere();
        let n = sphere.normal_at(Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(n, Vec3::Z);
    }

    #[test]
    fn test_sphere_outside_origin() {
        let sphere = unit_sphere();

        // Ray misses the sphere
        let miss = Ray::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
        assert!(sphere.intersect(&miss).is_none());

        // Ray crosses the sphere: two hits
        let cross = Ray::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(3.0, 1.0, 0.0));
        let hits = sphere.intersect(&cross).unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits[0].abs_diff_eq(Vec3::new(0.0651530771, 0.355051025, 0.0), 1e-5));
        assert!(hits[1].abs_diff_eq(Vec3::new(1.53484692, 0.844948974, 0.0), 1e-5));

        // Ray starts after the sphere
        let after = Ray::new(Vec3::new(2.0, 1.0, 0.0), Vec3::new(3.0, 1.0, 0.0));
        assert!(sphere.intersect(&after).is_none());
    }

    #[test]
    fn test_sphere_inside_origin_has_one_hit() {
        let sphere = unit_sphere();

        let inside = Ray::new(Vec3::new(0.5, 0.5, 0.0), Vec3::new(3.0, 1.0, 0.0));
        assert_eq!(sphere.intersect(&inside).map(|h| h.len()), Some(1));

        // Starting at the center: hit at exactly one radius
        let center = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::Y);
        assert_eq!(sphere.intersect(&center), Some(vec![Vec3::new(1.0, 1.0, 0.0)]));
    }

    #[test]
    fn test_sphere_tangent_and_surface_cases() {
        let sphere = unit_sphere();

        // Tangent ray
        let tangent = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert!(sphere.intersect(&tangent).is_none());

        // Starting on the surface, going inward: the far side only
        let inward = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::X);
        let hits = sphere.intersect(&inward).unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-5));

        // Starting on the surface, going outward
        let outward = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::X);
        assert!(sphere.intersect(&outward).is_none());
    }
}
