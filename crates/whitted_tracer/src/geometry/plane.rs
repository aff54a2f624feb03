//! Infinite plane.

use crate::error::{GeometryError, GeometryResult};
use whitted_math::{align_zero, is_zero, Ray, Vec3};

/// An infinite plane through `q0` with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    q0: Vec3,
    normal: Vec3,
}

impl Plane {
    /// Create a plane from a point on it and its normal (need not be unit).
    pub fn new(q0: Vec3, normal: Vec3) -> GeometryResult<Self> {
        let normal = normal
            .try_normalize()
            .ok_or(GeometryError::ZeroVector("plane normal"))?;
        Ok(Self { q0, normal })
    }

    /// Create the plane through three points.
    ///
    /// The normal is `(p2 - p1) x (p3 - p1)`, normalized. Duplicate or
    /// collinear points do not define a plane.
    pub fn from_points(p1: Vec3, p2: Vec3, p3: Vec3) -> GeometryResult<Self> {
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        if e1.length_squared() == 0.0 || e2.length_squared() == 0.0 {
            return Err(GeometryError::DegeneratePlane);
        }
        let scale = e1.length() * e2.length();

        let cross = e1.cross(e2);
        // |e1 x e2| / (|e1||e2|) is the sine of the angle between the edges
        if is_zero(cross.length() / scale) {
            return Err(GeometryError::DegeneratePlane);
        }

        Ok(Self {
            q0: p1,
            normal: cross.normalize(),
        })
    }

    /// Plane from a normal already known to be unit length.
    pub(crate) fn with_unit_normal(q0: Vec3, normal: Vec3) -> Self {
        Self { q0, normal }
    }

    /// A point on the plane.
    pub fn point(&self) -> Vec3 {
        self.q0
    }

    /// The unit normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Ray parameter of the hit, if the ray meets the plane at `t > 0`.
    ///
    /// Rays parallel to the plane and rays starting on it miss.
    pub(crate) fn hit_distance(&self, ray: &Ray) -> Option<f32> {
        let origin = ray.origin();
        if origin == self.q0 {
            return None;
        }

        let nd = self.normal.dot(ray.direction());
        if is_zero(nd) {
            return None;
        }

        let t = align_zero(self.normal.dot(self.q0 - origin) / nd);
        (t > 0.0).then_some(t)
    }

    pub fn intersect(&self, ray: &Ray) -> Option<Vec<Vec3>> {
        self.hit_distance(ray).map(|t| vec![ray.at(t)])
    }
}
