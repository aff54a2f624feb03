//! Infinite tube and finite cylinder.

use super::plane::Plane;
use crate::error::{GeometryError, GeometryResult};
use whitted_math::{align_zero, is_zero, Ray, Vec3};

/// An infinite cylinder around an axis ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tube {
    axis: Ray,
    radius: f32,
}

impl Tube {
    pub fn new(axis: Ray, radius: f32) -> GeometryResult<Self> {
        if !(radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self { axis, radius })
    }

    pub fn axis(&self) -> Ray {
        self.axis
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Normal of the lateral surface: the part of `point - p0` orthogonal to
    /// the axis, normalized.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        let p0 = self.axis.origin();
        let v = self.axis.direction();
        let t = v.dot(point - p0);
        let o = if is_zero(t) { p0 } else { p0 + v * t };
        (point - o).normalize()
    }

    /// Positive ray parameters where the ray crosses the lateral surface,
    /// in increasing order.
    ///
    /// Solves `|oc_perp + t * d_perp|^2 = r^2` with both vectors projected
    /// onto the plane orthogonal to the axis. Rays parallel to the axis and
    /// tangent rays miss.
    pub(crate) fn hit_distances(&self, ray: &Ray) -> Vec<f32> {
        let v = self.axis.direction();
        let d = ray.direction();
        let oc = ray.origin() - self.axis.origin();

        let d_perp = d - v * d.dot(v);
        let oc_perp = oc - v * oc.dot(v);

        let a = d_perp.length_squared();
        if is_zero(a) {
            return Vec::new();
        }

        let half_b = oc_perp.dot(d_perp);
        let c = oc_perp.length_squared() - self.radius * self.radius;
        let discriminant = align_zero(half_b * half_b - a * c);
        if discriminant <= 0.0 {
            return Vec::new();
        }

        let sqrt_disc = discriminant.sqrt();
        [(-half_b - sqrt_disc) / a, (-half_b + sqrt_disc) / a]
            .into_iter()
            .map(align_zero)
            .filter(|&t| t > 0.0)
            .collect()
    }

    pub fn intersect(&self, ray: &Ray) -> Option<Vec<Vec3>> {
        let hits: Vec<Vec3> = self
            .hit_distances(ray)
            .into_iter()
            .map(|t| ray.at(t))
            .collect();
        (!hits.is_empty()).then_some(hits)
    }
}

/// A tube cut to `height` along its axis and closed by two caps.
///
/// The base cap is centered on the axis origin, the top cap at
/// `origin + direction * height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    tube: Tube,
    height: f32,
}

impl Cylinder {
    pub fn new(axis: Ray, radius: f32, height: f32) -> GeometryResult<Self> {
        if !(height > 0.0) {
            return Err(GeometryError::NonPositiveHeight(height));
        }
        Ok(Self {
            tube: Tube::new(axis, radius)?,
            height,
        })
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn radius(&self) -> f32 {
        self.tube.radius()
    }

    /// Normal on the caps or the lateral surface.
    ///
    /// Points whose axial projection is ~0 lie on the base (`-axis`), ~height
    /// on the top (`+axis`); anything else uses the tube normal.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        let p0 = self.tube.axis().origin();
        let v = self.tube.axis().direction();
        if point == p0 {
            return -v;
        }

        let t = v.dot(point - p0);
        if is_zero(t) {
            return -v;
        }
        if is_zero(t - self.height) {
            return v;
        }
        self.tube.normal_at(point)
    }

    pub fn intersect(&self, ray: &Ray) -> Option<Vec<Vec3>> {
        let p0 = self.tube.axis().origin();
        let v = self.tube.axis().direction();
        let radius = self.tube.radius();

        // Lateral hits strictly between the caps
        let mut ts: Vec<f32> = self
            .tube
            .hit_distances(ray)
            .into_iter()
            .filter(|&t| {
                let s = v.dot(ray.at(t) - p0);
                align_zero(s) > 0.0 && align_zero(s - self.height) < 0.0
            })
            .collect();

        // Cap discs
        for center in [p0, p0 + v * self.height] {
            let cap = Plane::with_unit_normal(center, v);
            if let Some(t) = cap.hit_distance(ray) {
                if align_zero(ray.at(t).distance(center) - radius) < 0.0 {
                    ts.push(t);
                }
            }
        }

        if ts.is_empty() {
            return None;
        }
        ts.sort_by(f32::total_cmp);
        Some(ts.into_iter().map(|t| ray.at(t)).collect())
    }
}
