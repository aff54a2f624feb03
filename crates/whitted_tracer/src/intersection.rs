//! Ray hit records.

use crate::{Color, Geometry, Material};
use whitted_math::{Ray, Vec3};

/// A point where a ray meets a surface.
///
/// `geometry` is `None` only for synthetic point lookups, which then carry
/// the default material.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// Surface that was hit
    pub geometry: Option<&'a Geometry>,
    /// Point of intersection
    pub point: Vec3,
    /// Material of the surface, copied at construction
    pub material: Material,
}

impl<'a> Intersection<'a> {
    pub fn new(geometry: Option<&'a Geometry>, point: Vec3) -> Self {
        Self {
            geometry,
            point,
            material: geometry.map(|g| *g.material()).unwrap_or_default(),
        }
    }

    /// Emission of the hit surface (black for synthetic hits).
    pub fn emission(&self) -> Color {
        self.geometry.map_or(Color::ZERO, Geometry::emission)
    }

    /// Surface normal at the hit, if there is a surface.
    pub fn normal(&self) -> Option<Vec3> {
        self.geometry.map(|g| g.normal_at(self.point))
    }
}

/// Two intersections are equal when they are on the same surface (by
/// identity, not value) at the same point.
impl PartialEq for Intersection<'_> {
    fn eq(&self, other: &Self) -> bool {
        let same_geometry = match (self.geometry, other.geometry) {
            (Some(a), Some(b)) => std::ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_geometry && self.point == other.point
    }
}

/// Pick the intersection nearest the ray origin; ties keep the first.
pub fn closest_intersection<'a>(
    ray: &Ray,
    intersections: impl IntoIterator<Item = Intersection<'a>>,
) -> Option<Intersection<'a>> {
    let origin = ray.origin();
    let mut closest: Option<(Intersection<'a>, f32)> = None;
    for hit in intersections {
        let d = hit.point.distance_squared(origin);
        match closest {
            Some((_, best)) if best <= d => {}
            _ => closest = Some((hit, d)),
        }
    }
    closest.map(|(hit, _)| hit)
}
