use crate::Vec3;

/// A ray in 3D space with an origin and a unit-length direction.
///
/// The direction is normalized on construction, so `at(t)` measures `t` in
/// world units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Distance the origin of an offset ray is pushed off its surface.
    pub const DELTA: f32 = 0.1;

    /// Create a new ray, normalizing `direction`.
    ///
    /// `direction` must not be the zero vector. Use [`Ray::try_new`] when the
    /// direction comes from user input.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        debug_assert!(
            direction.length_squared() > 0.0,
            "ray direction must not be the zero vector"
        );
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a new ray, or `None` if `direction` cannot be normalized.
    pub fn try_new(origin: Vec3, direction: Vec3) -> Option<Self> {
        direction
            .try_normalize()
            .map(|direction| Self { origin, direction })
    }

    /// Create a ray leaving a surface point, nudged off the surface.
    ///
    /// The origin moves by [`Ray::DELTA`] along `normal`, towards the side of
    /// the surface that `direction` points into: against the normal when
    /// `normal · direction < 0`, along it otherwise.
    pub fn with_offset(point: Vec3, direction: Vec3, normal: Vec3) -> Self {
        let nd = normal.dot(direction);
        let delta = if nd < 0.0 { -Self::DELTA } else { Self::DELTA };
        Self::new(point + normal * delta, direction)
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Find the point closest to the ray origin.
    ///
    /// Ties keep the first point. Returns `None` for an empty slice.
    pub fn find_closest_point(&self, points: &[Vec3]) -> Option<Vec3> {
        let mut closest: Option<(Vec3, f32)> = None;
        for &p in points {
            let d = p.distance_squared(self.origin);
            match closest {
                Some((_, best)) if best <= d => {}
                _ => closest = Some((p, d)),
            }
        }
        closest.map(|(p, _)| p)
    }
}
