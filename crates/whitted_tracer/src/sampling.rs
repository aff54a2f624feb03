//! Regular sub-pixel sampling grid.

use whitted_math::{Ray, Vec3};

/// A square grid of sample points spanning one pixel of the view plane.
///
/// The grid holds `side × side` cells; one ray is cast through the center of
/// each cell. A single-cell grid yields exactly the pixel center ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingGrid {
    center: Vec3,
    height: f32,
    width: f32,
    x: Vec3,
    y: Vec3,
    side: u32,
}

impl SamplingGrid {
    /// Grid side length for a requested sample count: `⌊√n⌋`, at least 1.
    pub fn side_for(samples: u32) -> u32 {
        ((samples as f64).sqrt().floor() as u32).max(1)
    }

    /// Create a grid of about `samples` cells centered on `center`.
    ///
    /// `x` and `y` are the unit right and up vectors of the view plane.
    pub fn new(center: Vec3, width: f32, height: f32, x: Vec3, y: Vec3, samples: u32) -> Self {
        Self {
            center,
            height,
            width,
            x,
            y,
            side: Self::side_for(samples),
        }
    }

    /// Number of cells along each axis.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Number of rays produced by [`SamplingGrid::rays`].
    pub fn sample_count(&self) -> usize {
        (self.side * self.side) as usize
    }

    /// Rays from `origin` through every cell center, row by row from the top.
    pub fn rays(&self, origin: Vec3) -> Vec<Ray> {
        if self.side == 1 {
            return vec![Ray::new(origin, self.center - origin)];
        }

        let n = self.side as f32;
        let cell_w = self.width / n;
        let cell_h = self.height / n;
        let half = (n - 1.0) / 2.0;

        let mut rays = Vec::with_capacity(self.sample_count());
        for row in 0..self.side {
            let dy = -(row as f32 - half) * cell_h;
            for col in 0..self.side {
                let dx = (col as f32 - half) * cell_w;
                let point = self.center + self.x * dx + self.y * dy;
                rays.push(Ray::new(origin, point - origin));
            }
        }
        rays
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_rounds_down() {
        assert_eq!(SamplingGrid::side_for(0), 1);
        assert_eq!(SamplingGrid::side_for(1), 1);
        assert_eq!(SamplingGrid::side_for(4), 2);
        assert_eq!(SamplingGrid::side_for(8), 2);
        assert_eq!(SamplingGrid::side_for(81), 9);
    }

    #[test]
    fn test_single_sample_is_center_ray() {
        let origin = Vec3::new(0.0, 0.0, 1.0);
        let center = Vec3::new(0.3, -0.2, -1.0);
        let grid = SamplingGrid::new(center, 0.5, 0.5, Vec3::X, Vec3::Y, 1);

        let rays = grid.rays(origin);
        assert_eq!(rays, vec![Ray::new(origin, center - origin)]);
    }

    #[test]
    fn test_cell_centers() {
        let grid = SamplingGrid::new(Vec3::new(0.0, 0.0, -1.0), 2.0, 2.0, Vec3::X, Vec3::Y, 4);
        let rays = grid.rays(Vec3::ZERO);
        assert_eq!(rays.len(), 4);

        // Top-left first, then row by row
        let expected = [
            Vec3::new(-0.5, 0.5, -1.0),
            Vec3::new(0.5, 0.5, -1.0),
            Vec3::new(-0.5, -0.5, -1.0),
            Vec3::new(0.5, -0.5, -1.0),
        ];
        for (ray, point) in rays.iter().zip(expected) {
            assert!(ray.direction().abs_diff_eq(point.normalize(), 1e-6));
        }
    }
}
