//! Camera for ray generation.
//!
//! A [`Camera`] is configured through [`CameraBuilder`] and validated once at
//! [`CameraBuilder::build`]; a built camera never changes.

use crate::renderer::{self, ImageSink};
use crate::{
    CameraError, CameraResult, Color, ImageBuffer, RayTracer, SamplingGrid, Scene, SimpleRayTracer,
    Threading,
};
use whitted_math::{Ray, Vec2, Vec3};

/// Largest `|to · up|` accepted as orthogonal.
const ORTHOGONALITY_TOLERANCE: f32 = 1e-5;

/// Pinhole camera with a rectangular view plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    to: Vec3,
    up: Vec3,
    right: Vec3,

    // View plane
    vp_width: f32,
    vp_height: f32,
    vp_distance: f32,
    nx: u32,
    ny: u32,

    // Sampling
    anti_aliasing: u32,
    adaptive_depth: u32,

    threading: Threading,
    print_interval: f64,
}

impl Camera {
    /// Start configuring a camera.
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn to(&self) -> Vec3 {
        self.to
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Image size as `(columns, rows)`.
    pub fn resolution(&self) -> (u32, u32) {
        (self.nx, self.ny)
    }

    pub fn threading(&self) -> Threading {
        self.threading
    }

    /// Seconds between progress reports; zero when disabled.
    pub fn print_interval(&self) -> f64 {
        self.print_interval
    }

    fn pixel_width(&self) -> f32 {
        self.vp_width / self.nx as f32
    }

    fn pixel_height(&self) -> f32 {
        self.vp_height / self.ny as f32
    }

    /// Point on the view plane at pixel `(row, col)` shifted by a fraction
    /// of a pixel; `dx` grows to the right, `dy` grows downwards.
    fn view_plane_point(&self, row: u32, col: u32, dx: f32, dy: f32) -> Vec3 {
        let xj = (col as f32 + dx - (self.nx as f32 - 1.0) / 2.0) * self.pixel_width();
        let yi = -(row as f32 + dy - (self.ny as f32 - 1.0) / 2.0) * self.pixel_height();
        self.position + self.to * self.vp_distance + self.right * xj + self.up * yi
    }

    /// Ray from the camera through the center of pixel `(row, col)`.
    pub fn construct_ray(&self, row: u32, col: u32) -> Ray {
        self.construct_ray_offset(row, col, 0.0, 0.0)
    }

    /// Ray through pixel `(row, col)` shifted by `dx`, `dy` pixels, each in
    /// `[-0.5, 0.5]` to stay inside the pixel.
    pub fn construct_ray_offset(&self, row: u32, col: u32, dx: f32, dy: f32) -> Ray {
        let point = self.view_plane_point(row, col, dx, dy);
        Ray::new(self.position, point - self.position)
    }

    /// Color of pixel `(row, col)` using the configured sampling.
    pub fn cast_ray(&self, tracer: &dyn RayTracer, row: u32, col: u32) -> Color {
        if self.adaptive_depth > 0 {
            self.adaptive_super_sampling(tracer, row, col, Vec2::ZERO, 0.5, 0)
        } else if self.anti_aliasing < 2 {
            tracer.trace_ray(&self.construct_ray(row, col))
        } else {
            let grid = SamplingGrid::new(
                self.view_plane_point(row, col, 0.0, 0.0),
                self.pixel_width(),
                self.pixel_height(),
                self.right,
                self.up,
                self.anti_aliasing,
            );
            tracer.trace_beam(&grid.rays(self.position))
        }
    }

    /// Trace the corners of a square pixel region and subdivide it while they
    /// disagree. `center` is the region's offset from the pixel center and
    /// `half` its half side, both in pixels.
    fn adaptive_super_sampling(
        &self,
        tracer: &dyn RayTracer,
        row: u32,
        col: u32,
        center: Vec2,
        half: f32,
        depth: u32,
    ) -> Color {
        let corners = [
            (-half, -half),
            (half, -half),
            (-half, half),
            (half, half),
        ]
        .map(|(dx, dy)| {
            tracer.trace_ray(&self.construct_ray_offset(row, col, center.x + dx, center.y + dy))
        });

        if corners.iter().all(|&c| c == corners[0]) {
            return corners[0];
        }
        if depth >= self.adaptive_depth {
            return mean(&corners);
        }

        let quarter = half / 2.0;
        let quadrants = [
            (-quarter, -quarter),
            (quarter, -quarter),
            (-quarter, quarter),
            (quarter, quarter),
        ]
        .map(|(dx, dy)| {
            let sub = center + Vec2::new(dx, dy);
            self.adaptive_super_sampling(tracer, row, col, sub, quarter, depth + 1)
        });
        mean(&quadrants)
    }

    /// Render `scene` with the Whitted tracer.
    pub fn render(&self, scene: &Scene) -> ImageBuffer {
        self.render_with(&SimpleRayTracer::new(scene))
    }

    /// Render with any tracer into a new image buffer.
    pub fn render_with(&self, tracer: &dyn RayTracer) -> ImageBuffer {
        let mut image = ImageBuffer::new(self.nx, self.ny);
        self.render_to(tracer, &mut image);
        image
    }

    /// Render with any tracer into any sink.
    pub fn render_to(&self, tracer: &dyn RayTracer, sink: &mut dyn ImageSink) {
        renderer::render(self, tracer, sink);
    }

    /// Overwrite every `interval`-th row and column with `color`.
    pub fn print_grid(&self, sink: &mut dyn ImageSink, interval: u32, color: Color) {
        if interval == 0 {
            log::warn!("Grid interval must be positive, skipping grid");
            return;
        }
        for row in 0..self.ny {
            for col in 0..self.nx {
                if row % interval == 0 || col % interval == 0 {
                    sink.write_pixel(col, row, color);
                }
            }
        }
    }
}

fn mean(colors: &[Color; 4]) -> Color {
    colors.iter().fold(Color::ZERO, |acc, &c| acc + c) / 4.0
}

/// How the viewing direction was given.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Aim {
    /// Explicit, orthogonal forward and up vectors
    Vectors { to: Vec3, up: Vec3 },
    /// A point to look at plus an approximate up vector
    Target { target: Vec3, up_approx: Vec3 },
}

/// Fluent, by-value camera configuration.
///
/// Nothing is checked until [`CameraBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct CameraBuilder {
    location: Option<Vec3>,
    aim: Option<Aim>,
    vp_size: Option<(f32, f32)>,
    vp_distance: Option<f32>,
    resolution: (u32, u32),
    anti_aliasing: u32,
    adaptive_depth: u32,
    threading: Threading,
    print_interval: f64,
}

impl Default for CameraBuilder {
    fn default() -> Self {
        Self {
            location: None,
            aim: None,
            vp_size: None,
            vp_distance: None,
            resolution: (1, 1),
            anti_aliasing: 1,
            adaptive_depth: 0,
            threading: Threading::Sequential,
            print_interval: 0.0,
        }
    }
}

impl CameraBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Camera position.
    pub fn location(mut self, location: Vec3) -> Self {
        self.location = Some(location);
        self
    }

    /// Forward and up vectors; they must be orthogonal.
    pub fn direction(mut self, to: Vec3, up: Vec3) -> Self {
        self.aim = Some(Aim::Vectors { to, up });
        self
    }

    /// Look at `target`; the up vector is derived from `up_approx`.
    pub fn direction_to_target(mut self, target: Vec3, up_approx: Vec3) -> Self {
        self.aim = Some(Aim::Target { target, up_approx });
        self
    }

    /// Look at `target` with +Y as the approximate up vector.
    pub fn look_at(self, target: Vec3) -> Self {
        self.direction_to_target(target, Vec3::Y)
    }

    /// View plane width and height in world units.
    pub fn vp_size(mut self, width: f32, height: f32) -> Self {
        self.vp_size = Some((width, height));
        self
    }

    /// Distance from the camera to the view plane.
    pub fn vp_distance(mut self, distance: f32) -> Self {
        self.vp_distance = Some(distance);
        self
    }

    /// Image size in pixels: `nx` columns by `ny` rows.
    pub fn resolution(mut self, nx: u32, ny: u32) -> Self {
        self.resolution = (nx, ny);
        self
    }

    /// Rays per pixel on a regular grid; rounded down to a square number.
    pub fn anti_aliasing(mut self, samples: u32) -> Self {
        self.anti_aliasing = samples;
        self
    }

    /// Maximum subdivision depth of adaptive supersampling; 0 disables it.
    pub fn adaptive_super_sampling(mut self, depth: u32) -> Self {
        self.adaptive_depth = depth;
        self
    }

    pub fn threading(mut self, threading: Threading) -> Self {
        self.threading = threading;
        self
    }

    /// Log render progress every `interval` seconds; 0 disables it.
    pub fn debug_print(mut self, interval: f64) -> Self {
        self.print_interval = interval;
        self
    }

    /// Validate the configuration and produce a camera.
    pub fn build(self) -> CameraResult<Camera> {
        let position = self.location.ok_or(CameraError::Missing("location"))?;
        let aim = self.aim.ok_or(CameraError::Missing("direction"))?;
        let (vp_width, vp_height) = self.vp_size.ok_or(CameraError::Missing("view plane size"))?;
        let vp_distance = self.vp_distance.ok_or(CameraError::Missing("view plane distance"))?;

        if !(vp_width > 0.0 && vp_height > 0.0) || !vp_width.is_finite() || !vp_height.is_finite() {
            return Err(CameraError::invalid(
                "vp_size",
                format!("width and height must be positive, got {}x{}", vp_width, vp_height),
            ));
        }
        if !(vp_distance > 0.0) || !vp_distance.is_finite() {
            return Err(CameraError::invalid(
                "vp_distance",
                format!("distance must be positive, got {}", vp_distance),
            ));
        }

        let (to, up, right) = resolve_aim(aim, position)?;

        let (nx, ny) = self.resolution;
        if nx == 0 || ny == 0 {
            return Err(CameraError::invalid(
                "resolution",
                format!("resolution must be positive, got {}x{}", nx, ny),
            ));
        }

        if self.threading == Threading::Workers(0) {
            return Err(CameraError::invalid("threading", "worker count must be positive"));
        }
        if !(self.print_interval >= 0.0) || !self.print_interval.is_finite() {
            return Err(CameraError::invalid(
                "debug_print",
                format!("interval must be non-negative, got {}", self.print_interval),
            ));
        }

        let side = SamplingGrid::side_for(self.anti_aliasing);
        if self.anti_aliasing > 1 && side * side != self.anti_aliasing {
            log::warn!(
                "Anti-aliasing count {} is not a perfect square, using {} rays",
                self.anti_aliasing,
                side * side
            );
        }

        log::debug!(
            "Camera at {:?} looking {:?}, {}x{} pixels, {:?}",
            position,
            to,
            nx,
            ny,
            self.threading
        );

        Ok(Camera {
            position,
            to,
            up,
            right,
            vp_width,
            vp_height,
            vp_distance,
            nx,
            ny,
            anti_aliasing: self.anti_aliasing,
            adaptive_depth: self.adaptive_depth,
            threading: self.threading,
            print_interval: self.print_interval,
        })
    }
}

/// Turn an aim into unit `(to, up, right)` vectors.
fn resolve_aim(aim: Aim, position: Vec3) -> CameraResult<(Vec3, Vec3, Vec3)> {
    match aim {
        Aim::Vectors { to, up } => {
            let to = to
                .try_normalize()
                .ok_or_else(|| CameraError::invalid("direction", "forward vector must not be zero"))?;
            let up = up
                .try_normalize()
                .ok_or_else(|| CameraError::invalid("direction", "up vector must not be zero"))?;
            if to.dot(up).abs() > ORTHOGONALITY_TOLERANCE {
                return Err(CameraError::invalid(
                    "direction",
                    "forward and up vectors must be orthogonal",
                ));
            }
            let right = to
                .cross(up)
                .try_normalize()
                .ok_or_else(|| CameraError::invalid("direction", "forward and up vectors are parallel"))?;
            Ok((to, up, right))
        }
        Aim::Target { target, up_approx } => {
            let to = (target - position)
                .try_normalize()
                .ok_or_else(|| CameraError::invalid("direction", "target must differ from the location"))?;
            let right = to
                .cross(up_approx)
                .try_normalize()
                .ok_or_else(|| CameraError::invalid("direction", "up vector must not be parallel to the view direction"))?;
            let up = right.cross(to);
            Ok((to, up, right))
        }
    }
}
