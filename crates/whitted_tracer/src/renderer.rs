//! Image output and render strategies.
//!
//! Implements the three ways of filling an image:
//! - Sequential row/column loop
//! - Data-parallel buckets on the rayon thread pool
//! - A fixed pool of worker threads pulling pixels from a [`PixelManager`]

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::pixel_manager::{Pixel, PixelManager};
use crate::{Camera, CameraError, CameraResult, Color, ImageError, RayTracer};

/// Threads left free for the rest of the system by [`Threading::Auto`].
pub const SPARE_THREADS: usize = 2;

/// How pixels are distributed over threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Threading {
    /// One thread, row by row.
    #[default]
    Sequential,
    /// Image tiles on the rayon thread pool.
    DataParallel,
    /// A fixed number of worker threads sharing a pixel counter.
    Workers(usize),
    /// Workers sized from the available cores.
    Auto,
}

impl Threading {
    /// Decode the integer thread-count convention: `0` sequential, `-1`
    /// data-parallel, `-2` automatic, `n > 0` that many workers.
    pub fn from_count(count: i32) -> CameraResult<Self> {
        match count {
            0 => Ok(Threading::Sequential),
            -1 => Ok(Threading::DataParallel),
            -2 => Ok(Threading::Auto),
            n if n > 0 => Ok(Threading::Workers(n as usize)),
            n => Err(CameraError::InvalidThreadCount(n)),
        }
    }

    /// Replace [`Threading::Auto`] with a concrete worker count.
    pub fn resolve(self) -> Self {
        match self {
            Threading::Auto => {
                let cores = std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
                    .saturating_sub(SPARE_THREADS);
                Threading::Workers(if cores <= 2 { 1 } else { cores })
            }
            other => other,
        }
    }
}

/// Destination for rendered pixels.
pub trait ImageSink {
    /// Store the color of pixel `(x, y)`, `x` being the column.
    fn write_pixel(&mut self, x: u32, y: u32, color: Color);
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a color to 8-bit RGBA.
///
/// Channels are clamped to [0, 1]; no gamma is applied.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * clamp_01(color.x)) as u8;
    let g = (255.0 * clamp_01(color.y)) as u8;
    let b = (255.0 * clamp_01(color.z)) as u8;
    [r, g, b, 255]
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Encode the buffer as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        let image = image::RgbaImage::from_raw(self.width, self.height, self.to_rgba()).ok_or(
            ImageError::BufferMismatch {
                width: self.width,
                height: self.height,
            },
        )?;
        image.save_with_format(path.as_ref(), image::ImageFormat::Png)?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.as_ref().display());
        Ok(())
    }
}

impl ImageSink for ImageBuffer {
    fn write_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.set(x, y, color);
    }
}

/// Render every pixel of `camera` into `sink` using the camera's threading
/// strategy.
pub fn render(camera: &Camera, tracer: &dyn RayTracer, sink: &mut dyn ImageSink) {
    let (nx, ny) = camera.resolution();
    let strategy = camera.threading().resolve();
    log::info!("Rendering {}x{} ({:?})", nx, ny, strategy);
    let start = Instant::now();

    match strategy {
        Threading::Sequential => render_sequential(camera, tracer, sink),
        Threading::DataParallel => render_buckets(camera, tracer, sink),
        Threading::Workers(count) => render_workers(camera, tracer, sink, count),
        // resolve() never yields Auto
        Threading::Auto => render_workers(camera, tracer, sink, 1),
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
}

fn render_sequential(camera: &Camera, tracer: &dyn RayTracer, sink: &mut dyn ImageSink) {
    let (nx, ny) = camera.resolution();
    let progress = PixelManager::new(ny, nx, camera.print_interval());
    for row in 0..ny {
        for col in 0..nx {
            sink.write_pixel(col, row, camera.cast_ray(tracer, row, col));
            progress.pixel_done();
        }
    }
}

fn render_buckets(camera: &Camera, tracer: &dyn RayTracer, sink: &mut dyn ImageSink) {
    let (nx, ny) = camera.resolution();
    let buckets = generate_buckets(nx, ny, DEFAULT_BUCKET_SIZE);
    let progress = PixelManager::new(ny, nx, camera.print_interval());
    log::debug!("Rendering {} buckets on {} rayon threads", buckets.len(), rayon::current_num_threads());

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| BucketResult::new(*bucket, render_bucket(bucket, camera, tracer, &progress)))
        .collect();

    for result in &results {
        for (x, y, color) in result.iter() {
            sink.write_pixel(x, y, color);
        }
    }
}

fn render_workers(camera: &Camera, tracer: &dyn RayTracer, sink: &mut dyn ImageSink, count: usize) {
    let (nx, ny) = camera.resolution();
    let manager = PixelManager::new(ny, nx, camera.print_interval());
    log::debug!("Rendering with {} worker threads", count);

    let results: Vec<Vec<(Pixel, Color)>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..count.max(1))
            .map(|_| {
                s.spawn(|| {
                    let mut local = Vec::new();
                    while let Some(pixel) = manager.next_pixel() {
                        local.push((pixel, camera.cast_ray(tracer, pixel.row, pixel.col)));
                        manager.pixel_done();
                    }
                    local
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(pixels) => pixels,
                Err(payload) => std::panic::resume_unwind(payload),
            })
            .collect()
    });

    for (pixel, color) in results.into_iter().flatten() {
        sink.write_pixel(pixel.col, pixel.row, color);
    }
}
