//! Pixel scheduling and progress reporting for the render strategies.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A pixel coordinate: column `col` of row `row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub col: u32,
    pub row: u32,
}

/// Hands out every pixel of an image exactly once to any number of workers
/// and tracks completion.
#[derive(Debug)]
pub struct PixelManager {
    cols: u32,
    total: u64,
    next: AtomicU64,
    done: AtomicU64,
    print_interval: Option<Duration>,
    last_print: Mutex<Instant>,
}

impl PixelManager {
    /// Create a manager for a `rows × cols` image.
    ///
    /// Progress is logged every `print_interval` seconds; zero disables it.
    pub fn new(rows: u32, cols: u32, print_interval: f64) -> Self {
        let print_interval = (print_interval > 0.0).then(|| Duration::from_secs_f64(print_interval));
        Self {
            cols,
            total: rows as u64 * cols as u64,
            next: AtomicU64::new(0),
            done: AtomicU64::new(0),
            print_interval,
            last_print: Mutex::new(Instant::now()),
        }
    }

    /// Claim the next unrendered pixel, row by row.
    pub fn next_pixel(&self) -> Option<Pixel> {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        if index >= self.total {
            return None;
        }
        Some(Pixel {
            col: (index % self.cols as u64) as u32,
            row: (index / self.cols as u64) as u32,
        })
    }

    /// Record one finished pixel.
    pub fn pixel_done(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        let Some(interval) = self.print_interval else {
            return;
        };
        // Only one worker reports at a time; the others skip
        if let Ok(mut last) = self.last_print.try_lock() {
            if last.elapsed() >= interval || done == self.total {
                log::info!("Render progress: {:.1}%", self.percent(done));
                *last = Instant::now();
            }
        }
    }

    /// Number of finished pixels.
    pub fn done(&self) -> u64 {
        self.done.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    fn percent(&self, done: u64) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            done as f64 * 100.0 / self.total as f64
        }
    }
}
