// Re-export glam for convenience
pub use glam::*;

// Whitted math types
mod ray;
mod util;
pub use ray::Ray;
pub use util::{align_zero, is_zero, EPSILON};
