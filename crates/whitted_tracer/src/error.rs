//! Error types for scene construction and camera configuration.
//!
//! Only construction and configuration fail. Degenerate cases met while
//! tracing (parallel rays, grazing hits) are ordinary "no hit" results.

use thiserror::Error;

/// Errors raised while constructing geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("{0} must not be the zero vector")]
    ZeroVector(&'static str),

    #[error("plane points must be distinct and not collinear")]
    DegeneratePlane,

    #[error("polygon vertices {0} and {1} are identical")]
    DuplicateVertex(usize, usize),

    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f32),

    #[error("height must be positive, got {0}")]
    NonPositiveHeight(f32),

    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("polygon vertex {0} is not in the plane of the first three")]
    NonCoplanarVertex(usize),

    #[error("polygon is not convex at vertex {0}")]
    NonConvexPolygon(usize),
}

pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors raised by [`CameraBuilder::build`](crate::CameraBuilder::build).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("camera configuration is missing {0}")]
    Missing(&'static str),

    #[error("invalid camera {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },

    #[error("thread count must be -2 or higher, got {0}")]
    InvalidThreadCount(i32),
}

impl CameraError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

pub type CameraResult<T> = Result<T, CameraError>;

/// Errors raised while writing rendered images.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("pixel buffer does not match image size {width}x{height}")]
    BufferMismatch { width: u32, height: u32 },
}
