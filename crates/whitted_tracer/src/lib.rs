//! Whitted - recursive CPU ray tracing
//!
//! Casts rays from a pinhole camera into a scene of analytic surfaces and
//! shades each hit with the Phong model, following reflected and refracted
//! rays until they stop contributing.

mod bucket;
mod camera;
mod error;
mod geometries;
mod geometry;
mod intersection;
mod light;
mod material;
mod pixel_manager;
mod renderer;
mod sampling;
mod scene;
mod tracer;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, CameraBuilder};
pub use error::{CameraError, CameraResult, GeometryError, GeometryResult, ImageError};
pub use geometries::{Geometries, Intersectable};
pub use geometry::{Cylinder, Geometry, Plane, Polygon, Shape, Sphere, Triangle, Tube};
pub use intersection::{closest_intersection, Intersection};
pub use light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::{below, Coefficient, Color, Material};
pub use pixel_manager::{Pixel, PixelManager};
pub use renderer::{color_to_rgba, ImageBuffer, ImageSink, Threading, SPARE_THREADS};
pub use sampling::SamplingGrid;
pub use scene::Scene;
pub use tracer::{RayTracer, SimpleRayTracer, INITIAL_K, MAX_CALC_COLOR_LEVEL, MIN_CALC_COLOR_K};

/// Re-export the math types used throughout the public API
pub use whitted_math::{Ray, Vec3};
