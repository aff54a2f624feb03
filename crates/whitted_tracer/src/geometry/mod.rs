//! Analytic surfaces.
//!
//! [`Shape`] is the closed set of supported surfaces; [`Geometry`] attaches
//! an emission color and a [`Material`] to a shape.

mod plane;
mod polygon;
mod sphere;
mod tube;

pub use plane::Plane;
pub use polygon::{Polygon, Triangle};
pub use sphere::Sphere;
pub use tube::{Cylinder, Tube};

use crate::{Color, Intersection, Material};
use whitted_math::{Ray, Vec3};

/// One of the supported analytic surfaces.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Plane(Plane),
    Sphere(Sphere),
    Tube(Tube),
    Cylinder(Cylinder),
    Triangle(Triangle),
    Polygon(Polygon),
}

impl Shape {
    /// Unit normal at a point on the surface.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        match self {
            Shape::Plane(plane) => plane.normal(),
            Shape::Sphere(sphere) => sphere.normal_at(point),
            Shape::Tube(tube) => tube.normal_at(point),
            Shape::Cylinder(cylinder) => cylinder.normal_at(point),
            Shape::Triangle(triangle) => triangle.normal_at(point),
            Shape::Polygon(polygon) => polygon.normal_at(point),
        }
    }

    /// Points where the ray meets the surface at `t > 0`, or `None`.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec<Vec3>> {
        match self {
            Shape::Plane(plane) => plane.intersect(ray),
            Shape::Sphere(sphere) => sphere.intersect(ray),
            Shape::Tube(tube) => tube.intersect(ray),
            Shape::Cylinder(cylinder) => cylinder.intersect(ray),
            Shape::Triangle(triangle) => triangle.intersect(ray),
            Shape::Polygon(polygon) => polygon.intersect(ray),
        }
    }
}

macro_rules! impl_from_shape {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Shape {
                fn from(shape: $variant) -> Self {
                    Shape::$variant(shape)
                }
            }

            impl From<$variant> for Geometry {
                fn from(shape: $variant) -> Self {
                    Geometry::new(shape)
                }
            }
        )*
    };
}

impl_from_shape!(Plane, Sphere, Tube, Cylinder, Triangle, Polygon);

/// A shape with its emission color and surface material.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    shape: Shape,
    emission: Color,
    material: Material,
}

impl Geometry {
    /// Create a non-emissive geometry with the default material.
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            emission: Color::ZERO,
            material: Material::default(),
        }
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn emission(&self) -> Color {
        self.emission
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        self.shape.normal_at(point)
    }

    /// Intersections tagged with this geometry and its material.
    pub fn calculate_intersections(&self, ray: &Ray) -> Option<Vec<Intersection<'_>>> {
        self.shape.intersect(ray).map(|points| {
            points
                .into_iter()
                .map(|point| Intersection::new(Some(self), point))
                .collect()
        })
    }
}
