//! Composite geometry.

use crate::{Geometry, Intersection};
use whitted_math::{Ray, Vec3};

/// Anything a ray can be intersected with: one surface or a group.
#[derive(Debug, Clone, PartialEq)]
pub enum Intersectable {
    Geometry(Geometry),
    Group(Geometries),
}

impl Intersectable {
    /// All hits with `t > 0`, or `None` if there are none.
    pub fn calculate_intersections(&self, ray: &Ray) -> Option<Vec<Intersection<'_>>> {
        match self {
            Intersectable::Geometry(geometry) => geometry.calculate_intersections(ray),
            Intersectable::Group(group) => group.calculate_intersections(ray),
        }
    }

    /// Hit points only.
    pub fn find_intersections(&self, ray: &Ray) -> Option<Vec<Vec3>> {
        points(self.calculate_intersections(ray))
    }
}

impl From<Geometry> for Intersectable {
    fn from(geometry: Geometry) -> Self {
        Intersectable::Geometry(geometry)
    }
}

impl From<Geometries> for Intersectable {
    fn from(group: Geometries) -> Self {
        Intersectable::Group(group)
    }
}

/// An ordered collection of intersectables, scanned linearly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometries {
    items: Vec<Intersectable>,
}

impl Geometries {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one item.
    pub fn add(&mut self, item: impl Into<Intersectable>) -> &mut Self {
        self.items.push(item.into());
        self
    }

    /// Add several items, keeping their order.
    pub fn add_all<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Intersectable>,
    {
        self.items.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Intersectable> {
        self.items.iter()
    }

    /// Concatenation of every child's hits.
    ///
    /// Returns `None`, never an empty list, when nothing is hit.
    pub fn calculate_intersections(&self, ray: &Ray) -> Option<Vec<Intersection<'_>>> {
        let mut total: Option<Vec<Intersection<'_>>> = None;
        for item in &self.items {
            if let Some(hits) = item.calculate_intersections(ray) {
                total.get_or_insert_with(Vec::new).extend(hits);
            }
        }
        total
    }

    /// Hit points only.
    pub fn find_intersections(&self, ray: &Ray) -> Option<Vec<Vec3>> {
        points(self.calculate_intersections(ray))
    }
}

impl<T: Into<Intersectable>> FromIterator<T> for Geometries {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

fn points(hits: Option<Vec<Intersection<'_>>>) -> Option<Vec<Vec3>> {
    hits.map(|hits| hits.into_iter().map(|hit| hit.point).collect())
}
