//! Convex planar polygons and triangles.

use super::plane::Plane;
use crate::error::{GeometryError, GeometryResult};
use whitted_math::{align_zero, is_zero, Ray, Vec3};

/// A convex polygon lying in a plane.
///
/// Vertices are kept in the given order; edges connect consecutive vertices
/// and the last vertex back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec3>,
    plane: Plane,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec3>) -> GeometryResult<Self> {
        let n = vertices.len();
        if n < 3 {
            return Err(GeometryError::TooFewVertices(n));
        }

        for i in 0..n {
            for j in i + 1..n {
                if vertices[i] == vertices[j] {
                    return Err(GeometryError::DuplicateVertex(i, j));
                }
            }
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        if n == 3 {
            return Ok(Self { vertices, plane });
        }

        let normal = plane.normal();
        for (i, v) in vertices.iter().enumerate().skip(3) {
            if !is_zero(normal.dot(*v - vertices[0])) {
                return Err(GeometryError::NonCoplanarVertex(i));
            }
        }

        // Every pair of consecutive edges must turn the same way around the normal.
        // The turn is the sine of the angle between the edges.
        let edge = |i: usize| vertices[(i + 1) % n] - vertices[i];
        let turn = |i: usize| {
            let (prev, next) = (edge((i + n - 1) % n), edge(i));
            align_zero(prev.cross(next).dot(normal) / (prev.length() * next.length()))
        };
        let positive = turn(0) > 0.0;
        for i in 0..n {
            let t = turn(i);
            if t == 0.0 || (t > 0.0) != positive {
                return Err(GeometryError::NonConvexPolygon(i));
            }
        }

        Ok(Self { vertices, plane })
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.plane.normal()
    }

    /// Intersect the supporting plane, then keep the hit only if it is
    /// strictly inside every edge.
    ///
    /// For each edge the sign of `d . ((vi - o) x (vj - o))` tells on which
    /// side of the edge the ray passes. All signs must agree; a zero sign
    /// means the ray meets an edge or a vertex, which counts as a miss.
    /// The cross product is normalized so the test does not depend on the
    /// size of the polygon.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec<Vec3>> {
        let t = self.plane.hit_distance(ray)?;

        let origin = ray.origin();
        let dir = ray.direction();
        let n = self.vertices.len();
        let mut positive = None;
        for i in 0..n {
            let vi = self.vertices[i] - origin;
            let vj = self.vertices[(i + 1) % n] - origin;
            let side = vi.cross(vj).try_normalize()?;
            let s = align_zero(dir.dot(side));
            if s == 0.0 {
                return None;
            }
            match positive {
                None => positive = Some(s > 0.0),
                Some(p) if p != (s > 0.0) => return None,
                Some(_) => {}
            }
        }

        Some(vec![ray.at(t)])
    }
}

/// A triangle: the three-vertex polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle(Polygon);

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> GeometryResult<Self> {
        Polygon::new(vec![a, b, c]).map(Self)
    }

    pub fn vertices(&self) -> &[Vec3] {
        self.0.vertices()
    }

    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        self.0.normal_at(point)
    }

    pub fn intersect(&self, ray: &Ray) -> Option<Vec<Vec3>> {
        self.0.intersect(ray)
    }
}
