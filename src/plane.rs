use serde::{Deserialize, Serialize};

use crate::sphere::Sphere;
use crate::vector::{Vector2, Vector3};

/// Coordinate differences below this are treated as an axis-parallel line.
const AXIS_PARALLEL_EPS: f64 = 1e-6;

/// A plane given by three points and an explicit normal.
///
/// The normal is taken as supplied. Callers are responsible for it being unit length and
/// oriented consistently with the three points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub p1: Vector3,
    pub p2: Vector3,
    pub p3: Vector3,
    pub normal: Vector3,
}

/// Wire shape of a [`Plane`]. Field order is part of the format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneJson {
    pub normal: [f64; 3],
    pub p1: [f64; 3],
    pub p2: [f64; 3],
    pub p3: [f64; 3],
}

/// A line in the X-Z projection, with the projected Z playing the role of `y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineEquation {
    /// `x = c`
    Vertical(f64),
    /// `y = c`
    Horizontal(f64),
    /// `y = slope * x + intercept`
    Sloped { slope: f64, intercept: f64 },
}

impl LineEquation {
    /// The line through two points, classified as vertical or horizontal when the
    /// corresponding coordinate difference is below `1e-6`.
    pub fn through(p1: Vector2, p2: Vector2) -> Self {
        let x_diff = p2.x - p1.x;
        let y_diff = p2.y - p1.y;
        if x_diff.abs() < AXIS_PARALLEL_EPS {
            LineEquation::Vertical(p1.x)
        } else if y_diff.abs() < AXIS_PARALLEL_EPS {
            LineEquation::Horizontal(p1.y)
        } else {
            let slope = y_diff / x_diff;
            LineEquation::Sloped { slope, intercept: p1.y - p1.x * slope }
        }
    }

    /// `y` at the given `x`. Axis-parallel lines return their constant.
    pub fn y_at(&self, x: f64) -> f64 {
        match *self {
            LineEquation::Sloped { slope, intercept } => slope * x + intercept,
            LineEquation::Vertical(c) | LineEquation::Horizontal(c) => c,
        }
    }

    /// `x` at the given `y`. Axis-parallel lines return their constant.
    pub fn x_at(&self, y: f64) -> f64 {
        match *self {
            LineEquation::Sloped { slope, intercept } => (y - intercept) / slope,
            LineEquation::Vertical(c) | LineEquation::Horizontal(c) => c,
        }
    }
}

impl Plane {
    pub fn new(p1: Vector3, p2: Vector3, p3: Vector3, normal: Vector3) -> Self {
        Self { p1, p2, p3, normal }
    }

    /// Mirror reflection of `p` across this plane.
    pub fn invert_on_point(&self, p: Vector3) -> Vector3 {
        let pos = p - self.p1;
        let dp = self.normal.dot(pos);
        pos - self.normal.scale(2.0 * dp) + self.p1
    }

    /// Mirror image of `plane` across this plane.
    pub fn invert_on_plane(&self, plane: &Plane) -> Plane {
        let dp = self.normal.dot(plane.normal);
        let normal = (plane.normal - self.normal.scale(2.0 * dp)).normalize();
        Plane::new(
            self.invert_on_point(plane.p1),
            self.invert_on_point(plane.p2),
            self.invert_on_point(plane.p3),
            normal,
        )
    }

    /// Mirror image of `sphere`; reflection keeps the radius.
    pub fn invert_on_sphere(&self, sphere: &Sphere) -> Sphere {
        Sphere::from_center(self.invert_on_point(sphere.center), sphere.r())
    }

    /// Intersection of two planes seen in the X-Z projection (Y is ignored).
    ///
    /// `l1` contributes its line through `p1, p2`, `l2` its line through `p1, p3`. The result
    /// has `y = 0`. Parallel or coincident lines give a non-finite or meaningless point.
    pub fn compute_intersection(l1: &Plane, l2: &Plane) -> Vector3 {
        let l1_eq = LineEquation::through(Vector2::new(l1.p1.x, l1.p1.z), Vector2::new(l1.p2.x, l1.p2.z));
        let l2_eq = LineEquation::through(Vector2::new(l2.p1.x, l2.p1.z), Vector2::new(l2.p3.x, l2.p3.z));

        match (l1_eq, l2_eq) {
            (LineEquation::Vertical(c), other) => Vector3::new(c, 0.0, other.y_at(c)),
            (LineEquation::Horizontal(c), other) => Vector3::new(other.x_at(c), 0.0, c),
            (other, LineEquation::Vertical(c)) => Vector3::new(c, 0.0, other.y_at(c)),
            (other, LineEquation::Horizontal(c)) => Vector3::new(other.x_at(c), 0.0, c),
            (l1_eq, l2_eq) => {
                // Two samples per line, then the segment-segment parameter along line 1.
                let (x1, x2) = (1.0, 5.0);
                let (y1, y2) = (l1_eq.y_at(x1), l1_eq.y_at(x2));
                let (x3, x4) = (4.0, 8.0);
                let (y3, y4) = (l2_eq.y_at(x3), l2_eq.y_at(x4));

                let ksi = (y4 - y3) * (x4 - x1) - (x4 - x3) * (y4 - y1);
                let delta = (x2 - x1) * (y4 - y3) - (y2 - y1) * (x4 - x3);
                let lambda = ksi / delta;

                Vector3::new(x1 + lambda * (x2 - x1), 0.0, y1 + lambda * (y2 - y1))
            }
        }
    }

    pub fn to_json(&self) -> PlaneJson {
        PlaneJson {
            normal: self.normal.to_array(),
            p1: self.p1.to_array(),
            p2: self.p2.to_array(),
            p3: self.p3.to_array(),
        }
    }
}

impl From<&PlaneJson> for Plane {
    fn from(json: &PlaneJson) -> Self {
        Plane::new(json.p1.into(), json.p2.into(), json.p3.into(), json.normal.into())
    }
}
