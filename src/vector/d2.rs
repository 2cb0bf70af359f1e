use std::ops::{Add, Div, Mul, Neg, Sub};

/// A 2D vector. Used for the X-Z projection of planes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    /// Per-component tolerance used by [`Vector2::approx_eq`].
    ///
    /// Deliberately looser than [`crate::Vector3::EPSILON`].
    pub const EPSILON: f64 = 1e-5;

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise product.
    pub fn prod(self, v: Vector2) -> Vector2 {
        Vector2::new(self.x * v.x, self.y * v.y)
    }

    /// Component-wise quotient. A zero component in `v` gives a non-finite result.
    pub fn quot(self, v: Vector2) -> Vector2 {
        Vector2::new(self.x / v.x, self.y / v.y)
    }

    pub fn scale(self, k: f64) -> Vector2 {
        Vector2::new(self.x * k, self.y * k)
    }

    pub fn length(self) -> f64 {
        self.length_sq().sqrt()
    }

    pub fn length_sq(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Scales by `1 / length`. A zero vector yields NaN components.
    pub fn normalize(self) -> Vector2 {
        self.scale(1.0 / self.length())
    }

    /// Component-wise comparison within [`Vector2::EPSILON`] (inclusive).
    pub fn approx_eq(self, v: Vector2) -> bool {
        (self.x - v.x).abs() <= Self::EPSILON && (self.y - v.y).abs() <= Self::EPSILON
    }

    pub fn dot(self, v: Vector2) -> f64 {
        self.x * v.x + self.y * v.y
    }

    pub fn distance(self, v: Vector2) -> f64 {
        (self - v).length()
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, v: Vector2) -> Vector2 {
        Vector2::new(self.x + v.x, self.y + v.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, v: Vector2) -> Vector2 {
        Vector2::new(self.x - v.x, self.y - v.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, k: f64) -> Vector2 {
        self.scale(k)
    }
}

impl Mul for Vector2 {
    type Output = Vector2;

    fn mul(self, v: Vector2) -> Vector2 {
        self.prod(v)
    }
}

impl Div for Vector2 {
    type Output = Vector2;

    fn div(self, v: Vector2) -> Vector2 {
        self.quot(v)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl From<[f64; 2]> for Vector2 {
    fn from(a: [f64; 2]) -> Self {
        Vector2::new(a[0], a[1])
    }
}

impl From<Vector2> for [f64; 2] {
    fn from(v: Vector2) -> Self {
        [v.x, v.y]
    }
}
