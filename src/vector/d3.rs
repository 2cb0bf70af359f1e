use std::ops::{Add, Div, Mul, Neg, Sub};

/// A 3D vector (or point). All operations are pure.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Per-component tolerance used by [`Vector3::approx_eq`] (exclusive).
    pub const EPSILON: f64 = 1e-6;

    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);
    pub const UNIT_Y: Vector3 = Vector3::new(0.0, 1.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Component-wise product.
    pub fn prod(self, v: Vector3) -> Vector3 {
        Vector3::new(self.x * v.x, self.y * v.y, self.z * v.z)
    }

    /// Component-wise quotient. A zero component in `v` gives a non-finite result.
    pub fn quot(self, v: Vector3) -> Vector3 {
        Vector3::new(self.x / v.x, self.y / v.y, self.z / v.z)
    }

    pub fn scale(self, k: f64) -> Vector3 {
        Vector3::new(self.x * k, self.y * k, self.z * k)
    }

    pub fn length(self) -> f64 {
        self.squared_length().sqrt()
    }

    pub fn squared_length(self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Scales by `1 / length`. A zero vector yields NaN components.
    pub fn normalize(self) -> Vector3 {
        self.scale(1.0 / self.length())
    }

    /// Component-wise comparison within [`Vector3::EPSILON`].
    pub fn approx_eq(self, v: Vector3) -> bool {
        (self.x - v.x).abs() < Self::EPSILON
            && (self.y - v.y).abs() < Self::EPSILON
            && (self.z - v.z).abs() < Self::EPSILON
    }

    pub fn dot(self, v: Vector3) -> f64 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    /// Right-handed cross product.
    pub fn cross(self, v: Vector3) -> Vector3 {
        Vector3::new(
            self.y * v.z - self.z * v.y,
            self.z * v.x - self.x * v.z,
            self.x * v.y - self.y * v.x,
        )
    }

    pub fn distance(self, v: Vector3) -> f64 {
        (self - v).length()
    }

    pub fn rotate_x(self, radians: f64) -> Vector3 {
        let (sin, cos) = radians.sin_cos();
        Vector3::new(self.x, cos * self.y - sin * self.z, sin * self.y + cos * self.z)
    }

    pub fn rotate_y(self, radians: f64) -> Vector3 {
        let (sin, cos) = radians.sin_cos();
        Vector3::new(cos * self.x + sin * self.z, self.y, -sin * self.x + cos * self.z)
    }

    pub fn rotate_z(self, radians: f64) -> Vector3 {
        let (sin, cos) = radians.sin_cos();
        Vector3::new(cos * self.x - sin * self.y, sin * self.x + cos * self.y, self.z)
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, v: Vector3) -> Vector3 {
        Vector3::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, v: Vector3) -> Vector3 {
        Vector3::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, k: f64) -> Vector3 {
        self.scale(k)
    }
}

impl Mul for Vector3 {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        self.prod(v)
    }
}

impl Div for Vector3 {
    type Output = Vector3;

    fn div(self, v: Vector3) -> Vector3 {
        self.quot(v)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(a: [f64; 3]) -> Self {
        Vector3::new(a[0], a[1], a[2])
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}
