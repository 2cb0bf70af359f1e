use serde::{Deserialize, Serialize};

use crate::plane::Plane;
use crate::vector::Vector3;

/// A sphere with a cached squared radius.
///
/// The radius is only changed through [`Sphere::set_radius`], which keeps the cache in sync.
/// `selected` and `basis_radius` are presentation attributes and take no part in geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vector3,
    r: f64,
    r_sq: f64,
    pub selected: i32,
    pub basis_radius: f64,
}

/// Wire shape of a [`Sphere`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereJson {
    pub center: [f64; 3],
    pub r: f64,
}

impl Sphere {
    const DEFAULT_BASIS_RADIUS: f64 = 20.0;

    pub fn new(x: f64, y: f64, z: f64, r: f64) -> Self {
        Self::from_center(Vector3::new(x, y, z), r)
    }

    pub fn from_center(center: Vector3, r: f64) -> Self {
        Self {
            center,
            r,
            r_sq: r * r,
            selected: 0,
            basis_radius: Self::DEFAULT_BASIS_RADIUS,
        }
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn r_sq(&self) -> f64 {
        self.r_sq
    }

    pub fn set_radius(&mut self, r: f64) {
        self.r = r;
        self.r_sq = r * r;
    }

    /// Inversion of `p` in this sphere. The center itself maps to a non-finite point.
    pub fn invert_on_point(&self, p: Vector3) -> Vector3 {
        let d = p - self.center;
        let len = d.length();
        d.scale(self.r_sq / (len * len)) + self.center
    }

    /// Image of `plane` under inversion in this sphere: the sphere through the three inverted
    /// plane points and this sphere's center.
    pub fn invert_on_plane(&self, plane: &Plane) -> Sphere {
        Sphere::from_points(
            self.invert_on_point(plane.p1),
            self.invert_on_point(plane.p2),
            self.invert_on_point(plane.p3),
            self.center,
        )
    }

    /// Image of `sphere` under inversion in this sphere.
    ///
    /// Four points on `sphere` are sampled at offsets `±r/√3` per axis with sign patterns
    /// `(+,+,+) (-,-,-) (+,-,-) (+,+,-)`, inverted, and refit.
    pub fn invert_on_sphere(&self, sphere: &Sphere) -> Sphere {
        let k = sphere.r * 3f64.sqrt() / 3.0;
        let c = sphere.center;
        let p1 = self.invert_on_point(c + Vector3::new(k, k, k));
        let p2 = self.invert_on_point(c + Vector3::new(-k, -k, -k));
        let p3 = self.invert_on_point(c + Vector3::new(k, -k, -k));
        let p4 = self.invert_on_point(c + Vector3::new(k, k, -k));
        Sphere::from_points(p1, p2, p3, p4)
    }

    /// The sphere through four points.
    ///
    /// Subtracting the center-distance equations of consecutive points gives a 3x3 linear
    /// system in the center, solved by Gaussian elimination with partial pivoting. Coplanar
    /// or repeated points make the system singular and the result non-finite.
    pub fn from_points(p1: Vector3, p2: Vector3, p3: Vector3, p4: Vector3) -> Sphere {
        let p = [p1, p2, p3, p4];
        let mut mat = [[0.0f64; 4]; 3];
        for i in 0..3 {
            let (a, b) = (p[i], p[i + 1]);
            mat[i] = [
                2.0 * (b.x - a.x),
                2.0 * (b.y - a.y),
                2.0 * (b.z - a.z),
                b.squared_length() - a.squared_length(),
            ];
        }

        let center = Vector3::from(solve_augmented(mat));
        Sphere::from_center(center, (center - p1).length())
    }

    pub fn to_json(&self) -> SphereJson {
        SphereJson {
            center: self.center.to_array(),
            r: self.r,
        }
    }
}

impl From<&SphereJson> for Sphere {
    fn from(json: &SphereJson) -> Self {
        Sphere::from_center(json.center.into(), json.r)
    }
}

/// Swaps the row with the largest `|mat[i][k]|`, `i >= k`, into row `k`.
fn pivot<const N: usize>(mat: &mut [[f64; N]], k: usize) {
    let mut row = k;
    let mut max_value = mat[k][k].abs();
    for (i, r) in mat.iter().enumerate().skip(k + 1) {
        if r[k].abs() > max_value {
            row = i;
            max_value = r[k].abs();
        }
    }
    if row != k {
        mat.swap(row, k);
    }
}

/// Solves the augmented 3x4 system in place and returns the solution column.
fn solve_augmented(mut mat: [[f64; 4]; 3]) -> [f64; 3] {
    const N: usize = 3;

    // Forward elimination.
    for k in 0..N - 1 {
        pivot(&mut mat, k);
        let vkk = mat[k][k];
        for i in k + 1..N {
            let vik = mat[i][k];
            for j in k..=N {
                mat[i][j] -= vik * (mat[k][j] / vkk);
            }
        }
    }

    // Back substitution.
    mat[N - 1][N] /= mat[N - 1][N - 1];
    for i in (0..N - 1).rev() {
        let acc: f64 = (i + 1..N).map(|j| mat[i][j] * mat[j][N]).sum();
        mat[i][N] = (mat[i][N] - acc) / mat[i][i];
    }

    [mat[0][N], mat[1][N], mat[2][N]]
}
