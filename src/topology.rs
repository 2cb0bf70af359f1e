//! Prism wall planes for the four supported group signatures.
//!
//! The coordinates are the literal seeds of every derived quantity; do not "clean them up".

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::SphairahedronError;
use crate::plane::Plane;
use crate::vector::Vector3;

const RT_3: f64 = 1.7320508075688772;
const RT_3_INV: f64 = 1.0 / RT_3;

fn v(x: f64, y: f64, z: f64) -> Vector3 {
    Vector3::new(x, y, z)
}

/// Planes AB, CA, BC of the 3-3-3 prism.
pub static PRISM_PLANES_333: LazyLock<[Plane; 3]> = LazyLock::new(|| {
    [
        Plane::new(
            v(0.0, 5.0, RT_3_INV),
            v(1.0, 1.0, 0.0),
            v(2.0, 2.0, -RT_3_INV),
            v(RT_3 * 0.5, 0.0, 1.5).normalize(),
        ),
        Plane::new(
            v(0.0, 3.0, -RT_3_INV),
            v(1.0, 3.0, 0.0),
            v(2.0, 2.0, RT_3_INV),
            v(RT_3 * 0.5, 0.0, -1.5).normalize(),
        ),
        Plane::new(v(-0.5, 0.0, 1.0), v(-0.5, 1.0, 0.0), v(-0.5, 2.0, 1.0), v(-1.0, 0.0, 0.0)),
    ]
});

/// Planes AB, CA, BC of the 2-3-6 prism.
pub static PRISM_PLANES_236: LazyLock<[Plane; 3]> = LazyLock::new(|| {
    [
        Plane::new(
            v(0.5, 5.0, RT_3 * 0.5),
            v(1.0, 1.0, 0.0),
            v(0.75, 2.0, RT_3 * 0.25),
            v(1.0, 0.0, RT_3_INV).normalize(),
        ),
        Plane::new(
            v(1.0, 0.0, 0.0),
            v(0.0, 5.0, -RT_3 / 3.0),
            v(-0.5, 2.0, -RT_3 * 0.5),
            v(1.0, 0.0, -RT_3).normalize(),
        ),
        Plane::new(
            v(0.5, 3.0, RT_3 * 0.5),
            v(0.0, -10.0, 0.0),
            v(-0.5, -3.0, -RT_3 * 0.5),
            v(-1.0, 0.0, RT_3_INV).normalize(),
        ),
    ]
});

/// Planes AB, CA, BC of the 2-4-4 prism.
pub static PRISM_PLANES_244: LazyLock<[Plane; 3]> = LazyLock::new(|| {
    [
        Plane::new(v(0.0, 5.0, 1.0), v(0.5, 1.0, 0.5), v(1.0, 2.0, 0.0), v(0.5, 0.0, 0.5).normalize()),
        Plane::new(v(0.0, 3.0, -1.0), v(0.5, 3.0, -0.5), v(1.0, 2.0, 0.0), v(0.5, 0.0, -0.5).normalize()),
        Plane::new(v(0.0, -7.0, 1.0), v(0.0, -4.0, 0.0), v(0.0, 8.0, -1.0), v(-1.0, 0.0, 0.0)),
    ]
});

/// The four walls of the square 2-2-2-2 prism.
pub static PRISM_PLANES_2222_SQUARE: LazyLock<[Plane; 4]> = LazyLock::new(|| {
    [
        Plane::new(v(0.0, 5.0, 1.0), v(0.5, 1.0, 0.5), v(1.0, 2.0, 0.0), v(0.5, 0.0, 0.5).normalize()),
        Plane::new(v(0.0, 5.0, 1.0), v(-0.5, 1.0, 0.5), v(-1.0, 2.0, 0.0), v(-0.5, 0.0, 0.5).normalize()),
        Plane::new(v(0.0, 5.0, -1.0), v(-0.5, 1.0, -0.5), v(-1.0, 2.0, 0.0), v(-0.5, 0.0, -0.5).normalize()),
        Plane::new(v(0.0, 3.0, -1.0), v(0.5, 3.0, -0.5), v(1.0, 2.0, 0.0), v(0.5, 0.0, -0.5).normalize()),
    ]
});

/// Group signature of the prism bounding the fundamental domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrismType {
    #[serde(rename = "333")]
    Type333,
    #[serde(rename = "236")]
    Type236,
    #[serde(rename = "244")]
    Type244,
    #[serde(rename = "2222")]
    Type2222,
}

impl PrismType {
    pub fn planes(self) -> &'static [Plane] {
        match self {
            PrismType::Type333 => PRISM_PLANES_333.as_slice(),
            PrismType::Type236 => PRISM_PLANES_236.as_slice(),
            PrismType::Type244 => PRISM_PLANES_244.as_slice(),
            PrismType::Type2222 => PRISM_PLANES_2222_SQUARE.as_slice(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrismType::Type333 => "333",
            PrismType::Type236 => "236",
            PrismType::Type244 => "244",
            PrismType::Type2222 => "2222",
        }
    }
}

impl fmt::Display for PrismType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrismType {
    type Err = SphairahedronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "333" => Ok(PrismType::Type333),
            "236" => Ok(PrismType::Type236),
            "244" => Ok(PrismType::Type244),
            "2222" => Ok(PrismType::Type2222),
            other => Err(SphairahedronError::UnknownPrismType(other.to_string())),
        }
    }
}

/// Index pairs of prism planes whose X-Z intersections are the prism's corner columns.
pub fn corner_plane_pairs(plane_count: usize) -> &'static [(usize, usize)] {
    match plane_count {
        3 => &[(0, 1), (0, 2), (1, 2)],
        4 => &[(0, 1), (0, 3), (2, 1), (2, 3)],
        _ => &[],
    }
}
