//! Serializable configuration for building a sphairahedron.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::generators::PrismGenerators;
use crate::plane::Plane;
use crate::sphairahedron::Sphairahedron;
use crate::sphere::Sphere;
use crate::topology::PrismType;

/// The two real parameters selecting a group instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SphairahedronParams {
    pub zb: f64,
    pub zc: f64,
}

impl SphairahedronParams {
    pub fn new(zb: f64, zc: f64) -> Self {
        Self { zb, zc }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereParams {
    pub center: [f64; 3],
    pub radius: f64,
}

impl From<&SphereParams> for Sphere {
    fn from(p: &SphereParams) -> Self {
        Sphere::from_center(p.center.into(), p.radius)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneParams {
    pub point1: [f64; 3],
    pub point2: [f64; 3],
    pub point3: [f64; 3],
    pub normal: [f64; 3],
}

impl From<&PlaneParams> for Plane {
    fn from(p: &PlaneParams) -> Self {
        Plane::new(p.point1.into(), p.point2.into(), p.point3.into(), p.normal.into())
    }
}

/// A complete description of a [`PrismGenerators`]-backed sphairahedron.
///
/// ```json
/// {
///   "params": { "zb": 0.1, "zc": -0.2 },
///   "prismType": "333",
///   "inversionSphere": { "center": [0.5, 1.0, 0.0], "radius": 1.0 },
///   "prismSpheres": [{ "center": [0.0, 0.0, 0.0], "radius": 0.7 }],
///   "vertexIndexes": [[0, 1, 3], [0, 2, 3], [1, 2, 3]]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    pub params: SphairahedronParams,
    pub prism_type: PrismType,
    pub inversion_sphere: SphereParams,
    /// Prism walls overriding the table of `prism_type`.
    #[serde(default)]
    pub prism_planes: Option<Vec<PlaneParams>>,
    #[serde(default)]
    pub prism_spheres: Vec<SphereParams>,
    /// Explicit generator spheres. When absent they are derived from the prism.
    #[serde(default)]
    pub finite_spheres: Option<Vec<SphereParams>>,
    pub vertex_indexes: Vec<[usize; 3]>,
}

impl GeneratorConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn generators(&self) -> PrismGenerators {
        let mut generators = PrismGenerators::new(
            self.prism_type,
            (&self.inversion_sphere).into(),
            self.prism_spheres.iter().map(Sphere::from).collect(),
        );
        if let Some(planes) = &self.prism_planes {
            generators = generators.with_prism_planes(planes.iter().map(Plane::from).collect());
        }
        if let Some(finite) = &self.finite_spheres {
            generators = generators.with_gen_spheres(finite.iter().map(Sphere::from).collect());
        }
        generators
    }

    /// Builds the sphairahedron. Geometry stays empty until `update()` is called.
    pub fn build(&self) -> Sphairahedron<PrismGenerators> {
        let mut s = Sphairahedron::new(self.params.zb, self.params.zc, self.generators());
        s.set_vertex_indexes(self.vertex_indexes.clone());
        s
    }
}
