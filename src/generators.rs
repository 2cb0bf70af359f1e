use crate::config::SphairahedronParams;
use crate::error::{Result, SphairahedronError};
use crate::plane::Plane;
use crate::sphere::Sphere;
use crate::topology::PrismType;
use crate::vector::Vector3;

/// Spheres carved out of the fundamental domain by specific topologies.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExcavationSpheres {
    pub prism_spheres: Vec<Sphere>,
    pub spheres: Vec<Sphere>,
}

/// The topology-specific stages of the construction.
///
/// The pipeline in [`crate::derive_geometry`] calls these in a fixed order and feeds each one
/// only what earlier stages produced. The required methods describe the group instance; the
/// provided ones are the generic behavior a topology may override.
pub trait GeneratorStages {
    /// Walls of the infinite prism.
    fn prism_planes(&self) -> Vec<Plane>;

    fn compute_inversion_sphere(&self, params: &SphairahedronParams) -> Sphere;

    /// Spheres bounding the prism from below.
    fn compute_prism_spheres(&self, params: &SphairahedronParams, inversion_sphere: &Sphere) -> Vec<Sphere>;

    /// The generator spheres indexed by the vertex table.
    fn compute_gen_spheres(
        &self,
        params: &SphairahedronParams,
        inversion_sphere: &Sphere,
        prism_planes: &[Plane],
        prism_spheres: &[Sphere],
    ) -> Vec<Sphere>;

    /// One plane through vertexes 0, 1 and 2.
    fn compute_divide_planes(&self, inversion_sphere: &Sphere, vertexes: &[Vector3]) -> Result<Vec<Plane>> {
        Ok(vec![compute_plane(inversion_sphere, vertexes, 0, 1, 2)?])
    }

    fn compute_excavation_spheres(&self, _inversion_sphere: &Sphere, _vertexes: &[Vector3]) -> ExcavationSpheres {
        ExcavationSpheres::default()
    }

    fn compute_bounding_planes(&self, _inversion_sphere: &Sphere) -> Vec<Plane> {
        Vec::new()
    }
}

/// The plane through three vertexes after inverting them back into prism space.
///
/// The normal is `normalize((p2 - p1) x (p3 - p1))`, flipped to point upwards (`y >= 0`).
pub fn compute_plane(inversion_sphere: &Sphere, vertexes: &[Vector3], i: usize, j: usize, k: usize) -> Result<Plane> {
    let vertex = |index: usize| {
        vertexes
            .get(index)
            .copied()
            .ok_or(SphairahedronError::VertexOutOfRange { index, count: vertexes.len() })
    };
    let p1 = inversion_sphere.invert_on_point(vertex(i)?);
    let p2 = inversion_sphere.invert_on_point(vertex(j)?);
    let p3 = inversion_sphere.invert_on_point(vertex(k)?);

    let mut normal = (p2 - p1).cross(p3 - p1).normalize();
    if normal.y < 0.0 {
        normal = -normal;
    }
    Ok(Plane::new(p1, p2, p3, normal))
}

/// Stages driven by one of the prism tables with a fixed inversion sphere and fixed prism
/// spheres.
///
/// Unless generator spheres are supplied explicitly, they are the images of every prism wall
/// followed by every prism sphere under inversion in the inversion sphere.
#[derive(Clone, Debug, PartialEq)]
pub struct PrismGenerators {
    pub prism_type: PrismType,
    /// Walls replacing the table of `prism_type`.
    pub prism_planes: Option<Vec<Plane>>,
    pub inversion_sphere: Sphere,
    pub prism_spheres: Vec<Sphere>,
    pub gen_spheres: Option<Vec<Sphere>>,
}

impl PrismGenerators {
    pub fn new(prism_type: PrismType, inversion_sphere: Sphere, prism_spheres: Vec<Sphere>) -> Self {
        Self {
            prism_type,
            prism_planes: None,
            inversion_sphere,
            prism_spheres,
            gen_spheres: None,
        }
    }

    pub fn with_prism_planes(mut self, prism_planes: Vec<Plane>) -> Self {
        self.prism_planes = Some(prism_planes);
        self
    }

    pub fn with_gen_spheres(mut self, gen_spheres: Vec<Sphere>) -> Self {
        self.gen_spheres = Some(gen_spheres);
        self
    }
}

impl GeneratorStages for PrismGenerators {
    fn prism_planes(&self) -> Vec<Plane> {
        match &self.prism_planes {
            Some(planes) => planes.clone(),
            None => self.prism_type.planes().to_vec(),
        }
    }

    fn compute_inversion_sphere(&self, _params: &SphairahedronParams) -> Sphere {
        self.inversion_sphere
    }

    fn compute_prism_spheres(&self, _params: &SphairahedronParams, _inversion_sphere: &Sphere) -> Vec<Sphere> {
        self.prism_spheres.clone()
    }

    fn compute_gen_spheres(
        &self,
        _params: &SphairahedronParams,
        inversion_sphere: &Sphere,
        prism_planes: &[Plane],
        prism_spheres: &[Sphere],
    ) -> Vec<Sphere> {
        if let Some(spheres) = &self.gen_spheres {
            return spheres.clone();
        }
        prism_planes
            .iter()
            .map(|p| inversion_sphere.invert_on_plane(p))
            .chain(prism_spheres.iter().map(|s| inversion_sphere.invert_on_sphere(s)))
            .collect()
    }
}
