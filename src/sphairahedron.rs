use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bounds::BoundingBox;
use crate::config::SphairahedronParams;
use crate::error::{Result, SphairahedronError};
use crate::generators::{ExcavationSpheres, GeneratorStages};
use crate::plane::{Plane, PlaneJson};
use crate::sphere::{Sphere, SphereJson};
use crate::topology::corner_plane_pairs;
use crate::vector::Vector3;

/// Radius of the placeholder a seed-sphere search starts from.
const SEED_SEARCH_RADIUS: f64 = 99999999999.0;
/// Vertexes closer than this are treated as the same vertex in the seed search.
const SAME_VERTEX_EPS: f64 = 1e-6;
/// Radius and center tolerance of the duplicate seed-sphere check.
const DUPLICATE_EPS: f64 = 1e-5;
/// Y margin added around the prism spheres in the published bounding box.
const BBOX_Y_MARGIN: f64 = 0.1;
const BOUNDING_INFLATION: f64 = 1.01;

/// Everything a single `update()` derives. Replaced as a whole, never patched.
#[derive(Clone, Debug, PartialEq)]
pub struct SphairahedronGeometry {
    pub inversion_sphere: Sphere,
    pub prism_planes: Vec<Plane>,
    pub prism_spheres: Vec<Sphere>,
    /// Generator spheres, published as `finiteSpheres`.
    pub gen_spheres: Vec<Sphere>,
    pub vertexes: Vec<Vector3>,
    pub divide_planes: Vec<Plane>,
    pub excavation: ExcavationSpheres,
    pub seed_spheres: Vec<Sphere>,
    pub convex_spheres: Vec<Sphere>,
    pub bounding_sphere: Sphere,
    pub bounding_plane_y: f64,
    pub bounding_planes: Vec<Plane>,
}

impl Default for SphairahedronGeometry {
    fn default() -> Self {
        Self {
            inversion_sphere: Sphere::new(0.0, 0.0, 0.0, 1.0),
            prism_planes: Vec::new(),
            prism_spheres: Vec::new(),
            gen_spheres: Vec::new(),
            vertexes: Vec::new(),
            divide_planes: Vec::new(),
            excavation: ExcavationSpheres::default(),
            seed_spheres: Vec::new(),
            convex_spheres: Vec::new(),
            bounding_sphere: Sphere::new(0.0, 0.0, 0.0, 1.0),
            bounding_plane_y: f64::NEG_INFINITY,
            bounding_planes: Vec::new(),
        }
    }
}

/// Wire shape of a [`Sphairahedron`] consumed by renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SphairahedronJson {
    pub zb: f64,
    pub zc: f64,
    pub inversion_sphere: SphereJson,
    pub prism_planes: Vec<PlaneJson>,
    pub prism_spheres: Vec<SphereJson>,
    pub finite_spheres: Vec<SphereJson>,
    pub divide_planes: Vec<PlaneJson>,
    pub convex_spheres: Vec<SphereJson>,
    pub bounding_sphere: SphereJson,
    pub bounding_planes: Vec<PlaneJson>,
    pub bbox_min: [f64; 3],
    pub bbox_max: [f64; 3],
}

/// Runs the nine construction stages in order and returns the result.
///
/// 1. inversion sphere, 2. prism spheres, 3. generator spheres, 4. vertexes,
/// 5. divide planes, 6. excavation spheres, 7. seed spheres, 8. convex spheres,
/// 9. bounding volume.
///
/// Only structural faults (vertex tables pointing past the generated data) are errors.
/// Degenerate numeric input yields non-finite coordinates instead.
pub fn derive_geometry<G: GeneratorStages + ?Sized>(
    params: &SphairahedronParams,
    vertex_indexes: &[[usize; 3]],
    stages: &G,
) -> Result<SphairahedronGeometry> {
    let inversion_sphere = stages.compute_inversion_sphere(params);
    tracing::trace!(?inversion_sphere, "inversion sphere");

    let prism_planes = stages.prism_planes();
    let prism_spheres = stages.compute_prism_spheres(params, &inversion_sphere);
    tracing::trace!(planes = prism_planes.len(), spheres = prism_spheres.len(), "prism");

    let gen_spheres = stages.compute_gen_spheres(params, &inversion_sphere, &prism_planes, &prism_spheres);
    tracing::trace!(count = gen_spheres.len(), "generator spheres");

    let triples = resolve_vertex_spheres(&gen_spheres, vertex_indexes)?;
    let vertexes: Vec<Vector3> = triples
        .iter()
        .map(|[a, b, c]| compute_ideal_vertex(a, b, c))
        .collect();
    tracing::trace!(count = vertexes.len(), "vertexes");

    let divide_planes = stages.compute_divide_planes(&inversion_sphere, &vertexes)?;
    let excavation = stages.compute_excavation_spheres(&inversion_sphere, &vertexes);

    let seed_spheres = compute_seed_spheres(&vertexes, &triples);
    tracing::trace!(count = seed_spheres.len(), "seed spheres");

    let convex_spheres: Vec<Sphere> = divide_planes
        .iter()
        .map(|plane| inversion_sphere.invert_on_plane(plane))
        .collect();

    let (bounding_sphere, bounding_plane_y) = compute_bounding_volume(&inversion_sphere, &prism_spheres);
    let bounding_planes = stages.compute_bounding_planes(&inversion_sphere);
    tracing::trace!(?bounding_sphere, bounding_plane_y, "bounding volume");

    Ok(SphairahedronGeometry {
        inversion_sphere,
        prism_planes,
        prism_spheres,
        gen_spheres,
        vertexes,
        divide_planes,
        excavation,
        seed_spheres,
        convex_spheres,
        bounding_sphere,
        bounding_plane_y,
        bounding_planes,
    })
}

fn resolve_vertex_spheres(gen_spheres: &[Sphere], vertex_indexes: &[[usize; 3]]) -> Result<Vec<[Sphere; 3]>> {
    vertex_indexes
        .iter()
        .enumerate()
        .map(|(vertex, indexes)| {
            let sphere = |index: usize| {
                gen_spheres.get(index).copied().ok_or(SphairahedronError::VertexIndexOutOfRange {
                    vertex,
                    index,
                    count: gen_spheres.len(),
                })
            };
            Ok([sphere(indexes[0])?, sphere(indexes[1])?, sphere(indexes[2])?])
        })
        .collect()
}

/// The point in the plane of the three centers with equal power with respect to all three
/// spheres. Collinear centers make the 2x2 system singular and the result non-finite.
pub fn compute_ideal_vertex(a: &Sphere, b: &Sphere, c: &Sphere) -> Vector3 {
    let (ca, cb, cc) = (a.center, b.center, c.center);
    let a_sq = ca.squared_length();
    let ab_dot = ca.dot(cb);
    let ac_dot = ca.dot(cc);

    let ab = (a_sq - cb.squared_length() - a.r_sq() + b.r_sq()) * 0.5 - a_sq + ab_dot;
    let ac = (a_sq - cc.squared_length() - a.r_sq() + c.r_sq()) * 0.5 - a_sq + ac_dot;
    let x = -a_sq - cb.squared_length() + 2.0 * ab_dot;
    let y = -a_sq - cc.squared_length() + 2.0 * ac_dot;
    let z = -a_sq + ab_dot + ac_dot - cb.dot(cc);

    let det = x * y - z * z;
    let s = (ab * y - ac * z) / det;
    let t = (ac * x - ab * z) / det;
    ca + (cb - ca).scale(s) + (cc - ca).scale(t)
}

/// Candidate seed sphere for vertex `x` paired with vertex `y`.
///
/// `n` is the normal of the plane through the three generator centers. The offset
/// `k = dot(y - x, n) / (2 dot(y - x, n))` is kept exactly as the construction states it, so
/// `k` is `0.5` whenever the dot product is non-zero and NaN when it is zero.
pub fn compute_seed_sphere(x: Vector3, y: Vector3, a: &Sphere, b: &Sphere, c: &Sphere) -> Sphere {
    let n = (b.center - a.center).cross(c.center - a.center);
    let k = (y - x).dot(n) / (2.0 * (y - x).dot(n));
    Sphere::from_center(x + n.scale(k), k.abs() * n.length())
}

/// Smallest candidate seed sphere of `x` over all other vertexes. NaN candidates never win.
pub fn compute_min_seed_sphere(x: Vector3, vertexes: &[Vector3], a: &Sphere, b: &Sphere, c: &Sphere) -> Sphere {
    let mut min_sphere = Sphere::new(0.0, 0.0, 0.0, SEED_SEARCH_RADIUS);
    for &other in vertexes {
        if x.distance(other) < SAME_VERTEX_EPS {
            continue;
        }
        let s = compute_seed_sphere(x, other, a, b, c);
        if s.r() < min_sphere.r() {
            min_sphere = s;
        }
    }
    min_sphere
}

fn compute_seed_spheres(vertexes: &[Vector3], triples: &[[Sphere; 3]]) -> Vec<Sphere> {
    let minima: Vec<Sphere> = (0..vertexes.len())
        .into_par_iter()
        .map(|i| {
            let [a, b, c] = &triples[i];
            compute_min_seed_sphere(vertexes[i], vertexes, a, b, c)
        })
        .collect();

    let mut seed_spheres = Vec::with_capacity(minima.len());
    for (vertex, sphere) in minima.into_iter().enumerate() {
        push_seed_sphere(&mut seed_spheres, sphere, vertex);
    }
    seed_spheres
}

/// Appends `sphere`, reporting when an equal sphere is already present.
///
/// Duplicates are still inserted: renderers index seed spheres by vertex.
fn push_seed_sphere(spheres: &mut Vec<Sphere>, sphere: Sphere, vertex: usize) {
    let duplicate = spheres.iter().any(|s| {
        (s.r() - sphere.r()).abs() < DUPLICATE_EPS && s.center.distance(sphere.center) < DUPLICATE_EPS
    });
    if duplicate {
        tracing::debug!(vertex, r = sphere.r(), center = ?sphere.center, "duplicate seed sphere");
    }
    spheres.push(sphere);
}

/// Inverts a horizontal plane at the top (or, when the inversion sphere sits below the prism,
/// the bottom) of the prism spheres and inflates the result slightly.
///
/// Returns the bounding sphere and the raised bounding plane height. Without prism spheres
/// the plane sits at `y = 0`.
fn compute_bounding_volume(inversion_sphere: &Sphere, prism_spheres: &[Sphere]) -> (Sphere, f64) {
    let (min_y, max_y) = if prism_spheres.is_empty() {
        (0.0, 0.0)
    } else {
        (
            prism_spheres.iter().map(|s| s.center.y).fold(f64::INFINITY, f64::min),
            prism_spheres.iter().map(|s| s.center.y).fold(f64::NEG_INFINITY, f64::max),
        )
    };

    let y = if inversion_sphere.center.y < min_y { min_y } else { max_y };
    let plane = Plane::new(
        Vector3::new(1.0, y, -9.0),
        Vector3::new(-4.0, y, -4.0),
        Vector3::new(10.0, y, 3.0),
        Vector3::UNIT_Y,
    );

    let mut bounding_sphere = inversion_sphere.invert_on_plane(&plane);
    bounding_sphere.set_radius(bounding_sphere.r() * BOUNDING_INFLATION);
    (bounding_sphere, max_y + BOUNDING_INFLATION)
}

/// Holds the configuration of a sphairahedron and its most recently derived geometry.
///
/// `update()` recomputes everything and swaps the result in at once; listeners run after the
/// swap. The bounding box persists across updates and only grows.
pub struct Sphairahedron<G: GeneratorStages> {
    pub zb: f64,
    pub zc: f64,
    stages: G,
    vertex_indexes: Vec<[usize; 3]>,
    geometry: SphairahedronGeometry,
    bbox: BoundingBox<3>,
    listeners: Vec<Box<dyn FnMut()>>,
}

impl<G: GeneratorStages> Sphairahedron<G> {
    pub fn new(zb: f64, zc: f64, stages: G) -> Self {
        Self {
            zb,
            zc,
            stages,
            vertex_indexes: Vec::new(),
            geometry: SphairahedronGeometry::default(),
            bbox: BoundingBox::empty(),
            listeners: Vec::new(),
        }
    }

    pub fn params(&self) -> SphairahedronParams {
        SphairahedronParams::new(self.zb, self.zc)
    }

    pub fn set_params(&mut self, zb: f64, zc: f64) {
        self.zb = zb;
        self.zc = zc;
    }

    pub fn stages(&self) -> &G {
        &self.stages
    }

    pub fn stages_mut(&mut self) -> &mut G {
        &mut self.stages
    }

    /// Sets the generator-sphere triple of every vertex. Takes effect on the next `update()`.
    pub fn set_vertex_indexes(&mut self, vertex_indexes: Vec<[usize; 3]>) {
        self.vertex_indexes = vertex_indexes;
    }

    pub fn vertex_indexes(&self) -> &[[usize; 3]] {
        &self.vertex_indexes
    }

    pub fn geometry(&self) -> &SphairahedronGeometry {
        &self.geometry
    }

    pub fn bbox(&self) -> &BoundingBox<3> {
        &self.bbox
    }

    pub fn add_update_listener<F: FnMut() + 'static>(&mut self, listener: F) {
        self.listeners.push(Box::new(listener));
    }

    /// Recomputes all derived geometry and notifies listeners.
    ///
    /// On error nothing is published and no listener runs.
    pub fn update(&mut self) -> Result<()> {
        let geometry = derive_geometry(&self.params(), &self.vertex_indexes, &self.stages)?;
        self.commit(geometry);
        for listener in self.listeners.iter_mut() {
            listener();
        }
        Ok(())
    }

    fn commit(&mut self, geometry: SphairahedronGeometry) {
        let planes = &geometry.prism_planes;
        for &(i, j) in corner_plane_pairs(planes.len()) {
            let corner = Plane::compute_intersection(&planes[i], &planes[j]);
            self.bbox.widen_axis(0, corner.x, corner.x);
            self.bbox.widen_axis(2, corner.z, corner.z);
        }
        for s in &geometry.prism_spheres {
            self.bbox.widen_axis(0, s.center.x, s.center.x);
            self.bbox.widen_axis(1, s.center.y - BBOX_Y_MARGIN, s.center.y + BBOX_Y_MARGIN);
            self.bbox.widen_axis(2, s.center.z, s.center.z);
        }

        tracing::debug!(
            vertexes = geometry.vertexes.len(),
            seed_spheres = geometry.seed_spheres.len(),
            convex_spheres = geometry.convex_spheres.len(),
            "sphairahedron updated"
        );
        self.geometry = geometry;
    }

    /// Axes the bounding box has not reached yet are written as `∓f64::MAX`.
    pub fn to_json(&self) -> SphairahedronJson {
        let g = &self.geometry;
        let bbox = self.bbox.saturated();
        SphairahedronJson {
            zb: self.zb,
            zc: self.zc,
            inversion_sphere: g.inversion_sphere.to_json(),
            prism_planes: g.prism_planes.iter().map(Plane::to_json).collect(),
            prism_spheres: g.prism_spheres.iter().map(Sphere::to_json).collect(),
            finite_spheres: g.gen_spheres.iter().map(Sphere::to_json).collect(),
            divide_planes: g.divide_planes.iter().map(Plane::to_json).collect(),
            convex_spheres: g.convex_spheres.iter().map(Sphere::to_json).collect(),
            bounding_sphere: g.bounding_sphere.to_json(),
            bounding_planes: g.bounding_planes.iter().map(Plane::to_json).collect(),
            bbox_min: bbox.min,
            bbox_max: bbox.max,
        }
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_json())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ideal_vertex_right_triangle() {
        let a = Sphere::new(0.0, 0.0, 0.0, 1.0);
        let b = Sphere::new(3.0, 0.0, 0.0, 1.0);
        let c = Sphere::new(0.0, 0.0, 3.0, 1.0);
        let v = compute_ideal_vertex(&a, &b, &c);
        assert!(v.approx_eq(Vector3::new(1.5, 0.0, 1.5)), "vertex {:?}", v);
    }

    #[test]
    fn test_ideal_vertex_collinear_is_non_finite() {
        let a = Sphere::new(0.0, 0.0, 0.0, 1.0);
        let b = Sphere::new(1.0, 0.0, 0.0, 1.0);
        let c = Sphere::new(2.0, 0.0, 0.0, 1.0);
        assert!(!compute_ideal_vertex(&a, &b, &c).is_finite());
    }

    #[test]
    fn test_seed_sphere_offset_is_always_half() {
        let a = Sphere::new(0.0, 0.0, 0.0, 1.0);
        let b = Sphere::new(3.0, 0.0, 0.0, 1.0);
        let c = Sphere::new(0.0, 0.0, 3.0, 1.0);
        let x = Vector3::new(1.5, 0.0, 1.5);
        // n = (0, -9, 0) for these centers, whatever y is chosen.
        for y in [Vector3::new(1.5, 1.5, 0.0), Vector3::new(0.0, -7.0, 2.0), Vector3::new(4.0, 0.25, 4.0)] {
            let s = compute_seed_sphere(x, y, &a, &b, &c);
            assert_eq!(s.center, Vector3::new(1.5, -4.5, 1.5));
            assert_eq!(s.r(), 4.5);
        }
    }

    #[test]
    fn test_seed_sphere_nan_when_orthogonal() {
        let a = Sphere::new(0.0, 0.0, 0.0, 1.0);
        let b = Sphere::new(3.0, 0.0, 0.0, 1.0);
        let c = Sphere::new(0.0, 0.0, 3.0, 1.0);
        let s = compute_seed_sphere(Vector3::ZERO, Vector3::new(1.0, 0.0, 1.0), &a, &b, &c);
        assert!(s.r().is_nan());

        // NaN candidates never replace the search placeholder.
        let min = compute_min_seed_sphere(Vector3::ZERO, &[Vector3::new(1.0, 0.0, 1.0)], &a, &b, &c);
        assert_eq!(min.r(), SEED_SEARCH_RADIUS);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut spheres = Vec::new();
        push_seed_sphere(&mut spheres, Sphere::new(1.0, 1.0, 1.0, 2.0), 0);
        push_seed_sphere(&mut spheres, Sphere::new(1.0, 1.0, 1.000001, 2.0), 1);
        assert_eq!(spheres.len(), 2);
    }

    #[test]
    fn test_bounding_volume_below_prism() {
        let inv = Sphere::new(0.0, -2.0, 0.0, 2.0);
        let prism = [Sphere::new(0.0, 0.0, 0.0, 0.5), Sphere::new(1.0, 0.5, 0.0, 0.5)];
        let (sphere, plane_y) = compute_bounding_volume(&inv, &prism);
        // The plane y = 0 inverts to the sphere of diameter 2 touching the inversion center.
        assert!(sphere.center.approx_eq(Vector3::new(0.0, -1.0, 0.0)), "center {:?}", sphere.center);
        assert!((sphere.r() - 1.01).abs() < 1e-6);
        assert!((sphere.r_sq() - 1.01 * 1.01).abs() < 1e-6);
        assert!((plane_y - 1.51).abs() < 1e-12);
    }

    #[test]
    fn test_bounding_volume_above_prism() {
        let inv = Sphere::new(0.0, 3.0, 0.0, 1.0);
        let prism = [Sphere::new(0.0, 0.0, 0.0, 0.5), Sphere::new(1.0, 1.0, 0.0, 0.5)];
        let (sphere, _) = compute_bounding_volume(&inv, &prism);
        // The top plane y = 1 is 2 away from the center: diameter 1/2.
        assert!(sphere.center.approx_eq(Vector3::new(0.0, 2.75, 0.0)), "center {:?}", sphere.center);
        assert!((sphere.r() - 0.25 * 1.01).abs() < 1e-6);
    }

    #[test]
    fn test_bounding_volume_without_prism_spheres() {
        let inv = Sphere::new(0.0, -2.0, 0.0, 2.0);
        let (sphere, plane_y) = compute_bounding_volume(&inv, &[]);
        assert!(sphere.center.approx_eq(Vector3::new(0.0, -1.0, 0.0)), "center {:?}", sphere.center);
        assert!((sphere.r() - 1.01).abs() < 1e-6);
        assert!((plane_y - 1.01).abs() < 1e-12);
    }

    #[test]
    fn test_missing_generator_sphere() {
        let spheres = [Sphere::new(0.0, 0.0, 0.0, 1.0)];
        let err = resolve_vertex_spheres(&spheres, &[[0, 0, 0], [0, 4, 0]]).unwrap_err();
        assert!(matches!(err, SphairahedronError::VertexIndexOutOfRange { vertex: 1, index: 4, count: 1 }));
    }
}
