use std::cell::Cell;
use std::rc::Rc;

use sphairahedron::{
    derive_geometry, GeneratorConfig, PrismGenerators, PrismType, Sphairahedron, SphairahedronError,
    SphairahedronJson, SphairahedronParams, Sphere, Vector3,
};

fn gen_spheres() -> Vec<Sphere> {
    vec![
        Sphere::new(0.0, 0.0, 0.0, 1.0),
        Sphere::new(3.0, 0.0, 0.0, 1.0),
        Sphere::new(0.0, 0.0, 3.0, 1.0),
        Sphere::new(0.0, 3.0, 0.0, 1.5),
    ]
}

fn vertex_indexes() -> Vec<[usize; 3]> {
    vec![[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]]
}

fn inversion_sphere() -> Sphere {
    Sphere::new(0.0, -2.0, 0.0, 2.0)
}

fn prism_spheres() -> Vec<Sphere> {
    vec![Sphere::new(0.0, 0.0, 0.0, 0.5), Sphere::new(1.0, 0.5, 0.0, 0.5)]
}

fn build() -> Sphairahedron<PrismGenerators> {
    let stages = PrismGenerators::new(PrismType::Type333, inversion_sphere(), prism_spheres())
        .with_gen_spheres(gen_spheres());
    let mut s = Sphairahedron::new(0.1, -0.3, stages);
    s.set_vertex_indexes(vertex_indexes());
    s
}

fn power(p: Vector3, s: &Sphere) -> f64 {
    (p - s.center).squared_length() - s.r_sq()
}

#[test]
fn test_geometry_is_empty_before_update() {
    let s = build();
    assert!(s.geometry().vertexes.is_empty());
    assert!(s.geometry().seed_spheres.is_empty());
    assert_eq!(s.bbox().min, [f64::INFINITY; 3]);
}

#[test]
fn test_vertexes_have_equal_power() {
    let mut s = build();
    s.update().unwrap();

    let g = s.geometry();
    assert_eq!(g.vertexes.len(), 4);
    for (v, [i, j, k]) in g.vertexes.iter().zip(vertex_indexes()) {
        let (a, b, c) = (&g.gen_spheres[i], &g.gen_spheres[j], &g.gen_spheres[k]);
        assert!((power(*v, a) - power(*v, b)).abs() < 1e-9, "vertex {:?}", v);
        assert!((power(*v, a) - power(*v, c)).abs() < 1e-9, "vertex {:?}", v);

        // The vertex lies in the plane of the three centers.
        let n = (b.center - a.center).cross(c.center - a.center);
        assert!((*v - a.center).dot(n).abs() < 1e-9);
    }
    assert!(g.vertexes[0].approx_eq(Vector3::new(1.5, 0.0, 1.5)));
}

#[test]
fn test_seed_spheres_sit_half_a_normal_away() {
    let mut s = build();
    s.update().unwrap();

    let g = s.geometry();
    assert_eq!(g.seed_spheres.len(), 4);
    for ((v, [i, j, k]), seed) in g.vertexes.iter().zip(vertex_indexes()).zip(&g.seed_spheres) {
        let (a, b, c) = (&g.gen_spheres[i], &g.gen_spheres[j], &g.gen_spheres[k]);
        let n = (b.center - a.center).cross(c.center - a.center);
        assert!(seed.center.approx_eq(*v + n.scale(0.5)), "seed {:?}", seed);
        assert!((seed.r() - 0.5 * n.length()).abs() < 1e-9);
    }
}

#[test]
fn test_divide_and_convex_spheres() {
    let mut s = build();
    s.update().unwrap();

    let g = s.geometry();
    assert_eq!(g.divide_planes.len(), 1);
    assert!(g.divide_planes[0].normal.y >= 0.0);
    assert!((g.divide_planes[0].normal.length() - 1.0).abs() < 1e-9);

    // The convex sphere passes through the three vertexes and the inversion center.
    assert_eq!(g.convex_spheres.len(), 1);
    let convex = &g.convex_spheres[0];
    for p in [g.vertexes[0], g.vertexes[1], g.vertexes[2], g.inversion_sphere.center] {
        assert!((p.distance(convex.center) - convex.r()).abs() < 1e-6, "point {:?}", p);
    }
}

#[test]
fn test_bounding_volume() {
    let mut s = build();
    s.update().unwrap();

    let g = s.geometry();
    assert!(g.bounding_sphere.center.approx_eq(Vector3::new(0.0, -1.0, 0.0)));
    assert!((g.bounding_sphere.r() - 1.01).abs() < 1e-6);
    assert!((g.bounding_plane_y - 1.51).abs() < 1e-9);
    assert!(g.bounding_planes.is_empty());
    assert!(g.excavation.spheres.is_empty());
}

#[test]
fn test_bbox_contains_prism_sphere_centers() {
    let mut s = build();
    s.update().unwrap();

    let bbox = s.bbox();
    for sphere in prism_spheres() {
        assert!(bbox.contains(&sphere.center.to_array()));
    }
    assert!((bbox.min[1] - -0.1).abs() < 1e-12);
    assert!((bbox.max[1] - 0.6).abs() < 1e-12);
    // The 333 prism corners reach x = -0.5 and x = 1.
    assert!((bbox.min[0] - -0.5).abs() < 1e-9);
    assert!((bbox.max[0] - 1.0).abs() < 1e-9);
}

#[test]
fn test_update_is_deterministic() {
    let mut s = build();
    s.update().unwrap();
    let first = s.geometry().clone();
    let first_bbox = *s.bbox();
    s.update().unwrap();
    assert_eq!(&first, s.geometry());
    assert_eq!(&first_bbox, s.bbox());

    let fresh = derive_geometry(&SphairahedronParams::new(0.1, -0.3), &vertex_indexes(), s.stages()).unwrap();
    assert_eq!(first, fresh);
}

#[test]
fn test_listeners_run_once_per_update() {
    let mut s = build();
    let calls = Rc::new(Cell::new(0));
    let seen = calls.clone();
    s.add_update_listener(move || seen.set(seen.get() + 1));

    s.update().unwrap();
    assert_eq!(calls.get(), 1);
    s.update().unwrap();
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_failed_update_keeps_previous_geometry() {
    let mut s = build();
    let calls = Rc::new(Cell::new(0));
    let seen = calls.clone();
    s.add_update_listener(move || seen.set(seen.get() + 1));
    s.update().unwrap();
    let before = s.geometry().clone();

    s.set_vertex_indexes(vec![[0, 1, 7]]);
    let err = s.update().unwrap_err();
    assert!(matches!(err, SphairahedronError::VertexIndexOutOfRange { vertex: 0, index: 7, count: 4 }));
    assert_eq!(&before, s.geometry());
    assert_eq!(calls.get(), 1);

    // A single vertex cannot span the default divide plane.
    s.set_vertex_indexes(vec![[0, 1, 2]]);
    let err = s.update().unwrap_err();
    assert!(matches!(err, SphairahedronError::VertexOutOfRange { index: 1, count: 1 }));
    assert_eq!(&before, s.geometry());
}

#[test]
fn test_json_document_layout() {
    let mut s = build();
    s.update().unwrap();

    let value: serde_json::Value = serde_json::from_str(&s.to_json_string().unwrap()).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    for key in [
        "zb", "zc", "inversionSphere", "prismPlanes", "prismSpheres", "finiteSpheres", "dividePlanes",
        "convexSpheres", "boundingSphere", "boundingPlanes", "bboxMin", "bboxMax",
    ] {
        assert!(keys.contains(&key), "missing {}", key);
    }
    assert_eq!(value["zb"], 0.1);
    assert_eq!(value["prismPlanes"].as_array().unwrap().len(), 3);
    assert_eq!(value["finiteSpheres"].as_array().unwrap().len(), 4);
    assert_eq!(value["inversionSphere"]["center"][1], -2.0);
    assert_eq!(value["inversionSphere"]["r"], 2.0);
}

#[test]
fn test_json_without_prism_spheres_parses_back() {
    let stages = PrismGenerators::new(PrismType::Type333, inversion_sphere(), Vec::new())
        .with_gen_spheres(gen_spheres());
    let mut s = Sphairahedron::new(0.1, -0.3, stages);
    s.set_vertex_indexes(vertex_indexes());

    let before: SphairahedronJson = serde_json::from_str(&s.to_json_string().unwrap()).unwrap();
    assert_eq!(before.bbox_min, [f64::MAX; 3]);
    assert_eq!(before.bbox_max, [-f64::MAX; 3]);

    s.update().unwrap();
    let after: SphairahedronJson = serde_json::from_str(&s.to_json_string().unwrap()).unwrap();
    assert_eq!(after, s.to_json());
    // Only the prism corners widened the box; Y was never reached.
    assert!((after.bbox_min[0] - -0.5).abs() < 1e-9);
    assert_eq!(after.bbox_min[1], f64::MAX);
    assert_eq!(after.bbox_max[1], -f64::MAX);
}

#[test]
fn test_config_builds_equivalent_sphairahedron() {
    let text = r#"{
        "params": { "zb": 0.1, "zc": -0.3 },
        "prismType": "333",
        "inversionSphere": { "center": [0.0, -2.0, 0.0], "radius": 2.0 },
        "prismSpheres": [
            { "center": [0.0, 0.0, 0.0], "radius": 0.5 },
            { "center": [1.0, 0.5, 0.0], "radius": 0.5 }
        ],
        "finiteSpheres": [
            { "center": [0.0, 0.0, 0.0], "radius": 1.0 },
            { "center": [3.0, 0.0, 0.0], "radius": 1.0 },
            { "center": [0.0, 0.0, 3.0], "radius": 1.0 },
            { "center": [0.0, 3.0, 0.0], "radius": 1.5 }
        ],
        "vertexIndexes": [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]]
    }"#;
    let mut from_config = GeneratorConfig::from_json(text).unwrap().build();
    from_config.update().unwrap();

    let mut direct = build();
    direct.update().unwrap();
    assert_eq!(from_config.geometry(), direct.geometry());
}
