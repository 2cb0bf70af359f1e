use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::config::GeneratorConfig;
use crate::generators::PrismGenerators;
use crate::sphairahedron::Sphairahedron;
use crate::sphere::Sphere;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

#[wasm_bindgen(typescript_custom_section)]
const TS_PRISM_TYPES: &'static str = r#"
export type PrismType = "333" | "236" | "244" | "2222";
"#;

fn to_js_error(err: crate::SphairahedronError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn flatten_spheres(spheres: &[Sphere]) -> Vec<f64> {
    spheres
        .iter()
        .flat_map(|s| [s.center.x, s.center.y, s.center.z, s.r()])
        .collect()
}

/// WASM wrapper around a [`Sphairahedron`] built from a JSON [`GeneratorConfig`].
#[wasm_bindgen(js_name = Sphairahedron)]
pub struct SphairahedronJs {
    inner: Sphairahedron<PrismGenerators>,
}

#[wasm_bindgen(js_class = Sphairahedron)]
impl SphairahedronJs {
    #[wasm_bindgen(constructor)]
    pub fn new(config: &str) -> Result<SphairahedronJs, JsValue> {
        let config = GeneratorConfig::from_json(config).map_err(to_js_error)?;
        Ok(SphairahedronJs { inner: config.build() })
    }

    #[wasm_bindgen(getter)]
    pub fn zb(&self) -> f64 { self.inner.zb }
    #[wasm_bindgen(getter)]
    pub fn zc(&self) -> f64 { self.inner.zc }

    #[wasm_bindgen(js_name = setParams)]
    pub fn set_params(&mut self, zb: f64, zc: f64) { self.inner.set_params(zb, zc); }

    #[wasm_bindgen(js_name = setVertexIndexes)]
    pub fn set_vertex_indexes(&mut self, indexes: &[u32]) -> Result<(), JsValue> {
        if indexes.len() % 3 != 0 {
            return Err(JsValue::from_str("vertex indexes must come in triples"));
        }
        let table = indexes
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
            .collect();
        self.inner.set_vertex_indexes(table);
        Ok(())
    }

    /// Listeners are called with no arguments after each successful update.
    #[wasm_bindgen(js_name = addUpdateListener)]
    pub fn add_update_listener(&mut self, listener: Function) {
        self.inner.add_update_listener(move || {
            // A throwing listener must not stop the remaining ones.
            report_listener_error(listener.call0(&JsValue::NULL));
        });
    }

    pub fn update(&mut self) -> Result<(), JsValue> {
        self.inner.update().map_err(to_js_error)
    }

    /// The renderer-facing JSON document as a string.
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.inner.to_json_string().map_err(to_js_error)
    }

    /// Vertex coordinates as a flat `[x, y, z, ...]` array.
    #[wasm_bindgen(getter)]
    pub fn vertexes(&self) -> Vec<f64> {
        self.inner.geometry().vertexes.iter().flat_map(|v| v.to_array()).collect()
    }

    /// Seed spheres as a flat `[x, y, z, r, ...]` array.
    #[wasm_bindgen(getter, js_name = seedSpheres)]
    pub fn seed_spheres(&self) -> Vec<f64> {
        flatten_spheres(&self.inner.geometry().seed_spheres)
    }

    /// Generator spheres as a flat `[x, y, z, r, ...]` array.
    #[wasm_bindgen(getter, js_name = finiteSpheres)]
    pub fn finite_spheres(&self) -> Vec<f64> {
        flatten_spheres(&self.inner.geometry().gen_spheres)
    }

    /// Convex spheres as a flat `[x, y, z, r, ...]` array.
    #[wasm_bindgen(getter, js_name = convexSpheres)]
    pub fn convex_spheres(&self) -> Vec<f64> {
        flatten_spheres(&self.inner.geometry().convex_spheres)
    }

    #[wasm_bindgen(getter, js_name = boundingSphere)]
    pub fn bounding_sphere(&self) -> Vec<f64> {
        flatten_spheres(std::slice::from_ref(&self.inner.geometry().bounding_sphere))
    }
}

/// Logs an exception thrown by an update listener. Returns whether one was thrown.
fn report_listener_error<T, E: std::fmt::Debug>(result: Result<T, E>) -> bool {
    match result {
        Ok(_) => false,
        Err(err) => {
            tracing::warn!(error = ?err, "update listener threw");
            true
        }
    }
}
