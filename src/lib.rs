//! # sphairahedron
//!
//! `sphairahedron` builds the geometry of a sphairahedron, a solid bounded by spheres and
//! planes that seeds the limit set of a Kleinian group under repeated sphere inversion.
//! It is designed to be used in Rust as well as compiled to WebAssembly (WASM), where a
//! ray-marching renderer consumes the resulting spheres and planes.
//!
//! ## Features
//!
//! - **Inversive primitives**: [`Plane`] and [`Sphere`] with reflection/inversion of points,
//!   planes and spheres, and the exact sphere through four points.
//! - **Construction pipeline**: [`derive_geometry`] runs the nine staged derivations (inversion
//!   sphere, prism, generators, vertexes, divide planes, excavations, seed spheres, convex
//!   spheres, bounding volume) in a fixed order.
//! - **Pluggable topologies**: the group-specific stages are a [`GeneratorStages`]
//!   implementation; [`PrismGenerators`] covers the `333`, `236`, `244` and `2222` prisms.
//! - **WASM-first**: a `wasm-bindgen` class built from a JSON [`GeneratorConfig`].
//!
//! ## Degenerate input
//!
//! Geometric operations are partial. Normalizing a zero vector, inverting a sphere's own
//! center, fitting coplanar points or intersecting parallel lines produce NaN or infinite
//! coordinates, which propagate into the published geometry rather than raising an error.
//!
//! ## Main Interface
//!
//! The primary entry point is the [`Sphairahedron`] struct, which holds the configuration,
//! publishes the derived geometry on `update()` and notifies listeners.

mod bounds;
mod config;
mod error;
mod generators;
mod plane;
mod sphairahedron;
mod sphere;
pub mod topology;
pub mod vector;
mod wasm;

pub use bounds::BoundingBox;
pub use config::{GeneratorConfig, PlaneParams, SphairahedronParams, SphereParams};
pub use error::{Result, SphairahedronError};
pub use generators::{compute_plane, ExcavationSpheres, GeneratorStages, PrismGenerators};
pub use plane::{LineEquation, Plane, PlaneJson};
pub use sphairahedron::{
    compute_ideal_vertex, compute_min_seed_sphere, compute_seed_sphere, derive_geometry, Sphairahedron,
    SphairahedronGeometry, SphairahedronJson,
};
pub use sphere::{Sphere, SphereJson};
pub use topology::PrismType;
pub use vector::{Vector2, Vector3};
pub use wasm::SphairahedronJs;
