//! Small immutable vector value types.
//!
//! Every operation returns a new value. Division by a zero component and normalizing a zero
//! vector are not guarded: they yield non-finite components, which then propagate through
//! whatever geometry is built on top of them.

pub mod d2;
pub mod d3;

pub use d2::Vector2;
pub use d3::Vector3;
