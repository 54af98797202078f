//! Lattice indexing and bounds

pub mod aabb;
pub mod lattice;

pub use aabb::Aabb;
pub use lattice::Lattice;
