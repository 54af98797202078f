//! Getting grids out of the crate: slice directories on disk and renderable meshes.

pub mod svx;
pub mod mesh;

pub use mesh::{boundary_mesh, vector_mesh, MeshData, MeshVertex};
