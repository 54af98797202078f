//! Voxel grid container: lattice, named typed grids and derived Boolean grids

pub mod kind;
pub mod handle;
pub mod grid;
pub mod derive;
pub mod source;

pub use kind::{ElementKind, GridData, VoxelValue};
pub use handle::GridRef;
pub use grid::VoxelGrid;
pub use source::{BoundarySource, DenseBoundary};

/// Conventional name of the seed Boolean grid
pub const BOUNDARY: &str = "Boundary";
