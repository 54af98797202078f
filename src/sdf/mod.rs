//! Volumetric fields derived from a boundary grid.
//!
//! The pipeline is:
//! 1. [`classify`] labels every cell interior, exterior or boundary
//! 2. [`manhattan_sdf`] / [`euclidean_sdf`] turn the labels into signed distances
//! 3. [`flow_field`] turns the Euclidean side output into vectors pointing away
//!    from the nearest boundary cell
//!
//! Each step takes its input grid as an explicit [`GridRef`](crate::voxel::GridRef).
//! The `generate_*` methods on [`VoxelGrid`](crate::voxel::VoxelGrid) wrap these
//! with the conventional grid names.

pub mod classify;
pub mod manhattan;
pub mod euclidean;
pub mod flow;
pub mod pipeline;

pub use classify::classify;
pub use manhattan::manhattan_sdf;
pub use euclidean::{euclidean_sdf, EuclideanField};
pub use flow::flow_field;
pub use pipeline::{FieldPipeline, FieldSet};

/// Label of boundary cells
pub const BOUNDARY_LABEL: i32 = 0;
/// Label of exterior cells; also "unreached" for positive distances
pub const EXTERIOR: i32 = i32::MAX;
/// Label of interior cells
pub const INTERIOR: i32 = i32::MIN;
