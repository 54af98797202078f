//! Error types for voxel grid operations

use glam::{IVec3, Vec3};
use thiserror::Error;

use crate::voxel::ElementKind;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("grid '{0}' not found")]
    GridNotFound(String),

    #[error("grid '{name}' holds {actual} voxels, requested as {expected}")]
    KindMismatch {
        name: String,
        expected: ElementKind,
        actual: ElementKind,
    },

    #[error("voxel {coord} is outside grid dimensions {dims}")]
    OutOfBounds { coord: IVec3, dims: IVec3 },

    #[error("linear index {index} is outside cell count {cell_count}")]
    IndexOutOfBounds { index: usize, cell_count: usize },

    #[error("grid '{name}' has {actual} cells, expected {expected}")]
    DimensionMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("two outputs of one pass are both named '{0}'")]
    DuplicateOutput(String),

    #[error("invalid grid dimensions {0}")]
    InvalidDimensions(IVec3),

    #[error("invalid voxel size {0}")]
    InvalidVoxelSize(Vec3),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Format error: {0}")]
    Format(String),
}
