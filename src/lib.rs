//! Voxfield - interior/exterior classification, signed distance fields and
//! flow fields on multi-attribute voxel grids

pub mod core;
pub mod math;
pub mod voxel;
pub mod sdf;
pub mod export;
pub mod config;
