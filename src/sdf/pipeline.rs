//! Conventional-name entry points and the end-to-end field pipeline.

use std::time::Instant;

use glam::Vec3;

use crate::config::{
    FieldConfig, CLOSEST_BOUNDARY_CELL, DISTANCE_FLOW_FIELD, EUCLIDEAN_SDF, INTERIOR_EXTERIOR, MANHATTAN_SDF,
};
use crate::core::Result;
use crate::voxel::{GridRef, VoxelGrid};
use super::{classify, euclidean_sdf, flow_field, manhattan_sdf, EuclideanField};

impl VoxelGrid {
    /// Classify `Boundary` into `InteriorExterior`, replacing any previous labels.
    pub fn generate_interior_exterior_grid(&mut self) -> Result<GridRef<i32>> {
        let boundary = self.boundary()?;
        classify(self, &boundary, INTERIOR_EXTERIOR)
    }

    /// Existing `InteriorExterior` labels, or fresh ones if there are none yet.
    pub fn interior_exterior_or_classify(&mut self) -> Result<GridRef<i32>> {
        if self.has_grid(INTERIOR_EXTERIOR) {
            self.grid_ref(INTERIOR_EXTERIOR)
        } else {
            self.generate_interior_exterior_grid()
        }
    }

    /// Manhattan SDF into `name` (default `MSignedDistanceField`).
    pub fn generate_manhattan_sdf(&mut self, name: Option<&str>) -> Result<GridRef<i32>> {
        let labels = self.interior_exterior_or_classify()?;
        manhattan_sdf(self, &labels, name.unwrap_or(MANHATTAN_SDF))
    }

    /// Euclidean SDF into `name` (default `ESignedDistanceField`), plus `ClosestBoundaryCell`.
    pub fn generate_euclidean_sdf(&mut self, name: Option<&str>) -> Result<GridRef<f32>> {
        let labels = self.interior_exterior_or_classify()?;
        let field = euclidean_sdf(self, &labels, name.unwrap_or(EUCLIDEAN_SDF), CLOSEST_BOUNDARY_CELL)?;
        Ok(field.distance)
    }

    /// Flow field into `name` (default `DistanceFlowField`).
    ///
    /// Needs `ClosestBoundaryCell` from a previous Euclidean run; it is not computed here.
    pub fn generate_distance_flow_field(&mut self, name: Option<&str>) -> Result<GridRef<Vec3>> {
        let closest = self.grid_ref::<Vec3>(CLOSEST_BOUNDARY_CELL)?;
        flow_field(self, &closest, name.unwrap_or(DISTANCE_FLOW_FIELD))
    }
}

/// Handles to every grid written by [`FieldPipeline::run`]
#[derive(Clone, Debug)]
pub struct FieldSet {
    pub labels: GridRef<i32>,
    pub manhattan: GridRef<i32>,
    pub euclidean: EuclideanField,
    pub flow: GridRef<Vec3>,
}

/// Runs classification, both distance fields and the flow field in order
#[derive(Clone, Debug, Default)]
pub struct FieldPipeline {
    config: FieldConfig,
}

impl FieldPipeline {
    pub fn new(config: FieldConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn run(&self, grid: &mut VoxelGrid) -> Result<FieldSet> {
        let cfg = &self.config;
        cfg.validate()?;
        let boundary = grid.grid_ref::<bool>(&cfg.boundary)?;
        let dims = grid.dimensions();
        log::info!("Generating fields for {}x{}x{} grid", dims.x, dims.y, dims.z);

        let start = Instant::now();
        let labels = classify(grid, &boundary, &cfg.interior_exterior)?;
        log::info!("  {} in {:.2?}", cfg.interior_exterior, start.elapsed());

        let start = Instant::now();
        let manhattan = manhattan_sdf(grid, &labels, &cfg.manhattan_sdf)?;
        log::info!("  {} in {:.2?}", cfg.manhattan_sdf, start.elapsed());

        let start = Instant::now();
        let euclidean = euclidean_sdf(grid, &labels, &cfg.euclidean_sdf, &cfg.closest_boundary_cell)?;
        log::info!("  {} in {:.2?}", cfg.euclidean_sdf, start.elapsed());

        let start = Instant::now();
        let flow = flow_field(grid, &euclidean.closest, &cfg.flow_field)?;
        log::info!("  {} in {:.2?}", cfg.flow_field, start.elapsed());

        Ok(FieldSet { labels, manhattan, euclidean, flow })
    }
}
