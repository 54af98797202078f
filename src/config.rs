//! Grid naming configuration for the field pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::voxel::BOUNDARY;

/// Integer labels written by classification
pub const INTERIOR_EXTERIOR: &str = "InteriorExterior";
/// Integer Manhattan signed distance field
pub const MANHATTAN_SDF: &str = "MSignedDistanceField";
/// Float Euclidean signed distance field
pub const EUCLIDEAN_SDF: &str = "ESignedDistanceField";
/// Vector3 side output of the Euclidean field: nearest boundary cell per voxel
pub const CLOSEST_BOUNDARY_CELL: &str = "ClosestBoundaryCell";
/// Vector3 field pointing away from the nearest boundary cell
pub const DISTANCE_FLOW_FIELD: &str = "DistanceFlowField";

/// Names under which the pipeline reads and writes its grids.
///
/// Any key missing from a JSON document keeps its default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Seed Boolean grid
    pub boundary: String,
    pub interior_exterior: String,
    pub manhattan_sdf: String,
    pub euclidean_sdf: String,
    pub closest_boundary_cell: String,
    pub flow_field: String,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            boundary: BOUNDARY.to_string(),
            interior_exterior: INTERIOR_EXTERIOR.to_string(),
            manhattan_sdf: MANHATTAN_SDF.to_string(),
            euclidean_sdf: EUCLIDEAN_SDF.to_string(),
            closest_boundary_cell: CLOSEST_BOUNDARY_CELL.to_string(),
            flow_field: DISTANCE_FLOW_FIELD.to_string(),
        }
    }
}

impl FieldConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every grid the pipeline writes must have its own name, distinct from the boundary
    pub fn validate(&self) -> Result<()> {
        let outputs = [
            &self.interior_exterior,
            &self.manhattan_sdf,
            &self.euclidean_sdf,
            &self.closest_boundary_cell,
            &self.flow_field,
        ];
        for (i, name) in outputs.iter().enumerate() {
            if **name == self.boundary || outputs[i + 1..].contains(name) {
                return Err(Error::DuplicateOutput(name.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_names() {
        let cfg = FieldConfig::default();
        assert_eq!(cfg.boundary, "Boundary");
        assert_eq!(cfg.interior_exterior, "InteriorExterior");
        assert_eq!(cfg.closest_boundary_cell, "ClosestBoundaryCell");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = FieldConfig::from_json_str(r#"{ "flow_field": "Away" }"#).unwrap();
        assert_eq!(cfg.flow_field, "Away");
        assert_eq!(cfg.manhattan_sdf, MANHATTAN_SDF);
    }

    #[test]
    fn test_validate_rejects_shared_names() {
        assert!(FieldConfig::default().validate().is_ok());
        let cfg = FieldConfig {
            euclidean_sdf: CLOSEST_BOUNDARY_CELL.into(),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::DuplicateOutput(_))));
        let cfg = FieldConfig {
            flow_field: BOUNDARY.into(),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::DuplicateOutput(_))));
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(FieldConfig::from_json_str("{ not json").is_err());
    }

    #[test]
    fn test_file_roundtrip() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("fields.json");
        let cfg = FieldConfig {
            euclidean_sdf: "Euclid".into(),
            ..Default::default()
        };
        std::fs::write(&path, cfg.to_json_string().unwrap()).unwrap();
        assert_eq!(FieldConfig::from_json_file(&path).unwrap(), cfg);
    }
}
