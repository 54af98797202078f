//! Seed boundary input from an external voxelizer.

use glam::{IVec3, Vec3};

use crate::core::{Error, Result};
use crate::math::Lattice;
use super::BOUNDARY;

/// Producer of an initial boundary grid, typically a mesh voxelizer.
///
/// `VoxelGrid::from_source` queries every coordinate in `0..dimensions()` once.
pub trait BoundarySource {
    /// Number of voxels along x, y and z
    fn dimensions(&self) -> IVec3;

    /// Physical size of one voxel
    fn voxel_size(&self) -> Vec3;

    /// World-space minimum corner of the voxelized bounding box
    fn min_corner(&self) -> Vec3;

    /// Whether the voxel at `coord` is solid or surface
    fn is_filled(&self, coord: IVec3) -> bool;
}

/// In-memory boundary in z-fastest order
#[derive(Clone, Debug)]
pub struct DenseBoundary {
    lattice: Lattice,
    voxel_size: Vec3,
    min_corner: Vec3,
    filled: Vec<bool>,
}

impl DenseBoundary {
    /// Wrap a prefilled buffer; its length must match the dimensions
    pub fn new(dims: IVec3, voxel_size: Vec3, min_corner: Vec3, filled: Vec<bool>) -> Result<Self> {
        let lattice = Lattice::new(dims)?;
        if filled.len() != lattice.cell_count() {
            return Err(Error::DimensionMismatch {
                name: BOUNDARY.to_string(),
                expected: lattice.cell_count(),
                actual: filled.len(),
            });
        }
        Ok(Self { lattice, voxel_size, min_corner, filled })
    }

    /// Evaluate `inside` at every voxel coordinate
    pub fn from_fn(dims: IVec3, voxel_size: Vec3, min_corner: Vec3, inside: impl Fn(IVec3) -> bool) -> Result<Self> {
        let lattice = Lattice::new(dims)?;
        let filled = lattice.coords().map(inside).collect();
        Self::new(dims, voxel_size, min_corner, filled)
    }
}

impl BoundarySource for DenseBoundary {
    fn dimensions(&self) -> IVec3 {
        self.lattice.dims()
    }

    fn voxel_size(&self) -> Vec3 {
        self.voxel_size
    }

    fn min_corner(&self) -> Vec3 {
        self.min_corner
    }

    /// Coordinates outside the lattice are empty
    fn is_filled(&self, coord: IVec3) -> bool {
        self.lattice.contains(coord) && self.filled[self.lattice.index_of(coord)]
    }
}

/// Boundary of an axis-aligned box shell: every voxel on the faces of
/// `[min, max]` is filled, everything strictly inside or outside is empty.
pub fn box_shell(dims: IVec3, min: IVec3, max: IVec3) -> Result<DenseBoundary> {
    DenseBoundary::from_fn(dims, Vec3::ONE, Vec3::ZERO, |c| {
        let within = c.cmpge(min).all() && c.cmple(max).all();
        let on_face = c.cmpeq(min).any() || c.cmpeq(max).any();
        within && on_face
    })
}

/// Boundary of a spherical shell of the given radius and thickness (in voxels)
/// centered in the grid.
pub fn sphere_shell(dims: IVec3, radius: f32, thickness: f32) -> Result<DenseBoundary> {
    let center = (dims.as_vec3() - Vec3::ONE) * 0.5;
    DenseBoundary::from_fn(dims, Vec3::ONE, Vec3::ZERO, |c| {
        let d = c.as_vec3().distance(center);
        (d - radius).abs() <= thickness * 0.5
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_boundary_length_checked() {
        let err = DenseBoundary::new(IVec3::splat(2), Vec3::ONE, Vec3::ZERO, vec![false; 7]);
        assert!(matches!(err, Err(Error::DimensionMismatch { expected: 8, actual: 7, .. })));
    }

    #[test]
    fn test_from_fn_order() {
        let dims = IVec3::new(2, 3, 4);
        let src = DenseBoundary::from_fn(dims, Vec3::ONE, Vec3::ZERO, |c| c == IVec3::new(1, 2, 3)).unwrap();
        assert!(src.is_filled(IVec3::new(1, 2, 3)));
        assert!(!src.is_filled(IVec3::new(0, 2, 3)));
    }

    #[test]
    fn test_outside_coords_are_empty() {
        let src = DenseBoundary::from_fn(IVec3::splat(3), Vec3::ONE, Vec3::ZERO, |_| true).unwrap();
        assert!(src.is_filled(IVec3::new(2, 2, 2)));
        assert!(!src.is_filled(IVec3::new(-1, 0, 0)));
        assert!(!src.is_filled(IVec3::new(0, -1, 2)));
        assert!(!src.is_filled(IVec3::new(0, 0, 3)));
        assert!(!src.is_filled(IVec3::new(i32::MAX, i32::MIN, 0)));
    }

    #[test]
    fn test_invalid_dims_rejected() {
        assert!(matches!(
            DenseBoundary::from_fn(IVec3::new(2, 0, 2), Vec3::ONE, Vec3::ZERO, |_| false),
            Err(Error::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_box_shell() {
        let shell = box_shell(IVec3::splat(7), IVec3::splat(1), IVec3::splat(5)).unwrap();
        assert!(shell.is_filled(IVec3::new(1, 3, 3)));
        assert!(shell.is_filled(IVec3::new(5, 5, 5)));
        assert!(!shell.is_filled(IVec3::new(3, 3, 3)));
        assert!(!shell.is_filled(IVec3::new(0, 3, 3)));
        assert!(!shell.is_filled(IVec3::new(6, 1, 1)));
    }

    #[test]
    fn test_sphere_shell_hollow() {
        let shell = sphere_shell(IVec3::splat(15), 5.0, 1.5).unwrap();
        assert!(!shell.is_filled(IVec3::splat(7)));
        assert!(shell.is_filled(IVec3::new(12, 7, 7)));
        assert!(!shell.is_filled(IVec3::new(0, 0, 0)));
    }
}
