//! Linear indexing for dense voxel lattices.
//!
//! A coordinate (x, y, z) maps to `z + y * dim_z + x * dim_z * dim_y`, so z varies
//! fastest. Coordinate listings and buffer layouts throughout the crate rely on
//! this order.

use glam::IVec3;

use crate::core::{Error, Result};

/// Dimensions of a dense 3D lattice plus the index codec over them
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lattice {
    dims: IVec3,
    cell_count: usize,
}

impl Lattice {
    /// Create a lattice, rejecting non-positive dimensions
    pub fn new(dims: IVec3) -> Result<Self> {
        if dims.min_element() <= 0 {
            return Err(Error::InvalidDimensions(dims));
        }
        let cell_count = (dims.x as usize)
            .checked_mul(dims.y as usize)
            .and_then(|n| n.checked_mul(dims.z as usize))
            .ok_or(Error::InvalidDimensions(dims))?;
        Ok(Self { dims, cell_count })
    }

    /// Number of cells along each axis
    pub fn dims(&self) -> IVec3 {
        self.dims
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Linear distance between neighbours along x, y and z
    pub fn strides(&self) -> [usize; 3] {
        let dz = self.dims.z as usize;
        let dy = self.dims.y as usize;
        [dz * dy, dz, 1]
    }

    /// True iff every component is >= 0 and below its dimension
    #[inline]
    pub fn contains(&self, coord: IVec3) -> bool {
        coord.cmpge(IVec3::ZERO).all() && coord.cmplt(self.dims).all()
    }

    /// Coordinate to linear index
    pub fn hash(&self, coord: IVec3) -> Result<usize> {
        if !self.contains(coord) {
            return Err(Error::OutOfBounds { coord, dims: self.dims });
        }
        Ok(self.index_of(coord))
    }

    /// Linear index to coordinate
    pub fn unhash(&self, index: usize) -> Result<IVec3> {
        if index >= self.cell_count {
            return Err(Error::IndexOutOfBounds { index, cell_count: self.cell_count });
        }
        Ok(self.coord_of(index))
    }

    /// Linear index of a coordinate already known to be inside the lattice
    #[inline]
    pub(crate) fn index_of(&self, coord: IVec3) -> usize {
        debug_assert!(self.contains(coord));
        let [sx, sy, _] = self.strides();
        coord.z as usize + coord.y as usize * sy + coord.x as usize * sx
    }

    /// Coordinate of an index already known to be below the cell count
    #[inline]
    pub(crate) fn coord_of(&self, index: usize) -> IVec3 {
        let dz = self.dims.z as usize;
        let dy = self.dims.y as usize;
        IVec3::new(
            (index / dz / dy) as i32,
            (index / dz % dy) as i32,
            (index % dz) as i32,
        )
    }

    /// Every coordinate, in ascending linear-index order
    pub fn coords(&self) -> impl Iterator<Item = IVec3> + '_ {
        (0..self.cell_count).map(|i| self.coord_of(i))
    }
}
