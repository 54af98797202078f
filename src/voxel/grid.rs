//! Multi-attribute voxel grid: fixed lattice plus a table of named typed grids

use std::collections::BTreeMap;

use glam::{IVec3, Vec3};

use crate::core::{Error, Result};
use crate::math::{Aabb, Lattice};
use super::handle::GridRef;
use super::kind::{ElementKind, GridData, VoxelValue};
use super::source::BoundarySource;
use super::BOUNDARY;

/// Regular 3D lattice carrying any number of named per-cell grids.
///
/// Dimensions and voxel size are fixed at construction; every grid in the table
/// has exactly `cell_count()` elements. The world-space offset can be moved.
#[derive(Clone, Debug)]
pub struct VoxelGrid {
    lattice: Lattice,
    voxel_size: Vec3,
    offset: Vec3,
    grids: BTreeMap<String, GridData>,
}

impl VoxelGrid {
    /// Create a grid with an all-false `Boundary` grid for manual painting
    pub fn new(voxel_size: Vec3, dims: IVec3) -> Result<Self> {
        let lattice = Lattice::new(dims)?;
        if !(voxel_size.cmpgt(Vec3::ZERO).all() && voxel_size.is_finite()) {
            return Err(Error::InvalidVoxelSize(voxel_size));
        }
        let mut grid = Self {
            lattice,
            voxel_size,
            offset: Vec3::ZERO,
            grids: BTreeMap::new(),
        };
        grid.add_grid::<bool>(BOUNDARY);
        Ok(grid)
    }

    /// Create a grid whose `Boundary` grid is filled from a voxelizer
    pub fn from_source(source: &dyn BoundarySource) -> Result<Self> {
        let mut grid = Self::new(source.voxel_size(), source.dimensions())?;
        grid.offset = source.min_corner();

        let lattice = grid.lattice;
        let boundary: Vec<bool> = lattice.coords().map(|c| source.is_filled(c)).collect();
        let filled = boundary.iter().filter(|&&b| b).count();
        grid.insert_grid(BOUNDARY, boundary)?;

        log::debug!(
            "Voxelized boundary: {} of {} cells filled, dims {}",
            filled, lattice.cell_count(), lattice.dims()
        );
        Ok(grid)
    }

    // --- Lattice ---

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn dimensions(&self) -> IVec3 {
        self.lattice.dims()
    }

    pub fn cell_count(&self) -> usize {
        self.lattice.cell_count()
    }

    pub fn voxel_size(&self) -> Vec3 {
        self.voxel_size
    }

    /// World-space position of voxel (0, 0, 0)
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Vec3) {
        self.offset = offset;
    }

    /// World-space corner opposite to the offset
    pub fn max_offset(&self) -> Vec3 {
        self.offset + self.lattice.dims().as_vec3() * self.voxel_size
    }

    pub fn world_bounds(&self) -> Aabb {
        Aabb::new(self.offset, self.max_offset())
    }

    pub fn hash_voxel_index(&self, coord: IVec3) -> Result<usize> {
        self.lattice.hash(coord)
    }

    pub fn reverse_hash(&self, index: usize) -> Result<IVec3> {
        self.lattice.unhash(index)
    }

    pub fn is_valid_index(&self, coord: IVec3) -> bool {
        self.lattice.contains(coord)
    }

    /// `offset + coord * voxel_size`, without any transform of the owning object
    pub fn global_coords(&self, coord: IVec3) -> Vec3 {
        self.offset + coord.as_vec3() * self.voxel_size
    }

    // --- Grid table ---

    /// Create a zero-initialized grid, replacing any grid of the same name
    pub fn add_grid<T: VoxelValue>(&mut self, name: impl Into<String>) -> GridRef<T> {
        let name = name.into();
        let data = GridData::zeroed(T::KIND, self.cell_count());
        if self.grids.insert(name.clone(), data).is_some() {
            log::warn!("{} exists, overwriting", name);
        }
        GridRef::new(name)
    }

    /// Install a prebuilt buffer as a grid, replacing any grid of the same name
    pub fn insert_grid<T: VoxelValue>(&mut self, name: impl Into<String>, values: Vec<T>) -> Result<GridRef<T>> {
        let name = name.into();
        if values.len() != self.cell_count() {
            return Err(Error::DimensionMismatch {
                name,
                expected: self.cell_count(),
                actual: values.len(),
            });
        }
        self.grids.insert(name.clone(), T::into_data(values));
        Ok(GridRef::new(name))
    }

    pub fn remove_grid(&mut self, name: &str) -> Result<()> {
        self.grids
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::GridNotFound(name.to_string()))
    }

    pub fn has_grid(&self, name: &str) -> bool {
        self.grids.contains_key(name)
    }

    pub fn grid_kind(&self, name: &str) -> Result<ElementKind> {
        self.data(name).map(GridData::kind)
    }

    /// Grid names in sorted order
    pub fn grid_names(&self) -> impl Iterator<Item = &str> {
        self.grids.keys().map(String::as_str)
    }

    /// Checked handle to an existing grid of element type `T`
    pub fn grid_ref<T: VoxelValue>(&self, name: &str) -> Result<GridRef<T>> {
        self.values::<T>(name)?;
        Ok(GridRef::new(name))
    }

    /// Handle to the seed `Boundary` grid
    pub fn boundary(&self) -> Result<GridRef<bool>> {
        self.grid_ref(BOUNDARY)
    }

    pub fn data(&self, name: &str) -> Result<&GridData> {
        self.grids
            .get(name)
            .ok_or_else(|| Error::GridNotFound(name.to_string()))
    }

    /// Whole buffer of a grid in linear-index order
    pub fn values<T: VoxelValue>(&self, name: &str) -> Result<&[T]> {
        let data = self.data(name)?;
        T::slice(data).ok_or_else(|| Error::KindMismatch {
            name: name.to_string(),
            expected: T::KIND,
            actual: data.kind(),
        })
    }

    pub fn values_mut<T: VoxelValue>(&mut self, name: &str) -> Result<&mut [T]> {
        let data = self
            .grids
            .get_mut(name)
            .ok_or_else(|| Error::GridNotFound(name.to_string()))?;
        let actual = data.kind();
        T::slice_mut(data).ok_or_else(|| Error::KindMismatch {
            name: name.to_string(),
            expected: T::KIND,
            actual,
        })
    }

    /// Buffer behind a handle
    pub fn get<T: VoxelValue>(&self, grid: &GridRef<T>) -> Result<&[T]> {
        self.values(grid.name())
    }

    // --- Voxel access ---

    pub fn voxel<T: VoxelValue>(&self, coord: IVec3, name: &str) -> Result<T> {
        let index = self.lattice.hash(coord)?;
        self.voxel_by_hash(index, name)
    }

    pub fn set_voxel<T: VoxelValue>(&mut self, coord: IVec3, name: &str, value: T) -> Result<()> {
        let index = self.lattice.hash(coord)?;
        self.set_voxel_by_hash(index, name, value)
    }

    pub fn voxel_by_hash<T: VoxelValue>(&self, index: usize, name: &str) -> Result<T> {
        let cell_count = self.cell_count();
        self.values::<T>(name)?
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfBounds { index, cell_count })
    }

    pub fn set_voxel_by_hash<T: VoxelValue>(&mut self, index: usize, name: &str, value: T) -> Result<()> {
        let cell_count = self.cell_count();
        let slot = self
            .values_mut::<T>(name)?
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, cell_count })?;
        *slot = value;
        Ok(())
    }
}
