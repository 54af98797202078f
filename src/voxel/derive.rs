//! Boolean grids and coordinate sets derived from existing typed grids.
//!
//! All filters visit cells independently and run on the rayon pool. Results keep
//! linear-index order.

use glam::{IVec3, Vec3};
use rayon::prelude::*;

use crate::core::Result;
use super::grid::VoxelGrid;
use super::handle::GridRef;
use super::kind::VoxelValue;

impl VoxelGrid {
    /// Create (or overwrite) Boolean grid `dst` that is true where `lo <= src <= hi`.
    ///
    /// Returns the number of true cells.
    pub fn bool_grid_from_int_range(&mut self, src: &str, dst: &str, lo: i32, hi: i32) -> Result<usize> {
        self.bool_grid_from_predicate::<i32>(src, dst, |v| lo <= v && v <= hi)
            .map(|(_, filled)| filled)
    }

    /// Float counterpart of [`VoxelGrid::bool_grid_from_int_range`]; NaN cells are never in range.
    pub fn bool_grid_from_float_range(&mut self, src: &str, dst: &str, lo: f32, hi: f32) -> Result<usize> {
        self.bool_grid_from_predicate::<f32>(src, dst, |v| lo <= v && v <= hi)
            .map(|(_, filled)| filled)
    }

    /// Create (or overwrite) Boolean grid `dst = predicate(src)` over a Vector3 grid.
    pub fn bool_grid_from_vector3(
        &mut self,
        src: &str,
        dst: &str,
        predicate: impl Fn(Vec3) -> bool + Sync,
    ) -> Result<usize> {
        self.bool_grid_from_predicate::<Vec3>(src, dst, predicate)
            .map(|(_, filled)| filled)
    }

    /// Create (or overwrite) Boolean grid `dst = predicate(src)` for any element kind.
    ///
    /// `src` is read completely before `dst` is written, so `src == dst` replaces
    /// the source with its mask.
    pub fn bool_grid_from_predicate<T: VoxelValue>(
        &mut self,
        src: &str,
        dst: &str,
        predicate: impl Fn(T) -> bool + Sync,
    ) -> Result<(GridRef<bool>, usize)> {
        let mask: Vec<bool> = self
            .values::<T>(src)?
            .par_iter()
            .map(|&v| predicate(v))
            .collect();
        let filled = mask.iter().filter(|&&b| b).count();
        let handle = self.insert_grid(dst, mask)?;

        log::debug!("{} -> {}: {} of {} cells set", src, dst, filled, self.cell_count());
        Ok((handle, filled))
    }

    /// Append every coordinate whose `src` value satisfies `predicate` to `out`,
    /// in ascending linear-index order. `out` is not cleared.
    pub fn collect_where<T: VoxelValue>(
        &self,
        out: &mut Vec<IVec3>,
        src: &str,
        predicate: impl Fn(T) -> bool + Sync,
    ) -> Result<()> {
        let lattice = *self.lattice();
        let matches: Vec<IVec3> = self
            .values::<T>(src)?
            .par_iter()
            .enumerate()
            .filter(|&(_, &v)| predicate(v))
            .map(|(i, _)| lattice.coord_of(i))
            .collect();
        out.extend(matches);
        Ok(())
    }

    /// Number of cells whose `src` value satisfies `predicate`
    pub fn count_where<T: VoxelValue>(&self, src: &str, predicate: impl Fn(T) -> bool + Sync) -> Result<usize> {
        Ok(self
            .values::<T>(src)?
            .par_iter()
            .filter(|&&v| predicate(v))
            .count())
    }
}
