//! Manhattan (city-block) signed distance field by two-pass chamfer sweep.

use crate::core::Result;
use crate::math::Lattice;
use crate::voxel::{GridRef, VoxelGrid};

/// Signed Manhattan distance to the nearest boundary cell, stored as Integer grid `name`.
///
/// Starts from the classification labels, then relaxes every non-boundary cell
/// against its three lower neighbours in ascending order and its three upper
/// neighbours in descending order. Cells no boundary can reach keep a sentinel
/// magnitude near `i32::MAX`.
pub fn manhattan_sdf(grid: &mut VoxelGrid, labels: &GridRef<i32>, name: &str) -> Result<GridRef<i32>> {
    let lattice = *grid.lattice();
    let mut field = grid.get(labels)?.to_vec();

    // Linear order is x-major, so ascending index == ascending (x, y, z)
    for index in 0..lattice.cell_count() {
        relax_cell(&mut field, &lattice, index, -1);
    }
    for index in (0..lattice.cell_count()).rev() {
        relax_cell(&mut field, &lattice, index, 1);
    }

    log::debug!("Manhattan SDF {} from {}", name, labels.name());
    grid.insert_grid(name, field)
}

fn relax_cell(field: &mut [i32], lattice: &Lattice, index: usize, step: i32) {
    let current = field[index];
    if current == 0 {
        return;
    }
    let coord = lattice.coord_of(index);
    let nearest = (0..3)
        .filter_map(|axis| {
            let mut neighbour = coord;
            neighbour[axis] += step;
            lattice
                .contains(neighbour)
                .then(|| magnitude(field[lattice.index_of(neighbour)]))
        })
        .min();
    field[index] = relax(current, nearest);
}

/// Neighbour magnitude; the interior sentinel is clamped so `+ 1` stays in range
#[inline]
fn magnitude(value: i32) -> i32 {
    value.max(-(i32::MAX - 1)).abs()
}

/// `sign(current) * min(|current|, nearest + 1)`
#[inline]
fn relax(current: i32, nearest: Option<i32>) -> i32 {
    let own = current.max(-i32::MAX).abs();
    let through = nearest.map_or(i32::MAX, |n| n.saturating_add(1));
    current.signum() * own.min(through)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{IVec3, Vec3};
    use crate::sdf::{classify, EXTERIOR, INTERIOR};
    use crate::voxel::source::box_shell;
    use crate::voxel::BOUNDARY;

    fn field_of(grid: &mut VoxelGrid) -> Vec<i32> {
        let boundary = grid.boundary().unwrap();
        let labels = classify(grid, &boundary, "labels").unwrap();
        let sdf = manhattan_sdf(grid, &labels, "msdf").unwrap();
        grid.get(&sdf).unwrap().to_vec()
    }

    fn single_voxel_grid() -> VoxelGrid {
        let mut grid = VoxelGrid::new(Vec3::ONE, IVec3::splat(5)).unwrap();
        grid.set_voxel(IVec3::splat(2), BOUNDARY, true).unwrap();
        grid
    }

    #[test]
    fn test_single_voxel_city_block() {
        let mut grid = single_voxel_grid();
        let field = field_of(&mut grid);
        let at = |offset: IVec3| field[grid.hash_voxel_index(IVec3::splat(2) + offset).unwrap()];

        assert_eq!(at(IVec3::ZERO), 0);
        for axis in [IVec3::X, IVec3::Y, IVec3::Z] {
            assert_eq!(at(axis), 1);
            assert_eq!(at(-axis), 1);
        }
        assert_eq!(at(IVec3::new(1, 1, 0)), 2);
        assert_eq!(at(IVec3::new(-1, 0, 1)), 2);
        assert_eq!(at(IVec3::new(0, -1, -1)), 2);
        assert_eq!(at(IVec3::new(1, 1, 1)), 3);
        assert_eq!(at(IVec3::splat(-2)), 6);
    }

    #[test]
    fn test_every_cell_matches_l1_distance() {
        let mut grid = single_voxel_grid();
        let field = field_of(&mut grid);
        for c in grid.lattice().coords() {
            let expected = (c - IVec3::splat(2)).abs().element_sum();
            assert_eq!(field[grid.hash_voxel_index(c).unwrap()], expected, "cell {}", c);
        }
    }

    #[test]
    fn test_hollow_cube_signs() {
        let source = box_shell(IVec3::splat(7), IVec3::splat(1), IVec3::splat(5)).unwrap();
        let mut grid = VoxelGrid::from_source(&source).unwrap();
        let field = field_of(&mut grid);
        let at = |c: IVec3| field[grid.hash_voxel_index(c).unwrap()];

        assert_eq!(at(IVec3::splat(3)), -2);
        assert_eq!(at(IVec3::new(2, 3, 3)), -1);
        assert_eq!(at(IVec3::new(1, 3, 3)), 0);
        assert_eq!(at(IVec3::new(0, 3, 3)), 1);
        assert_eq!(at(IVec3::ZERO), 3);
    }

    #[test]
    fn test_no_boundary_keeps_sentinel() {
        let mut grid = VoxelGrid::new(Vec3::ONE, IVec3::splat(4)).unwrap();
        assert!(field_of(&mut grid).iter().all(|&v| v == EXTERIOR));
    }

    #[test]
    fn test_all_boundary_is_zero() {
        let mut grid = VoxelGrid::new(Vec3::ONE, IVec3::splat(3)).unwrap();
        grid.values_mut::<bool>(BOUNDARY).unwrap().fill(true);
        assert!(field_of(&mut grid).iter().all(|&v| v == 0));
    }

    #[test]
    fn test_relax_never_overflows() {
        assert_eq!(relax(EXTERIOR, Some(magnitude(EXTERIOR))), EXTERIOR);
        assert_eq!(relax(INTERIOR, Some(magnitude(INTERIOR))), -i32::MAX);
        assert_eq!(relax(INTERIOR, None), -i32::MAX);
        assert_eq!(relax(INTERIOR, Some(3)), -4);
        assert_eq!(relax(-2, Some(5)), -2);
        assert_eq!(relax(0, Some(0)), 0);
    }
}
