//! Euclidean signed distance field by nearest-boundary-cell propagation.
//!
//! Every cell carries the coordinate of the closest boundary cell found so far.
//! A forward sweep pulls candidates from the three lower neighbours, a backward
//! sweep from the three upper neighbours, and the final distance is measured to
//! whichever candidate survives. Like any two-pass propagation this is exact near
//! the boundary and an approximation further out.

use glam::Vec3;

use crate::core::{Error, Result};
use crate::math::Lattice;
use crate::voxel::{GridRef, VoxelGrid};
use super::BOUNDARY_LABEL;

/// Grids written by [`euclidean_sdf`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EuclideanField {
    /// Float signed distance to the nearest boundary cell
    pub distance: GridRef<f32>,
    /// Vector3 coordinate of that boundary cell, in voxel units
    pub closest: GridRef<Vec3>,
}

/// Signed Euclidean distance to the nearest boundary cell.
///
/// Writes Float grid `name` and Vector3 grid `closest_name`; the latter feeds
/// [`flow_field`](super::flow_field). The two names must differ.
pub fn euclidean_sdf(
    grid: &mut VoxelGrid,
    labels: &GridRef<i32>,
    name: &str,
    closest_name: &str,
) -> Result<EuclideanField> {
    if name == closest_name {
        return Err(Error::DuplicateOutput(name.to_string()));
    }
    let lattice = *grid.lattice();
    let label_values = grid.get(labels)?;

    // Far enough away that any real boundary cell wins
    let unreached = lattice.dims().as_vec3() * 2.0;
    let mut closest: Vec<Vec3> = label_values
        .iter()
        .enumerate()
        .map(|(i, &label)| {
            if label == BOUNDARY_LABEL {
                lattice.coord_of(i).as_vec3()
            } else {
                unreached
            }
        })
        .collect();

    for index in 0..lattice.cell_count() {
        propagate(&mut closest, &lattice, index, -1, unreached);
    }

    let mut distance = vec![0.0f32; lattice.cell_count()];
    for index in (0..lattice.cell_count()).rev() {
        let nearest = propagate(&mut closest, &lattice, index, 1, unreached);
        let point = lattice.coord_of(index).as_vec3();
        distance[index] = label_values[index].signum() as f32 * nearest.distance(point);
    }

    log::debug!("Euclidean SDF {} from {}", name, labels.name());
    let closest = grid.insert_grid(closest_name, closest)?;
    let distance = grid.insert_grid(name, distance)?;
    Ok(EuclideanField { distance, closest })
}

/// Adopt the nearest of the current candidate and the three neighbours at `step`.
fn propagate(closest: &mut [Vec3], lattice: &Lattice, index: usize, step: i32, unreached: Vec3) -> Vec3 {
    let coord = lattice.coord_of(index);
    let candidates: [Vec3; 3] = std::array::from_fn(|axis| {
        let mut neighbour = coord;
        neighbour[axis] += step;
        if lattice.contains(neighbour) {
            closest[lattice.index_of(neighbour)]
        } else {
            unreached
        }
    });
    let resolved = nearer(coord.as_vec3(), closest[index], candidates);
    closest[index] = resolved;
    resolved
}

/// Ties go to a neighbour over the current value, and to x over y over z.
#[inline]
fn nearer(point: Vec3, current: Vec3, candidates: [Vec3; 3]) -> Vec3 {
    let own = current.distance(point);
    let [dx, dy, dz] = candidates.map(|c| c.distance(point));
    if dx <= dy && dx <= dz && dx <= own {
        candidates[0]
    } else if dy <= dx && dy <= dz && dy <= own {
        candidates[1]
    } else if dz <= dx && dz <= dy && dz <= own {
        candidates[2]
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;
    use crate::sdf::classify;
    use crate::voxel::source::box_shell;
    use crate::voxel::BOUNDARY;

    const EPS: f32 = 1e-5;

    fn field_of(grid: &mut VoxelGrid) -> EuclideanField {
        let boundary = grid.boundary().unwrap();
        let labels = classify(grid, &boundary, "labels").unwrap();
        euclidean_sdf(grid, &labels, "esdf", "closest").unwrap()
    }

    #[test]
    fn test_single_voxel_distances() {
        let mut grid = VoxelGrid::new(Vec3::ONE, IVec3::splat(5)).unwrap();
        let center = IVec3::splat(2);
        grid.set_voxel(center, BOUNDARY, true).unwrap();
        let field = field_of(&mut grid);
        let at = |offset: IVec3| grid.voxel::<f32>(center + offset, field.distance.name()).unwrap();

        assert_eq!(at(IVec3::ZERO), 0.0);
        for axis in [IVec3::X, IVec3::Y, IVec3::Z] {
            assert!((at(axis) - 1.0).abs() < EPS);
            assert!((at(-axis) - 1.0).abs() < EPS);
        }
        assert!((at(IVec3::new(1, 1, 0)) - 2.0f32.sqrt()).abs() < EPS);
        assert!((at(IVec3::new(-1, -1, 0)) - 2.0f32.sqrt()).abs() < EPS);
        assert!((at(IVec3::new(1, 1, 1)) - 3.0f32.sqrt()).abs() < EPS);
    }

    #[test]
    fn test_closest_cell_side_output() {
        let mut grid = VoxelGrid::new(Vec3::ONE, IVec3::splat(5)).unwrap();
        grid.set_voxel(IVec3::new(1, 2, 3), BOUNDARY, true).unwrap();
        grid.set_voxel(IVec3::new(4, 0, 0), BOUNDARY, true).unwrap();
        let field = field_of(&mut grid);

        let closest = grid.get(&field.closest).unwrap();
        assert_eq!(closest[grid.hash_voxel_index(IVec3::new(1, 2, 3)).unwrap()], Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(closest[grid.hash_voxel_index(IVec3::new(4, 0, 0)).unwrap()], Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(closest[grid.hash_voxel_index(IVec3::new(4, 0, 1)).unwrap()], Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(closest[grid.hash_voxel_index(IVec3::new(1, 2, 4)).unwrap()], Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_hollow_cube_signs() {
        let source = box_shell(IVec3::splat(7), IVec3::splat(1), IVec3::splat(5)).unwrap();
        let mut grid = VoxelGrid::from_source(&source).unwrap();
        let field = field_of(&mut grid);
        let at = |c: IVec3| grid.voxel::<f32>(c, field.distance.name()).unwrap();

        assert!((at(IVec3::splat(3)) + 2.0).abs() < EPS);
        assert!((at(IVec3::new(2, 3, 3)) + 1.0).abs() < EPS);
        assert_eq!(at(IVec3::new(5, 3, 3)), 0.0);
        assert!((at(IVec3::new(6, 3, 3)) - 1.0).abs() < EPS);
        assert!((at(IVec3::ZERO) - 3.0f32.sqrt()).abs() < EPS);
    }

    #[test]
    fn test_shared_output_name_rejected() {
        let mut grid = VoxelGrid::new(Vec3::ONE, IVec3::splat(3)).unwrap();
        grid.set_voxel(IVec3::ONE, BOUNDARY, true).unwrap();
        let boundary = grid.boundary().unwrap();
        let labels = classify(&mut grid, &boundary, "labels").unwrap();

        let err = euclidean_sdf(&mut grid, &labels, "field", "field").unwrap_err();
        assert!(matches!(err, Error::DuplicateOutput(ref name) if name == "field"));
        assert!(!grid.has_grid("field"));
    }

    #[test]
    fn test_nearer_tie_breaking() {
        let point = Vec3::ZERO;
        let current = Vec3::new(0.0, 0.0, 1.0);
        // All three candidates tie with the current value: x wins
        let candidates = [Vec3::X, Vec3::Y, Vec3::Z * -1.0];
        assert_eq!(nearer(point, current, candidates), Vec3::X);
        // Strictly farther candidates keep the current value
        let far = [Vec3::splat(5.0); 3];
        assert_eq!(nearer(point, current, far), current);
        assert_eq!(nearer(point, current, [Vec3::splat(5.0), Vec3::Y * 0.5, Vec3::Z * 0.5]), Vec3::Y * 0.5);
    }
}
