//! Distance flow field: per-cell vectors pointing away from the nearest boundary.

use glam::Vec3;
use rayon::prelude::*;

use crate::core::Result;
use crate::voxel::{GridRef, VoxelGrid};

/// `cell - closest[cell]` for every cell, stored as Vector3 grid `name`.
///
/// `closest` is the side output of [`euclidean_sdf`](super::euclidean_sdf); the
/// result is exactly zero at boundary cells.
pub fn flow_field(grid: &mut VoxelGrid, closest: &GridRef<Vec3>, name: &str) -> Result<GridRef<Vec3>> {
    let lattice = *grid.lattice();
    let flow: Vec<Vec3> = grid
        .get(closest)?
        .par_iter()
        .enumerate()
        .map(|(i, &target)| lattice.coord_of(i).as_vec3() - target)
        .collect();
    grid.insert_grid(name, flow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;
    use crate::core::Error;
    use crate::sdf::{classify, euclidean_sdf};
    use crate::voxel::source::sphere_shell;

    #[test]
    fn test_flow_points_away_from_closest_cell() {
        let source = sphere_shell(IVec3::splat(11), 3.0, 1.0).unwrap();
        let mut grid = VoxelGrid::from_source(&source).unwrap();
        let boundary = grid.boundary().unwrap();
        let labels = classify(&mut grid, &boundary, "labels").unwrap();
        let field = euclidean_sdf(&mut grid, &labels, "esdf", "closest").unwrap();
        let flow = flow_field(&mut grid, &field.closest, "flow").unwrap();

        let closest = grid.get(&field.closest).unwrap();
        let vectors = grid.get(&flow).unwrap();
        let solid = grid.get(&boundary).unwrap();
        for (i, c) in grid.lattice().coords().enumerate() {
            assert_eq!(vectors[i], c.as_vec3() - closest[i]);
            if solid[i] {
                assert_eq!(vectors[i], Vec3::ZERO, "boundary cell {}", c);
            }
        }
    }

    #[test]
    fn test_flow_requires_closest_grid() {
        let mut grid = VoxelGrid::new(Vec3::ONE, IVec3::splat(3)).unwrap();
        let missing = GridRef::<Vec3>::new("closest");
        assert!(matches!(flow_field(&mut grid, &missing, "flow"), Err(Error::GridNotFound(_))));
        assert!(!grid.has_grid("flow"));
    }
}
