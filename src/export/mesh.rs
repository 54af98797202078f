//! Triangle meshes for looking at grids: cubes for Boolean grids, arrows for
//! Vector3 grids. Output is plain vertex/index data ready for upload.

use bytemuck::{Pod, Zeroable};
use glam::{IVec3, Vec3};

use crate::core::Result;
use crate::voxel::VoxelGrid;

const CUBE_COLOR: [f32; 3] = [0.4, 0.8, 1.0];
const ARROW_TIP_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const ARROW_BASE_COLOR: [f32; 3] = [0.0, 0.3, 1.0];

/// Face normal plus two in-face axes with `u x v == normal`
const CUBE_FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::Y, Vec3::Z),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::Z, Vec3::X),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::Y, Vec3::X),
];

/// Counter-clockwise face corners in (u, v)
const FACE_CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

pub const CUBE_VERTICES: usize = 24;
pub const CUBE_INDICES: usize = 36;
pub const ARROW_VERTICES: usize = 5;
pub const ARROW_INDICES: usize = 18;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl MeshVertex {
    fn new(position: Vec3, normal: Vec3, color: [f32; 3]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push_cube(&mut self, mid: Vec3, half: Vec3) {
        for (normal, u, v) in CUBE_FACES {
            let base = self.vertices.len() as u32;
            for (su, sv) in FACE_CORNERS {
                let corner = normal + u * su + v * sv;
                // Slightly rounded shading: mostly the face, a little of the corner
                let shading = normal * 0.75 + corner.normalize() * 0.25;
                self.vertices.push(MeshVertex::new(mid + corner * half, shading, CUBE_COLOR));
            }
            self.indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
        }
    }

    fn push_arrow(&mut self, mid: Vec3, vector: Vec3, voxel_size: Vec3) {
        let dir = vector.normalize();
        let mut side = vector.cross(Vec3::Y);
        if side == Vec3::ZERO {
            side = Vec3::X;
        }
        let up = vector.cross(side);

        let tip = mid + dir * voxel_size / 2.0;
        let spread = voxel_size / 20.0;
        let ring = [
            mid + side.normalize() * spread,
            mid + up.normalize() * spread,
            mid - side.normalize() * spread,
            mid - up.normalize() * spread,
        ];

        let base = self.vertices.len() as u32;
        self.vertices.push(MeshVertex::new(tip, dir, ARROW_TIP_COLOR));
        for p in ring {
            self.vertices.push(MeshVertex::new(p, (p - mid).normalize(), ARROW_BASE_COLOR));
        }
        for i in 0..4 {
            self.indices.extend([base, base + 1 + i, base + 1 + (i + 1) % 4]);
        }
        self.indices.extend([base + 1, base + 3, base + 2, base + 1, base + 4, base + 3]);
    }
}

/// One cube per true cell of Boolean grid `name`, centred on the cell's world position.
pub fn boundary_mesh(grid: &VoxelGrid, name: &str) -> Result<MeshData> {
    let values = grid.values::<bool>(name)?;
    let half = grid.voxel_size() / 2.0;
    let filled = values.iter().filter(|&&b| b).count();

    let mut mesh = MeshData {
        vertices: Vec::with_capacity(filled * CUBE_VERTICES),
        indices: Vec::with_capacity(filled * CUBE_INDICES),
    };
    for (coord, _) in grid.lattice().coords().zip(values).filter(|&(_, &b)| b) {
        mesh.push_cube(grid.global_coords(coord), half);
    }

    log::debug!("{} mesh: {} cubes, {} vertices", name, filled, mesh.vertices.len());
    Ok(mesh)
}

/// One arrow per non-zero cell of Vector3 grid `name`, pointing along the stored vector.
pub fn vector_mesh(grid: &VoxelGrid, name: &str) -> Result<MeshData> {
    let values = grid.values::<Vec3>(name)?;
    let voxel_size = grid.voxel_size();

    let mut mesh = MeshData::default();
    let arrows: Vec<(IVec3, Vec3)> = grid
        .lattice()
        .coords()
        .zip(values.iter().copied())
        .filter(|&(_, v)| v != Vec3::ZERO)
        .collect();
    mesh.vertices.reserve(arrows.len() * ARROW_VERTICES);
    mesh.indices.reserve(arrows.len() * ARROW_INDICES);
    for (coord, vector) in arrows {
        mesh.push_arrow(grid.global_coords(coord), vector, voxel_size);
    }

    log::debug!("{} mesh: {} arrows", name, mesh.vertices.len() / ARROW_VERTICES);
    Ok(mesh)
}
