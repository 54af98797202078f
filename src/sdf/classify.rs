//! Interior/exterior classification by six-direction ray shadow voting.
//!
//! For every axis-aligned ray, cells at and beyond the first boundary cell seen
//! from an edge are in that edge's shadow. A non-boundary cell is exterior when it
//! is unshadowed from both ends of some axis, or from at least one end of every
//! axis. Everything else is interior. Thin or leaky shells can be misclassified;
//! the distance fields are defined relative to exactly this labeling.

use rayon::prelude::*;

use crate::core::Result;
use crate::math::Lattice;
use crate::voxel::{GridRef, VoxelGrid};
use super::{BOUNDARY_LABEL, EXTERIOR, INTERIOR};

/// Label every cell of `boundary` and store the result as Integer grid `name`.
///
/// Boundary cells get [`BOUNDARY_LABEL`], the rest [`EXTERIOR`] or [`INTERIOR`].
pub fn classify(grid: &mut VoxelGrid, boundary: &GridRef<bool>, name: &str) -> Result<GridRef<i32>> {
    let lattice = *grid.lattice();
    let solid = grid.get(boundary)?;

    // Index = axis * 2 + (ray starts at the max edge)
    let shadows: Vec<Vec<bool>> = (0..6usize)
        .into_par_iter()
        .map(|dir| cast_shadow(solid, &lattice, dir / 2, dir % 2 == 1))
        .collect();

    let labels: Vec<i32> = (0..lattice.cell_count())
        .into_par_iter()
        .map(|i| {
            if solid[i] {
                return BOUNDARY_LABEL;
            }
            let open: [bool; 6] = std::array::from_fn(|dir| !shadows[dir][i]);
            if is_exterior(open) { EXTERIOR } else { INTERIOR }
        })
        .collect();

    let interior = labels.iter().filter(|&&l| l == INTERIOR).count();
    let exterior = labels.iter().filter(|&&l| l == EXTERIOR).count();
    log::debug!(
        "Classified {}: {} interior, {} exterior, {} boundary",
        boundary.name(), interior, exterior, labels.len() - interior - exterior
    );

    grid.insert_grid(name, labels)
}

/// Shadow of every ray along `axis`, cast from the min edge or the max edge.
fn cast_shadow(solid: &[bool], lattice: &Lattice, axis: usize, from_max: bool) -> Vec<bool> {
    let dims = lattice.dims().to_array();
    let strides = lattice.strides();
    let (u, v) = match axis {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    };
    let len = dims[axis] as usize;

    let mut shadow = vec![false; lattice.cell_count()];
    for a in 0..dims[u] as usize {
        for b in 0..dims[v] as usize {
            let base = a * strides[u] + b * strides[v];
            let mut hit = false;
            for step in 0..len {
                let t = if from_max { len - 1 - step } else { step };
                let index = base + t * strides[axis];
                hit |= solid[index];
                shadow[index] = hit;
            }
        }
    }
    shadow
}

/// Vote over `[min_x, max_x, min_y, max_y, min_z, max_z]` visibility
#[inline]
fn is_exterior(open: [bool; 6]) -> bool {
    let [nx, px, ny, py, nz, pz] = open;
    (nx && px) || (ny && py) || (nz && pz) || ((nx || px) && (ny || py) && (nz || pz))
}
