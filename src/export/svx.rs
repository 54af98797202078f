//! Boolean grids as directories of grayscale slice images.
//!
//! Layout of one grid directory:
//!
//! ```text
//! <dir>/manifest.json    dimensions, voxel size, origin
//! <dir>/slice0000.png    layer y = 0, width = dim x, height = dim z
//! <dir>/slice0001.png    ...
//! ```
//!
//! Pixels are 8-bit luma: 255 for filled, 0 for empty. On load anything at or
//! above 128 counts as filled.

use std::io;
use std::path::{Path, PathBuf};

use glam::{IVec3, Vec3};
use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::voxel::{ElementKind, VoxelGrid, BOUNDARY};

/// Current version of the manifest format
pub const SVX_VERSION: u32 = 1;

/// Manifest file name inside a grid directory
pub const MANIFEST_FILE: &str = "manifest.json";

const FILLED: u8 = 255;
const THRESHOLD: u8 = 128;

/// Contents of `manifest.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvxManifest {
    pub version: u32,
    /// Name of the grid the slices were taken from
    pub grid: String,
    pub dimensions: [i32; 3],
    pub voxel_size: [f32; 3],
    /// World-space minimum corner
    pub origin: [f32; 3],
    /// Always "y"
    pub slice_axis: String,
    pub slice_count: u32,
}

impl SvxManifest {
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let manifest: Self = serde_json::from_str(&json)?;
        if manifest.version > SVX_VERSION {
            return Err(Error::Format(format!(
                "manifest version {} is newer than supported {}",
                manifest.version, SVX_VERSION
            )));
        }
        if manifest.slice_axis != "y" {
            return Err(Error::Format(format!("unsupported slice axis '{}'", manifest.slice_axis)));
        }
        if manifest.slice_count as i32 != manifest.dimensions[1] {
            return Err(Error::Format(format!(
                "{} slices listed for {} layers",
                manifest.slice_count, manifest.dimensions[1]
            )));
        }
        Ok(manifest)
    }
}

/// File name of layer `y`
pub fn slice_file_name(y: u32) -> String {
    format!("slice{:04}.png", y)
}

/// Write Boolean grid `name` into `dir`, creating it if needed.
pub fn save_grid(grid: &VoxelGrid, name: &str, dir: &Path) -> Result<()> {
    let kind = grid.grid_kind(name)?;
    if kind != ElementKind::Boolean {
        return Err(Error::KindMismatch {
            name: name.to_string(),
            expected: ElementKind::Boolean,
            actual: kind,
        });
    }
    let values = grid.values::<bool>(name)?;
    let lattice = grid.lattice();
    let dims = lattice.dims();

    std::fs::create_dir_all(dir)?;
    for y in 0..dims.y {
        let slice = GrayImage::from_fn(dims.x as u32, dims.z as u32, |px, pz| {
            let index = lattice.index_of(IVec3::new(px as i32, y, pz as i32));
            Luma([if values[index] { FILLED } else { 0 }])
        });
        slice.save(dir.join(slice_file_name(y as u32)))?;
    }

    let manifest = SvxManifest {
        version: SVX_VERSION,
        grid: name.to_string(),
        dimensions: dims.to_array(),
        voxel_size: grid.voxel_size().to_array(),
        origin: grid.offset().to_array(),
        slice_axis: "y".to_string(),
        slice_count: dims.y as u32,
    };
    manifest.save_sync(&dir.join(MANIFEST_FILE))?;

    log::info!("Saved {} ({} slices) to {}", name, dims.y, dir.display());
    Ok(())
}

/// Write every Boolean grid into `dir/<name>/`. Returns the names written.
pub fn save_all(grid: &VoxelGrid, dir: &Path) -> Result<Vec<String>> {
    let mut saved = Vec::new();
    for name in grid.grid_names() {
        let kind = grid.grid_kind(name)?;
        if kind != ElementKind::Boolean {
            log::warn!("Skipping {}: {} grids have no slice format", name, kind);
            continue;
        }
        save_grid(grid, name, &dir.join(name))?;
        saved.push(name.to_string());
    }
    Ok(saved)
}

/// Rebuild a grid from a slice directory. The slices become its `Boundary` grid.
pub fn load(dir: &Path) -> Result<VoxelGrid> {
    let manifest = SvxManifest::load_sync(&dir.join(MANIFEST_FILE))?;
    let dims = IVec3::from_array(manifest.dimensions);
    let mut grid = VoxelGrid::new(Vec3::from_array(manifest.voxel_size), dims)?;
    grid.set_offset(Vec3::from_array(manifest.origin));

    let lattice = *grid.lattice();
    let mut boundary = vec![false; lattice.cell_count()];
    for y in 0..dims.y {
        let slice = read_slice(&slice_path(dir, y as u32))?;
        if slice.dimensions() != (dims.x as u32, dims.z as u32) {
            return Err(Error::DimensionMismatch {
                name: slice_file_name(y as u32),
                expected: (dims.x * dims.z) as usize,
                actual: (slice.width() * slice.height()) as usize,
            });
        }
        for (px, pz, pixel) in slice.enumerate_pixels() {
            let index = lattice.index_of(IVec3::new(px as i32, y, pz as i32));
            boundary[index] = pixel[0] >= THRESHOLD;
        }
    }
    let filled = boundary.iter().filter(|&&b| b).count();
    grid.insert_grid(BOUNDARY, boundary)?;

    log::info!(
        "Loaded {} from {}: {} of {} cells filled",
        manifest.grid, dir.display(), filled, lattice.cell_count()
    );
    Ok(grid)
}

fn slice_path(dir: &Path, y: u32) -> PathBuf {
    dir.join(slice_file_name(y))
}

fn read_slice(path: &Path) -> Result<GrayImage> {
    // Read first so a missing slice surfaces as an I/O error
    let bytes = std::fs::read(path).map_err(|e| {
        io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
    })?;
    Ok(image::load_from_memory(&bytes)?.into_luma8())
}
