//! Field generation utility.
//!
//! Builds a demo boundary (or loads one from a slice directory), runs the full
//! field pipeline and prints statistics for every grid.

use std::path::PathBuf;
use std::time::Instant;

use glam::{IVec3, Vec3};

use voxfield::config::FieldConfig;
use voxfield::core::{logging, Result};
use voxfield::export::svx;
use voxfield::sdf::{FieldPipeline, EXTERIOR, INTERIOR};
use voxfield::voxel::source::{box_shell, sphere_shell};
use voxfield::voxel::{GridData, VoxelGrid};

const DEFAULT_SIZE: i32 = 32;

#[derive(Debug)]
struct Args {
    shape: String,
    size: i32,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    surface_band: f32,
}

fn parse_args() -> std::result::Result<Args, String> {
    let mut args = std::env::args().skip(1);

    let mut shape = "box".to_string();
    let mut size = DEFAULT_SIZE;
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut config: Option<PathBuf> = None;
    let mut surface_band = 1.5f32;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-s" | "--shape" => {
                shape = args.next().ok_or("--shape needs a value")?;
            }
            "-n" | "--size" => {
                let v = args.next().ok_or("--size needs a value")?;
                size = v.parse().map_err(|_| format!("invalid size '{}'", v))?;
            }
            "-i" | "--input" => {
                input = args.next().map(PathBuf::from);
            }
            "-o" | "--output" => {
                output = args.next().map(PathBuf::from);
            }
            "-c" | "--config" => {
                config = args.next().map(PathBuf::from);
            }
            "-b" | "--band" => {
                if let Some(v) = args.next() {
                    surface_band = v.parse().unwrap_or(1.5);
                }
            }
            "-h" | "--help" | "help" => {
                return Err("show_help".to_string());
            }
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }

    if size < 3 {
        return Err(format!("size must be at least 3, got {}", size));
    }

    Ok(Args { shape, size, input, output, config, surface_band })
}

fn print_help() {
    println!("Voxel Field Utility");
    println!("===================");
    println!();
    println!("Usage: voxel_fields [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -s, --shape <SHAPE>    Demo boundary: box, sphere (default: box)");
    println!("  -n, --size <N>         Demo grid size per axis (default: 32)");
    println!("  -i, --input <DIR>      Load the boundary from a slice directory instead");
    println!("  -o, --output <DIR>     Export Boolean grids as slice directories");
    println!("  -c, --config <FILE>    JSON file with grid names");
    println!("  -b, --band <D>         Width of the exported near-surface band (default: 1.5)");
    println!();
    println!("Examples:");
    println!("  voxel_fields --shape sphere --size 48");
    println!("  voxel_fields --input scans/chair --output out/chair");
}

fn build_grid(args: &Args) -> Result<VoxelGrid> {
    if let Some(dir) = &args.input {
        return svx::load(dir);
    }
    let dims = IVec3::splat(args.size);
    let source = match args.shape.as_str() {
        "sphere" => sphere_shell(dims, args.size as f32 * 0.35, 1.0)?,
        _ => box_shell(dims, IVec3::splat(args.size / 4), IVec3::splat(args.size - 1 - args.size / 4))?,
    };
    VoxelGrid::from_source(&source)
}

fn print_stats(grid: &VoxelGrid) {
    println!("{:<24} {:<8} {}", "grid", "kind", "summary");
    for name in grid.grid_names() {
        let Ok(data) = grid.data(name) else { continue };
        let summary = match data {
            GridData::Boolean(v) => {
                format!("{} filled", v.iter().filter(|&&b| b).count())
            }
            GridData::Integer(v) => {
                let interior = v.iter().filter(|&&x| x == INTERIOR).count();
                let exterior = v.iter().filter(|&&x| x == EXTERIOR).count();
                let finite = v.iter().filter(|&&x| x != INTERIOR && x != EXTERIOR);
                let (lo, hi) = finite.fold((i32::MAX, i32::MIN), |(lo, hi), &x| (lo.min(x), hi.max(x)));
                if lo > hi {
                    format!("{} interior, {} exterior", interior, exterior)
                } else {
                    format!("range [{}, {}], {} interior, {} exterior", lo, hi, interior, exterior)
                }
            }
            GridData::Float(v) => {
                let (lo, hi) = v.iter().fold((f32::MAX, f32::MIN), |(lo, hi), &x| (lo.min(x), hi.max(x)));
                format!("range [{:.3}, {:.3}]", lo, hi)
            }
            GridData::Vector3(v) => {
                let longest = v.iter().map(|x| x.length()).fold(0.0f32, f32::max);
                let moving = v.iter().filter(|&&x| x != Vec3::ZERO).count();
                format!("{} non-zero, longest {:.3}", moving, longest)
            }
        };
        println!("{:<24} {:<8} {}", name, data.kind().to_string(), summary);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => FieldConfig::from_json_file(path)?,
        None => FieldConfig::default(),
    };

    let start = Instant::now();
    let mut grid = build_grid(args)?;
    let dims = grid.dimensions();
    println!("Grid: {}x{}x{} ({} cells)", dims.x, dims.y, dims.z, grid.cell_count());
    let bounds = grid.world_bounds();
    println!("World bounds: center {}, size {}", bounds.center(), bounds.size());

    let fields = FieldPipeline::new(config).run(&mut grid)?;
    println!("Fields generated in {:.2}s", start.elapsed().as_secs_f64());

    let band = args.surface_band;
    let near = grid.bool_grid_from_float_range(fields.euclidean.distance.name(), "NearSurface", -band, band)?;
    let inside = grid.bool_grid_from_int_range(fields.manhattan.name(), "Inside", i32::MIN, -1)?;
    println!("Near surface: {} cells, inside: {} cells", near, inside);
    println!();
    print_stats(&grid);

    if let Some(dir) = &args.output {
        let saved = svx::save_all(&grid, dir)?;
        println!();
        println!("Exported {} grids to {}", saved.len(), dir.display());
    }
    Ok(())
}

fn main() {
    logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            if e == "show_help" {
                print_help();
                return;
            }
            eprintln!("Error: {}", e);
            print_help();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
