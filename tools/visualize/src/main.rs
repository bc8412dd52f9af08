//! Diagnostic visualizer: renders uniform noise and, for comparison, the
//! linearly rescaled raw fractal sum as grayscale PNGs.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use image::{GrayImage, Luma};

use uniform_noise::{Dimension, GridSpec, NoiseConfig};

#[derive(Parser, Debug)]
#[command(name = "visualize", about = "Render uniform and raw fractal noise to PNG")]
struct Args {
    #[arg(short, long, default_value_t = 1234)]
    seed: i32,

    #[arg(short, long, default_value_t = 4)]
    octaves: u32,

    #[arg(short, long, default_value_t = 0.5)]
    persistence: f64,

    /// 2d samples the plane; 3d samples the z = `z` slice.
    #[arg(short, long, default_value = "2d")]
    dimension: Dimension,

    #[arg(long, default_value_t = 0.5)]
    z: f64,

    #[arg(long, default_value_t = 512)]
    size: u32,

    /// Noise-space extent covered by the image side.
    #[arg(long, default_value_t = 8.0)]
    extent: f64,

    /// Quantise the uniform image to this many gray levels (0 = continuous).
    #[arg(long, default_value_t = 0)]
    levels: u32,

    #[arg(long, default_value = "data/debug")]
    output: String,
}

// ── Colour helpers ────────────────────────────────────────────────────────────

/// [0, 1] → 8-bit gray, optionally banded into `levels` steps.
fn gray(v: f64, levels: u32) -> Luma<u8> {
    let v = v.clamp(0.0, 1.0);
    let v = if levels > 1 {
        let band = (v * levels as f64).floor().min(levels as f64 - 1.0);
        band / (levels - 1) as f64
    } else {
        v
    };
    Luma([(v * 255.0).round() as u8])
}

fn save(values: &[f64], size: u32, levels: u32, path: &Path) -> Result<()> {
    let mut img = GrayImage::new(size, size);
    for (i, &v) in values.iter().enumerate() {
        let i = i as u32;
        img.put_pixel(i % size, i / size, gray(v, levels));
    }
    img.save(path).with_context(|| format!("failed to save {}", path.display()))?;
    eprintln!("Wrote {}", path.display());
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    let config = NoiseConfig { seed: args.seed, octaves: args.octaves, persistence: args.persistence };
    let noise = config.evaluator();
    let n = args.size as usize;
    let grid = GridSpec { width: n, height: n, origin: [0.0, 0.0], step: args.extent / n.max(1) as f64 };

    eprintln!("Rendering {} noise ({n}×{n}, seed {}) …", args.dimension, args.seed);

    let (uniform, raw) = match args.dimension {
        Dimension::Two => (noise.sample_grid_2d(&grid), noise.sample_raw_grid_2d(&grid)),
        Dimension::Three => {
            let uniform = noise.sample_grid_3d(&grid, args.z);
            let raw = (0..grid.len())
                .map(|i| {
                    let [x, y] = grid.point(i / n, i % n);
                    noise.raw_3d(x, y, args.z)
                })
                .collect();
            (uniform, raw)
        }
    };
    let linear: Vec<f64> = raw.iter().map(|r| (r + 1.0) * 0.5).collect();

    let out_dir = Path::new(&args.output);
    fs::create_dir_all(out_dir).with_context(|| format!("cannot create {}", out_dir.display()))?;

    let tag = format!("{}_s{}_o{}", args.dimension, args.seed, args.octaves);
    save(&uniform, args.size, args.levels, &out_dir.join(format!("uniform_{tag}.png")))?;
    save(&linear, args.size, args.levels, &out_dir.join(format!("raw_{tag}.png")))?;

    eprintln!("Done.");
    Ok(())
}
