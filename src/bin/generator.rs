//! Writes procedurally generated primitives to `.3d` files.
//!
//! ```text
//! generator box 2 3 box.3d
//! generator sphere 1 10 10 sphere.3d
//! generator cone 1 2 4 3 cone.3d
//! generator plane 2 3 plane.3d
//! generator patch teapot.patch 10 teapot.3d
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{error, info};

use orrery::config::{DEFAULT_LOG_FILTER, LOG_ENV};
use orrery::gfx::geometry::{generate_and_write, generate_bezier_patch, Primitive};

#[derive(Parser, Debug)]
#[command(name = "generator", version, about = "Generate primitive meshes as .3d files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Axis-aligned cube centred on the origin
    Box {
        side_len: f32,
        num_divs: u32,
        output: PathBuf,
    },
    /// UV sphere centred on the origin
    Sphere {
        radius: f32,
        num_slices: u32,
        num_stacks: u32,
        output: PathBuf,
    },
    /// Cone standing on the XZ plane, apex up
    Cone {
        radius: f32,
        height: f32,
        num_slices: u32,
        num_stacks: u32,
        output: PathBuf,
    },
    /// Square on the XZ plane facing up
    Plane {
        side_len: f32,
        num_divs: u32,
        output: PathBuf,
    },
    /// Tessellated Bézier patches read from a patch file
    Patch {
        input: PathBuf,
        tessellation: u32,
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, DEFAULT_LOG_FILTER)).init();

    match run(Cli::parse().command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    let (primitive, output) = match command {
        Command::Box {
            side_len,
            num_divs,
            output,
        } => (Primitive::Box { side_len, num_divs }, output),
        Command::Sphere {
            radius,
            num_slices,
            num_stacks,
            output,
        } => (
            Primitive::Sphere {
                radius,
                num_slices,
                num_stacks,
            },
            output,
        ),
        Command::Cone {
            radius,
            height,
            num_slices,
            num_stacks,
            output,
        } => (
            Primitive::Cone {
                radius,
                height,
                num_slices,
                num_stacks,
            },
            output,
        ),
        Command::Plane {
            side_len,
            num_divs,
            output,
        } => (Primitive::Plane { side_len, num_divs }, output),
        Command::Patch {
            input,
            tessellation,
            output,
        } => {
            let file = File::open(&input).with_context(|| format!("cannot open patch file {}", input.display()))?;
            let mesh = generate_and_write(|| generate_bezier_patch(BufReader::new(file), tessellation), &output)
                .with_context(|| format!("failed to generate {} from {}", output.display(), input.display()))?;
            info!("Bézier patch: {} triangles", mesh.triangle_count());
            return Ok(());
        }
    };

    let mesh = generate_and_write(|| primitive.generate(), &output)
        .with_context(|| format!("failed to generate {} into {}", primitive, output.display()))?;
    info!("{}: {} triangles", primitive, mesh.triangle_count());
    Ok(())
}
