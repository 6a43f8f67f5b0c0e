use std::path::PathBuf;
use std::process;

use clap::Parser;
use kugel_core::assets::sphere::{DEFAULT_SLICES, DEFAULT_STACKS};

#[derive(Parser)]
#[command(name = "mesh-prep")]
#[command(about = "Generates the demo's sphere mesh in triangle-soup text format", long_about = None)]
#[command(version)]
struct Cli {
    /// Latitude bands in the tessellation
    #[arg(long, default_value_t = DEFAULT_STACKS)]
    stacks: usize,

    /// Longitude slices in the tessellation
    #[arg(long, default_value_t = DEFAULT_SLICES)]
    slices: usize,

    /// Output file path
    #[arg(short, long, default_value = "sphere.tri")]
    output: PathBuf,

    /// Suppress progress output (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging (suppressed if --quiet)
    if !cli.quiet {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let result = mesh_prep::generate_sphere(cli.stacks, cli.slices, &cli.output).map(|m| {
        if !cli.quiet {
            eprintln!(
                "Success: Sphere mesh written to {} ({} triangles)",
                m.path.display(),
                m.triangle_count
            );
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
