use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use glam::Vec3;
use kugel_core::assets::load_mesh;
use kugel_core::assets::loader::mesh_from_triangles;
use kugel_core::assets::sphere::{self, DEFAULT_SLICES, DEFAULT_STACKS};
use kugel_core::config::{FogMode, LightSource, ShadingMode, SphereTexture};
use kugel_core::motion::MotionState;
use kugel_core::{DemoConfig, Renderer, Scene};
use kugel_pc::PreviewBackend;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(name = "kugel-pc")]
#[command(about = "Renders the rolling-sphere demo to PNG frames", long_about = None)]
#[command(version)]
struct Cli {
    /// Triangle-soup mesh for the sphere; generated when omitted
    #[arg(long)]
    mesh: Option<PathBuf>,

    /// Number of frames to render
    #[arg(long, default_value_t = 1)]
    frames: usize,

    #[arg(long, default_value_t = 512)]
    width: usize,

    #[arg(long, default_value_t = 512)]
    height: usize,

    /// Directory the frame_NNNN.png files land in
    #[arg(long, default_value = "frames")]
    output: PathBuf,

    /// Advance the rolling motion between frames
    #[arg(long)]
    animate: bool,

    /// Motion ticks applied between frames when animating
    #[arg(long, default_value_t = 1)]
    ticks: u32,

    /// Simulated milliseconds between frames (drives the fireworks)
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f32,

    /// Fixed seed for the firework particle pool
    #[arg(long)]
    seed: Option<u64>,

    /// Draw the floor as wireframe
    #[arg(long)]
    wire_floor: bool,

    /// Draw the sphere as wireframe (unlit, untextured)
    #[arg(long)]
    wire_sphere: bool,

    #[arg(long)]
    no_shadow: bool,

    /// Overwrite the floor with the shadow instead of blending
    #[arg(long)]
    no_shadow_blend: bool,

    #[arg(long)]
    no_lighting: bool,

    /// Flat shading instead of smooth
    #[arg(long)]
    flat: bool,

    /// Spotlight instead of the point source
    #[arg(long)]
    spotlight: bool,

    #[arg(long, value_enum, default_value = "off")]
    fog: FogArg,

    #[arg(long)]
    no_ground_texture: bool,

    #[arg(long, value_enum, default_value = "contour")]
    sphere_texture: SphereTextureArg,

    /// Slanted contour lines instead of vertical
    #[arg(long)]
    slant: bool,

    /// Generate sphere texture coordinates in the eye frame
    #[arg(long)]
    eye_frame: bool,

    /// Tilt the sphere checkerboard
    #[arg(long)]
    tilt: bool,

    /// Punch a lattice of holes through the textured surfaces
    #[arg(long)]
    lattice: bool,

    #[arg(long)]
    no_fireworks: bool,

    /// Viewer position, overriding the default
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    eye: Option<Vec<f32>>,

    /// Suppress informational output
    #[arg(long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FogArg {
    Off,
    Linear,
    Exp,
    Exp2,
}

impl From<FogArg> for FogMode {
    fn from(arg: FogArg) -> Self {
        match arg {
            FogArg::Off => FogMode::Off,
            FogArg::Linear => FogMode::Linear,
            FogArg::Exp => FogMode::Exponential,
            FogArg::Exp2 => FogMode::ExponentialSquared,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SphereTextureArg {
    Off,
    Contour,
    Checker,
}

impl From<SphereTextureArg> for SphereTexture {
    fn from(arg: SphereTextureArg) -> Self {
        match arg {
            SphereTextureArg::Off => SphereTexture::Off,
            SphereTextureArg::Contour => SphereTexture::ContourLines,
            SphereTextureArg::Checker => SphereTexture::Checkerboard,
        }
    }
}

fn demo_config(cli: &Cli) -> DemoConfig {
    let mut config = DemoConfig {
        animate: cli.animate,
        floor_fill: !cli.wire_floor,
        sphere_fill: !cli.wire_sphere,
        shadow: !cli.no_shadow,
        shadow_blend: !cli.no_shadow_blend,
        lighting: !cli.no_lighting,
        shading: if cli.flat {
            ShadingMode::Flat
        } else {
            ShadingMode::Smooth
        },
        light_source: if cli.spotlight {
            LightSource::Spotlight
        } else {
            LightSource::PointSource
        },
        fog: cli.fog.into(),
        ground_texture: !cli.no_ground_texture,
        sphere_texture: cli.sphere_texture.into(),
        vertical_slanted: cli.slant,
        object_eye_frame: cli.eye_frame,
        upright_tilted: cli.tilt,
        lattice: cli.lattice,
        fireworks: !cli.no_fireworks,
        ..DemoConfig::default()
    };
    if let Some(eye) = &cli.eye {
        config.eye = Vec3::new(eye[0], eye[1], eye[2]);
    }
    config
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = demo_config(cli);

    let sphere = match &cli.mesh {
        Some(path) => load_mesh(path)
            .with_context(|| format!("loading sphere mesh {}", path.display()))?,
        None => mesh_from_triangles(&sphere::tessellate(DEFAULT_STACKS, DEFAULT_SLICES)),
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let scene = Scene::new(sphere, &mut rng);

    let mut renderer = Renderer::new(PreviewBackend::new(cli.width, cli.height))?;
    renderer.upload_scene(&scene)?;

    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("creating output directory {}", cli.output.display()))?;

    let aspect = cli.width as f32 / cli.height as f32;
    let mut motion = MotionState::new();
    let mut elapsed_ms = 0.0f32;

    for frame in 0..cli.frames {
        renderer.render_frame(&scene, &config, &motion, aspect, elapsed_ms)?;
        let path = cli.output.join(format!("frame_{frame:04}.png"));
        renderer
            .backend()
            .to_image()
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        log::debug!("wrote {}", path.display());

        if config.animate {
            for _ in 0..cli.ticks {
                motion.tick();
            }
        }
        elapsed_ms += cli.frame_ms;
    }

    log::info!(
        "kugel-pc: wrote {} frame(s) to {}",
        cli.frames,
        cli.output.display()
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("kugel-pc: offline preview host starting");

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
