//! Demo configuration: every toggle the interactive collaborators expose,
//! collected in one struct passed by reference into compose and render
//! calls.

use glam::Vec3;

/// Viewer position at startup, restored by the reset action.
pub const INITIAL_EYE: Vec3 = Vec3::new(7.0, 3.0, -10.0);

/// Per-vertex shading model applied to the lit geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    Flat,
    #[default]
    Smooth,
}

impl ShadingMode {
    /// Shader-side flag value.
    pub fn as_flag(self) -> f32 {
        match self {
            ShadingMode::Flat => 0.0,
            ShadingMode::Smooth => 1.0,
        }
    }
}

/// Which positional light model illuminates the scene. The directional
/// light is always present; this selects the second source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightSource {
    Spotlight,
    #[default]
    PointSource,
}

impl LightSource {
    pub fn as_flag(self) -> f32 {
        match self {
            LightSource::Spotlight => 0.0,
            LightSource::PointSource => 1.0,
        }
    }
}

/// Fog model applied by the shading stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FogMode {
    #[default]
    Off,
    Linear,
    Exponential,
    ExponentialSquared,
}

impl FogMode {
    pub fn as_flag(self) -> f32 {
        match self {
            FogMode::Off => 0.0,
            FogMode::Linear => 1.0,
            FogMode::Exponential => 2.0,
            FogMode::ExponentialSquared => 3.0,
        }
    }
}

/// Texture applied to the sphere surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SphereTexture {
    Off,
    #[default]
    ContourLines,
    Checkerboard,
}

impl SphereTexture {
    pub fn as_flag(self) -> f32 {
        match self {
            SphereTexture::Off => 0.0,
            SphereTexture::ContourLines => 1.0,
            SphereTexture::Checkerboard => 2.0,
        }
    }
}

/// The demo's full mutable state outside the motion state machine.
///
/// Defaults match the program's startup configuration: animation paused,
/// filled floor and sphere, blended shadow on, lighting on with smooth
/// shading and the point source, fog off, both textures on with contour
/// lines on the sphere, fireworks on.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Advance the motion state machine each tick.
    pub animate: bool,
    /// Filled floor triangles when true, wireframe when false.
    pub floor_fill: bool,
    /// Filled sphere when true, wireframe when false. A wireframe sphere is
    /// drawn unlit and untextured.
    pub sphere_fill: bool,
    pub shadow: bool,
    /// Alpha-blend the shadow over the floor instead of overwriting it.
    pub shadow_blend: bool,
    pub lighting: bool,
    pub shading: ShadingMode,
    pub light_source: LightSource,
    pub fog: FogMode,
    pub ground_texture: bool,
    pub sphere_texture: SphereTexture,
    /// Contour-line direction: vertical when false, slanted when true.
    pub vertical_slanted: bool,
    /// Generate sphere texture coordinates in the eye frame instead of the
    /// object frame.
    pub object_eye_frame: bool,
    /// Tilt the sphere checkerboard instead of keeping it upright.
    pub upright_tilted: bool,
    /// Lattice effect: discard fragments on a texture-space grid.
    pub lattice: bool,
    pub fireworks: bool,
    pub eye: Vec3,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            animate: false,
            floor_fill: true,
            sphere_fill: true,
            shadow: true,
            shadow_blend: true,
            lighting: true,
            shading: ShadingMode::Smooth,
            light_source: LightSource::PointSource,
            fog: FogMode::Off,
            ground_texture: true,
            sphere_texture: SphereTexture::ContourLines,
            vertical_slanted: false,
            object_eye_frame: false,
            upright_tilted: false,
            lattice: false,
            fireworks: true,
            eye: INITIAL_EYE,
        }
    }
}

impl DemoConfig {
    /// Restore the viewer to the startup position.
    pub fn reset_eye(&mut self) {
        self.eye = INITIAL_EYE;
    }
}
