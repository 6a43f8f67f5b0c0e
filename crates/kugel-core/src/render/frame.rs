//! Frame dispatch: the fixed per-frame draw order and its state changes,
//! generic over the render backend.

use core::fmt;

use glam::{Mat4, Vec4};
use kugel_hal::{BlendMode, Primitive, RenderBackend, UniformValue};

use crate::assets::textures;
use crate::config::DemoConfig;
use crate::motion::MotionState;
use crate::render::composer;
use crate::render::pack::{self, MeshLayout, ParticleLayout};
use crate::render::ObjectKind;
use crate::scene::Scene;

/// Background color behind the scene.
pub const CLEAR_COLOR: Vec4 = Vec4::new(0.529, 0.807, 0.92, 0.0);

/// Axes line width in pixels.
pub const LINE_WIDTH: f32 = 2.0;

/// Firework point size in pixels.
pub const POINT_SIZE: f32 = 3.0;

/// Every uniform name the dispatcher writes. Verified against the backend
/// at construction.
pub const UNIFORM_NAMES: &[&str] = &[
    "projection",
    "model_view",
    "normal_matrix",
    "global_ambient",
    "directional_light_ambient",
    "directional_light_diffuse",
    "directional_light_specular",
    "directional_light_direction",
    "point_light_ambient",
    "point_light_diffuse",
    "point_light_specular",
    "point_light_position_eye",
    "point_const_att",
    "point_linear_att",
    "point_quad_att",
    "spotlight_destination_eye",
    "spotlight_exponent",
    "spotlight_cutoff_angle",
    "shading_flag",
    "light_source_flag",
    "vertical_slanted_flag",
    "object_eye_frame_flag",
    "upright_tilted_flag",
    "lattice_flag",
    "fog_flag",
    "fog_linear_start",
    "fog_linear_end",
    "fog_density",
    "fog_color",
    "elapsed_time",
    "material_ambient",
    "material_diffuse",
    "material_specular",
    "material_shininess",
    "lighting_flag",
    "is_sphere_flag",
    "is_sphere_shadow_flag",
    "is_floor_flag",
    "is_fireworks_flag",
    "texture_ground_flag",
    "texture_sphere_flag",
    "texture_select",
];

/// Every attribute name the dispatcher binds.
pub const ATTRIBUTE_NAMES: &[&str] = &["position", "color", "normal", "texcoord", "velocity"];

/// Error type for render dispatch, generic over backend errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError<E: fmt::Debug> {
    /// The backend's shading stage does not know a uniform the dispatcher
    /// writes.
    #[error("shading stage is missing uniform `{0}`")]
    MissingUniform(&'static str),
    /// The backend's shading stage does not know an attribute the
    /// dispatcher binds.
    #[error("shading stage is missing attribute `{0}`")]
    MissingAttribute(&'static str),
    /// Error reported by the backend itself.
    #[error("backend error: {0:?}")]
    Backend(E),
}

impl<E: fmt::Debug> From<E> for RenderError<E> {
    fn from(e: E) -> Self {
        RenderError::Backend(e)
    }
}

/// Frame dispatcher. Owns a backend verified at construction to expose the
/// full uniform and attribute contract.
#[derive(Debug)]
pub struct Renderer<B: RenderBackend> {
    backend: B,
}

impl<B: RenderBackend> Renderer<B> {
    /// Check the backend against the uniform/attribute contract, then apply
    /// the one-time pipeline state.
    pub fn new(mut backend: B) -> Result<Self, RenderError<B::Error>> {
        for &name in UNIFORM_NAMES {
            if !backend.has_uniform(name) {
                return Err(RenderError::MissingUniform(name));
            }
        }
        for &name in ATTRIBUTE_NAMES {
            if !backend.has_attribute(name) {
                return Err(RenderError::MissingAttribute(name));
            }
        }

        backend.set_clear_color(CLEAR_COLOR)?;
        backend.set_line_width(LINE_WIDTH)?;
        backend.set_point_size(POINT_SIZE)?;

        Ok(Self { backend })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Pack and upload every scene buffer and both texture images.
    pub fn upload_scene(&mut self, scene: &Scene) -> Result<(), RenderError<B::Error>> {
        self.backend
            .upload_buffer(ObjectKind::Floor.buffer_id(), &pack::pack_mesh(&scene.floor))?;
        self.backend
            .upload_buffer(ObjectKind::Sphere.buffer_id(), &pack::pack_mesh(&scene.sphere))?;
        self.backend.upload_buffer(
            ObjectKind::SphereShadow.buffer_id(),
            &pack::pack_mesh(&scene.sphere_shadow()),
        )?;
        self.backend
            .upload_buffer(ObjectKind::Axes.buffer_id(), &pack::pack_mesh(&scene.axes))?;
        self.backend.upload_buffer(
            ObjectKind::Fireworks.buffer_id(),
            &pack::pack_particles(&scene.particles),
        )?;

        let check = textures::CHECKERBOARD_64;
        self.backend
            .upload_texture(textures::CHECKERBOARD_UNIT, check.width, check.height, check.data)?;
        let stripe = textures::STRIPE_32;
        self.backend
            .upload_texture(textures::STRIPE_UNIT, stripe.width, stripe.height, stripe.data)?;

        log::debug!(
            "scene uploaded: {} sphere vertices, {} particles",
            scene.sphere.len(),
            scene.particles.len()
        );
        Ok(())
    }

    /// Render one frame in the fixed order: sphere, floor, shadow, the
    /// color-masked floor redraw, fireworks, axes.
    ///
    /// Depth writes are off from the floor draw through the shadow draw so
    /// the blended shadow composites over the floor; the masked redraw then
    /// restores the floor's depth without touching color.
    pub fn render_frame(
        &mut self,
        scene: &Scene,
        config: &DemoConfig,
        motion: &MotionState,
        aspect: f32,
        elapsed_ms: f32,
    ) -> Result<(), RenderError<B::Error>> {
        let view = composer::view(config.eye);
        let model = motion.model_transform();

        self.backend.clear_frame()?;
        for (name, value) in composer::frame_uniforms(config, view, aspect, elapsed_ms) {
            self.backend.set_uniform(name, value)?;
        }

        self.draw_object(ObjectKind::Sphere, scene.sphere.len(), config, view, model)?;

        self.backend.set_depth_mask(false)?;
        self.draw_object(ObjectKind::Floor, scene.floor.len(), config, view, model)?;
        if config.shadow {
            self.draw_object(
                ObjectKind::SphereShadow,
                scene.sphere.len(),
                config,
                view,
                model,
            )?;
        }

        self.backend.set_depth_mask(true)?;
        self.backend.set_color_mask(false)?;
        self.draw_object(ObjectKind::Floor, scene.floor.len(), config, view, model)?;
        self.backend.set_color_mask(true)?;

        if config.fireworks {
            self.draw_object(
                ObjectKind::Fireworks,
                scene.particles.len(),
                config,
                view,
                model,
            )?;
        }
        self.draw_object(ObjectKind::Axes, scene.axes.len(), config, view, model)?;

        self.backend.present()?;
        Ok(())
    }

    /// One draw call: blend setup, buffer bind, attribute layout, uniforms,
    /// draw, attribute teardown, blend restore.
    fn draw_object(
        &mut self,
        kind: ObjectKind,
        count: usize,
        config: &DemoConfig,
        view: Mat4,
        model: Mat4,
    ) -> Result<(), RenderError<B::Error>> {
        let blended = kind == ObjectKind::SphereShadow && config.shadow_blend;
        if blended {
            self.backend.set_blend(BlendMode::Alpha)?;
        }

        self.backend.bind_buffer(kind.buffer_id())?;
        match kind {
            ObjectKind::Fireworks => {
                let layout = ParticleLayout {
                    particle_count: count,
                };
                self.backend
                    .set_attribute("position", 4, layout.position_offset())?;
                self.backend.set_attribute("color", 4, layout.color_offset())?;
                self.backend
                    .set_attribute("velocity", 4, layout.velocity_offset())?;
            }
            _ => {
                let layout = MeshLayout {
                    vertex_count: count,
                };
                self.backend
                    .set_attribute("position", 4, layout.position_offset())?;
                self.backend.set_attribute("color", 4, layout.color_offset())?;
                self.backend.set_attribute("normal", 3, layout.normal_offset())?;
                self.backend
                    .set_attribute("texcoord", 2, layout.texcoord_offset())?;
            }
        }

        let mv = composer::model_view(kind, view, model);
        self.backend.set_uniform("model_view", UniformValue::Mat4(mv))?;
        for (name, value) in composer::object_uniforms(kind, config) {
            self.backend.set_uniform(name, value)?;
        }

        self.backend
            .set_polygon_mode(composer::polygon_mode(kind, config))?;
        self.backend.draw(primitive_for(kind), count)?;
        self.backend.clear_attributes()?;

        if blended {
            self.backend.set_blend(BlendMode::Opaque)?;
        }
        Ok(())
    }
}

fn primitive_for(kind: ObjectKind) -> Primitive {
    match kind {
        ObjectKind::Axes => Primitive::Lines,
        ObjectKind::Fireworks => Primitive::Points,
        _ => Primitive::Triangles,
    }
}
