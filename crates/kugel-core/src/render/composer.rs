//! Per-frame and per-draw uniform assembly.
//!
//! Everything here is pure: given the configuration and the current
//! transforms, these functions return uniform writes as data. The
//! dispatcher in [`frame`](super::frame) replays them against the backend,
//! so composition can be tested without one.

use glam::{Mat4, Vec3};
use kugel_hal::{PolygonMode, UniformValue};

use crate::assets::textures;
use crate::config::{DemoConfig, SphereTexture};
use crate::math;
use crate::render::{lighting, ObjectKind};
use crate::scene::fireworks;

/// Vertical field of view in degrees.
pub const FOVY_DEG: f32 = 45.0;
pub const Z_NEAR: f32 = 0.5;
pub const Z_FAR: f32 = 18.0;

/// The camera always aims at the world origin.
pub const LOOK_TARGET: Vec3 = Vec3::ZERO;

/// One named uniform write.
pub type UniformWrite = (&'static str, UniformValue);

pub fn projection(aspect: f32) -> Mat4 {
    math::perspective(FOVY_DEG, aspect, Z_NEAR, Z_FAR)
}

pub fn view(eye: Vec3) -> Mat4 {
    math::look_at(eye, LOOK_TARGET, Vec3::Y)
}

/// Shadow projection onto the floor plane from the point-light position.
pub fn shadow_matrix() -> Mat4 {
    math::flatten_onto_ground(lighting::point_light().position.truncate())
}

/// Model-view matrix for one object. Static geometry moves with the camera
/// alone; the sphere adds the rolling model transform; the shadow flattens
/// that same transform onto the floor first.
pub fn model_view(kind: ObjectKind, view: Mat4, model: Mat4) -> Mat4 {
    match kind {
        ObjectKind::Sphere => view * model,
        ObjectKind::SphereShadow => view * shadow_matrix() * model,
        ObjectKind::Floor | ObjectKind::Axes | ObjectKind::Fireworks => view,
    }
}

/// Triangle fill mode for one object under the current flags. Axes and
/// fireworks are never wireframed.
pub fn polygon_mode(kind: ObjectKind, config: &DemoConfig) -> PolygonMode {
    let filled = match kind {
        ObjectKind::Floor => config.floor_fill,
        ObjectKind::Sphere | ObjectKind::SphereShadow => config.sphere_fill,
        ObjectKind::Axes | ObjectKind::Fireworks => true,
    };
    if filled {
        PolygonMode::Fill
    } else {
        PolygonMode::Line
    }
}

/// The uniform set written once per frame, before any draw call.
///
/// Light positions move into the eye frame here, and the normal matrix
/// derives from the view matrix alone: the lit static geometry is modeled
/// directly in world space, and the sphere's shading tolerates the rigid
/// rolling transform being folded out.
pub fn frame_uniforms(
    config: &DemoConfig,
    view: Mat4,
    aspect: f32,
    elapsed_ms: f32,
) -> Vec<UniformWrite> {
    let directional = lighting::directional_light();
    let point = lighting::point_light();
    let spot = lighting::spotlight();
    let fog = lighting::fog_params();
    vec![
        ("projection", UniformValue::Mat4(projection(aspect))),
        ("normal_matrix", UniformValue::Mat3(math::normal_matrix(view))),
        ("global_ambient", UniformValue::Vec4(lighting::GLOBAL_AMBIENT)),
        (
            "directional_light_ambient",
            UniformValue::Vec4(directional.ambient),
        ),
        (
            "directional_light_diffuse",
            UniformValue::Vec4(directional.diffuse),
        ),
        (
            "directional_light_specular",
            UniformValue::Vec4(directional.specular),
        ),
        (
            "directional_light_direction",
            UniformValue::Vec4(directional.direction),
        ),
        ("point_light_ambient", UniformValue::Vec4(point.ambient)),
        ("point_light_diffuse", UniformValue::Vec4(point.diffuse)),
        ("point_light_specular", UniformValue::Vec4(point.specular)),
        (
            "point_light_position_eye",
            UniformValue::Vec4(view * point.position),
        ),
        ("point_const_att", UniformValue::Float(point.const_att)),
        ("point_linear_att", UniformValue::Float(point.linear_att)),
        ("point_quad_att", UniformValue::Float(point.quad_att)),
        (
            "spotlight_destination_eye",
            UniformValue::Vec4(view * spot.destination),
        ),
        ("spotlight_exponent", UniformValue::Float(spot.exponent)),
        ("spotlight_cutoff_angle", UniformValue::Float(spot.cutoff_deg)),
        ("shading_flag", UniformValue::Float(config.shading.as_flag())),
        (
            "light_source_flag",
            UniformValue::Float(config.light_source.as_flag()),
        ),
        (
            "vertical_slanted_flag",
            flag(config.vertical_slanted),
        ),
        ("object_eye_frame_flag", flag(config.object_eye_frame)),
        ("upright_tilted_flag", flag(config.upright_tilted)),
        ("lattice_flag", flag(config.lattice)),
        ("fog_flag", UniformValue::Float(config.fog.as_flag())),
        ("fog_linear_start", UniformValue::Float(fog.linear_start)),
        ("fog_linear_end", UniformValue::Float(fog.linear_end)),
        ("fog_density", UniformValue::Float(fog.density)),
        ("fog_color", UniformValue::Vec4(fog.color)),
        (
            "elapsed_time",
            UniformValue::Float(elapsed_ms % fireworks::CYCLE_MS),
        ),
    ]
}

/// The uniform set written before each draw call.
///
/// Every name appears for every kind; values that do not apply to `kind`
/// are neutral, never stale from a previous draw. Axes and shadow geometry
/// are unlit regardless of the lighting flag, as is a wireframe sphere.
pub fn object_uniforms(kind: ObjectKind, config: &DemoConfig) -> Vec<UniformWrite> {
    let material = match kind {
        ObjectKind::Sphere => lighting::sphere_material(),
        _ => lighting::ground_material(),
    };
    let lit = match kind {
        ObjectKind::Axes | ObjectKind::SphereShadow => false,
        ObjectKind::Sphere => config.lighting && config.sphere_fill,
        ObjectKind::Floor | ObjectKind::Fireworks => config.lighting,
    };
    let sphere_texture = if kind == ObjectKind::Sphere && config.sphere_fill {
        config.sphere_texture.as_flag()
    } else {
        0.0
    };
    let texture_select = match (kind, config.sphere_texture) {
        (ObjectKind::Sphere, SphereTexture::ContourLines) => textures::STRIPE_UNIT,
        _ => textures::CHECKERBOARD_UNIT,
    };
    vec![
        ("material_ambient", UniformValue::Vec4(material.ambient)),
        ("material_diffuse", UniformValue::Vec4(material.diffuse)),
        ("material_specular", UniformValue::Vec4(material.specular)),
        ("material_shininess", UniformValue::Float(material.shininess)),
        ("lighting_flag", flag(lit)),
        ("is_sphere_flag", flag(kind == ObjectKind::Sphere)),
        (
            "is_sphere_shadow_flag",
            flag(kind == ObjectKind::SphereShadow),
        ),
        ("is_floor_flag", flag(kind == ObjectKind::Floor)),
        ("is_fireworks_flag", flag(kind == ObjectKind::Fireworks)),
        ("texture_ground_flag", flag(config.ground_texture)),
        ("texture_sphere_flag", UniformValue::Float(sphere_texture)),
        ("texture_select", UniformValue::Int(texture_select as i32)),
    ]
}

fn flag(on: bool) -> UniformValue {
    UniformValue::Float(if on { 1.0 } else { 0.0 })
}
