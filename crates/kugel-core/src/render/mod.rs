//! Render-side data types, uniform composition, and frame dispatch.

pub mod composer;
pub mod frame;
pub mod lighting;
pub mod pack;

pub use frame::{RenderError, Renderer};

use glam::{Vec2, Vec3, Vec4};
use kugel_hal::BufferId;

/// A mesh vertex. Positions carry w = 1; directions elsewhere carry w = 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec4,
    pub color: Vec4,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// A firework particle. The pool is seeded once; motion is evaluated from
/// elapsed time on the shading side of the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec4,
    pub color: Vec4,
    /// Initial velocity, w = 0.
    pub velocity: Vec4,
}

/// What a draw call is drawing.
///
/// Dispatch decisions (material, flags, polygon mode, blending) key off
/// this tag, never off buffer handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Floor,
    Sphere,
    SphereShadow,
    Axes,
    Fireworks,
}

impl ObjectKind {
    /// Every kind once, in upload order.
    pub const ALL: [ObjectKind; 5] = [
        ObjectKind::Floor,
        ObjectKind::Sphere,
        ObjectKind::SphereShadow,
        ObjectKind::Axes,
        ObjectKind::Fireworks,
    ];

    /// Fixed backend buffer handle for this object's vertex data.
    pub fn buffer_id(self) -> BufferId {
        BufferId(match self {
            ObjectKind::Floor => 0,
            ObjectKind::Sphere => 1,
            ObjectKind::SphereShadow => 2,
            ObjectKind::Axes => 3,
            ObjectKind::Fireworks => 4,
        })
    }
}
