//! Static scene content: the floor quad, the coordinate axes, and the
//! firework pool, plus the shadow variant of the ball mesh.

pub mod fireworks;

use glam::{Vec2, Vec3, Vec4};
use rand::Rng;

use crate::assets::loader::SHADOW_COLOR;
use crate::render::{Particle, Vertex};

/// Floor albedo.
pub const FLOOR_COLOR: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);

/// World-unit length of each drawn axis.
pub const AXIS_LENGTH: f32 = 10.0;

const FLOOR_CORNERS: [Vec3; 4] = [
    Vec3::new(5.0, 0.0, 8.0),
    Vec3::new(5.0, 0.0, -4.0),
    Vec3::new(-5.0, 0.0, -4.0),
    Vec3::new(-5.0, 0.0, 8.0),
];

// Per-corner checkerboard coordinates; the fractional repeat keeps the
// pattern unaligned with the floor edges.
const FLOOR_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(0.0, 1.5),
    Vec2::new(1.25, 1.5),
    Vec2::new(1.25, 0.0),
];

/// Everything the demo draws, in CPU-side form.
pub struct Scene {
    pub floor: Vec<Vertex>,
    pub sphere: Vec<Vertex>,
    pub axes: Vec<Vertex>,
    pub particles: Vec<Particle>,
}

impl Scene {
    /// Assemble the scene around a ball mesh, seeding the firework pool
    /// from `rng`.
    pub fn new(sphere: Vec<Vertex>, rng: &mut impl Rng) -> Self {
        Self {
            floor: build_floor(),
            sphere,
            axes: build_axes(),
            particles: fireworks::particle_pool(rng),
        }
    }

    /// Shadow copy of the ball mesh: same positions and normals, the
    /// translucent gray color.
    pub fn sphere_shadow(&self) -> Vec<Vertex> {
        self.sphere
            .iter()
            .map(|v| Vertex {
                color: SHADOW_COLOR,
                ..*v
            })
            .collect()
    }
}

/// The ground quad as two triangles at y = 0, green, facing up.
pub fn build_floor() -> Vec<Vertex> {
    let corner = |index: usize| Vertex {
        position: FLOOR_CORNERS[index].extend(1.0),
        color: FLOOR_COLOR,
        normal: Vec3::Y,
        uv: FLOOR_UVS[index],
    };
    vec![
        corner(0),
        corner(1),
        corner(2),
        corner(2),
        corner(3),
        corner(0),
    ]
}

/// Three line segments from the origin: x red, y magenta, z blue. Normals
/// and texture coordinates are zero so the packed layout matches the
/// triangle meshes.
pub fn build_axes() -> Vec<Vertex> {
    let endpoint = |tip: Vec3, color: Vec4| {
        [
            Vertex {
                position: Vec4::new(0.0, 0.0, 0.0, 1.0),
                color,
                normal: Vec3::ZERO,
                uv: Vec2::ZERO,
            },
            Vertex {
                position: tip.extend(1.0),
                color,
                normal: Vec3::ZERO,
                uv: Vec2::ZERO,
            },
        ]
    };
    let mut axes = Vec::with_capacity(6);
    axes.extend(endpoint(
        Vec3::new(AXIS_LENGTH, 0.0, 0.0),
        Vec4::new(1.0, 0.0, 0.0, 1.0),
    ));
    axes.extend(endpoint(
        Vec3::new(0.0, AXIS_LENGTH, 0.0),
        Vec4::new(1.0, 0.0, 1.0, 1.0),
    ));
    axes.extend(endpoint(
        Vec3::new(0.0, 0.0, AXIS_LENGTH),
        Vec4::new(0.0, 0.0, 1.0, 1.0),
    ));
    axes
}
