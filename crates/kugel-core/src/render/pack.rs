//! Buffer packing and attribute layout.
//!
//! Mesh buffers hold every position, then every color, then every normal,
//! then every texture coordinate; particle buffers hold positions, colors,
//! then velocities. Offsets are float indices derived from the vertex
//! count, and attribute bindings must use exactly these offsets.

use super::{Particle, Vertex};

/// Float offsets into a packed mesh buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshLayout {
    pub vertex_count: usize,
}

impl MeshLayout {
    pub fn position_offset(self) -> usize {
        0
    }

    pub fn color_offset(self) -> usize {
        4 * self.vertex_count
    }

    pub fn normal_offset(self) -> usize {
        8 * self.vertex_count
    }

    pub fn texcoord_offset(self) -> usize {
        11 * self.vertex_count
    }

    /// Total floats in the packed buffer.
    pub fn len(self) -> usize {
        13 * self.vertex_count
    }

    pub fn is_empty(self) -> bool {
        self.vertex_count == 0
    }
}

/// Float offsets into a packed particle buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleLayout {
    pub particle_count: usize,
}

impl ParticleLayout {
    pub fn position_offset(self) -> usize {
        0
    }

    pub fn color_offset(self) -> usize {
        4 * self.particle_count
    }

    pub fn velocity_offset(self) -> usize {
        8 * self.particle_count
    }

    /// Total floats in the packed buffer.
    pub fn len(self) -> usize {
        12 * self.particle_count
    }

    pub fn is_empty(self) -> bool {
        self.particle_count == 0
    }
}

/// Pack a mesh into the block layout.
pub fn pack_mesh(vertices: &[Vertex]) -> Vec<f32> {
    let layout = MeshLayout {
        vertex_count: vertices.len(),
    };
    let mut data = Vec::with_capacity(layout.len());
    for v in vertices {
        data.extend_from_slice(&v.position.to_array());
    }
    for v in vertices {
        data.extend_from_slice(&v.color.to_array());
    }
    for v in vertices {
        data.extend_from_slice(&v.normal.to_array());
    }
    for v in vertices {
        data.extend_from_slice(&v.uv.to_array());
    }
    data
}

/// Pack a particle pool into the block layout.
pub fn pack_particles(particles: &[Particle]) -> Vec<f32> {
    let layout = ParticleLayout {
        particle_count: particles.len(),
    };
    let mut data = Vec::with_capacity(layout.len());
    for p in particles {
        data.extend_from_slice(&p.position.to_array());
    }
    for p in particles {
        data.extend_from_slice(&p.color.to_array());
    }
    for p in particles {
        data.extend_from_slice(&p.velocity.to_array());
    }
    data
}
