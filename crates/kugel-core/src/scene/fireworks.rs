//! Firework particle pool. Particles are seeded once; their trajectory is
//! evaluated from the wrapped elapsed time on the shading side, so the pool
//! itself never mutates.

use glam::Vec4;
use rand::Rng;

use crate::render::Particle;

/// Pool size.
pub const PARTICLE_COUNT: usize = 300;

/// Common launch point just above the ground plane.
pub const LAUNCH_POINT: Vec4 = Vec4::new(0.0, 0.1, 0.0, 1.0);

/// Length of one launch cycle in milliseconds; elapsed time wraps to this.
pub const CYCLE_MS: f32 = 5000.0;

/// Seed a fresh particle pool from the given generator.
///
/// Colors are uniform per channel; launch velocities spread horizontally in
/// [-10, 10) on x and z and upward in [0, 24) on y.
pub fn particle_pool(rng: &mut impl Rng) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(PARTICLE_COUNT);
    for _ in 0..PARTICLE_COUNT {
        let color = Vec4::new(channel(rng), channel(rng), channel(rng), 1.0);
        let velocity = Vec4::new(
            10.0 * 2.0 * (channel(rng) - 0.5),
            10.0 * 1.2 * 2.0 * channel(rng),
            10.0 * 2.0 * (channel(rng) - 0.5),
            0.0,
        );
        particles.push(Particle {
            position: LAUNCH_POINT,
            color,
            velocity,
        });
    }
    particles
}

/// One random channel value in [0, 1) with 1/256 steps.
fn channel(rng: &mut impl Rng) -> f32 {
    rng.random_range(0u32..256) as f32 / 256.0
}
