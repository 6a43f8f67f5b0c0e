//! Buffer packing and built-in texture tests: block offsets, packed float
//! placement, and the generated image contents.

use glam::{Vec2, Vec3, Vec4};
use kugel_core::assets::textures::{CHECKERBOARD_64, CHECKERBOARD_UNIT, STRIPE_32, STRIPE_UNIT};
use kugel_core::render::pack::{pack_mesh, pack_particles, MeshLayout, ParticleLayout};
use kugel_core::render::{Particle, Vertex};

fn sample_vertex(seed: f32) -> Vertex {
    Vertex {
        position: Vec4::new(seed, seed + 1.0, seed + 2.0, 1.0),
        color: Vec4::new(0.1, 0.2, 0.3, 1.0),
        normal: Vec3::new(0.0, 1.0, 0.0),
        uv: Vec2::new(seed, -seed),
    }
}

mod mesh_buffers {
    use super::*;

    #[test]
    fn block_offsets_scale_with_the_vertex_count() {
        let layout = MeshLayout { vertex_count: 48 };
        assert_eq!(layout.position_offset(), 0);
        assert_eq!(layout.color_offset(), 192);
        assert_eq!(layout.normal_offset(), 384);
        assert_eq!(layout.texcoord_offset(), 528);
        assert_eq!(layout.len(), 624);
        assert!(!layout.is_empty());
    }

    #[test]
    fn packed_floats_land_in_their_blocks() {
        let mesh = [sample_vertex(10.0), sample_vertex(20.0)];
        let data = pack_mesh(&mesh);
        let layout = MeshLayout {
            vertex_count: mesh.len(),
        };
        assert_eq!(data.len(), layout.len());
        // Second vertex: position block, then color, normal, texcoord.
        assert_eq!(data[4..8], [20.0, 21.0, 22.0, 1.0]);
        assert_eq!(
            data[layout.color_offset() + 4..layout.color_offset() + 8],
            [0.1, 0.2, 0.3, 1.0]
        );
        assert_eq!(
            data[layout.normal_offset() + 3..layout.normal_offset() + 6],
            [0.0, 1.0, 0.0]
        );
        assert_eq!(
            data[layout.texcoord_offset() + 2..layout.texcoord_offset() + 4],
            [20.0, -20.0]
        );
    }

    #[test]
    fn empty_mesh_packs_to_nothing() {
        assert!(pack_mesh(&[]).is_empty());
        assert!(MeshLayout { vertex_count: 0 }.is_empty());
    }
}

mod particle_buffers {
    use super::*;

    #[test]
    fn block_offsets_scale_with_the_pool_size() {
        let layout = ParticleLayout {
            particle_count: 300,
        };
        assert_eq!(layout.position_offset(), 0);
        assert_eq!(layout.color_offset(), 1200);
        assert_eq!(layout.velocity_offset(), 2400);
        assert_eq!(layout.len(), 3600);
    }

    #[test]
    fn packed_floats_land_in_their_blocks() {
        let pool = [
            Particle {
                position: Vec4::new(0.0, 0.1, 0.0, 1.0),
                color: Vec4::new(0.5, 0.25, 0.75, 1.0),
                velocity: Vec4::new(-3.0, 12.0, 4.0, 0.0),
            },
            Particle {
                position: Vec4::new(0.0, 0.1, 0.0, 1.0),
                color: Vec4::new(1.0, 0.0, 0.0, 1.0),
                velocity: Vec4::new(7.0, 2.0, -1.0, 0.0),
            },
        ];
        let data = pack_particles(&pool);
        let layout = ParticleLayout {
            particle_count: pool.len(),
        };
        assert_eq!(data.len(), layout.len());
        assert_eq!(data[0..4], [0.0, 0.1, 0.0, 1.0]);
        assert_eq!(
            data[layout.color_offset()..layout.color_offset() + 4],
            [0.5, 0.25, 0.75, 1.0]
        );
        assert_eq!(
            data[layout.velocity_offset() + 4..layout.velocity_offset() + 8],
            [7.0, 2.0, -1.0, 0.0]
        );
    }
}

mod texture_images {
    use super::*;

    fn checker_texel(row: usize, col: usize) -> [u8; 4] {
        let base = (row * CHECKERBOARD_64.width + col) * 4;
        let d = CHECKERBOARD_64.data;
        [d[base], d[base + 1], d[base + 2], d[base + 3]]
    }

    #[test]
    fn units_are_distinct() {
        assert_ne!(CHECKERBOARD_UNIT, STRIPE_UNIT);
    }

    #[test]
    fn checkerboard_dimensions_and_cells() {
        assert_eq!(CHECKERBOARD_64.width, 64);
        assert_eq!(CHECKERBOARD_64.height, 64);
        assert_eq!(CHECKERBOARD_64.data.len(), 64 * 64 * 4);
        // 8-texel cells: origin is green, one cell over is white.
        assert_eq!(checker_texel(0, 0), [0, 150, 0, 255]);
        assert_eq!(checker_texel(0, 8), [255, 255, 255, 255]);
        assert_eq!(checker_texel(8, 0), [255, 255, 255, 255]);
        assert_eq!(checker_texel(8, 8), [0, 150, 0, 255]);
    }

    #[test]
    fn checkerboard_is_opaque() {
        for texel in CHECKERBOARD_64.data.chunks(4) {
            assert_eq!(texel[3], 255);
        }
    }

    #[test]
    fn stripe_switches_from_red_to_yellow_after_texel_four() {
        assert_eq!(STRIPE_32.width, 32);
        assert_eq!(STRIPE_32.height, 1);
        assert_eq!(STRIPE_32.data.len(), 32 * 4);
        for (j, texel) in STRIPE_32.data.chunks(4).enumerate() {
            let expected_green = if j > 4 { 255 } else { 0 };
            assert_eq!(texel[0], 255, "texel {j}");
            assert_eq!(texel[1], expected_green, "texel {j}");
            assert_eq!(texel[2], 0, "texel {j}");
            assert_eq!(texel[3], 255, "texel {j}");
        }
    }
}
