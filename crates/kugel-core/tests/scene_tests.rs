//! Scene content tests: floor and axes geometry, the shadow mesh variant,
//! the firework pool, and the generated sphere.

use glam::{Vec3, Vec4};
use kugel_core::assets::loader::{mesh_from_triangles, SHADOW_COLOR};
use kugel_core::assets::sphere;
use kugel_core::scene::{self, fireworks, Scene, AXIS_LENGTH, FLOOR_COLOR};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn test_scene() -> Scene {
    let mut rng = StdRng::seed_from_u64(7);
    let mesh = mesh_from_triangles(&sphere::tessellate(5, 8));
    Scene::new(mesh, &mut rng)
}

mod floor {
    use super::*;

    #[test]
    fn two_triangles_on_the_ground_plane() {
        let floor = scene::build_floor();
        assert_eq!(floor.len(), 6);
        for vertex in &floor {
            assert_eq!(vertex.position.y, 0.0);
            assert_eq!(vertex.position.w, 1.0);
            assert_eq!(vertex.normal, Vec3::Y);
            assert_eq!(vertex.color, FLOOR_COLOR);
        }
    }

    #[test]
    fn triangles_share_the_quad_diagonal() {
        let floor = scene::build_floor();
        assert_eq!(floor[2].position, floor[3].position);
        assert_eq!(floor[0].position, floor[5].position);
    }

    #[test]
    fn checkerboard_repeats_past_one() {
        let floor = scene::build_floor();
        let max_u = floor.iter().map(|v| v.uv.x).fold(0.0f32, f32::max);
        let max_v = floor.iter().map(|v| v.uv.y).fold(0.0f32, f32::max);
        assert_eq!(max_u, 1.25);
        assert_eq!(max_v, 1.5);
    }
}

mod axes {
    use super::*;

    #[test]
    fn three_segments_from_the_origin() {
        let axes = scene::build_axes();
        assert_eq!(axes.len(), 6);
        for pair in axes.chunks(2) {
            assert_eq!(pair[0].position, Vec4::new(0.0, 0.0, 0.0, 1.0));
            assert_eq!(pair[1].position.truncate().length(), AXIS_LENGTH);
        }
    }

    #[test]
    fn axis_colors_are_red_magenta_blue() {
        let axes = scene::build_axes();
        assert_eq!(axes[1].color, Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(axes[3].color, Vec4::new(1.0, 0.0, 1.0, 1.0));
        assert_eq!(axes[5].color, Vec4::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn layout_matches_the_triangle_meshes() {
        // Zero normals and texcoords keep the packed stride identical.
        for vertex in scene::build_axes() {
            assert_eq!(vertex.normal, Vec3::ZERO);
            assert_eq!(vertex.uv.x, 0.0);
            assert_eq!(vertex.uv.y, 0.0);
        }
    }
}

mod shadow {
    use super::*;

    #[test]
    fn shadow_mesh_shares_geometry_and_swaps_color() {
        let scene = test_scene();
        let shadow = scene.sphere_shadow();
        assert_eq!(shadow.len(), scene.sphere.len());
        for (s, v) in shadow.iter().zip(scene.sphere.iter()) {
            assert_eq!(s.position, v.position);
            assert_eq!(s.normal, v.normal);
            assert_eq!(s.color, SHADOW_COLOR);
        }
    }

    #[test]
    fn shadow_color_is_translucent() {
        assert!(SHADOW_COLOR.w < 1.0);
    }
}

mod firework_pool {
    use super::*;

    #[test]
    fn pool_has_the_full_count_at_the_launch_point() {
        let mut rng = StdRng::seed_from_u64(1);
        let pool = fireworks::particle_pool(&mut rng);
        assert_eq!(pool.len(), fireworks::PARTICLE_COUNT);
        for particle in &pool {
            assert_eq!(particle.position, fireworks::LAUNCH_POINT);
        }
    }

    #[test]
    fn velocities_spread_sideways_and_upward() {
        let mut rng = StdRng::seed_from_u64(2);
        let pool = fireworks::particle_pool(&mut rng);
        for particle in &pool {
            assert!(particle.velocity.x >= -10.0 && particle.velocity.x < 10.0);
            assert!(particle.velocity.z >= -10.0 && particle.velocity.z < 10.0);
            assert!(particle.velocity.y >= 0.0 && particle.velocity.y < 24.0);
            assert_eq!(particle.velocity.w, 0.0);
        }
        // Some launches actually go sideways in each direction.
        assert!(pool.iter().any(|p| p.velocity.x < 0.0));
        assert!(pool.iter().any(|p| p.velocity.x > 0.0));
    }

    #[test]
    fn colors_are_quantized_channels_with_full_alpha() {
        let mut rng = StdRng::seed_from_u64(3);
        let pool = fireworks::particle_pool(&mut rng);
        for particle in &pool {
            for channel in [particle.color.x, particle.color.y, particle.color.z] {
                assert!((0.0..1.0).contains(&channel));
                let steps = channel * 256.0;
                assert!((steps - steps.round()).abs() < 1e-4);
            }
            assert_eq!(particle.color.w, 1.0);
        }
    }

    #[test]
    fn seeded_pools_are_reproducible() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let pool_a = fireworks::particle_pool(&mut a);
        let pool_b = fireworks::particle_pool(&mut b);
        for (x, y) in pool_a.iter().zip(pool_b.iter()) {
            assert_eq!(x.velocity, y.velocity);
            assert_eq!(x.color, y.color);
        }
    }
}

mod generated_sphere {
    use super::*;

    #[test]
    fn triangle_count_follows_the_band_formula() {
        for (stacks, slices) in [(5, 8), (17, 32), (2, 3)] {
            let soup = sphere::tessellate(stacks, slices);
            assert_eq!(soup.len(), 2 * slices * (stacks - 1), "{stacks}x{slices}");
        }
    }

    #[test]
    fn default_resolution_is_the_classic_1024_ball() {
        let soup = sphere::tessellate(sphere::DEFAULT_STACKS, sphere::DEFAULT_SLICES);
        assert_eq!(soup.len(), 1024);
    }

    #[test]
    fn corners_lie_on_the_unit_sphere() {
        for triangle in sphere::tessellate(9, 12) {
            for corner in triangle {
                assert!((corner.length() - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn winding_faces_outward() {
        for (i, triangle) in sphere::tessellate(9, 12).iter().enumerate() {
            let u = triangle[1] - triangle[0];
            let v = triangle[2] - triangle[1];
            let normal = u.cross(v);
            let centroid = (triangle[0] + triangle[1] + triangle[2]) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "triangle {i} faces inward");
        }
    }

    #[test]
    fn degenerate_resolutions_yield_nothing() {
        assert!(sphere::tessellate(1, 8).is_empty());
        assert!(sphere::tessellate(0, 8).is_empty());
        assert!(sphere::tessellate(5, 0).is_empty());
    }
}
