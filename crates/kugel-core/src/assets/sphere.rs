//! Unit-sphere tessellation for generated meshes.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Latitude band count giving the classic 1024-triangle ball together
/// with [`DEFAULT_SLICES`].
pub const DEFAULT_STACKS: usize = 17;

/// Longitude slice count.
pub const DEFAULT_SLICES: usize = 32;

/// Tessellate a unit sphere centered at the origin into a triangle soup.
///
/// `stacks` is the number of latitude bands from pole to pole, `slices`
/// the number of longitude wedges. Pole bands contribute one triangle per
/// slice, interior bands two, for `2 * slices * (stacks - 1)` triangles
/// total. Fewer than two stacks or zero slices yields an empty soup.
pub fn tessellate(stacks: usize, slices: usize) -> Vec<[Vec3; 3]> {
    let mut triangles = Vec::new();
    for stack in 0..stacks {
        for slice in 0..slices {
            let a = point(stacks, slices, stack, slice);
            let b = point(stacks, slices, stack + 1, slice);
            let c = point(stacks, slices, stack + 1, slice + 1);
            let d = point(stacks, slices, stack, slice + 1);
            // Counter-clockwise seen from outside the sphere.
            if stack + 1 < stacks {
                triangles.push([a, c, b]);
            }
            if stack > 0 {
                triangles.push([a, d, c]);
            }
        }
    }
    triangles
}

/// Point on the unit sphere at the given grid coordinate. The slice index
/// wraps so the seam is watertight.
fn point(stacks: usize, slices: usize, stack: usize, slice: usize) -> Vec3 {
    let phi = PI * stack as f32 / stacks as f32;
    let theta = TAU * (slice % slices) as f32 / slices as f32;
    Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin())
}
