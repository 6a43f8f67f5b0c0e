//! Triangle-soup mesh files: parsing and vertex construction.
//!
//! The format is whitespace-separated: a polygon count, then for each
//! polygon its vertex count (only 3 is accepted) followed by that many
//! `x y z` triples.

use std::fs;
use std::path::Path;

use glam::{Vec2, Vec3, Vec4};

use crate::render::Vertex;

/// Base color applied to loaded and generated ball meshes.
pub const SPHERE_COLOR: Vec4 = Vec4::new(1.0, 0.84, 0.0, 1.0);

/// Translucent dark gray for the flattened shadow copy.
pub const SHADOW_COLOR: Vec4 = Vec4::new(0.25, 0.25, 0.25, 0.65);

/// Error type for mesh loading.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    /// Reading the mesh file failed.
    #[error("failed to read mesh file: {0}")]
    Io(#[from] std::io::Error),
    /// The file ended before a required token.
    #[error("mesh file ended early, expected {expected}")]
    Truncated { expected: &'static str },
    /// A token could not be parsed as the required number.
    #[error("invalid {expected} `{token}` in mesh file")]
    InvalidNumber {
        expected: &'static str,
        token: String,
    },
    /// A polygon with a vertex count other than three.
    #[error("polygon {index} has {count} vertices, only triangles are supported")]
    UnsupportedPolygon { index: usize, count: usize },
}

/// Read and parse a mesh file into renderable vertices.
pub fn load_mesh(path: &Path) -> Result<Vec<Vertex>, MeshError> {
    let text = fs::read_to_string(path)?;
    let vertices = parse_mesh(&text)?;
    log::info!(
        "loaded {} vertices ({} triangles) from {}",
        vertices.len(),
        vertices.len() / 3,
        path.display()
    );
    Ok(vertices)
}

/// Parse mesh text into renderable vertices. A zero polygon count yields
/// an empty mesh.
pub fn parse_mesh(text: &str) -> Result<Vec<Vertex>, MeshError> {
    let mut tokens = text.split_whitespace();
    let polygon_count = next_usize(&mut tokens, "polygon count")?;
    let mut triangles = Vec::with_capacity(polygon_count);
    for index in 0..polygon_count {
        let corners = next_usize(&mut tokens, "vertex count")?;
        if corners != 3 {
            return Err(MeshError::UnsupportedPolygon {
                index,
                count: corners,
            });
        }
        let mut triangle = [Vec3::ZERO; 3];
        for corner in triangle.iter_mut() {
            let x = next_f32(&mut tokens, "vertex coordinate")?;
            let y = next_f32(&mut tokens, "vertex coordinate")?;
            let z = next_f32(&mut tokens, "vertex coordinate")?;
            *corner = Vec3::new(x, y, z);
        }
        triangles.push(triangle);
    }
    Ok(mesh_from_triangles(&triangles))
}

/// Expand a triangle soup into flat-shaded vertices in the ball's base
/// color. Degenerate triangles get a zero normal rather than NaNs.
pub fn mesh_from_triangles(triangles: &[[Vec3; 3]]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(triangles.len() * 3);
    for triangle in triangles {
        let u = triangle[1] - triangle[0];
        let v = triangle[2] - triangle[1];
        let normal = u.cross(v).normalize_or_zero();
        for &corner in triangle {
            vertices.push(Vertex {
                position: corner.extend(1.0),
                color: SPHERE_COLOR,
                normal,
                uv: Vec2::ZERO,
            });
        }
    }
    vertices
}

fn next_usize<'a, I>(tokens: &mut I, expected: &'static str) -> Result<usize, MeshError>
where
    I: Iterator<Item = &'a str>,
{
    let token = tokens.next().ok_or(MeshError::Truncated { expected })?;
    token.parse().map_err(|_| MeshError::InvalidNumber {
        expected,
        token: token.to_string(),
    })
}

fn next_f32<'a, I>(tokens: &mut I, expected: &'static str) -> Result<f32, MeshError>
where
    I: Iterator<Item = &'a str>,
{
    let token = tokens.next().ok_or(MeshError::Truncated { expected })?;
    token.parse().map_err(|_| MeshError::InvalidNumber {
        expected,
        token: token.to_string(),
    })
}
