//! Mesh and texture assets: file loading, sphere generation, and the
//! built-in texture images.

pub mod loader;
pub mod sphere;
pub mod textures;

pub use loader::{load_mesh, parse_mesh, MeshError};
