//! Sphere mesh generation for the rolling-sphere demo.
//!
//! Writes the triangle-soup text the demo's loader reads: a polygon count,
//! then per polygon a corner count (always 3) followed by three `x y z`
//! corners, all whitespace separated.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use glam::Vec3;
use kugel_core::assets::sphere;

/// Resolution floor: fewer stacks leaves no interior bands, fewer slices
/// collapses each band to zero area.
const MIN_STACKS: usize = 2;
const MIN_SLICES: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    /// Output file could not be created or written.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// Resolution too low to produce a closed sphere.
    #[error("resolution {stacks}x{slices} is too low for a closed sphere")]
    Resolution { stacks: usize, slices: usize },
}

/// What [`generate_sphere`] wrote, for reporting.
#[derive(Debug)]
pub struct GeneratedMesh {
    pub path: PathBuf,
    pub stacks: usize,
    pub slices: usize,
    pub triangle_count: usize,
}

fn validate_resolution(stacks: usize, slices: usize) -> Result<(), PrepError> {
    if stacks < MIN_STACKS || slices < MIN_SLICES {
        return Err(PrepError::Resolution { stacks, slices });
    }
    Ok(())
}

/// Serialize triangles in the loader's text format.
///
/// Coordinates go through `f32` `Display`, which prints the shortest
/// string that parses back to the same value.
pub fn write_soup<W: Write>(writer: &mut W, triangles: &[[Vec3; 3]]) -> io::Result<()> {
    writeln!(writer, "{}", triangles.len())?;
    for triangle in triangles {
        writeln!(writer, "3")?;
        for corner in triangle {
            writeln!(writer, "{} {} {}", corner.x, corner.y, corner.z)?;
        }
    }
    Ok(())
}

/// Tessellate a unit sphere and write it to `path`.
pub fn generate_sphere(
    stacks: usize,
    slices: usize,
    path: &Path,
) -> Result<GeneratedMesh, PrepError> {
    validate_resolution(stacks, slices)?;

    let triangles = sphere::tessellate(stacks, slices);
    let mut writer = BufWriter::new(File::create(path)?);
    write_soup(&mut writer, &triangles)?;
    writer.flush()?;

    log::info!(
        "  Resolution: {}x{}, Triangles: {}, Output: {}",
        stacks,
        slices,
        triangles.len(),
        path.display()
    );

    Ok(GeneratedMesh {
        path: path.to_path_buf(),
        stacks,
        slices,
        triangle_count: triangles.len(),
    })
}
