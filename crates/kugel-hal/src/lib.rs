#![no_std]

//! Backend abstraction for the rolling-sphere demo.
//!
//! The core crate composes uniform values and draw calls; implementations of
//! [`RenderBackend`] decide what a "shader program" and a "vertex buffer"
//! actually are (a software rasterizer, a GL context, a test recorder).

use glam::{Mat3, Mat4, Vec4};

/// A uniform payload, tagged with its shader-side type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec4(Vec4),
    Mat3(Mat3),
    Mat4(Mat4),
}

/// Opaque handle for a vertex buffer owned by the backend.
///
/// The core assigns one id per scene object and never compares buffer
/// handles to decide behavior; dispatch is by object kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

/// Primitive topology for a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    Lines,
    Points,
}

/// Fragment blend state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Source fragment replaces the destination.
    Opaque,
    /// Source-alpha / one-minus-source-alpha compositing.
    Alpha,
}

/// Triangle fill state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonMode {
    Fill,
    Line,
}

/// A stage that accepts named uniforms, packed vertex buffers, and draw
/// calls.
///
/// Buffer data is a flat `f32` slice; attribute bindings carry a component
/// count and an offset in floats into the currently bound buffer. The name
/// sets for uniforms and attributes form the contract with the shading
/// stage; `has_uniform`/`has_attribute` let callers verify the contract once
/// at startup instead of discovering a mismatch mid-frame.
pub trait RenderBackend {
    type Error: core::fmt::Debug;

    /// Returns true if the shading stage knows this uniform name.
    fn has_uniform(&self, name: &str) -> bool;

    /// Returns true if the shading stage knows this attribute name.
    fn has_attribute(&self, name: &str) -> bool;

    /// Write a named uniform. Unknown names are an error, not a no-op.
    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), Self::Error>;

    /// Create or replace the buffer `id` with `data`.
    fn upload_buffer(&mut self, id: BufferId, data: &[f32]) -> Result<(), Self::Error>;

    /// Upload an RGBA8 image to a texture unit.
    fn upload_texture(
        &mut self,
        unit: u8,
        width: usize,
        height: usize,
        rgba: &[u8],
    ) -> Result<(), Self::Error>;

    /// Select the buffer subsequent attribute bindings refer to.
    fn bind_buffer(&mut self, id: BufferId) -> Result<(), Self::Error>;

    /// Bind a named attribute to `components` floats per vertex starting
    /// `offset` floats into the bound buffer.
    fn set_attribute(
        &mut self,
        name: &str,
        components: usize,
        offset: usize,
    ) -> Result<(), Self::Error>;

    /// Tear down all attribute bindings.
    fn clear_attributes(&mut self) -> Result<(), Self::Error>;

    /// Draw `count` vertices from the bound buffer.
    fn draw(&mut self, primitive: Primitive, count: usize) -> Result<(), Self::Error>;

    /// Enable or disable depth-buffer writes. Depth testing stays on.
    fn set_depth_mask(&mut self, enabled: bool) -> Result<(), Self::Error>;

    /// Enable or disable writes to all color channels.
    fn set_color_mask(&mut self, enabled: bool) -> Result<(), Self::Error>;

    fn set_blend(&mut self, mode: BlendMode) -> Result<(), Self::Error>;

    fn set_polygon_mode(&mut self, mode: PolygonMode) -> Result<(), Self::Error>;

    fn set_clear_color(&mut self, rgba: Vec4) -> Result<(), Self::Error>;

    fn set_line_width(&mut self, width: f32) -> Result<(), Self::Error>;

    fn set_point_size(&mut self, size: f32) -> Result<(), Self::Error>;

    /// Clear the color and depth buffers.
    fn clear_frame(&mut self) -> Result<(), Self::Error>;

    /// Finish the frame (swap, flush, or write out, per backend).
    fn present(&mut self) -> Result<(), Self::Error>;
}
