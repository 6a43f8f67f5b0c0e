//! PC preview host for the rolling-sphere demo.
//!
//! Renders frames through the core dispatcher into a software rasterizer
//! and writes them out as PNG files. No window, no GPU; the point is a
//! reproducible offline look at what the embedded target would draw.

pub mod preview;

pub use preview::{PreviewBackend, PreviewError};
