//! Core of the rolling-sphere demo.
//!
//! The crate is backend-agnostic: everything that touches a GPU goes
//! through the [`kugel_hal::RenderBackend`] trait, so the same scene,
//! motion, and composition code drives real and mock backends alike.
//!
//! - [`assets`]: mesh file parsing, sphere tessellation, built-in textures
//! - [`config`]: the demo's runtime switches
//! - [`motion`]: the rolling path state machine
//! - [`render`]: lighting constants, buffer packing, uniform composition,
//!   and the frame dispatcher
//! - [`scene`]: floor, axes, and firework pool

pub mod assets;
pub mod config;
pub mod math;
pub mod motion;
pub mod render;
pub mod scene;

pub use config::DemoConfig;
pub use render::{RenderError, Renderer};
pub use scene::Scene;
