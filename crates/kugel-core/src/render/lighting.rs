//! Light, material, and fog parameters.
//!
//! Configuration values, not behavior: the composer turns these into
//! uniforms and the shading stage applies them.

use glam::Vec4;

/// Scene-wide ambient term applied to all lit geometry.
pub const GLOBAL_AMBIENT: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);

/// A light at infinity along a fixed direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    /// Direction of travel in world space, w = 0.
    pub direction: Vec4,
}

/// The positional source. Doubles as the spotlight when the light-source
/// flag selects it, and parameterizes the shadow projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    /// World-space position, w = 1.
    pub position: Vec4,
    pub const_att: f32,
    pub linear_att: f32,
    pub quad_att: f32,
}

/// Spotlight shape, used when the positional source acts as a spotlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spotlight {
    /// World-space point the cone is aimed at, w = 1.
    pub destination: Vec4,
    pub exponent: f32,
    pub cutoff_deg: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shininess: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogParams {
    pub linear_start: f32,
    pub linear_end: f32,
    /// Density for the exponential modes.
    pub density: f32,
    pub color: Vec4,
}

pub const fn directional_light() -> DirectionalLight {
    DirectionalLight {
        ambient: Vec4::new(0.0, 0.0, 0.0, 1.0),
        diffuse: Vec4::new(0.8, 0.8, 0.8, 1.0),
        specular: Vec4::new(0.2, 0.2, 0.2, 1.0),
        direction: Vec4::new(0.1, 0.0, -1.0, 0.0),
    }
}

pub const fn point_light() -> PointLight {
    PointLight {
        ambient: Vec4::new(0.0, 0.0, 0.0, 1.0),
        diffuse: Vec4::new(1.0, 1.0, 1.0, 1.0),
        specular: Vec4::new(1.0, 1.0, 1.0, 1.0),
        position: Vec4::new(-14.0, 12.0, -3.0, 1.0),
        const_att: 2.0,
        linear_att: 0.01,
        quad_att: 0.001,
    }
}

pub const fn spotlight() -> Spotlight {
    Spotlight {
        destination: Vec4::new(-6.0, 0.0, -4.5, 1.0),
        exponent: 15.0,
        cutoff_deg: 20.0,
    }
}

pub const fn ground_material() -> Material {
    Material {
        ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
        diffuse: Vec4::new(0.0, 1.0, 0.0, 1.0),
        specular: Vec4::new(0.0, 0.0, 0.0, 1.0),
        shininess: 0.0,
    }
}

pub const fn sphere_material() -> Material {
    Material {
        ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
        diffuse: Vec4::new(1.0, 0.84, 0.0, 1.0),
        specular: Vec4::new(1.0, 0.84, 0.0, 1.0),
        shininess: 125.0,
    }
}

pub const fn fog_params() -> FogParams {
    FogParams {
        linear_start: 0.0,
        linear_end: 18.0,
        density: 0.09,
        color: Vec4::new(0.7, 0.7, 0.7, 0.5),
    }
}
