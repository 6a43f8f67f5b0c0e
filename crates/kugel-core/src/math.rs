//! Transform helpers shared by the motion state machine and the composer.

use glam::{Mat3, Mat4, Vec3, Vec4};

/// Build a perspective projection matrix with GL-convention clip depth.
/// fovy_deg: vertical field of view in degrees.
pub fn perspective(fovy_deg: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh_gl(fovy_deg.to_radians(), aspect, near, far)
}

/// Build a look-at view matrix (right-handed).
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, target, up)
}

/// Rotation of `angle_deg` degrees about an arbitrary (not necessarily
/// unit-length) axis. A zero axis yields the identity.
pub fn rotation_about(axis: Vec3, angle_deg: f32) -> Mat4 {
    match axis.try_normalize() {
        Some(unit) => Mat4::from_axis_angle(unit, angle_deg.to_radians()),
        None => Mat4::IDENTITY,
    }
}

/// Normal matrix for a model-view transform: inverse transpose of the
/// upper-left 3x3.
pub fn normal_matrix(mv: Mat4) -> Mat3 {
    Mat3::from_mat4(mv).inverse().transpose()
}

/// Planar shadow matrix: flattens geometry onto the plane y = 0 along rays
/// from a light at `light`. The light must sit off the plane.
///
/// The inner matrix zeroes y and moves the scaled height into w; the
/// surrounding translations center the projection on the light so points
/// already on the plane stay fixed.
pub fn flatten_onto_ground(light: Vec3) -> Mat4 {
    let flatten = Mat4::from_cols(
        Vec4::new(1.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 0.0, -1.0 / light.y),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 0.0),
    );
    Mat4::from_translation(Vec3::new(light.x, 0.0, light.z))
        * flatten
        * Mat4::from_translation(-light)
}
