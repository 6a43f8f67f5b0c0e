//! Rolling-sphere path state machine.
//!
//! The sphere rolls along a closed triangular circuit on the ground plane.
//! Each segment tracks the rolled angle in degrees; the translation along
//! the segment is derived from that angle, so angle and distance stay in
//! lockstep by construction. Crossing a segment endpoint folds the
//! segment's spin into an accumulated orientation and re-arms the next
//! segment from zero.

use glam::{Mat4, Vec3};

use crate::math;

/// First corner of the circuit, where the sphere starts at rest.
pub const WAYPOINT_A: Vec3 = Vec3::new(3.0, 1.0, 5.0);
/// Second corner.
pub const WAYPOINT_B: Vec3 = Vec3::new(-2.0, 1.0, -2.5);
/// Third corner.
pub const WAYPOINT_C: Vec3 = Vec3::new(2.0, 1.0, -4.0);

/// Ground-plane up vector; rolling axes are horizontal, perpendicular to
/// the travel direction.
const UP: Vec3 = Vec3::Y;

/// Degrees of roll added per animation tick.
pub const DEG_PER_TICK: f32 = 0.02;

/// World units travelled per radian of roll (unit sphere).
const SPEED_SCALE: f32 = 1.0;

const SEGMENT_COUNT: usize = 3;

/// One leg of the circuit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSegment {
    pub start: Vec3,
    pub end: Vec3,
}

impl PathSegment {
    /// Unnormalized travel vector.
    pub fn direction(self) -> Vec3 {
        self.end - self.start
    }

    /// Rolling axis: up cross travel direction. Left unnormalized here;
    /// the rotation constructor normalizes.
    pub fn rotation_axis(self) -> Vec3 {
        UP.cross(self.direction())
    }

    /// Segment length in world units.
    pub fn length(self) -> f32 {
        self.direction().length()
    }
}

/// The circuit leg for a given index, cycling A to B to C and back.
pub fn segment(index: usize) -> PathSegment {
    match index % SEGMENT_COUNT {
        0 => PathSegment {
            start: WAYPOINT_A,
            end: WAYPOINT_B,
        },
        1 => PathSegment {
            start: WAYPOINT_B,
            end: WAYPOINT_C,
        },
        _ => PathSegment {
            start: WAYPOINT_C,
            end: WAYPOINT_A,
        },
    }
}

/// Motion state: current segment, angle rolled along it, and the
/// orientation accumulated over all completed segments.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionState {
    segment: usize,
    angle_deg: f32,
    accumulated: Mat4,
}

impl Default for MotionState {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionState {
    /// At rest at the first waypoint, nothing accumulated.
    pub fn new() -> Self {
        Self {
            segment: 0,
            angle_deg: 0.0,
            accumulated: Mat4::IDENTITY,
        }
    }

    /// Index of the segment currently being travelled.
    pub fn segment_index(&self) -> usize {
        self.segment
    }

    /// Angle rolled along the current segment, degrees.
    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    /// Orientation folded in from completed segments.
    pub fn accumulated(&self) -> Mat4 {
        self.accumulated
    }

    /// Distance travelled along the current segment, world units.
    pub fn distance(&self) -> f32 {
        self.angle_deg.to_radians() * SPEED_SCALE
    }

    /// Sphere center position for the current state.
    pub fn translation(&self) -> Vec3 {
        let seg = segment(self.segment);
        seg.start + self.distance() * seg.direction().normalize_or_zero()
    }

    /// Advance one animation tick.
    pub fn tick(&mut self) {
        self.advance(DEG_PER_TICK);
    }

    /// Advance by an arbitrary angle. At most one segment transition fires
    /// per call, matching the per-tick increment being far smaller than any
    /// segment.
    pub fn advance(&mut self, degrees: f32) {
        self.angle_deg += degrees;
        if self.endpoint_crossed() {
            let seg = segment(self.segment);
            self.accumulated =
                math::rotation_about(seg.rotation_axis(), self.angle_deg) * self.accumulated;
            self.segment = (self.segment + 1) % SEGMENT_COUNT;
            self.angle_deg = 0.0;
        }
    }

    /// Full model transform: translate to the center, spin for the current
    /// segment, then the accumulated orientation underneath.
    pub fn model_transform(&self) -> Mat4 {
        let seg = segment(self.segment);
        Mat4::from_translation(self.translation())
            * math::rotation_about(seg.rotation_axis(), self.angle_deg)
            * self.accumulated
    }

    /// True once the center has passed the segment's endpoint on every
    /// ground axis the segment actually moves along.
    fn endpoint_crossed(&self) -> bool {
        let seg = segment(self.segment);
        let dir = seg.direction();
        if dir.x == 0.0 && dir.z == 0.0 {
            return false;
        }
        let pos = self.translation();
        axis_crossed(pos.x, seg.end.x, dir.x) && axis_crossed(pos.z, seg.end.z, dir.z)
    }
}

/// Per-axis endpoint test, gated on travel sign. An axis with no travel
/// component is vacuously crossed.
fn axis_crossed(position: f32, end: f32, direction: f32) -> bool {
    if direction > 0.0 {
        position > end
    } else if direction < 0.0 {
        position < end
    } else {
        true
    }
}
