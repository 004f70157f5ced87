use math::vec::Vec3;
use scene::Transform;

pub const MOVE_STEP: f32 = 0.1;
pub const ROTATE_STEP_DEGREES: f32 = 10.0;
pub const SCALE_STEP: f32 = 0.05;
pub const ZOOM_STEP: f32 = 0.5;

const AXIS_X: Vec3 = Vec3 { x: 1.0, y: 0.0, z: 0.0 };
const AXIS_Y: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

/// One discrete key press. Each event applies a single fixed-magnitude
/// delta; there is no continuous/analog input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Left,
    Right,
    Up,
    Down,
    RotateLeft,
    RotateRight,
    RotateUp,
    RotateDown,
    ScaleUp,
    ScaleDown,
    ZoomIn,
    ZoomOut,
}

/// Mutable per-frame inputs, driven by input events and read once per frame
/// through [`FrameState::snapshot`].
///
/// Input delivery and rendering share one thread, so writes and reads
/// strictly alternate; nothing here is atomic, and a multi-threaded input
/// source would need its own synchronization on top.
///
/// Offsets accumulate without bound: the scale can reach zero or negative
/// values and the rotation angle grows past 360 degrees. That mirrors the
/// unclamped key handling this renderer ships with.
#[derive(Debug, Clone)]
pub struct FrameState {
    pub transform: Transform,
    pub eye: Vec3,
    pub target: Vec3,
    pub world_up: Vec3,
}

/// Value copy of the frame inputs, taken at the single per-frame read point.
#[derive(Debug, Copy, Clone)]
pub struct FrameSnapshot {
    pub transform: Transform,
    pub eye: Vec3,
    pub target: Vec3,
    pub world_up: Vec3,
}

impl FrameState {
    pub fn new() -> FrameState {
        FrameState {
            transform: Transform::new(),
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::new(0.0, 0.0, 0.0),
            world_up: AXIS_Y,
        }
    }

    /// Applies one event. Horizontal rotation keys spin about +Y, vertical
    /// ones about +X; the rotation axis follows the most recent rotation
    /// key while the angle keeps accumulating.
    pub fn apply(&mut self, event: InputEvent) {
        use InputEvent::*;

        let t = &mut self.transform;
        match event {
            Left  => t.translation.x -= MOVE_STEP,
            Right => t.translation.x += MOVE_STEP,
            Up    => t.translation.y += MOVE_STEP,
            Down  => t.translation.y -= MOVE_STEP,

            RotateLeft => {
                t.axis = AXIS_Y;
                t.angle_degrees -= ROTATE_STEP_DEGREES;
            }
            RotateRight => {
                t.axis = AXIS_Y;
                t.angle_degrees += ROTATE_STEP_DEGREES;
            }
            RotateUp => {
                t.axis = AXIS_X;
                t.angle_degrees -= ROTATE_STEP_DEGREES;
            }
            RotateDown => {
                t.axis = AXIS_X;
                t.angle_degrees += ROTATE_STEP_DEGREES;
            }

            ScaleUp   => t.scale += Vec3::from_scalar(SCALE_STEP),
            ScaleDown => t.scale -= Vec3::from_scalar(SCALE_STEP),

            ZoomIn  => self.eye.z -= ZOOM_STEP,
            ZoomOut => self.eye.z += ZOOM_STEP,
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            transform: self.transform,
            eye: self.eye,
            target: self.target,
            world_up: self.world_up,
        }
    }
}

impl Default for FrameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_apply_fixed_deltas() {
        let mut state = FrameState::new();

        state.apply(InputEvent::Left);
        state.apply(InputEvent::Left);
        state.apply(InputEvent::Up);
        assert!((state.transform.translation.x + 2.0 * MOVE_STEP).abs() < 1e-6);
        assert!((state.transform.translation.y - MOVE_STEP).abs() < 1e-6);

        state.apply(InputEvent::ZoomIn);
        assert!((state.eye.z - (10.0 - ZOOM_STEP)).abs() < 1e-6);
    }

    #[test]
    fn rotation_axis_follows_the_last_key() {
        let mut state = FrameState::new();

        state.apply(InputEvent::RotateRight);
        assert_eq!(state.transform.axis, Vec3::new(0.0, 1.0, 0.0));
        assert!((state.transform.angle_degrees - ROTATE_STEP_DEGREES).abs()
            < 1e-6);

        state.apply(InputEvent::RotateUp);
        assert_eq!(state.transform.axis, Vec3::new(1.0, 0.0, 0.0));
        assert!(state.transform.angle_degrees.abs() < 1e-6);
    }

    #[test]
    fn accumulation_is_unclamped() {
        let mut state = FrameState::new();

        // Scale all the way through zero into negative territory.
        for _ in 0..25 {
            state.apply(InputEvent::ScaleDown);
        }
        assert!(state.transform.scale.x < 0.0);

        for _ in 0..40 {
            state.apply(InputEvent::RotateRight);
        }
        assert!(state.transform.angle_degrees > 360.0);
    }

    #[test]
    fn snapshot_is_a_value_copy() {
        let mut state = FrameState::new();
        let snap = state.snapshot();

        state.apply(InputEvent::Right);
        assert!((snap.transform.translation.x).abs() < 1e-6);
        assert!((state.transform.translation.x - MOVE_STEP).abs() < 1e-6);
    }
}
