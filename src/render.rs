use math::{
    vec::Vec3,
    mat::{self, Mat4},
};
use scene::{Camera, TransformError};

use crate::frame::FrameSnapshot;

/// Perspective projection parameters. These are configuration, not derived
/// state; the driver fixes them at startup.
#[derive(Debug, Copy, Clone)]
pub struct Projection {
    pub fov_y_degrees: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn matrix(&self) -> Mat4 {
        mat::rh::no::perspective(
            self.fov_y_degrees.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }
}

impl Default for Projection {
    fn default() -> Self {
        Projection {
            fov_y_degrees: 60.0,
            aspect_ratio: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Phong point-light parameters, passed through to shading untouched.
#[derive(Debug, Copy, Clone)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
    pub ambient_strength: f32,
    pub specular_strength: f32,
    pub shininess: f32,
}

impl Default for Light {
    fn default() -> Self {
        Light {
            position: Vec3::new(-10.0, 3.0, 0.0),
            color: Vec3::from_scalar(1.0),
            ambient_strength: 0.1,
            specular_strength: 0.5,
            shininess: 16.0,
        }
    }
}

/// Everything the shading stage needs for one frame, assembled in one place.
/// The camera basis vectors ride along with the matrices because specular
/// shading reads them directly.
#[derive(Debug, Copy, Clone)]
pub struct SceneConstants {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub camera_position: Vec3,
    pub camera_right: Vec3,
    pub camera_up: Vec3,
    pub camera_forward: Vec3,
    pub light: Light,
}

/// Assembles the per-frame constants from a snapshot. Degenerate camera
/// orientations are recovered by [`Camera::look_at`]; a zero rotation axis
/// is still an error because it means the inputs themselves are broken.
pub fn frame_constants(
    snapshot: &FrameSnapshot,
    projection: &Projection,
    light: Light,
) -> Result<SceneConstants, TransformError> {
    let model = snapshot.transform.compose()?;
    let camera = Camera::look_at(snapshot.eye, snapshot.target,
                                 snapshot.world_up);

    Ok(SceneConstants {
        model,
        view: camera.view(),
        projection: projection.matrix(),
        camera_position: camera.position,
        camera_right: camera.basis.right,
        camera_up: camera.basis.up,
        camera_forward: camera.basis.forward,
        light,
    })
}

/// View matrix for the cubemap pass: same orientation as the scene view,
/// translation stripped so the skybox never parallaxes.
pub fn skybox_view(view: &Mat4) -> Mat4 {
    view.without_translation()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameState;
    use math::vec::Vec4;

    #[test]
    fn constants_come_from_one_snapshot() {
        let state = FrameState::new();
        let constants = frame_constants(
            &state.snapshot(),
            &Projection::default(),
            Light::default(),
        ).unwrap();

        // Default camera sits at (0, 0, 10) looking at the origin.
        assert_eq!(constants.camera_position, Vec3::new(0.0, 0.0, 10.0));
        assert!((constants.camera_forward.z + 1.0).abs() < 1e-6);

        // Identity transform: the model matrix moves nothing.
        let v = constants.model * Vec4::new(1.0, 2.0, 3.0, 1.0);
        assert!((v.x - 1.0).abs() < 1e-6);
        assert!((v.y - 2.0).abs() < 1e-6);
        assert!((v.z - 3.0).abs() < 1e-6);
    }

    #[test]
    fn broken_rotation_axis_surfaces_as_an_error() {
        let mut state = FrameState::new();
        state.transform.axis = Vec3::from_scalar(0.0);

        let result = frame_constants(
            &state.snapshot(),
            &Projection::default(),
            Light::default(),
        );
        assert!(matches!(result, Err(TransformError::InvalidAxis)));
    }

    #[test]
    fn skybox_view_keeps_rotation_and_drops_translation() {
        let state = FrameState::new();
        let constants = frame_constants(
            &state.snapshot(),
            &Projection::default(),
            Light::default(),
        ).unwrap();

        let sky = skybox_view(&constants.view);
        for i in 0..3 {
            assert!((sky.e[3][i]).abs() < 1e-6);
            for j in 0..3 {
                assert!((sky.e[j][i] - constants.view.e[j][i]).abs() < 1e-6);
            }
        }
        assert!((sky.e[3][3] - 1.0).abs() < 1e-6);
    }
}
