use math::{
    vec::Vec3,
    mat::Mat4,
};

use crate::error::CameraError;

/// Cross products shorter than this are treated as degenerate.
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Orthonormal camera frame. Derived from eye/target/world-up, never
/// mutated independently.
#[derive(Debug, Copy, Clone)]
pub struct CameraBasis {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl CameraBasis {
    /// Builds the basis as
    ///
    /// ```text
    /// forward = normalize(target - eye)
    /// right   = normalize(cross(forward, world_up))
    /// up      = normalize(cross(right, forward))
    /// ```
    ///
    /// Fails when `eye` and `target` coincide or when the view direction is
    /// parallel to `world_up`, where `right` cannot be normalized.
    pub fn build(eye: Vec3, target: Vec3, world_up: Vec3)
        -> Result<CameraBasis, CameraError> {

        let forward = target - eye;
        if forward.length2() <= DEGENERATE_EPSILON * DEGENERATE_EPSILON {
            return Err(CameraError::DegenerateCamera);
        }
        let forward = forward.normalized();

        let right = forward.cross(world_up);
        if right.length2() <= DEGENERATE_EPSILON * DEGENERATE_EPSILON {
            return Err(CameraError::DegenerateCamera);
        }
        let right = right.normalized();

        let up = right.cross(forward).normalized();

        Ok(CameraBasis { right, up, forward })
    }

    /// View matrix composed from this basis and a translation by `-eye`.
    /// Numerically equivalent to `math::mat::rh::look_at`.
    pub fn view_matrix(&self, eye: Vec3) -> Mat4 {
        let mut rotation = Mat4::identity();

        rotation.e[0][0] = self.right.x;
        rotation.e[1][0] = self.right.y;
        rotation.e[2][0] = self.right.z;

        rotation.e[0][1] = self.up.x;
        rotation.e[1][1] = self.up.y;
        rotation.e[2][1] = self.up.z;

        rotation.e[0][2] = -self.forward.x;
        rotation.e[1][2] = -self.forward.y;
        rotation.e[2][2] = -self.forward.z;

        rotation * Mat4::translation(-eye)
    }
}

/// Camera state for one frame. The basis vectors are exposed alongside the
/// position because the shading stage consumes eye/right/up directly for
/// specular lighting.
#[derive(Debug, Copy, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub world_up: Vec3,
    pub basis: CameraBasis,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3, world_up: Vec3)
        -> Result<Camera, CameraError> {

        let basis = CameraBasis::build(position, target, world_up)?;
        Ok(Camera { position, target, world_up, basis })
    }

    /// Like [`Camera::new`], but recovers from degenerate orientations: a
    /// view direction parallel to `world_up` substitutes a fallback up axis
    /// (+X when the world up is Y-dominant, +Y otherwise), and a camera
    /// sitting on its target aims down -Z. Substitutions are logged.
    pub fn look_at(position: Vec3, target: Vec3, world_up: Vec3) -> Camera {
        if let Ok(camera) = Camera::new(position, target, world_up) {
            return camera;
        }

        let fallback_up = if world_up.y.abs() >= world_up.x.abs() {
            Vec3::new(1.0, 0.0, 0.0)
        } else {
            Vec3::new(0.0, 1.0, 0.0)
        };
        log::warn!(
            "degenerate camera orientation, substituting {fallback_up} as up"
        );

        if let Ok(camera) = Camera::new(position, target, fallback_up) {
            return camera;
        }

        // Eye and target coincide; aim down -Z with the default frame.
        log::warn!("camera eye sits on its target, aiming down -Z");
        Camera {
            position,
            target: position + Vec3::new(0.0, 0.0, -1.0),
            world_up: Vec3::new(0.0, 1.0, 0.0),
            basis: CameraBasis {
                right: Vec3::new(1.0, 0.0, 0.0),
                up: Vec3::new(0.0, 1.0, 0.0),
                forward: Vec3::new(0.0, 0.0, -1.0),
            },
        }
    }

    pub fn view(&self) -> Mat4 {
        self.basis.view_matrix(self.position)
    }
}
