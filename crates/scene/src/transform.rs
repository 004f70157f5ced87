use math::{
    vec::Vec3,
    mat::Mat4,
};

use crate::error::TransformError;

/// Substituted for a zero rotation axis by [`Transform::compose_or_default`].
pub const DEFAULT_AXIS: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

/// Model transform inputs for one object. Composed every frame; mutated only
/// between frames by input events.
#[derive(Debug, Copy, Clone)]
pub struct Transform {
    pub translation: Vec3,
    pub scale: Vec3,
    pub angle_degrees: f32,
    pub axis: Vec3,
}

impl Transform {
    pub fn new() -> Transform {
        Transform {
            translation: Vec3::from_scalar(0.0),
            scale: Vec3::from_scalar(1.0),
            angle_degrees: 0.0,
            axis: DEFAULT_AXIS,
        }
    }

    /// Composes the model matrix as `M = T * S * R`: a vertex is rotated,
    /// then scaled, then translated. The order matters for non-uniform
    /// scale and must not change.
    ///
    /// A zero rotation axis cannot be normalized and is refused rather than
    /// silently producing NaN.
    pub fn compose(&self) -> Result<Mat4, TransformError> {
        if self.axis.length2() == 0.0 {
            return Err(TransformError::InvalidAxis);
        }

        let rotation = Mat4::rotation(self.axis.normalized(),
                                      self.angle_degrees.to_radians());

        Ok(Mat4::translation(self.translation)
            * Mat4::scale3(self.scale)
            * rotation)
    }

    /// Like [`Transform::compose`], but substitutes [`DEFAULT_AXIS`] for a
    /// zero rotation axis and logs the substitution.
    pub fn compose_or_default(&self) -> Mat4 {
        match self.compose() {
            Ok(m) => m,
            Err(TransformError::InvalidAxis) => {
                log::warn!("zero rotation axis, substituting {DEFAULT_AXIS}");
                let patched = Transform { axis: DEFAULT_AXIS, ..*self };
                // The substituted axis is unit length; this cannot fail.
                patched.compose_or_default()
            }
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use math::vec::Vec4;

    #[test]
    fn identity_inputs_give_a_pure_translation() {
        let t = Transform {
            translation: Vec3::new(3.0, -1.0, 2.0),
            ..Transform::new()
        };
        let m = t.compose().unwrap();

        let mut expected = Mat4::identity();
        expected.e[3][0] = 3.0;
        expected.e[3][1] = -1.0;
        expected.e[3][2] = 2.0;

        for j in 0..4 {
            for i in 0..4 {
                assert!((m.e[j][i] - expected.e[j][i]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn rotation_applies_before_scale() {
        // Quarter turn about Z maps +X onto +Y, then Y scales by 3.
        // Scaling first would leave the X axis untouched and give (0, 1, 0).
        let t = Transform {
            translation: Vec3::from_scalar(0.0),
            scale: Vec3::new(1.0, 3.0, 1.0),
            angle_degrees: 90.0,
            axis: Vec3::new(0.0, 0.0, 1.0),
        };
        let m = t.compose().unwrap();
        let v = m * Vec4::new(1.0, 0.0, 0.0, 1.0);

        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 3.0).abs() < 1e-5);
        assert!(v.z.abs() < 1e-5);
    }

    #[test]
    fn zero_axis_is_refused() {
        let t = Transform {
            axis: Vec3::from_scalar(0.0),
            angle_degrees: 45.0,
            ..Transform::new()
        };
        assert!(matches!(t.compose(), Err(TransformError::InvalidAxis)));
    }

    #[test]
    fn zero_axis_substitution_is_deterministic() {
        let t = Transform {
            axis: Vec3::from_scalar(0.0),
            angle_degrees: 45.0,
            ..Transform::new()
        };
        let substituted = t.compose_or_default();
        let explicit = Transform { axis: DEFAULT_AXIS, ..t }
            .compose()
            .unwrap();

        for j in 0..4 {
            for i in 0..4 {
                let a = substituted.e[j][i];
                assert!(a.is_finite());
                assert!((a - explicit.e[j][i]).abs() < 1e-6);
            }
        }
    }
}
