use glam::{Quat, Vec3};

/// First-person yaw/pitch hierarchy.
///
/// Pitch is nested under yaw: yaw turns about the world vertical axis and
/// carries the pitch axis with it, so changing yaw re-aims the pitch axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct YawPitchRig {
    /// Rotation about world Y, in radians.
    pub yaw: f32,
    /// Rotation about the yawed X axis, in radians.
    pub pitch: f32,
}

impl YawPitchRig {
    /// Rig with the given angles in radians.
    #[must_use]
    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Rig matching an entity rotation expressed in degrees (the host scene
    /// stores entity rotations in degrees; the rig works in radians).
    #[must_use]
    pub fn from_entity_rotation(degrees: Vec3) -> Self {
        Self {
            yaw: degrees.y.to_radians(),
            pitch: degrees.x.to_radians(),
        }
    }

    /// Yaw node rotation.
    #[must_use]
    pub fn yaw_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Combined orientation: yaw applied after pitch.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        self.yaw_rotation() * Quat::from_rotation_x(self.pitch)
    }

    /// World-space axis pitch rotates about.
    #[must_use]
    pub fn pitch_axis(&self) -> Vec3 {
        self.yaw_rotation() * Vec3::X
    }

    /// World-space view direction (-Z is forward).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn initialized_from_degrees() {
        let rig = YawPitchRig::from_entity_rotation(Vec3::new(90.0, 180.0, 0.0));
        assert!((rig.pitch - FRAC_PI_2).abs() < 1e-6);
        assert!((rig.yaw - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn yaw_reorients_pitch_axis() {
        let rig = YawPitchRig::new(FRAC_PI_2, 0.0);
        assert!(approx(rig.pitch_axis(), Vec3::NEG_Z));
        assert!(approx(YawPitchRig::default().pitch_axis(), Vec3::X));
    }

    #[test]
    fn forward_follows_yaw_then_pitch() {
        assert!(approx(YawPitchRig::default().forward(), Vec3::NEG_Z));
        // Quarter turn left looks down -X
        assert!(approx(YawPitchRig::new(FRAC_PI_2, 0.0).forward(), Vec3::NEG_X));
        // Pitch up looks at +Y regardless of yaw
        assert!(approx(YawPitchRig::new(1.0, FRAC_PI_2).forward(), Vec3::Y));
    }
}
