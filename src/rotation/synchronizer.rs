//! Joystick-driven yaw, kept in step with an external look-controls owner.
//!
//! Each active tick:
//!
//! 1. resolve the camera; an unresolvable camera skips the tick,
//! 2. adopt the look controls' yaw as the starting yaw (they may have turned
//!    since the last tick),
//! 3. integrate `-x * sensitivity * dt / 1000` into yaw,
//! 4. write pure yaw onto the camera,
//! 5. mirror the new yaw back into the look controls.

use glam::{Vec2, Vec3};

use super::{camera::CameraResolver, rig::YawPitchRig};
use crate::options::JoystickOptions;

/// What a rotation tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationOutcome {
    /// Rotation input was inactive; nothing changed.
    Idle,
    /// The camera could not be resolved; nothing changed.
    CameraMissing,
    /// Yaw was integrated and written to the camera.
    Rotated {
        /// New yaw in radians.
        yaw: f32,
        /// Whether look controls were found and updated.
        mirrored: bool,
    },
}

/// Integrates joystick X into yaw and writes it to the scene camera.
#[derive(Debug, Clone)]
pub struct RotationSynchronizer {
    rig: YawPitchRig,
    sensitivity: f32,
    camera_selector: String,
}

impl RotationSynchronizer {
    /// Synchronizer starting from the controlled entity's rotation, in
    /// degrees.
    #[must_use]
    pub fn new(options: &JoystickOptions, entity_rotation: Vec3) -> Self {
        Self {
            rig: YawPitchRig::from_entity_rotation(entity_rotation),
            sensitivity: options.rotation_sensitivity,
            camera_selector: options.camera_selector.clone(),
        }
    }

    /// Locally tracked orientation.
    #[must_use]
    pub fn rig(&self) -> &YawPitchRig {
        &self.rig
    }

    /// Locally tracked yaw in radians.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.rig.yaw
    }

    /// Selector of the driven camera.
    #[must_use]
    pub fn camera_selector(&self) -> &str {
        &self.camera_selector
    }

    /// Advance by `dt_ms` milliseconds.
    ///
    /// `input` is the joystick X sample when rotation is active this tick,
    /// `None` otherwise. Missing collaborators never raise: a missing camera
    /// is reported as [`RotationOutcome::CameraMissing`] and leaves all
    /// state untouched.
    pub fn tick(
        &mut self,
        dt_ms: f32,
        input: Option<f32>,
        cameras: &mut dyn CameraResolver,
    ) -> RotationOutcome {
        let Some(x) = input else {
            return RotationOutcome::Idle;
        };
        let Some(camera) = cameras.resolve(&self.camera_selector) else {
            log::debug!(
                "camera '{}' not found, skipping rotation",
                self.camera_selector
            );
            return RotationOutcome::CameraMissing;
        };

        let mirrored = match camera.look_controls() {
            Some(look) => {
                self.rig.yaw = look.yaw();
                true
            }
            None => false,
        };

        // Only horizontal look is driven; Y stays zero.
        let look = Vec2::new(x, 0.0) * (self.sensitivity * dt_ms / 1000.0);
        self.rig.yaw -= look.x;

        camera.set_rotation(Vec3::new(0.0, self.rig.yaw, 0.0));
        if mirrored {
            if let Some(look_controls) = camera.look_controls() {
                look_controls.set_yaw(self.rig.yaw);
            }
        }

        RotationOutcome::Rotated {
            yaw: self.rig.yaw,
            mirrored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::camera::{
        CameraDirectory, CameraRig, LookControls, OrientationMirror,
    };

    const TOLERANCE: f32 = 1e-6;

    fn directory(camera: CameraRig) -> CameraDirectory {
        let mut cameras = CameraDirectory::new();
        cameras.insert("#camera", camera);
        cameras
    }

    fn synchronizer() -> RotationSynchronizer {
        RotationSynchronizer::new(&JoystickOptions::default(), Vec3::ZERO)
    }

    #[test]
    fn inactive_tick_changes_nothing() {
        let mut sync = synchronizer();
        let mut cameras = directory(
            CameraRig::new(Vec3::new(0.3, 0.2, 0.1))
                .with_look_controls(LookControls::new(0.7, 0.0)),
        );

        assert_eq!(sync.tick(16.0, None, &mut cameras), RotationOutcome::Idle);
        assert_eq!(sync.yaw(), 0.0);
        let camera = cameras.get("#camera").unwrap();
        assert_eq!(camera.rotation, Vec3::new(0.3, 0.2, 0.1));
        assert_eq!(camera.look_controls.unwrap().yaw(), 0.7);
    }

    #[test]
    fn active_tick_integrates_over_elapsed_time() {
        let mut sync = synchronizer();
        let mut cameras = directory(CameraRig::default());

        let outcome = sync.tick(16.0, Some(30.0), &mut cameras);
        assert!((sync.yaw() + 0.0048).abs() < TOLERANCE);
        assert_eq!(
            outcome,
            RotationOutcome::Rotated {
                yaw: sync.yaw(),
                mirrored: false
            }
        );
        let rotation = cameras.get("#camera").unwrap().rotation;
        assert_eq!(rotation, Vec3::new(0.0, sync.yaw(), 0.0));
    }

    #[test]
    fn camera_rotation_is_pure_yaw() {
        let mut sync = synchronizer();
        let mut cameras = directory(CameraRig::new(Vec3::new(0.5, 0.0, 0.25)));
        let _ = sync.tick(16.0, Some(-40.0), &mut cameras);

        let rotation = cameras.get("#camera").unwrap().rotation;
        assert_eq!(rotation.x, 0.0);
        assert_eq!(rotation.z, 0.0);
        assert!(rotation.y > 0.0);
    }

    #[test]
    fn rate_is_frame_rate_independent() {
        let mut fast = synchronizer();
        let mut slow = synchronizer();
        let mut fast_cameras = directory(CameraRig::default());
        let mut slow_cameras = directory(CameraRig::default());

        for _ in 0..4 {
            let _ = fast.tick(8.0, Some(50.0), &mut fast_cameras);
        }
        let _ = slow.tick(32.0, Some(50.0), &mut slow_cameras);
        assert!((fast.yaw() - slow.yaw()).abs() < TOLERANCE);
    }

    #[test]
    fn look_controls_are_authoritative_and_mirrored() {
        let mut sync = synchronizer();
        let mut cameras = directory(
            CameraRig::default().with_look_controls(LookControls::new(1.0, 0.2)),
        );

        let outcome = sync.tick(16.0, Some(30.0), &mut cameras);
        assert!(matches!(outcome, RotationOutcome::Rotated { mirrored: true, .. }));
        assert!((sync.yaw() - (1.0 - 0.0048)).abs() < TOLERANCE);

        let camera = cameras.get("#camera").unwrap();
        let look = camera.look_controls.unwrap();
        assert_eq!(look.yaw(), sync.yaw());
        // Pitch is never touched
        assert_eq!(look.pitch(), 0.2);
    }

    #[test]
    fn external_turns_between_ticks_are_adopted() {
        let mut sync = synchronizer();
        let mut cameras = directory(
            CameraRig::default().with_look_controls(LookControls::new(0.0, 0.0)),
        );

        let _ = sync.tick(16.0, Some(30.0), &mut cameras);
        let after_first = sync.yaw();

        // Mouse look turns the camera between ticks.
        if let Some(look) = cameras
            .get_mut("#camera")
            .and_then(|camera| camera.look_controls.as_mut())
        {
            look.turn(0.5);
        }

        let _ = sync.tick(16.0, Some(30.0), &mut cameras);
        let expected = after_first + 0.5 - 0.0048;
        assert!((sync.yaw() - expected).abs() < TOLERANCE);
        let look = cameras.get("#camera").unwrap().look_controls.unwrap();
        assert!((look.yaw() - sync.yaw()).abs() < TOLERANCE);
    }

    #[test]
    fn consecutive_ticks_do_not_drift() {
        let mut sync = synchronizer();
        let mut cameras = directory(
            CameraRig::default().with_look_controls(LookControls::new(0.0, 0.0)),
        );
        for _ in 0..2 {
            let _ = sync.tick(16.0, Some(30.0), &mut cameras);
            let look = cameras.get("#camera").unwrap().look_controls.unwrap();
            assert_eq!(look.yaw(), sync.yaw());
        }
        assert!((sync.yaw() + 2.0 * 0.0048).abs() < TOLERANCE);
    }

    #[test]
    fn uninitialized_look_controls_fall_back_to_local_yaw() {
        let mut sync = synchronizer();
        let mut cameras = directory(
            CameraRig::default().with_look_controls(LookControls::uninitialized()),
        );

        let outcome = sync.tick(16.0, Some(30.0), &mut cameras);
        assert!(matches!(
            outcome,
            RotationOutcome::Rotated { mirrored: false, .. }
        ));
        let look = cameras.get("#camera").unwrap().look_controls.unwrap();
        assert_eq!(look.yaw(), 0.0);
    }

    #[test]
    fn missing_camera_is_silent() {
        let mut sync = synchronizer();
        let mut cameras = CameraDirectory::new();
        assert_eq!(
            sync.tick(16.0, Some(30.0), &mut cameras),
            RotationOutcome::CameraMissing
        );
        assert_eq!(sync.yaw(), 0.0);
    }

    #[test]
    fn starts_from_entity_rotation() {
        let sync = RotationSynchronizer::new(
            &JoystickOptions::default(),
            Vec3::new(10.0, 90.0, 0.0),
        );
        assert!((sync.yaw() - std::f32::consts::FRAC_PI_2).abs() < TOLERANCE);
        assert!((sync.rig().pitch - 10f32.to_radians()).abs() < TOLERANCE);
        assert_eq!(sync.camera_selector(), "#camera");
    }
}
