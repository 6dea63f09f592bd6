//! Joystick yaw control and its synchronization with the scene camera.

/// Camera, look-controls and selector lookup collaborators.
pub mod camera;
/// Yaw/pitch orientation hierarchy.
pub mod rig;
/// Per-tick yaw integration and mirroring.
pub mod synchronizer;

pub use camera::{
    CameraDirectory, CameraResolver, CameraRig, LookControls,
    OrientationMirror, SceneCamera,
};
pub use rig::YawPitchRig;
pub use synchronizer::{RotationOutcome, RotationSynchronizer};
