//! Externally owned camera and look-controls collaborators.
//!
//! The synchronizer never owns the camera. It resolves one by selector each
//! tick through a [`CameraResolver`], writes a pure-yaw rotation onto it, and
//! mirrors yaw into the camera's look controls when the camera offers them.

use glam::Vec3;
use rustc_hash::FxHashMap;

/// Optional capability: an orientation owner that exposes yaw and pitch.
///
/// Look-controls implementations (mouse look, head tracking) implement this
/// so that joystick turning and their own turning observe one shared yaw.
pub trait OrientationMirror {
    /// Current yaw in radians.
    fn yaw(&self) -> f32;
    /// Overwrite yaw in radians.
    fn set_yaw(&mut self, yaw: f32);
    /// Current pitch in radians.
    fn pitch(&self) -> f32;
}

/// A camera element in the host scene.
pub trait SceneCamera {
    /// World rotation as XYZ Euler angles in radians.
    fn rotation(&self) -> Vec3;
    /// Overwrite the world rotation.
    fn set_rotation(&mut self, rotation: Vec3);
    /// Look controls attached to this camera, if any are ready to use.
    fn look_controls(&mut self) -> Option<&mut dyn OrientationMirror>;
}

/// Looks up camera elements by selector.
pub trait CameraResolver {
    /// Camera matching `selector`, if one exists right now.
    fn resolve(&mut self, selector: &str) -> Option<&mut dyn SceneCamera>;
}

/// Minimal look-controls component.
///
/// A component can be attached before it has built its yaw/pitch objects;
/// until [`LookControls::initialize`] runs it does not act as a mirror.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LookControls {
    yaw: f32,
    pitch: f32,
    initialized: bool,
}

impl LookControls {
    /// Ready look controls with the given orientation.
    #[must_use]
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch,
            initialized: true,
        }
    }

    /// Attached but not yet initialized.
    #[must_use]
    pub fn uninitialized() -> Self {
        Self::default()
    }

    /// Build the yaw/pitch objects.
    pub fn initialize(&mut self, yaw: f32, pitch: f32) {
        *self = Self::new(yaw, pitch);
    }

    /// Whether the yaw/pitch objects exist.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Turn by `delta` radians, as the component's own input would.
    pub fn turn(&mut self, delta: f32) {
        self.yaw += delta;
    }
}

impl OrientationMirror for LookControls {
    fn yaw(&self) -> f32 {
        self.yaw
    }

    fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    fn pitch(&self) -> f32 {
        self.pitch
    }
}

/// In-crate camera element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraRig {
    /// World rotation, Euler XYZ radians.
    pub rotation: Vec3,
    /// Attached look-controls component.
    pub look_controls: Option<LookControls>,
}

impl CameraRig {
    /// Camera without look controls.
    #[must_use]
    pub fn new(rotation: Vec3) -> Self {
        Self {
            rotation,
            look_controls: None,
        }
    }

    /// Attach look controls.
    #[must_use]
    pub fn with_look_controls(mut self, look_controls: LookControls) -> Self {
        self.look_controls = Some(look_controls);
        self
    }
}

impl SceneCamera for CameraRig {
    fn rotation(&self) -> Vec3 {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    fn look_controls(&mut self) -> Option<&mut dyn OrientationMirror> {
        match self.look_controls.as_mut() {
            Some(lc) if lc.is_initialized() => {
                let mirror: &mut dyn OrientationMirror = lc;
                Some(mirror)
            }
            _ => None,
        }
    }
}

/// Selector-keyed set of cameras.
#[derive(Debug, Clone, Default)]
pub struct CameraDirectory {
    cameras: FxHashMap<String, CameraRig>,
}

impl CameraDirectory {
    /// Empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `camera` under `selector`, replacing any previous one.
    pub fn insert(&mut self, selector: &str, camera: CameraRig) {
        let _ = self.cameras.insert(selector.to_owned(), camera);
    }

    /// Remove the camera under `selector`.
    pub fn remove(&mut self, selector: &str) -> Option<CameraRig> {
        self.cameras.remove(selector)
    }

    /// Camera under `selector`.
    #[must_use]
    pub fn get(&self, selector: &str) -> Option<&CameraRig> {
        self.cameras.get(selector)
    }

    /// Mutable camera under `selector`.
    pub fn get_mut(&mut self, selector: &str) -> Option<&mut CameraRig> {
        self.cameras.get_mut(selector)
    }
}

impl CameraResolver for CameraDirectory {
    fn resolve(&mut self, selector: &str) -> Option<&mut dyn SceneCamera> {
        let camera: &mut dyn SceneCamera = self.cameras.get_mut(selector)?;
        Some(camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninitialized_look_controls_are_not_a_mirror() {
        let mut camera =
            CameraRig::default().with_look_controls(LookControls::uninitialized());
        assert!(camera.look_controls().is_none());

        if let Some(lc) = camera.look_controls.as_mut() {
            lc.initialize(0.5, 0.1);
        }
        let mirror = camera.look_controls().unwrap();
        assert_eq!(mirror.yaw(), 0.5);
        assert_eq!(mirror.pitch(), 0.1);
    }

    #[test]
    fn directory_resolves_by_selector() {
        let mut cameras = CameraDirectory::new();
        cameras.insert("#camera", CameraRig::new(Vec3::ZERO));
        assert!(cameras.resolve("#missing").is_none());

        let camera = cameras.resolve("#camera").unwrap();
        camera.set_rotation(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(cameras.get("#camera").unwrap().rotation.y, 1.0);

        assert!(cameras.remove("#camera").is_some());
        assert!(cameras.resolve("#camera").is_none());
    }
}
