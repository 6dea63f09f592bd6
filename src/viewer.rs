//! Standalone input window backed by winit.
//!
//! The window renders nothing. It translates mouse, touch and keyboard input
//! into [`PointerEvent`]s and axis samples, feeds them to a
//! [`LocomotionRig`], and integrates the resulting velocity into a demo
//! position that is logged as it changes.
//!
//! Arrow keys (or WASD) act as the analog stick: up/down walk, left/right
//! turn. Dragging with the mouse or a finger walks as on a phone.
//!
//! ```no_run
//! # use locomote::Viewer;
//! Viewer::builder()
//!     .with_title("locomote")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{sync::Arc, time::Instant};

use glam::{Vec2, Vec3};
use rustc_hash::FxHashSet;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, Touch, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    axis::{AxisSample, SharedAxis},
    error::LocomoteError,
    input::{PointerEvent, PointerPhase, TouchList},
    options::Options,
    rig::{FrameIntent, LocomotionRig},
    rotation::{CameraDirectory, CameraRig, LookControls},
    surface::ListenerRegistry,
};

/// Axis units a held key deflects the virtual stick by.
const KEY_DEFLECTION: f32 = 50.0;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
    entity_rotation: Vec3,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: "locomote".into(),
            entity_rotation: Vec3::ZERO,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Starting rotation of the controlled entity, in degrees.
    #[must_use]
    pub fn with_entity_rotation(mut self, degrees: Vec3) -> Self {
        self.entity_rotation = degrees;
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
            entity_rotation: self.entity_rotation,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that drives a [`LocomotionRig`] from live input.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
    entity_rotation: Vec3,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// [`LocomoteError::Viewer`] if the event loop cannot be created or
    /// exits abnormally.
    pub fn run(self) -> Result<(), LocomoteError> {
        let event_loop = EventLoop::new()
            .map_err(|e| LocomoteError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let axis = SharedAxis::new();
        // The surface is the window, which only exists after `resumed`.
        let mut rig = LocomotionRig::new(
            &self.options,
            Box::new(axis.clone()),
            self.entity_rotation,
            ListenerRegistry::pending(),
        );
        rig.setup()?;

        let mut cameras = CameraDirectory::new();
        cameras.insert(
            &self.options.joystick.camera_selector,
            CameraRig::default()
                .with_look_controls(LookControls::new(rig.rotation().yaw(), 0.0)),
        );

        let mut app = ViewerApp {
            window: None,
            rig,
            axis,
            keys: HeldKeys::default(),
            touches: TouchTracker::default(),
            cameras,
            cursor: Vec2::ZERO,
            position: Vec3::ZERO,
            last_intent: FrameIntent::IDLE,
            clock: FrameClock::new(Instant::now()),
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| LocomoteError::Viewer(e.to_string()))
    }
}

// ── Input translation ────────────────────────────────────────────────────

/// Directions of the virtual stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum StickKey {
    Up,
    Down,
    Left,
    Right,
}

impl StickKey {
    fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::ArrowUp | KeyCode::KeyW => Some(Self::Up),
            KeyCode::ArrowDown | KeyCode::KeyS => Some(Self::Down),
            KeyCode::ArrowLeft | KeyCode::KeyA => Some(Self::Left),
            KeyCode::ArrowRight | KeyCode::KeyD => Some(Self::Right),
            _ => None,
        }
    }
}

/// Keys currently held that map onto the virtual stick.
#[derive(Debug, Default)]
struct HeldKeys {
    held: FxHashSet<StickKey>,
}

impl HeldKeys {
    /// Record a key change. Returns false for keys that are not stick keys.
    fn set(&mut self, code: KeyCode, pressed: bool) -> bool {
        let Some(key) = StickKey::from_code(code) else {
            return false;
        };
        if pressed {
            let _ = self.held.insert(key);
        } else {
            let _ = self.held.remove(&key);
        }
        true
    }

    /// Stick deflection for the held keys. Up is negative Y (forward).
    fn sample(&self) -> AxisSample {
        let axis = |neg: StickKey, pos: StickKey| {
            let held = |key: StickKey| f32::from(u8::from(self.held.contains(&key)));
            (held(pos) - held(neg)) * KEY_DEFLECTION
        };
        AxisSample::new(
            axis(StickKey::Left, StickKey::Right),
            axis(StickKey::Up, StickKey::Down),
        )
    }
}

/// Active touch points in the order they went down.
#[derive(Debug, Default)]
struct TouchTracker {
    points: Vec<(u64, Vec2)>,
}

impl TouchTracker {
    /// Apply a winit touch and produce the matching pointer event.
    fn update(&mut self, touch: &Touch) -> PointerEvent {
        let position =
            Vec2::new(touch.location.x as f32, touch.location.y as f32);
        let phase = PointerPhase::from(touch.phase);
        match phase {
            PointerPhase::Down => self.points.push((touch.id, position)),
            PointerPhase::Move => {
                if let Some(point) =
                    self.points.iter_mut().find(|(id, _)| *id == touch.id)
                {
                    point.1 = position;
                }
            }
            PointerPhase::Up => self.points.retain(|(id, _)| *id != touch.id),
        }

        let positions: Vec<Vec2> = self.points.iter().map(|p| p.1).collect();
        let touches = TouchList::from_points(&positions);
        match phase {
            PointerPhase::Down => PointerEvent::TouchStart { touches },
            PointerPhase::Move => PointerEvent::TouchMove { touches },
            PointerPhase::Up => PointerEvent::TouchEnd { touches },
        }
    }
}

/// Frame timing: host time since start and the delta since the last frame.
#[derive(Debug, Clone, Copy)]
struct FrameClock {
    started: Instant,
    last_frame: Instant,
}

impl FrameClock {
    fn new(now: Instant) -> Self {
        Self {
            started: now,
            last_frame: now,
        }
    }

    /// Forget the time elapsed since the last frame.
    fn restart(&mut self, now: Instant) {
        self.last_frame = now;
    }

    /// Milliseconds since start and seconds since the previous frame.
    fn advance(&mut self, now: Instant) -> (f64, f32) {
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        let time_ms = now.duration_since(self.started).as_secs_f64() * 1000.0;
        (time_ms, dt)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    rig: LocomotionRig,
    axis: SharedAxis,
    keys: HeldKeys,
    touches: TouchTracker,
    cameras: CameraDirectory,
    cursor: Vec2,
    position: Vec3,
    last_intent: FrameIntent,
    clock: FrameClock,
    title: String,
}

impl ViewerApp {
    fn dispatch(&mut self, event: &PointerEvent) {
        let _ = self.rig.handle_event(event);
    }

    fn frame(&mut self) {
        let (time_ms, dt) = self.clock.advance(Instant::now());
        let intent = self.rig.tick(time_ms, dt * 1000.0, &mut self.cameras);
        if intent.velocity != Vec3::ZERO {
            // Velocity is in the rig's local frame; face it along the yaw.
            let heading = self.rig.rotation().rig().yaw_rotation();
            self.position += heading * intent.velocity * dt;
        }

        let moving = intent.velocity != Vec3::ZERO;
        let was_moving = self.last_intent.velocity != Vec3::ZERO;
        if moving != was_moving {
            log::info!(
                "{} at ({:.2}, {:.2}, {:.2}), yaw {:.3}",
                if moving { "moving" } else { "stopped" },
                self.position.x,
                self.position.y,
                self.position.z,
                self.rig.rotation().yaw(),
            );
        }
        log::trace!("frame intent: {intent:?}");
        self.last_intent = intent;
    }

    fn set_focus(&mut self, focused: bool) {
        let result = if focused {
            self.rig.activate()
        } else {
            self.keys = HeldKeys::default();
            self.axis.clear();
            self.rig.deactivate()
        };
        if let Err(e) = result {
            log::warn!("focus change ignored: {e}");
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes().with_title(self.title.clone());
        match event_loop.create_window(attrs) {
            Ok(window) => {
                let window = Arc::new(window);
                window.request_redraw();
                self.window = Some(window);
                // Window creation time is not part of the first frame.
                self.clock.restart(Instant::now());
                self.rig.surface_ready();
                log::info!("window ready; drag, tap or use the arrow keys");
            }
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                if let Err(e) = self.rig.teardown() {
                    log::warn!("teardown failed: {e}");
                }
                event_loop.exit();
            }

            WindowEvent::Focused(focused) => self.set_focus(focused),

            WindowEvent::RedrawRequested => {
                self.frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                let position = self.cursor;
                let event = if state == ElementState::Pressed {
                    PointerEvent::MouseDown { position }
                } else {
                    PointerEvent::MouseUp { position }
                };
                self.dispatch(&event);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                let event = PointerEvent::MouseMove {
                    position: self.cursor,
                };
                self.dispatch(&event);
            }

            WindowEvent::Touch(touch) => {
                let event = self.touches.update(&touch);
                self.dispatch(&event);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    if self.keys.set(code, pressed) {
                        self.axis.publish(self.keys.sample());
                    }
                }
            }

            _ => (),
        }
    }
}
