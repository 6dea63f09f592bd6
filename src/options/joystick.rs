use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Joystick", inline)]
#[serde(default)]
/// Analog joystick source and yaw synchronization settings.
pub struct JoystickOptions {
    /// Master gate for the source.
    #[schemars(title = "Enabled")]
    pub enabled: bool,
    /// Yaw rate per raw axis unit per second.
    #[schemars(title = "Rotation Sensitivity", range(min = 0.001, max = 0.1), extend("step" = 0.001))]
    pub rotation_sensitivity: f32,
    /// Selector of the camera element whose rotation is driven.
    #[schemars(skip)]
    pub camera_selector: String,
    /// Name the host publishes the axis sample under.
    #[schemars(skip)]
    pub axis_name: String,
}

impl Default for JoystickOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            rotation_sensitivity: 0.01,
            camera_selector: "#camera".to_owned(),
            axis_name: "joystick".to_owned(),
        }
    }
}
