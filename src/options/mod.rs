//! Per-source locomotion options with TOML preset support.
//!
//! Every source reads its settings from one section of [`Options`]. Options
//! serialize to/from TOML so a scene can ship control presets (e.g. a
//! "kiosk" preset with reverse gestures disabled).

mod drag;
mod joystick;
mod tap;

use std::path::Path;

pub use drag::DragOptions;
pub use joystick::JoystickOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use tap::TapOptions;

use crate::error::LocomoteError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[joystick]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Drag-to-walk source.
    pub drag: DragOptions,
    /// Tap-and-hold source.
    pub tap: TapOptions,
    /// Joystick source and yaw synchronizer.
    pub joystick: JoystickOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`LocomoteError::Io`] if the file cannot be read, or
    /// [`LocomoteError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, LocomoteError> {
        let content =
            std::fs::read_to_string(path).map_err(LocomoteError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`LocomoteError::OptionsParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, LocomoteError> {
        toml::from_str(content)
            .map_err(|e| LocomoteError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`LocomoteError::Io`] if the file or its directory cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), LocomoteError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LocomoteError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(LocomoteError::Io)?;
        }
        std::fs::write(path, content).map_err(LocomoteError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn defaults_match_host_schema() {
        let opts = Options::default();
        assert!(opts.drag.enabled);
        assert!(opts.drag.reverse_enabled);
        assert!(opts.tap.reverse_enabled);
        assert_eq!(opts.joystick.rotation_sensitivity, 0.01);
        assert_eq!(opts.joystick.camera_selector, "#camera");
        assert_eq!(opts.joystick.axis_name, "joystick");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[tap]
reverse_enabled = false
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert!(!opts.tap.reverse_enabled);
        // Everything else should be default
        assert!(opts.tap.enabled);
        assert_eq!(opts.drag, DragOptions::default());
        assert_eq!(opts.joystick, JoystickOptions::default());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Options::from_toml("[joystick]\nenabled = 3").unwrap_err();
        assert!(matches!(err, LocomoteError::OptionsParse(_)));
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("locomote-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.joystick.rotation_sensitivity = 0.05;
        opts.save(&dir.join("kiosk.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let loaded = Options::load(&dir.join("kiosk.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["kiosk".to_owned()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn shipped_presets_parse() {
        let kiosk =
            Options::from_toml(include_str!("../../presets/kiosk.toml")).unwrap();
        assert!(!kiosk.drag.reverse_enabled);
        assert!(!kiosk.tap.reverse_enabled);
        assert!(kiosk.joystick.enabled);

        let gamepad =
            Options::from_toml(include_str!("../../presets/gamepad.toml"))
                .unwrap();
        assert!(!gamepad.drag.enabled);
        assert_eq!(gamepad.joystick.axis_name, "gamepad-left");
        assert_eq!(gamepad.joystick.camera_selector, "#camera");
    }

    #[test]
    fn missing_preset_is_an_io_error() {
        let err = Options::load(Path::new("/nonexistent/locomote.toml"))
            .unwrap_err();
        assert!(matches!(err, LocomoteError::Io(_)));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("drag"));
        assert!(props.contains_key("tap"));
        assert!(props.contains_key("joystick"));

        // Host wiring fields are not exposed to the UI
        let joystick = &props["joystick"]["properties"];
        assert!(joystick.get("rotation_sensitivity").is_some());
        assert!(joystick.get("camera_selector").is_none());
        assert!(joystick.get("axis_name").is_none());
    }
}
