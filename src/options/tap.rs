use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Touch tap-and-hold source settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Tap", inline)]
#[serde(default)]
pub struct TapOptions {
    /// Master gate for the source.
    #[schemars(title = "Enabled")]
    pub enabled: bool,
    /// Whether a two-finger hold walks backwards.
    #[schemars(title = "Allow Reverse")]
    pub reverse_enabled: bool,
}

impl Default for TapOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            reverse_enabled: true,
        }
    }
}
