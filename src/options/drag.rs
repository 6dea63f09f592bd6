use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Drag", inline)]
#[serde(default)]
/// Touch/mouse drag-to-walk source settings.
pub struct DragOptions {
    /// Master gate for the source.
    #[schemars(title = "Enabled")]
    pub enabled: bool,
    /// Whether a two-finger press starts walking backward. Dragging down
    /// walks backward regardless.
    #[schemars(title = "Allow Reverse")]
    pub reverse_enabled: bool,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            reverse_enabled: true,
        }
    }
}
