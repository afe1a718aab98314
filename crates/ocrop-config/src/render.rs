use ocrop_types::Viewport;
use serde::{Deserialize, Serialize};

/// Matches the browser canvas default of 0.92
fn default_jpeg_quality() -> u8 {
    92
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RenderConfig {
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    /// Box loaded images are fitted into for display
    #[serde(default)]
    pub viewport: Viewport,
}

impl RenderConfig {
    /// Clamp values the encoder and layout cannot use
    pub fn normalized(mut self) -> Self {
        self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        self.viewport.max_width = self.viewport.max_width.max(1);
        self.viewport.max_height = self.viewport.max_height.max(1);
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: default_jpeg_quality(),
            viewport: Viewport::default(),
        }
    }
}
