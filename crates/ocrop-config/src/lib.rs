use std::env;

use serde::{Deserialize, Serialize};

use self::recognition::RecognitionConfig;
use self::render::RenderConfig;

pub mod recognition;
pub mod render;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub recognition: RecognitionConfig,
    pub render: RenderConfig,
}

impl Config {
    /// Build config from environment variables, falling back to defaults
    pub fn new() -> Self {
        let mut recognition = RecognitionConfig::default();
        if let Ok(endpoint) = env::var("OCR_ENDPOINT") {
            recognition.endpoint = endpoint;
        }
        if let Ok(api_key) = env::var("OCR_API_KEY") {
            recognition.api_key = api_key;
        }

        let mut render = RenderConfig::default();
        if let Some(quality) = parse_var::<u8>("JPEG_QUALITY") {
            render.jpeg_quality = quality;
        }
        if let Some(width) = parse_var::<u32>("VIEWPORT_WIDTH") {
            render.viewport.max_width = width;
        }
        if let Some(height) = parse_var::<u32>("VIEWPORT_HEIGHT") {
            render.viewport.max_height = height;
        }

        Config {
            recognition,
            render: render.normalized(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
