use serde::{Deserialize, Serialize};

fn default_endpoint() -> String {
    "https://api.ocr.space/parse/image".to_string()
}

/// Free OCR.space key
fn default_api_key() -> String {
    "helloworld".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Recognition service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Sent as the `apikey` header
    #[serde(default = "default_api_key")]
    pub api_key: String,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: default_api_key(),
        }
    }
}
