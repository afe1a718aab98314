use async_trait::async_trait;
use ocrop_config::recognition::RecognitionConfig;
use ocrop_types::Payload;
use reqwest::multipart::{Form, Part};

use crate::response::OcrResponse;

/// Recognition service interface
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Send one image and return the parsed service response
    async fn recognize(&self, payload: Payload) -> Result<OcrResponse, RecognizeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecognizeError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// OCR.space client, authenticated with a static `apikey` header
#[derive(Clone)]
pub struct OcrSpaceClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl OcrSpaceClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }

    pub fn from_config(config: &RecognitionConfig) -> Self {
        Self::new(config.endpoint.clone(), config.api_key.clone())
    }
}

#[async_trait]
impl Recognizer for OcrSpaceClient {
    async fn recognize(&self, payload: Payload) -> Result<OcrResponse, RecognizeError> {
        let Payload {
            data,
            file_name,
            mime_type,
        } = payload;

        let part = Part::bytes(data).file_name(file_name).mime_str(&mime_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Recognition service returned HTTP {}", status);
        }

        let body = response.bytes().await?;
        OcrResponse::from_slice(&body)
    }
}
