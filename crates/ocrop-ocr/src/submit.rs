use ocrop_config::Config;
use ocrop_core::{
    ExtractError, ImageLoader, JpegRasterEncoder, LoadedImage, RasterEncoder, RegionExtractor,
    Session, resolve, sniff_mime,
};
use ocrop_types::{Payload, Selection};

use crate::client::{OcrSpaceClient, Recognizer};
use crate::error::{RecognitionResult, SubmitError};

/// Result of submitting a session's image, tagged with the image generation
/// so callers can drop results for an image that has since been replaced.
#[derive(Debug)]
pub struct Submission {
    pub generation: Option<u64>,
    pub result: RecognitionResult,
}

/// Crops the selected region and sends it for recognition, falling back to
/// the whole image when cropping is not possible.
pub struct SubmissionOrchestrator<R, E = JpegRasterEncoder> {
    recognizer: R,
    extractor: RegionExtractor<E>,
    loader: ImageLoader,
}

impl SubmissionOrchestrator<OcrSpaceClient> {
    pub fn from_config(config: &Config, loader: ImageLoader) -> Self {
        Self::new(
            OcrSpaceClient::from_config(&config.recognition),
            RegionExtractor::new(JpegRasterEncoder::new(config.render.jpeg_quality)),
            loader,
        )
    }
}

impl<R: Recognizer, E: RasterEncoder> SubmissionOrchestrator<R, E> {
    pub fn new(recognizer: R, extractor: RegionExtractor<E>, loader: ImageLoader) -> Self {
        Self {
            recognizer,
            extractor,
            loader,
        }
    }

    /// Submit the session's current image and selection
    pub async fn submit_session(&self, session: &Session) -> Submission {
        let image = session.image();
        Submission {
            generation: image.map(LoadedImage::generation),
            result: self.submit(image, session.selection()).await,
        }
    }

    /// One recognition attempt, no retries
    pub async fn submit(
        &self,
        image: Option<&LoadedImage>,
        selection: Option<&Selection>,
    ) -> RecognitionResult {
        let Some(image) = image else {
            tracing::warn!("[SUBMIT] No image loaded");
            return Err(SubmitError::NoImage);
        };

        let selection = match selection {
            Some(selection) if selection.is_usable() => *selection,
            other => {
                tracing::debug!("[SUBMIT] Unusable selection {:?}, using default crop", other);
                Selection::default()
            }
        };

        let payload = match self.crop(image, &selection) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("[SUBMIT] Cropping failed ({}), using full image", e);
                self.original(image).await?
            }
        };

        tracing::info!(
            "[SUBMIT] Sending {} ({} bytes)",
            payload.file_name,
            payload.data.len()
        );

        let response = self.recognizer.recognize(payload).await.map_err(|e| {
            tracing::error!("[SUBMIT] Recognition failed: {}", e);
            SubmitError::ProcessingError(e.to_string())
        })?;

        for message in response.error_messages() {
            tracing::warn!("[SUBMIT] Service reported: {}", message);
        }

        match response.first_text() {
            Some(text) => {
                tracing::debug!("[SUBMIT] Got text: {} chars", text.len());
                Ok(text.to_string())
            }
            None => Err(SubmitError::NoTextFound),
        }
    }

    fn crop(&self, image: &LoadedImage, selection: &Selection) -> Result<Payload, ExtractError> {
        let rect = resolve(Some(selection), &image.metrics).ok_or(ExtractError::InvalidSelection)?;
        self.extractor.extract(&image.bitmap, &rect)
    }

    /// Re-read the original source and send it unchanged
    async fn original(&self, image: &LoadedImage) -> Result<Payload, SubmitError> {
        let data = self.loader.read(&image.source).await.map_err(|e| {
            tracing::error!("[SUBMIT] Original image unavailable: {}", e);
            SubmitError::ImageUnavailable(e.to_string())
        })?;

        if data.is_empty() {
            return Err(SubmitError::ImageUnavailable(
                "original image is empty".to_string(),
            ));
        }

        let mime_type = sniff_mime(&data);
        Ok(Payload::original(data, mime_type))
    }
}
