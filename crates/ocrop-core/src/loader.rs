use std::path::PathBuf;

use image::{DynamicImage, GenericImageView};
use ocrop_types::{ImageMetrics, Viewport};

use crate::source::{ImageSource, decode_data_uri};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error(
        "Could not load image from URL {url} ({reason}). This may be due to CORS restrictions. Try uploading the file directly instead."
    )]
    RemoteUnavailable { url: String, reason: String },
}

/// A decoded image together with the metrics it was laid out with
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub(crate) generation: u64,
    pub source: ImageSource,
    pub bitmap: DynamicImage,
    pub metrics: ImageMetrics,
}

impl LoadedImage {
    pub fn new(source: ImageSource, bitmap: DynamicImage, metrics: ImageMetrics) -> Self {
        Self {
            generation: 0,
            source,
            bitmap,
            metrics,
        }
    }

    /// Set by [`crate::Session::load`]; zero for images never loaded into a session
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Clone)]
pub struct ImageLoader {
    client: reqwest::Client,
    viewport: Viewport,
}

impl ImageLoader {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_client(reqwest::Client::new(), viewport)
    }

    pub fn with_client(client: reqwest::Client, viewport: Viewport) -> Self {
        Self { client, viewport }
    }

    /// Read the raw bytes behind `source` without decoding them
    pub async fn read(&self, source: &ImageSource) -> Result<Vec<u8>, LoadError> {
        match source {
            ImageSource::File(path) => tokio::fs::read(path).await.map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            }),
            ImageSource::Bytes(data) => Ok(data.clone()),
            ImageSource::DataUri(uri) => decode_data_uri(uri),
            ImageSource::Url(url) => self.fetch(url).await,
        }
    }

    /// Read and decode `source`, fitting it into the viewport.
    ///
    /// Files are read into memory once, so the returned image never has to
    /// touch the disk again.
    pub async fn load(&self, source: ImageSource) -> Result<LoadedImage, LoadError> {
        let data = self.read(&source).await?;

        let bitmap = match image::load_from_memory(&data) {
            Ok(bitmap) => bitmap,
            Err(e) => {
                tracing::warn!("Failed to decode image from {}: {}", source, e);
                return Err(match source {
                    ImageSource::Url(url) => LoadError::RemoteUnavailable {
                        url,
                        reason: e.to_string(),
                    },
                    _ => LoadError::Decode(e),
                });
            }
        };

        let (width, height) = bitmap.dimensions();
        let metrics = ImageMetrics::fit(width, height, self.viewport);
        tracing::info!(
            "Loaded image from {}: {}x{} displayed at {}x{}",
            source,
            width,
            height,
            metrics.displayed_width,
            metrics.displayed_height
        );

        let source = match source {
            ImageSource::File(_) => ImageSource::Bytes(data),
            other => other,
        };

        Ok(LoadedImage::new(source, bitmap, metrics))
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let unavailable = |e: reqwest::Error| LoadError::RemoteUnavailable {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(unavailable)?;

        let bytes = response.bytes().await.map_err(unavailable)?;
        Ok(bytes.to_vec())
    }
}
