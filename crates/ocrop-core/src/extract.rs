use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageEncoder, RgbImage};
use ocrop_types::{Payload, PixelRect};

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Selection does not resolve to a pixel rectangle")]
    InvalidSelection,

    #[error("Crop region is empty after clamping: {0:?}")]
    EmptyRegion(PixelRect),

    #[error("Encoder failed: {0}")]
    Encode(String),
}

/// Whole-pixel crop window inside the image bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropWindow {
    /// Truncate `rect` to whole pixels, then clamp it to `bounds`.
    ///
    /// Edges are `trunc(x)` and `trunc(x) + trunc(width)`, so a fractional
    /// remainder is always dropped. Returns `None` for an empty window.
    pub fn from_rect(rect: &PixelRect, bounds: (u32, u32)) -> Option<Self> {
        let (x, width) = clamp_span(rect.x, rect.width, bounds.0);
        let (y, height) = clamp_span(rect.y, rect.height, bounds.1);

        if width == 0 || height == 0 {
            return None;
        }

        Some(Self {
            x,
            y,
            width,
            height,
        })
    }
}

fn clamp_span(start: f64, len: f64, limit: u32) -> (u32, u32) {
    if !start.is_finite() || !len.is_finite() {
        return (0, 0);
    }

    let limit = limit as f64;
    let start = start.trunc();
    let end = start + len.trunc();

    let lo = start.clamp(0.0, limit);
    let hi = end.clamp(0.0, limit);

    (lo as u32, (hi - lo).max(0.0) as u32)
}

/// Encodes a rendered crop into a compressed raster
pub trait RasterEncoder: Send + Sync {
    fn encode(&self, surface: &RgbImage) -> Result<Vec<u8>, ExtractError>;
}

#[derive(Debug, Clone, Copy)]
pub struct JpegRasterEncoder {
    quality: u8,
}

impl JpegRasterEncoder {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

impl Default for JpegRasterEncoder {
    fn default() -> Self {
        Self::new(92)
    }
}

impl RasterEncoder for JpegRasterEncoder {
    fn encode(&self, surface: &RgbImage) -> Result<Vec<u8>, ExtractError> {
        let mut buffer = Vec::new();
        JpegEncoder::new_with_quality(&mut buffer, self.quality)
            .write_image(
                surface.as_raw(),
                surface.width(),
                surface.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| ExtractError::Encode(e.to_string()))?;
        Ok(buffer)
    }
}

/// Renders a sub-region of a bitmap into a standalone payload
pub struct RegionExtractor<E = JpegRasterEncoder> {
    encoder: E,
}

impl<E: RasterEncoder> RegionExtractor<E> {
    pub fn new(encoder: E) -> Self {
        Self { encoder }
    }

    pub fn extract(&self, bitmap: &DynamicImage, rect: &PixelRect) -> Result<Payload, ExtractError> {
        let window = CropWindow::from_rect(rect, bitmap.dimensions())
            .ok_or(ExtractError::EmptyRegion(*rect))?;

        // Dropped at the end of this call
        let surface = bitmap
            .crop_imm(window.x, window.y, window.width, window.height)
            .to_rgb8();

        let data = self.encoder.encode(&surface)?;
        if data.is_empty() {
            return Err(ExtractError::Encode("encoder produced no data".to_string()));
        }

        tracing::debug!(?window, bytes = data.len(), "extracted crop");
        Ok(Payload::cropped(data))
    }
}

impl Default for RegionExtractor<JpegRasterEncoder> {
    fn default() -> Self {
        Self::new(JpegRasterEncoder::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb};

    fn rect(x: f64, y: f64, width: f64, height: f64) -> PixelRect {
        PixelRect {
            x,
            y,
            width,
            height,
        }
    }

    fn bitmap() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(80, 60, |x, _| {
            if x < 40 { Rgb([255, 255, 255]) } else { Rgb([0, 0, 0]) }
        }))
    }

    struct EmptyEncoder;

    impl RasterEncoder for EmptyEncoder {
        fn encode(&self, _surface: &RgbImage) -> Result<Vec<u8>, ExtractError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_window_truncates_fractions() {
        let window = CropWindow::from_rect(&rect(10.7, 5.2, 20.9, 10.99), (80, 60)).unwrap();
        assert_eq!(
            window,
            CropWindow {
                x: 10,
                y: 5,
                width: 20,
                height: 10
            }
        );
    }

    #[test]
    fn test_window_clamps_to_bounds() {
        let window = CropWindow::from_rect(&rect(70.0, -10.0, 30.0, 30.0), (80, 60)).unwrap();
        assert_eq!(
            window,
            CropWindow {
                x: 70,
                y: 0,
                width: 10,
                height: 20
            }
        );
    }

    #[test]
    fn test_window_outside_image_is_empty() {
        assert!(CropWindow::from_rect(&rect(90.0, 0.0, 10.0, 10.0), (80, 60)).is_none());
        assert!(CropWindow::from_rect(&rect(0.0, 0.0, 0.6, 10.0), (80, 60)).is_none());
        assert!(CropWindow::from_rect(&rect(f64::NAN, 0.0, 10.0, 10.0), (80, 60)).is_none());
    }

    #[test]
    fn test_extract_encodes_cropped_jpeg() {
        let extractor = RegionExtractor::default();
        let payload = extractor.extract(&bitmap(), &rect(30.0, 10.0, 20.0, 15.0)).unwrap();

        assert_eq!(payload.file_name, "cropped.jpg");
        assert_eq!(payload.mime_type, "image/jpeg");

        let decoded = image::load_from_memory(&payload.data).unwrap();
        assert_eq!(decoded.dimensions(), (20, 15));
    }

    #[test]
    fn test_extract_empty_region_fails() {
        let extractor = RegionExtractor::default();
        let result = extractor.extract(&bitmap(), &rect(100.0, 100.0, 20.0, 15.0));
        assert!(matches!(result, Err(ExtractError::EmptyRegion(_))));
    }

    #[test]
    fn test_extract_empty_encoding_fails() {
        let extractor = RegionExtractor::new(EmptyEncoder);
        let result = extractor.extract(&bitmap(), &rect(0.0, 0.0, 20.0, 15.0));
        assert!(matches!(result, Err(ExtractError::Encode(_))));
    }
}
