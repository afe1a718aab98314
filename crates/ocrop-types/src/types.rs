use serde::{Deserialize, Serialize};

/// Coordinate space a [`Selection`] is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionUnit {
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "px")]
    Pixel,
}

/// User-drawn crop rectangle, relative to the displayed image
///
/// Missing fields deserialize to `0.0`, which makes the selection unusable
/// rather than failing the parse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub unit: SelectionUnit,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl Selection {
    pub fn percent(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            unit: SelectionUnit::Percent,
            x,
            y,
            width,
            height,
        }
    }

    pub fn pixels(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            unit: SelectionUnit::Pixel,
            x,
            y,
            width,
            height,
        }
    }

    /// A selection is usable only with a positive, finite width and height
    pub fn is_usable(&self) -> bool {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        positive(self.width) && positive(self.height)
    }
}

impl Default for Selection {
    /// Half the image in each direction, centered
    fn default() -> Self {
        Self::percent(25.0, 25.0, 50.0, 50.0)
    }
}

/// Layout box an image is fitted into when displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            max_width: 800,
            max_height: 600,
        }
    }
}

/// Displayed and natural dimensions of a loaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetrics {
    pub displayed_width: u32,
    pub displayed_height: u32,
    pub natural_width: u32,
    pub natural_height: u32,
}

impl ImageMetrics {
    pub fn new(displayed: (u32, u32), natural: (u32, u32)) -> Self {
        Self {
            displayed_width: displayed.0,
            displayed_height: displayed.1,
            natural_width: natural.0,
            natural_height: natural.1,
        }
    }

    /// Scale the natural size down into `viewport`, keeping the aspect ratio.
    /// Images that already fit are displayed at natural size.
    pub fn fit(natural_width: u32, natural_height: u32, viewport: Viewport) -> Self {
        let ratio = f64::min(
            viewport.max_width as f64 / natural_width.max(1) as f64,
            viewport.max_height as f64 / natural_height.max(1) as f64,
        )
        .min(1.0);

        let scaled = |v: u32| ((v as f64 * ratio).round() as u32).max(1);

        Self::new(
            (scaled(natural_width), scaled(natural_height)),
            (natural_width, natural_height),
        )
    }

    pub fn scale_x(&self) -> f64 {
        self.natural_width as f64 / self.displayed_width as f64
    }

    pub fn scale_y(&self) -> f64 {
        self.natural_height as f64 / self.displayed_height as f64
    }

    /// False until the image has been laid out with a non-zero box
    pub fn is_laid_out(&self) -> bool {
        self.displayed_width > 0 && self.displayed_height > 0
    }
}

/// Rectangle in natural-image pixels, before rounding and clamping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Encoded image sent to the recognition service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub data: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

impl Payload {
    pub const CROPPED_FILE_NAME: &'static str = "cropped.jpg";
    pub const ORIGINAL_FILE_NAME: &'static str = "image.jpg";

    /// Cropped region encoded as JPEG
    pub fn cropped(data: Vec<u8>) -> Self {
        Self {
            data,
            file_name: Self::CROPPED_FILE_NAME.to_string(),
            mime_type: "image/jpeg".to_string(),
        }
    }

    /// Original image bytes, sent verbatim
    pub fn original(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            file_name: Self::ORIGINAL_FILE_NAME.to_string(),
            mime_type: mime_type.into(),
        }
    }

    pub fn is_cropped(&self) -> bool {
        self.file_name == Self::CROPPED_FILE_NAME
    }
}
