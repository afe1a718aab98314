pub mod types;

pub use types::{ImageMetrics, Payload, PixelRect, Selection, SelectionUnit, Viewport};
