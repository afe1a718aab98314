pub mod extract;
pub mod geometry;
pub mod loader;
pub mod session;
pub mod source;

pub use extract::{CropWindow, ExtractError, JpegRasterEncoder, RasterEncoder, RegionExtractor};
pub use geometry::resolve;
pub use loader::{ImageLoader, LoadError, LoadedImage};
pub use session::Session;
pub use source::{ImageSource, sniff_mime};
