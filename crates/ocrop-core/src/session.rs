use ocrop_types::{ImageMetrics, Selection};

use crate::loader::LoadedImage;

/// Currently loaded image and crop selection.
///
/// The bitmap and its metrics always change together, and every load
/// starts over from the default selection.
#[derive(Debug, Default)]
pub struct Session {
    image: Option<LoadedImage>,
    selection: Option<Selection>,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current image, returning its generation
    pub fn load(&mut self, mut image: LoadedImage) -> u64 {
        self.generation += 1;
        image.generation = self.generation;

        self.image = Some(image);
        self.selection = Some(Selection::default());

        tracing::debug!(generation = self.generation, "session image replaced");
        self.generation
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn select(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    /// Record a new displayed size for the current image
    pub fn relayout(&mut self, displayed_width: u32, displayed_height: u32) -> bool {
        let Some(image) = self.image.as_mut() else {
            return false;
        };

        image.metrics = ImageMetrics::new(
            (displayed_width, displayed_height),
            (image.metrics.natural_width, image.metrics.natural_height),
        );
        true
    }

    /// Whether `generation` still refers to the loaded image
    pub fn is_current(&self, generation: u64) -> bool {
        self.image
            .as_ref()
            .is_some_and(|image| image.generation == generation)
    }

    pub fn clear(&mut self) {
        self.image = None;
        self.selection = None;
    }
}
