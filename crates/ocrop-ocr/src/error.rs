/// Failures surfaced to the caller of a submission
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("No image loaded")]
    NoImage,

    #[error("Image unavailable: {0}")]
    ImageUnavailable(String),

    #[error("No text found in the image")]
    NoTextFound,

    #[error("Error processing image: {0}")]
    ProcessingError(String),
}

/// Recognized text, possibly empty, or why there is none
pub type RecognitionResult = Result<String, SubmitError>;
