mod client;
mod error;
mod response;
mod submit;

pub use client::{OcrSpaceClient, RecognizeError, Recognizer};
pub use error::{RecognitionResult, SubmitError};
pub use response::{OcrResponse, ParsedResult};
pub use submit::{Submission, SubmissionOrchestrator};
