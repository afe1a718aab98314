use serde::Deserialize;
use serde_json::Value;

use crate::client::RecognizeError;

/// OCR.space `parse/image` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OcrResponse {
    #[serde(rename = "ParsedResults", default)]
    pub parsed_results: Option<Vec<ParsedResult>>,
    #[serde(rename = "OCRExitCode", default)]
    pub exit_code: Option<Value>,
    #[serde(rename = "IsErroredOnProcessing", default)]
    pub is_errored_on_processing: Option<bool>,
    /// String or list of strings, depending on the failure
    #[serde(rename = "ErrorMessage", default)]
    pub error_message: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParsedResult {
    #[serde(rename = "ParsedText", default)]
    pub parsed_text: Option<String>,
    #[serde(rename = "FileParseExitCode", default)]
    pub exit_code: Option<Value>,
    #[serde(rename = "ErrorMessage", default)]
    pub error_message: Option<Value>,
}

impl OcrResponse {
    /// Parse a response body. Valid JSON that is not an object has no results.
    pub fn from_slice(body: &[u8]) -> Result<Self, RecognizeError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| RecognizeError::InvalidResponse(e.to_string()))?;

        if !value.is_object() {
            return Ok(Self::default());
        }

        serde_json::from_value(value).map_err(|e| RecognizeError::InvalidResponse(e.to_string()))
    }

    /// Text of the first parsed result. `None` means nothing was recognized;
    /// an entry without text counts as empty text.
    pub fn first_text(&self) -> Option<&str> {
        self.parsed_results
            .as_deref()?
            .first()
            .map(|result| result.parsed_text.as_deref().unwrap_or_default())
    }

    pub fn error_messages(&self) -> Vec<String> {
        match &self.error_message {
            Some(Value::String(message)) => vec![message.clone()],
            Some(Value::Array(messages)) => messages
                .iter()
                .filter_map(|m| m.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_text() {
        let response =
            OcrResponse::from_slice(br#"{"ParsedResults":[{"ParsedText":"hello\r\n"},{"ParsedText":"second"}]}"#)
                .unwrap();
        assert_eq!(response.first_text(), Some("hello\r\n"));
    }

    #[test]
    fn test_empty_text_is_a_result() {
        let response = OcrResponse::from_slice(br#"{"ParsedResults":[{"ParsedText":""}]}"#).unwrap();
        assert_eq!(response.first_text(), Some(""));

        let response = OcrResponse::from_slice(br#"{"ParsedResults":[{}]}"#).unwrap();
        assert_eq!(response.first_text(), Some(""));
    }

    #[test]
    fn test_no_results() {
        for body in [
            r#"{"ParsedResults":[]}"#,
            r#"{"ParsedResults":null}"#,
            r#"{"OCRExitCode":99}"#,
            r#""You may only perform this action upto maximum 10 number of times""#,
        ] {
            let response = OcrResponse::from_slice(body.as_bytes()).unwrap();
            assert_eq!(response.first_text(), None, "body: {body}");
        }
    }

    #[test]
    fn test_error_messages() {
        let response = OcrResponse::from_slice(
            br#"{"IsErroredOnProcessing":true,"ErrorMessage":["File failed validation.","E216"]}"#,
        )
        .unwrap();
        assert_eq!(response.is_errored_on_processing, Some(true));
        assert_eq!(response.error_messages(), vec!["File failed validation.", "E216"]);

        let response = OcrResponse::from_slice(br#"{"ErrorMessage":"Invalid API key"}"#).unwrap();
        assert_eq!(response.error_messages(), vec!["Invalid API key"]);
    }

    #[test]
    fn test_invalid_bodies() {
        assert!(matches!(
            OcrResponse::from_slice(b"<html>502 Bad Gateway</html>"),
            Err(RecognizeError::InvalidResponse(_))
        ));
        assert!(matches!(
            OcrResponse::from_slice(br#"{"ParsedResults":[null]}"#),
            Err(RecognizeError::InvalidResponse(_))
        ));
    }
}
