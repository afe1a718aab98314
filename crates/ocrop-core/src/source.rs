use std::fmt;
use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::loader::LoadError;

/// Where an image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Local file, read fully into memory when loaded
    File(PathBuf),
    /// Image bytes already in memory
    Bytes(Vec<u8>),
    /// `data:` URI, base64 or raw
    DataUri(String),
    /// Remote image, fetched without credentials
    Url(String),
}

impl ImageSource {
    /// Classify user input as a URL, a data URI or a file path
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let lower = input.to_ascii_lowercase();

        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(input.to_string())
        } else if lower.starts_with("data:") {
            Self::DataUri(input.to_string())
        } else {
            Self::File(PathBuf::from(input))
        }
    }

    /// Inline form suitable for display. Only in-memory sources have one.
    pub fn to_data_uri(&self) -> Option<String> {
        match self {
            Self::Bytes(data) => Some(format!(
                "data:{};base64,{}",
                sniff_mime(data),
                STANDARD.encode(data)
            )),
            Self::DataUri(uri) => Some(uri.clone()),
            Self::File(_) | Self::Url(_) => None,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Bytes(data) => write!(f, "{} bytes in memory", data.len()),
            Self::DataUri(uri) => write!(f, "data URI ({} chars)", uri.len()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Decode the payload of a `data:` URI
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, LoadError> {
    let rest = uri
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .map(|_| &uri[5..])
        .ok_or_else(|| LoadError::InvalidDataUri("missing data: scheme".to_string()))?;

    let (meta, data) = rest
        .split_once(',')
        .ok_or_else(|| LoadError::InvalidDataUri("missing ',' separator".to_string()))?;

    if meta.to_ascii_lowercase().ends_with(";base64") {
        STANDARD
            .decode(data.trim())
            .map_err(|e| LoadError::InvalidDataUri(e.to_string()))
    } else {
        Ok(data.as_bytes().to_vec())
    }
}

/// MIME type guessed from the image header
pub fn sniff_mime(data: &[u8]) -> &'static str {
    image::guess_format(data)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    #[test]
    fn test_parse_classifies_input() {
        assert_eq!(
            ImageSource::parse("https://example.com/a.png"),
            ImageSource::Url("https://example.com/a.png".to_string())
        );
        assert_eq!(
            ImageSource::parse(" data:image/png;base64,AAAA "),
            ImageSource::DataUri("data:image/png;base64,AAAA".to_string())
        );
        assert_eq!(
            ImageSource::parse("./scan.jpg"),
            ImageSource::File(PathBuf::from("./scan.jpg"))
        );
    }

    #[test]
    fn test_data_uri_round_trip() {
        let source = ImageSource::Bytes(PNG_MAGIC.to_vec());
        let uri = source.to_data_uri().unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(decode_data_uri(&uri).unwrap(), PNG_MAGIC);
    }

    #[test]
    fn test_plain_data_uri() {
        assert_eq!(decode_data_uri("data:text/plain,hello").unwrap(), b"hello");
    }

    #[test]
    fn test_invalid_data_uri() {
        assert!(matches!(
            decode_data_uri("image/png;base64,AAAA"),
            Err(LoadError::InvalidDataUri(_))
        ));
        assert!(matches!(
            decode_data_uri("data:image/png;base64"),
            Err(LoadError::InvalidDataUri(_))
        ));
        assert!(matches!(
            decode_data_uri("data:image/png;base64,@@@"),
            Err(LoadError::InvalidDataUri(_))
        ));
    }

    #[test]
    fn test_remote_sources_have_no_inline_form() {
        assert!(ImageSource::Url("https://example.com/a.png".into()).to_data_uri().is_none());
        assert!(ImageSource::parse("https://example.com/a.png").is_remote());
    }

    #[test]
    fn test_sniff_unknown_bytes() {
        assert_eq!(sniff_mime(b"not an image"), "application/octet-stream");
    }
}
