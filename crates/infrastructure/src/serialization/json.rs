//! JSON serialization helpers.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to pretty JSON with a trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize + ?Sized>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Same as [`to_json_stable`] but returns bytes for direct file writing.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable_bytes<T: Serialize + ?Sized>(
    value: &T,
) -> Result<Vec<u8>, SerializationError> {
    to_json_stable(value).map(String::into_bytes)
}

/// Deserializes JSON from a string.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Deserialize)
}

/// Deserializes JSON from bytes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use apitester_domain::{Collection, HttpMethod, RequestSpec, SavedRequest};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_output_format() {
        let json = to_json_stable(&Collection::new("empty").unwrap()).unwrap();
        assert_eq!(json, "{\n  \"name\": \"empty\",\n  \"requests\": []\n}\n");
    }

    #[test]
    fn test_saved_request_omits_empty_tests() {
        let saved = SavedRequest::from_spec(&RequestSpec::get("http://a"), Vec::new());
        let json = to_json_stable(&saved).unwrap();
        assert!(!json.contains("tests"));
        assert!(json.contains("\"method\": \"GET\""));
    }

    #[test]
    fn test_round_trip_from_bytes() {
        let mut collection = Collection::new("c").unwrap();
        collection.push(SavedRequest::from_spec(
            &RequestSpec::new(HttpMethod::Put, "http://a").with_param("page", "2"),
            vec!["status_code == 200".to_string()],
        ));
        let bytes = to_json_stable_bytes(&collection).unwrap();
        let back: Collection = from_json_bytes(&bytes).unwrap();
        assert_eq!(back, collection);
    }

    #[test]
    fn test_invalid_json() {
        let result: Result<Collection, _> = from_json("{");
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
