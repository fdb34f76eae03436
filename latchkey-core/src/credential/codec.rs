//! Payload encodings for structured secrets.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::error::KeychainError;

/// Converts values to and from the bytes stored as an item's payload.
pub trait Codec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode value: {0}")]
    Encode(String),

    #[error("failed to decode value: {0}")]
    Decode(String),
}

impl From<CodecError> for KeychainError {
    fn from(err: CodecError) -> Self {
        KeychainError::unexpected_data(err.to_string())
    }
}

/// JSON via `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Token {
        value: String,
        scopes: Vec<String>,
    }

    #[test]
    fn test_json_codec() {
        let token = Token {
            value: "x".to_string(),
            scopes: vec!["read".to_string()],
        };

        let bytes = JsonCodec.encode(&token).unwrap();
        assert_eq!(bytes, br#"{"value":"x","scopes":["read"]}"#);
        assert_eq!(JsonCodec.decode::<Token>(&bytes).unwrap(), token);
    }

    #[test]
    fn test_decode_failure_becomes_unexpected_data() {
        let err = JsonCodec.decode::<Token>(b"not json").unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));

        let err: KeychainError = err.into();
        assert!(matches!(err, KeychainError::UnexpectedData { .. }));
    }
}
