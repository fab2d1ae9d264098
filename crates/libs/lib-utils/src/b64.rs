//! # Base64 Encoding/Decoding
//!
//! Standard-alphabet base64, the encoding embedded wallets use for
//! signatures.

use base64::{engine::general_purpose, Engine as _};

/// Encode bytes to a padded base64 string.
pub fn b64_encode(content: impl AsRef<[u8]>) -> String {
    general_purpose::STANDARD.encode(content)
}

/// Decode a padded base64 string to bytes.
pub fn b64_decode(b64: &str) -> Result<Vec<u8>, Error> {
    general_purpose::STANDARD
        .decode(b64)
        .map_err(|_| Error::FailToB64Decode)
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    FailToB64Decode,
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_b64_encode_known_value() {
        assert_eq!(b64_encode(b"nodara"), "bm9kYXJh");
        assert_eq!(b64_encode([0u8, 1, 2]), "AAEC");
    }

    #[test]
    fn test_b64_decode_rejects_garbage() {
        assert!(b64_decode("not base64!").is_err());
        assert_eq!(b64_decode("AAEC").unwrap(), vec![0, 1, 2]);
    }
}
