use serde::{Deserialize, Serialize};

/// Envelope returned by every API helper call.
///
/// A failed request never carries data: `data` is `None` and `error` holds
/// the message taken from the server body (or the transport error).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope around `data`.
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            success: true,
            message: None,
            error: None,
        }
    }

    /// Failed envelope with an error message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            data: None,
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }

    /// Unwrap the envelope into its payload.
    ///
    /// Fails when `success` is false, or when a successful response carried no
    /// data at all.
    pub fn into_result(self) -> Result<T, String> {
        if !self.success {
            return Err(self
                .error
                .unwrap_or_else(|| "API request failed".to_string()));
        }
        self.data
            .ok_or_else(|| "API response contained no data".to_string())
    }
}

/// Generic `{ "success": bool }` acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ack {
    pub success: bool,
}

/// Error body returned by the API on non-2xx status codes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}
