//! Host-bridge call contract.
//!
//! Frame types exchanged between the UI side and the embedding host:
//! - `CallFrame`     — UI → host call dispatch
//! - `ResponseFrame` — host → UI asynchronous completion
//!
//! Field names serialize in the camelCase form the host expects
//! (`inputValue`, `responseKey`, ...).

use {
    serde::{Deserialize, Serialize},
    serde_json::Value,
};

// ── Constants ────────────────────────────────────────────────────────────────

/// Name of the global object the host installs its entry points on.
pub const DEFAULT_BINDING: &str = "nimUi";

// ── Error codes ──────────────────────────────────────────────────────────────

pub mod error_codes {
    pub const MISSING_BINDING: &str = "MISSING_BINDING";
    pub const DUPLICATE_RESPONSE_KEY: &str = "DUPLICATE_RESPONSE_KEY";
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const HOST_FAILURE: &str = "HOST_FAILURE";
    pub const UNAVAILABLE: &str = "UNAVAILABLE";
}

// ── Response key ─────────────────────────────────────────────────────────────

/// Caller-supplied correlation token matching an eventual asynchronous
/// response to its originating call.
///
/// Uniqueness among in-flight calls is the caller's responsibility;
/// [`ResponseKey::generate`] is a convenience that satisfies it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseKey(String);

impl ResponseKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// A fresh random key.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResponseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResponseKey {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ResponseKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// ── Error shape ──────────────────────────────────────────────────────────────

/// Error payload the host attaches to a failed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorShape {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorShape {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

impl std::fmt::Display for ErrorShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

// ── Frames ───────────────────────────────────────────────────────────────────

/// UI → host call dispatch.
///
/// All fields are required; the host does not tolerate absent ones. The
/// payload fields are opaque to the bridge and forwarded unmodified. A frame
/// lives for the duration of one call — it is never stored, queued, or
/// retried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallFrame {
    /// Operation discriminator the host dispatches on.
    pub request: String,
    #[serde(rename = "inputValue")]
    pub input_value: Value,
    #[serde(rename = "outputValueObj")]
    pub output_value_obj: Value,
    #[serde(rename = "outputValueIndex")]
    pub output_value_index: Value,
    #[serde(rename = "responseKey")]
    pub response_key: ResponseKey,
}

impl CallFrame {
    pub fn new(
        request: impl Into<String>,
        input_value: Value,
        output_value_obj: Value,
        output_value_index: Value,
        response_key: ResponseKey,
    ) -> Self {
        Self {
            request: request.into(),
            input_value,
            output_value_obj,
            output_value_index,
            response_key,
        }
    }
}

/// Host → UI asynchronous completion, keyed by `responseKey`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFrame {
    #[serde(rename = "responseKey")]
    pub response_key: ResponseKey,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorShape>,
}

impl ResponseFrame {
    pub fn ok(response_key: impl Into<ResponseKey>, payload: Value) -> Self {
        Self {
            response_key: response_key.into(),
            ok: true,
            payload: Some(payload),
            error: None,
        }
    }

    pub fn err(response_key: impl Into<ResponseKey>, error: ErrorShape) -> Self {
        Self {
            response_key: response_key.into(),
            ok: false,
            payload: None,
            error: Some(error),
        }
    }

    /// Collapse the frame into the outcome a caller observes.
    ///
    /// An `ok: false` frame without an error shape still fails, with a
    /// generic host-failure code.
    pub fn into_result(self) -> Result<Value, ErrorShape> {
        if self.ok {
            Ok(self.payload.unwrap_or(Value::Null))
        } else {
            Err(self.error.unwrap_or_else(|| {
                ErrorShape::new(error_codes::HOST_FAILURE, "host reported failure")
            }))
        }
    }
}
