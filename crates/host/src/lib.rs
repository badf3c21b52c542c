//! The host capability seam.
//!
//! [`HostEndpoint`] is the single handle through which the UI side reaches the
//! embedding host. It is injected into the bridge rather than read from a
//! process-wide global, so embedders wire in their real transport and tests
//! substitute a double. [`NoopHostEndpoint`] stands in when no host is
//! installed and reports the missing-binding condition on every call.

use {async_trait::async_trait, nimbridge_protocol::CallFrame, tracing::warn};

/// Error type returned by host entry points.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The well-known global object carrying the host entry points does not
    /// exist in this process.
    #[error("host binding `{binding}` is not installed")]
    MissingBinding { binding: String },

    /// The host accepted the dispatch but failed to carry it out.
    #[error("{message}")]
    Failure { message: String },
}

impl HostError {
    #[must_use]
    pub fn missing_binding(binding: impl Into<String>) -> Self {
        Self::MissingBinding {
            binding: binding.into(),
        }
    }

    #[must_use]
    pub fn failure(message: impl std::fmt::Display) -> Self {
        Self::Failure {
            message: message.to_string(),
        }
    }
}

impl From<String> for HostError {
    fn from(value: String) -> Self {
        Self::failure(value)
    }
}

impl From<&str> for HostError {
    fn from(value: &str) -> Self {
        Self::failure(value)
    }
}

pub type HostResult<T = ()> = Result<T, HostError>;

// ── HostEndpoint ─────────────────────────────────────────────────────────────

/// The two entry points the host exposes on its well-known global object.
///
/// Both are dispatch-only: a successful return means the host accepted the
/// call, not that the requested operation finished. Responses to `call`
/// arrive later through the bridge's responder, at a time and on a schedule
/// entirely controlled by the host.
#[async_trait]
pub trait HostEndpoint: Send + Sync {
    /// Name of the global object this endpoint stands for.
    fn binding(&self) -> &str {
        nimbridge_protocol::DEFAULT_BINDING
    }

    /// Surface a message to the user through the host. Side effect only.
    async fn alert(&self, message: &str) -> HostResult;

    /// Hand a call frame to the host for out-of-band processing.
    async fn call(&self, frame: CallFrame) -> HostResult;
}

// ── NoopHostEndpoint ─────────────────────────────────────────────────────────

/// Stand-in endpoint used when no host has been wired up.
pub struct NoopHostEndpoint;

#[async_trait]
impl HostEndpoint for NoopHostEndpoint {
    async fn alert(&self, message: &str) -> HostResult {
        warn!(message, "alert dropped: no host endpoint installed");
        Err(HostError::missing_binding(self.binding()))
    }

    async fn call(&self, frame: CallFrame) -> HostResult {
        warn!(
            request = %frame.request,
            response_key = %frame.response_key,
            "call dropped: no host endpoint installed"
        );
        Err(HostError::missing_binding(self.binding()))
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use {super::*, nimbridge_protocol::ResponseKey};

    fn frame() -> CallFrame {
        CallFrame::new(
            "noop",
            serde_json::Value::Null,
            serde_json::Value::Null,
            serde_json::Value::Null,
            ResponseKey::new("k"),
        )
    }

    #[tokio::test]
    async fn noop_alert_reports_missing_binding() {
        let err = NoopHostEndpoint.alert("hi").await.unwrap_err();
        assert!(matches!(err, HostError::MissingBinding { binding } if binding == "nimUi"));
    }

    #[tokio::test]
    async fn noop_call_reports_missing_binding() {
        let err = NoopHostEndpoint.call(frame()).await.unwrap_err();
        assert!(matches!(err, HostError::MissingBinding { .. }));
    }
}
