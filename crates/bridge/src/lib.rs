//! The UI-side host bridge.
//!
//! [`HostBridge`] is a stateless pass-through façade in front of an injected
//! [`HostEndpoint`]: `alert` coerces its argument to a string and forwards
//! it; [`HostBridge::call`] forwards a typed [`CallFrame`] and hands back a
//! single-shot [`Completion`] that resolves when the host delivers the
//! matching [`ResponseFrame`] through the bridge's [`Responder`].
//!
//! The bridge performs no validation, transformation, retry, or timeout of
//! its own. Host-side failures after a successful dispatch are invisible to
//! callers; the one failure the façade does surface is the missing-host-
//! binding condition, whose handling is configurable.

pub mod completion;
pub mod error;
mod pending;

use std::sync::Arc;

use {
    nimbridge_config::{MissingBindingPolicy, NimbridgeConfig},
    nimbridge_host::{HostEndpoint, HostError, NoopHostEndpoint},
    tracing::{debug, warn},
};

pub use {
    crate::completion::{CallOutcome, Completion},
    crate::error::{Context, Error, Result},
    nimbridge_protocol::{CallFrame, ErrorShape, ResponseFrame, ResponseKey},
};

use crate::pending::PendingCalls;

// ── HostBridge ───────────────────────────────────────────────────────────────

/// Façade translating in-process calls into invocations on the host endpoint.
#[derive(Clone)]
pub struct HostBridge {
    endpoint: Arc<dyn HostEndpoint>,
    pending: PendingCalls,
    on_missing: MissingBindingPolicy,
}

impl HostBridge {
    /// Bridge over the given endpoint with the default (strict)
    /// missing-binding policy.
    pub fn new(endpoint: Arc<dyn HostEndpoint>) -> Self {
        Self {
            endpoint,
            pending: PendingCalls::default(),
            on_missing: MissingBindingPolicy::default(),
        }
    }

    /// Bridge configured from a loaded [`NimbridgeConfig`].
    pub fn with_config(endpoint: Arc<dyn HostEndpoint>, config: &NimbridgeConfig) -> Self {
        Self {
            endpoint,
            pending: PendingCalls::default(),
            on_missing: config.host.on_missing_binding,
        }
    }

    /// Bridge with no host wired up. Every method reports the
    /// missing-host-binding condition.
    pub fn detached() -> Self {
        Self::new(Arc::new(NoopHostEndpoint))
    }

    /// Surface a message to the user through the host's alert entry point.
    ///
    /// The argument is coerced to a string before forwarding. Fire-and-forget:
    /// a host-side failure is logged, not returned. The only error callers
    /// see is the missing-host-binding condition under the strict policy.
    pub async fn alert(&self, message: impl std::fmt::Display) -> Result<()> {
        let text = message.to_string();
        match self.endpoint.alert(&text).await {
            Ok(()) => Ok(()),
            Err(HostError::MissingBinding { binding }) => self.missing_binding(binding),
            Err(e) => {
                warn!(error = %e, "host alert failed");
                Ok(())
            },
        }
    }

    /// Hand a call frame to the host and return the completion handle for its
    /// eventual response.
    ///
    /// Returns as soon as the host has accepted the dispatch — there is no
    /// blocking wait, no timeout, and no way to withdraw the call. Whether
    /// and when the [`Completion`] resolves is entirely up to the host.
    pub async fn call(&self, frame: CallFrame) -> Result<Completion> {
        let key = frame.response_key.clone();
        let completion = self.pending.register(&key)?;

        debug!(request = %frame.request, response_key = %key, "dispatching call");
        match self.endpoint.call(frame).await {
            Ok(()) => Ok(completion),
            Err(HostError::MissingBinding { binding }) => {
                self.pending.abandon(&key);
                // Under the lenient policy the abandoned slot makes the
                // completion resolve as undeliverable.
                self.missing_binding(binding).map(|()| completion)
            },
            Err(e) => {
                // The host rejected the dispatch but owns the failure path;
                // it may still deliver a response for this key later.
                warn!(response_key = %key, error = %e, "host rejected call dispatch");
                Ok(completion)
            },
        }
    }

    /// Handle through which the host delivers response frames.
    pub fn responder(&self) -> Responder {
        Responder {
            pending: self.pending.clone(),
        }
    }

    /// Number of calls currently awaiting a response.
    pub fn pending_calls(&self) -> usize {
        self.pending.len()
    }

    fn missing_binding(&self, binding: String) -> Result<()> {
        match self.on_missing {
            MissingBindingPolicy::Error => Err(Error::MissingHostBinding { binding }),
            MissingBindingPolicy::Ignore => {
                warn!(binding, "host binding missing, call ignored");
                Ok(())
            },
        }
    }
}

// ── Responder ────────────────────────────────────────────────────────────────

/// Cloneable handle the host (or its transport glue) uses to push response
/// frames back into the bridge.
#[derive(Clone)]
pub struct Responder {
    pending: PendingCalls,
}

impl Responder {
    /// Route a response frame to the call that issued it.
    ///
    /// Returns false when no call with that key is in flight; such frames
    /// (late, duplicate, or stray) are dropped with a warning.
    pub fn deliver(&self, frame: ResponseFrame) -> bool {
        let key = frame.response_key.clone();
        let routed = self.pending.resolve(frame);
        if !routed {
            warn!(response_key = %key, "dropping response for unknown or completed key");
        }
        routed
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use {async_trait::async_trait, nimbridge_host::HostResult, serde_json::json};

    use super::*;

    #[derive(Default)]
    struct RecordingEndpoint {
        alerts: Mutex<Vec<String>>,
        calls: Mutex<Vec<CallFrame>>,
    }

    #[async_trait]
    impl HostEndpoint for RecordingEndpoint {
        async fn alert(&self, message: &str) -> HostResult {
            self.alerts.lock().unwrap().push(message.to_owned());
            Ok(())
        }

        async fn call(&self, frame: CallFrame) -> HostResult {
            self.calls.lock().unwrap().push(frame);
            Ok(())
        }
    }

    struct FailingEndpoint;

    #[async_trait]
    impl HostEndpoint for FailingEndpoint {
        async fn alert(&self, _message: &str) -> HostResult {
            Err("alert machinery broke".into())
        }

        async fn call(&self, _frame: CallFrame) -> HostResult {
            Err("dispatch queue full".into())
        }
    }

    fn frame(key: &str) -> CallFrame {
        CallFrame::new(
            "appendRow",
            json!("some text"),
            json!({"rows": []}),
            json!(0),
            ResponseKey::new(key),
        )
    }

    #[tokio::test]
    async fn alert_forwards_coerced_string_once() {
        let endpoint = Arc::new(RecordingEndpoint::default());
        let bridge = HostBridge::new(endpoint.clone());

        bridge.alert(42).await.unwrap();

        let alerts = endpoint.alerts.lock().unwrap();
        assert_eq!(alerts.as_slice(), ["42"]);
    }

    #[tokio::test]
    async fn call_forwards_frame_unmodified() {
        let endpoint = Arc::new(RecordingEndpoint::default());
        let bridge = HostBridge::new(endpoint.clone());

        let _completion = bridge.call(frame("k-1")).await.unwrap();

        let calls = endpoint.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), [frame("k-1")]);
    }

    #[tokio::test]
    async fn call_returns_before_host_responds() {
        let bridge = HostBridge::new(Arc::new(RecordingEndpoint::default()));

        let completion = bridge.call(frame("k-1")).await.unwrap();

        let mut completion = tokio_test::task::spawn(completion);
        tokio_test::assert_pending!(completion.poll());
        assert_eq!(bridge.pending_calls(), 1);
    }

    #[tokio::test]
    async fn response_resolves_completion_with_payload() {
        let bridge = HostBridge::new(Arc::new(RecordingEndpoint::default()));
        let responder = bridge.responder();

        let completion = bridge.call(frame("k-1")).await.unwrap();
        assert!(responder.deliver(ResponseFrame::ok("k-1", json!({"row": 3}))));

        assert_eq!(completion.await.unwrap(), json!({"row": 3}));
        assert_eq!(bridge.pending_calls(), 0);
    }

    #[tokio::test]
    async fn failed_response_resolves_with_host_error_shape() {
        let bridge = HostBridge::new(Arc::new(RecordingEndpoint::default()));
        let responder = bridge.responder();

        let completion = bridge.call(frame("k-1")).await.unwrap();
        let shape = ErrorShape::new("INVALID_REQUEST", "no such table");
        responder.deliver(ResponseFrame::err("k-1", shape.clone()));

        assert_eq!(completion.await.unwrap_err(), shape);
    }

    #[tokio::test]
    async fn duplicate_response_key_is_rejected() {
        let bridge = HostBridge::new(Arc::new(RecordingEndpoint::default()));

        let _first = bridge.call(frame("k-1")).await.unwrap();
        let err = bridge.call(frame("k-1")).await.unwrap_err();

        assert!(matches!(err, Error::DuplicateResponseKey { key } if key.as_str() == "k-1"));
    }

    #[tokio::test]
    async fn response_for_unknown_key_is_dropped() {
        let bridge = HostBridge::new(Arc::new(RecordingEndpoint::default()));
        assert!(!bridge.responder().deliver(ResponseFrame::ok("ghost", json!(null))));
    }

    #[tokio::test]
    async fn second_delivery_for_same_key_is_dropped() {
        let bridge = HostBridge::new(Arc::new(RecordingEndpoint::default()));
        let responder = bridge.responder();

        let completion = bridge.call(frame("k-1")).await.unwrap();
        assert!(responder.deliver(ResponseFrame::ok("k-1", json!(1))));
        assert!(!responder.deliver(ResponseFrame::ok("k-1", json!(2))));

        assert_eq!(completion.await.unwrap(), json!(1));
    }

    #[tokio::test]
    async fn detached_bridge_reports_missing_binding() {
        let bridge = HostBridge::detached();

        let err = bridge.alert("hi").await.unwrap_err();
        assert!(matches!(err, Error::MissingHostBinding { .. }));

        let err = bridge.call(frame("k-1")).await.unwrap_err();
        assert!(matches!(err, Error::MissingHostBinding { .. }));
        assert_eq!(bridge.pending_calls(), 0);
    }

    #[tokio::test]
    async fn lenient_policy_turns_missing_binding_into_noop() {
        let config: NimbridgeConfig = toml::from_str(
            "[host]\non_missing_binding = \"ignore\"\n",
        )
        .unwrap();
        let bridge = HostBridge::with_config(Arc::new(NoopHostEndpoint), &config);

        bridge.alert("hi").await.unwrap();

        let completion = bridge.call(frame("k-1")).await.unwrap();
        let outcome = completion.await.unwrap_err();
        assert_eq!(outcome.code, "UNAVAILABLE");
        assert_eq!(bridge.pending_calls(), 0);
    }

    #[tokio::test]
    async fn host_alert_failure_is_swallowed() {
        let bridge = HostBridge::new(Arc::new(FailingEndpoint));
        bridge.alert("hi").await.unwrap();
    }

    #[tokio::test]
    async fn host_dispatch_failure_keeps_call_pending() {
        let bridge = HostBridge::new(Arc::new(FailingEndpoint));
        let responder = bridge.responder();

        let completion = bridge.call(frame("k-1")).await.unwrap();
        assert_eq!(bridge.pending_calls(), 1);

        // The host owns the failure path and may still respond.
        responder.deliver(ResponseFrame::ok("k-1", json!("late but fine")));
        assert_eq!(completion.await.unwrap(), json!("late but fine"));
    }
}
