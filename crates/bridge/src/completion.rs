use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use {
    nimbridge_protocol::{ErrorShape, error_codes},
    serde_json::Value,
    tokio::sync::oneshot,
};

/// What the caller observes once the host signals completion: the response
/// payload, or the error shape the host attached.
pub type CallOutcome = Result<Value, ErrorShape>;

/// Single-shot handle for one in-flight call.
///
/// Resolves exactly once, when the host delivers the response frame matching
/// this call's response key. There is no timeout and no cancellation: once
/// issued, a call cannot be withdrawn, and dropping the handle merely
/// abandons interest in the outcome.
#[derive(Debug)]
pub struct Completion {
    rx: oneshot::Receiver<CallOutcome>,
}

impl Completion {
    pub(crate) fn new(rx: oneshot::Receiver<CallOutcome>) -> Self {
        Self { rx }
    }
}

impl Future for Completion {
    type Output = CallOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            // The pending slot was discarded without a response (e.g. the
            // dispatch was ignored under the lenient missing-binding policy).
            Poll::Ready(Err(_)) => Poll::Ready(Err(ErrorShape::new(
                error_codes::UNAVAILABLE,
                "call was never delivered to the host",
            ))),
            Poll::Pending => Poll::Pending,
        }
    }
}
