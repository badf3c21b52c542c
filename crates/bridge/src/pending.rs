use std::sync::Arc;

use {
    dashmap::{DashMap, mapref::entry::Entry},
    nimbridge_protocol::{ResponseFrame, ResponseKey},
    tokio::sync::oneshot,
    tracing::debug,
};

use crate::{
    completion::{CallOutcome, Completion},
    error::{Error, Result},
};

/// Concurrent table of in-flight calls, keyed by response key.
///
/// This is the only shared state the bridge holds. A slot is created when a
/// call is dispatched and removed when the matching response arrives or the
/// dispatch is abandoned.
#[derive(Clone, Default)]
pub(crate) struct PendingCalls {
    inner: Arc<DashMap<ResponseKey, oneshot::Sender<CallOutcome>>>,
}

impl PendingCalls {
    /// Reserve a slot for `key` and hand back its completion handle.
    ///
    /// Registration is atomic: a key colliding with an in-flight call is
    /// rejected up front rather than silently corrupting response routing.
    pub fn register(&self, key: &ResponseKey) -> Result<Completion> {
        match self.inner.entry(key.clone()) {
            Entry::Occupied(_) => Err(Error::DuplicateResponseKey { key: key.clone() }),
            Entry::Vacant(slot) => {
                let (tx, rx) = oneshot::channel();
                slot.insert(tx);
                Ok(Completion::new(rx))
            },
        }
    }

    /// Route a response frame to its completion handle.
    ///
    /// Returns false when no call with that key is in flight (late, duplicate
    /// or stray delivery). The first delivery wins; the slot is gone after it.
    pub fn resolve(&self, frame: ResponseFrame) -> bool {
        let Some((key, tx)) = self.inner.remove(&frame.response_key) else {
            return false;
        };
        if tx.send(frame.into_result()).is_err() {
            debug!(response_key = %key, "completion handle dropped before the response arrived");
        }
        true
    }

    /// Discard the slot for a call that never reached the host.
    pub fn abandon(&self, key: &ResponseKey) {
        self.inner.remove(key);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}
