use {nimbridge_protocol::ResponseKey, thiserror::Error};

#[derive(Debug, Error)]
pub enum Error {
    /// A bridge method was invoked with no host endpoint installed.
    #[error("host binding `{binding}` is not installed")]
    MissingHostBinding { binding: String },

    /// The supplied response key collides with a call already in flight.
    #[error("response key `{key}` already has a call in flight")]
    DuplicateResponseKey { key: ResponseKey },

    #[error("{0}")]
    Message(String),
}

impl nimbridge_common::FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Message(message)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

nimbridge_common::impl_context!();
