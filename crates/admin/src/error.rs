use thiserror::Error;

use crate::channel::ChannelError;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error("malformed {context} response from server: {got:?}")]
    MalformedResponse {
        context: &'static str,
        got: String,
    },

    #[error("player info for {requested:?} came back for a different player: {returned:?}")]
    IdentityMismatch { requested: String, returned: String },

    #[error("precondition violated: {0}")]
    Precondition(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AdminError {
    pub(crate) fn malformed(context: &'static str, got: impl Into<String>) -> Self {
        AdminError::MalformedResponse {
            context,
            got: got.into(),
        }
    }
}

// Convenience type alias
pub type AdminResult<T> = Result<T, AdminError>;
