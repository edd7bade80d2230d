use crate::domain::Phase;
use thiserror::Error;
use uuid::Uuid;

/// Contract violations raised by the focus session engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session is {actual:?}, expected {expected:?}")]
    InvalidSessionState { actual: Phase, expected: Phase },

    #[error("Work item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("Work item is already completed: {0}")]
    ItemCompleted(Uuid),

    #[error("A focus session is already running")]
    SessionAlreadyActive,

    #[error("Resolution not available: {0}")]
    UnsupportedResolution(&'static str),
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;
