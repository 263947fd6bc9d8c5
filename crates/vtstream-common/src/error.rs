use thiserror::Error;

/// Fatal failures that cross out of the core.
///
/// Per the error-handling policy: malformed sequences, invalid command
/// arguments, unsupported commands, and out-of-range coordinates are never
/// represented here — they are absorbed at the point of discovery (dropped,
/// clamped, logged). Only host-level I/O and allocation failures propagate.
#[derive(Error, Debug)]
pub enum VtError {
    #[error("PTY error: {0}")]
    Pty(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("terminal state error: {0}")]
    State(String),

    #[error("event system error: {0}")]
    Event(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("platform error: {0}")]
    Platform(String),
}

pub type Result<T> = std::result::Result<T, VtError>;
