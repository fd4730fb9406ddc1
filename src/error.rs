use thiserror::Error;

/// Errors surfaced by the protocol core.
///
/// `Connection` is recoverable: the caller may open a new session and try
/// again. The other variants report a definitive outcome for the request
/// that produced them.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Address resolution, socket, connect or timeout failure.
    #[error("connection error: {0}")]
    Connection(String),
    /// A frame shorter than the fixed packet length.
    #[error("malformed packet: {len} bytes, expected 17")]
    MalformedPacket { len: usize },
    /// Resend requested for a sequence that is not pending.
    #[error("sequence {0} is not in the missing set")]
    NotFound(u32),
}

impl From<std::io::Error> for FeedError {
    fn from(err: std::io::Error) -> Self {
        FeedError::Connection(err.to_string())
    }
}
