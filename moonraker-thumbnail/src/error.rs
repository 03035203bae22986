use crate::transport::TransportError;

/// Reasons a thumbnail could not be located or downloaded.
///
/// These never reach callers of the pipeline; they are logged and turned
/// into `None`.
#[derive(Debug)]
pub enum ThumbnailError {
    MissingFileName,
    InvalidUrl(String),
    Transport(TransportError),
    Status(u16),
    NoCandidate,
    ShortRead { expected: usize, actual: usize },
    IoError(std::io::Error),
}

impl std::fmt::Display for ThumbnailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThumbnailError::MissingFileName => write!(f, "No gcode filename"),
            ThumbnailError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            ThumbnailError::Transport(e) => write!(f, "Transport error: {}", e),
            ThumbnailError::Status(code) => write!(f, "Server returned status: {}", code),
            ThumbnailError::NoCandidate => write!(f, "No suitable thumbnail"),
            ThumbnailError::ShortRead { expected, actual } => write!(
                f,
                "Short read: expected {} bytes, received {}",
                expected, actual
            ),
            ThumbnailError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ThumbnailError {}

impl From<TransportError> for ThumbnailError {
    fn from(err: TransportError) -> Self {
        ThumbnailError::Transport(err)
    }
}

impl From<url::ParseError> for ThumbnailError {
    fn from(err: url::ParseError) -> Self {
        ThumbnailError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ThumbnailError {
    fn from(err: std::io::Error) -> Self {
        ThumbnailError::IoError(err)
    }
}
