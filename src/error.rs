//! Error types for redraft.
//!
//! The pure diff core never fails; these errors come from the edit buffer and
//! the review session around it.

use std::fmt;
use std::io;

/// Result type alias for redraft operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for redraft operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error, e.g. failing to spawn the rewrite worker thread.
    Io(io::Error),
    /// The rewrite service reported a failure.
    Rewrite(String),
    /// No preamble is registered under this command name.
    UnknownCommand(String),
    /// Character offset past the end of the buffer.
    OutOfBounds { offset: usize, len: usize },
    /// Edit rejected because it falls outside the compared region.
    OutsideScope {
        offset: usize,
        start: usize,
        end: usize,
    },
    /// The rewrite worker went away without sending a reply.
    WorkerDisconnected,
    /// The buffer changed while a rewrite was in flight.
    BufferChanged { requested: u64, current: u64 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Rewrite(msg) => write!(f, "rewrite failed: {msg}"),
            Self::UnknownCommand(name) => write!(f, "unknown command: {name}"),
            Self::OutOfBounds { offset, len } => {
                write!(f, "offset {offset} out of bounds for buffer of {len} chars")
            }
            Self::OutsideScope { offset, start, end } => {
                write!(
                    f,
                    "edit at {offset} outside compared region {start}..={end}"
                )
            }
            Self::WorkerDisconnected => write!(f, "rewrite worker disconnected"),
            Self::BufferChanged { requested, current } => write!(
                f,
                "buffer changed during rewrite (revision {requested} -> {current})"
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownCommand("polish".to_string());
        assert!(err.to_string().contains("unknown command: polish"));

        let err = Error::OutOfBounds { offset: 12, len: 5 };
        assert!(err.to_string().contains("offset 12"));

        let err = Error::OutsideScope {
            offset: 1,
            start: 4,
            end: 9,
        };
        assert!(err.to_string().contains("4..=9"));

        let err = Error::BufferChanged {
            requested: 3,
            current: 5,
        };
        assert!(err.to_string().contains("3 -> 5"));

        let err = Error::Rewrite("timeout".to_string());
        assert_eq!(err.to_string(), "rewrite failed: timeout");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::Other, "spawn");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
