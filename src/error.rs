use std::io;
use thiserror::Error;

/// Errors reported by the automaton engine
///
/// Both variants are caller contract violations; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Bad dimensions at construction or a pixel buffer of the wrong length
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Unknown pattern name
    #[error("not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        let kind = match err {
            Error::InvalidArgument(_) => io::ErrorKind::InvalidInput,
            Error::NotFound(_) => io::ErrorKind::NotFound,
        };
        io::Error::new(kind, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_io_error_kind() {
        let err: io::Error = Error::InvalidArgument("width must be positive".into()).into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        let err: io::Error = Error::NotFound("pattern 'nope'".into()).into();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn display_includes_detail() {
        let err = Error::NotFound("pattern 'nope'".into());
        assert_eq!(err.to_string(), "not found: pattern 'nope'");
    }
}
