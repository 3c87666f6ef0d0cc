use thiserror::Error;

use crate::ser::{BoxError, Kind};

/// Errors that can occur while encoding a value.
#[derive(Debug, Error)]
pub enum Error {
    /// The top level value was neither a record nor a reference to one.
    #[error("expected a record at the top level, got {0}")]
    InvalidInputKind(Kind),

    /// A custom encoder failed. The encoder's error is kept as is.
    #[error(transparent)]
    Encoder(BoxError),

    /// Records were nested more deeply than the configured limit.
    #[error("maximum nesting depth of {0} exceeded")]
    DepthExceeded(usize),
}

impl Error {
    /// Recovers the error returned by a custom encoder.
    pub fn into_encoder_error(self) -> Option<BoxError> {
        match self {
            Error::Encoder(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            Error::InvalidInputKind(Kind::Int).to_string(),
            "expected a record at the top level, got int"
        );
        assert_eq!(
            Error::DepthExceeded(3).to_string(),
            "maximum nesting depth of 3 exceeded"
        );
    }

    #[test]
    fn encoder_errors_are_transparent() {
        let err = Error::Encoder("bad page token".into());
        assert_eq!(err.to_string(), "bad page token");
        let inner = err.into_encoder_error().unwrap();
        assert_eq!(inner.to_string(), "bad page token");
        assert!(Error::DepthExceeded(1).into_encoder_error().is_none());
    }
}
