use thiserror::Error;

/// The error type returned by the functions and methods of this crate.
///
/// Validation errors are always raised synchronously, at the factory call, property setter or
/// recognizer constructor that detected them. Failures of the remote recognition service are not
/// reported through this type; they arrive as [`Canceled`](crate::stt::RecognitionEvent::Canceled)
/// events and canceled results instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A factory or setter argument was missing, empty or malformed.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The configuration handed to a recognizer constructor violates the recognizer's policy.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The recognition backend or another resource could not be allocated.
    #[error("resource error: {0}")]
    Resource(String),

    /// A recognition was requested while another one is still in flight on the same recognizer.
    #[error("a recognition is already in progress")]
    OperationInProgress,

    /// The object was already released with `close()`.
    #[error("{0} has already been released")]
    AlreadyReleased(&'static str),

    /// An audio file could not be accessed.
    #[error("audio I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_argument<S: Into<String>>(name: &'static str, reason: S) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn missing_argument(name: &'static str) -> Self {
        Self::invalid_argument(name, "value must be present and non-empty")
    }
}
