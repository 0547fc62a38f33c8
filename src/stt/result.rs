use std::collections::BTreeMap;
use std::time::Duration;

use strum_macros::{Display, IntoStaticStr};

/// Why a result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum ResultReason {
    /// Speech was heard but nothing could be recognized.
    NoMatch,
    /// The recognition was canceled, by the caller or because of an error.
    Canceled,
    /// Intermediate hypothesis of a speech recognition.
    RecognizingSpeech,
    /// Final result of a speech recognition.
    RecognizedSpeech,
    /// Final result of an intent recognition whose text matched a registered intent.
    RecognizedIntent,
    /// Intermediate hypothesis of a translation.
    TranslatingSpeech,
    /// Final result of a translation.
    TranslatedSpeech,
}

/// Why a recognition was canceled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CancellationReason {
    /// The service or the transport reported an error.
    Error,
    /// The audio source ran out before anything was recognized.
    EndOfStream,
    /// The caller canceled the recognition.
    CancelledByUser,
}

/// Error codes the service reports when it cancels a recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[allow(missing_docs)]
pub enum CancellationErrorCode {
    NoError,
    AuthenticationFailure,
    BadRequest,
    TooManyRequests,
    Forbidden,
    ConnectionFailure,
    ServiceTimeout,
    ServiceError,
    ServiceUnavailable,
    RuntimeError,
}

/// Details of a canceled recognition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancellationDetails {
    /// Why the recognition was canceled.
    pub reason: CancellationReason,
    /// The error code, [`CancellationErrorCode::NoError`] unless `reason` is
    /// [`CancellationReason::Error`].
    pub code: CancellationErrorCode,
    /// Human readable description of the error.
    pub message: String,
}

/// The outcome of a recognition, or an intermediate hypothesis of one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    /// Identifier of the backend session that produced the result.
    pub session_id: String,
    /// Why the result was produced.
    pub reason: ResultReason,
    /// Recognized text. Empty when nothing was recognized.
    pub text: String,
    /// Where the utterance starts in the audio stream.
    pub offset: Duration,
    /// Length of the utterance.
    pub duration: Duration,
    /// Identifier of the matched intent, for intent recognizers.
    pub intent_id: Option<String>,
    /// Translations of the text, keyed by target language.
    pub translations: BTreeMap<String, String>,
    /// Present when `reason` is [`ResultReason::Canceled`].
    pub cancellation: Option<CancellationDetails>,
}

impl RecognitionResult {
    pub(crate) fn empty(session_id: &str, reason: ResultReason) -> Self {
        Self {
            session_id: session_id.to_owned(),
            reason,
            text: String::new(),
            offset: Duration::ZERO,
            duration: Duration::ZERO,
            intent_id: None,
            translations: BTreeMap::new(),
            cancellation: None,
        }
    }

    pub(crate) fn canceled(session_id: &str, details: CancellationDetails) -> Self {
        Self {
            cancellation: Some(details),
            ..Self::empty(session_id, ResultReason::Canceled)
        }
    }

    /// Returns `true` if the result is final and carries recognized text.
    pub fn is_recognized(&self) -> bool {
        matches!(
            self.reason,
            ResultReason::RecognizedSpeech
                | ResultReason::RecognizedIntent
                | ResultReason::TranslatedSpeech
        )
    }
}
