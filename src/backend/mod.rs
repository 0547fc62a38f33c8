//! The boundary between this crate and the recognition service.
//!
//! The service itself, the transport that reaches it and the recognition algorithms are not part
//! of this crate. A [`RecognitionBackend`] stands in for all of them: recognizers hand it a
//! validated [`SessionSpec`] when they are built and ask the resulting [`BackendSession`] for one
//! result at a time.
//!
//! [`ScriptedBackend`] is an in-process implementation that replays prepared replies.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{AuthMethod, ConfigKind};
use crate::properties::PropertyBag;
use crate::stt::{CancellationErrorCode, RecognitionInput, RecognizerKind};
use crate::Result;

mod scripted;

pub use scripted::{Gate, RequestRecord, Script, ScriptedBackend};

/// A connection factory for the recognition service.
pub trait RecognitionBackend: Send + Sync {
    /// Opens a session for a recognizer that passed validation.
    ///
    /// Failing to allocate the session should be reported as [`Error::Resource`](crate::Error).
    fn connect(&self, spec: &SessionSpec) -> Result<Box<dyn BackendSession>>;
}

/// A session with the recognition service, owned by one recognizer.
pub trait BackendSession: Send {
    /// Identifier of the session, reported in events and results.
    fn session_id(&self) -> &str;

    /// Performs a single recognition.
    ///
    /// Intermediate hypotheses are reported through [`RecognitionRequest::report`]. Long running
    /// implementations should poll [`RecognitionRequest::cancel`] and return early once it is set;
    /// whatever they return after that is reported as canceled by the caller.
    fn recognize(
        &mut self,
        request: RecognitionRequest<'_>,
    ) -> std::result::Result<Reply, BackendError>;

    /// Ends the session. Called exactly once, when the recognizer is released.
    fn close(&mut self);
}

/// Everything a backend needs to know about a recognizer, resolved and validated.
#[derive(Debug, Clone)]
pub struct SessionSpec {
    /// Which recognizer asked for the session.
    pub recognizer: RecognizerKind,
    /// The family of the configuration the recognizer was built from.
    pub config: ConfigKind,
    /// How the configuration authenticates.
    pub auth: AuthMethod,
    /// The language speech is recognized in, after applying the language policy.
    pub language: String,
    /// Translation target languages. Empty for other recognizers.
    pub target_languages: Vec<String>,
    /// Copy of the configuration's properties.
    pub properties: PropertyBag,
}

/// One recognition request handed to a [`BackendSession`].
pub struct RecognitionRequest<'a> {
    /// The audio the recognizer listens to.
    pub audio: &'a mut RecognitionInput,
    /// Set when the caller cancels the recognition.
    pub cancel: &'a CancellationToken,
    /// Phrases the recognizer expects, e.g. the phrases of registered intents.
    pub phrase_hints: &'a [String],
    /// The current authorization token, if the recognizer has one.
    pub authorization_token: Option<&'a str>,
    progress: &'a mut dyn FnMut(Utterance),
}

impl<'a> RecognitionRequest<'a> {
    pub(crate) fn new(
        audio: &'a mut RecognitionInput,
        cancel: &'a CancellationToken,
        phrase_hints: &'a [String],
        authorization_token: Option<&'a str>,
        progress: &'a mut dyn FnMut(Utterance),
    ) -> Self {
        Self {
            audio,
            cancel,
            phrase_hints,
            authorization_token,
            progress,
        }
    }

    /// Reports an intermediate hypothesis. Delivered to subscribers as a `Recognizing` event.
    pub fn report(&mut self, hypothesis: Utterance) {
        (self.progress)(hypothesis)
    }
}

impl fmt::Debug for RecognitionRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecognitionRequest")
            .field("audio", &self.audio)
            .field("cancel", &self.cancel)
            .field("phrase_hints", &self.phrase_hints)
            .finish()
    }
}

/// Text recognized in a stretch of audio.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Utterance {
    /// The recognized text.
    pub text: String,
    /// Where the utterance starts in the audio stream.
    pub offset: Duration,
    /// Length of the utterance.
    pub duration: Duration,
    /// Translations of the text, keyed by target language.
    pub translations: BTreeMap<String, String>,
}

impl Utterance {
    /// An utterance with the given text and no timing information.
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Adds a translation of the utterance.
    pub fn translated<L: Into<String>, T: Into<String>>(mut self, language: L, text: T) -> Self {
        self.translations.insert(language.into(), text.into());
        self
    }
}

/// The final answer of a backend to a recognition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Speech was recognized.
    Recognized(Utterance),
    /// Speech was heard but could not be recognized.
    NoMatch,
    /// The audio source was exhausted before any speech was heard.
    EndOfStream,
}

/// A failure reported by the recognition service or the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    /// Classification of the failure.
    pub code: CancellationErrorCode,
    /// Human readable description.
    pub message: String,
}

impl BackendError {
    /// Creates a new error.
    pub fn new<S: Into<String>>(code: CancellationErrorCode, message: S) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// A cancellation flag shared between a recognizer and the backend serving it.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Calling it more than once has no further effect.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
