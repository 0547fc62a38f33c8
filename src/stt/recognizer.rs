use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use strum_macros::Display;

use crate::backend::{BackendSession, CancellationToken, RecognitionRequest, Reply, Utterance};
use crate::config::SpeechConfig;
use crate::handle::Handle;
use crate::platform::Platform;
use crate::properties::{PropertyBag, PropertyId, PropertyKey};
use crate::{Error, Result};

use super::event::EventHub;
use super::validation::{self, RecognizerKind};
use super::{
    CancellationDetails, CancellationErrorCode, CancellationReason, EventFilter, EventHandler,
    RecognitionEvent, RecognitionInput, RecognitionResult, ResultReason, SubscriptionId,
};

/// Lifecycle state of a recognizer.
///
/// `Unvalidated` and `Validated` are only passed through while a recognizer is being built; a
/// recognizer returned to the caller starts out `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RecognizerState {
    /// The configuration has not been checked yet.
    Unvalidated,
    /// The configuration satisfies the recognizer's requirements.
    Validated,
    /// The recognizer is idle and can recognize.
    Ready,
    /// A recognition is in flight.
    Recognizing,
    /// The recognizer has been released.
    Closed,
}

struct Resources {
    session: Box<dyn BackendSession>,
    audio: RecognitionInput,
}

struct Shared {
    kind: RecognizerKind,
    language: String,
    target_languages: Vec<String>,
    state: Mutex<RecognizerState>,
    in_flight: AtomicBool,
    cancel: Mutex<CancellationToken>,
    events: EventHub,
    properties: Mutex<PropertyBag>,
    intents: Mutex<Vec<(String, String)>>,
    resources: Mutex<Handle<Resources>>,
}

impl Shared {
    fn state(&self) -> RecognizerState {
        *self.state.lock().unwrap()
    }

    fn set_state(&self, state: RecognizerState) {
        let mut current = self.state.lock().unwrap();
        if *current != state {
            tracing::debug!(
                kind = %self.kind,
                from = %*current,
                to = %state,
                "recognizer state changed"
            );
            *current = state;
        }
    }

    fn hypothesis(&self, session_id: &str, utterance: Utterance) -> RecognitionResult {
        let reason = match self.kind {
            RecognizerKind::Translation => ResultReason::TranslatingSpeech,
            _ => ResultReason::RecognizingSpeech,
        };
        with_utterance(RecognitionResult::empty(session_id, reason), utterance)
    }

    fn finish(&self, session_id: &str, utterance: Utterance) -> RecognitionResult {
        let (reason, intent_id) = match self.kind {
            RecognizerKind::Translation => (ResultReason::TranslatedSpeech, None),
            RecognizerKind::Intent => match self.match_intent(&utterance.text) {
                Some(id) => (ResultReason::RecognizedIntent, Some(id)),
                None => (ResultReason::RecognizedSpeech, None),
            },
            _ => (ResultReason::RecognizedSpeech, None),
        };
        RecognitionResult {
            intent_id,
            ..with_utterance(RecognitionResult::empty(session_id, reason), utterance)
        }
    }

    fn match_intent(&self, text: &str) -> Option<String> {
        let text = words(text);
        self.intents
            .lock()
            .unwrap()
            .iter()
            .find(|(_, phrase)| {
                let phrase = words(phrase);
                !phrase.is_empty() && text.windows(phrase.len()).any(|w| w == phrase.as_slice())
            })
            .map(|(id, _)| id.clone())
    }

    fn phrase_hints(&self) -> Vec<String> {
        self.intents.lock().unwrap().iter().map(|(_, phrase)| phrase.clone()).collect()
    }

    fn run_once(&self, cancel: &CancellationToken) -> Result<RecognitionResult> {
        let mut resources = self.resources.lock().unwrap();
        let resources = resources.get_mut()?;
        let session_id = resources.session.session_id().to_owned();
        let hints = self.phrase_hints();
        let token = self
            .properties
            .lock()
            .unwrap()
            .non_blank(PropertyId::SpeechServiceAuthorizationToken)
            .map(str::to_owned);

        self.events.dispatch(RecognitionEvent::SessionStarted {
            session_id: session_id.clone(),
        });
        let mut progress = |utterance: Utterance| {
            let result = self.hypothesis(&session_id, utterance);
            self.events.dispatch(RecognitionEvent::Recognizing(result));
        };
        let reply = resources.session.recognize(RecognitionRequest::new(
            &mut resources.audio,
            cancel,
            &hints,
            token.as_deref(),
            &mut progress,
        ));

        let result = if cancel.is_cancelled() {
            RecognitionResult::canceled(
                &session_id,
                CancellationDetails {
                    reason: CancellationReason::CancelledByUser,
                    code: CancellationErrorCode::NoError,
                    message: String::new(),
                },
            )
        } else {
            match reply {
                Ok(Reply::Recognized(utterance)) => self.finish(&session_id, utterance),
                Ok(Reply::NoMatch) => RecognitionResult::empty(&session_id, ResultReason::NoMatch),
                Ok(Reply::EndOfStream) => RecognitionResult::canceled(
                    &session_id,
                    CancellationDetails {
                        reason: CancellationReason::EndOfStream,
                        code: CancellationErrorCode::NoError,
                        message: String::new(),
                    },
                ),
                Err(err) => {
                    tracing::warn!(
                        kind = %self.kind,
                        session_id = %session_id,
                        code = %err.code,
                        message = %err.message,
                        "recognition failed"
                    );
                    RecognitionResult::canceled(
                        &session_id,
                        CancellationDetails {
                            reason: CancellationReason::Error,
                            code: err.code,
                            message: err.message,
                        },
                    )
                }
            }
        };

        let event = if result.reason == ResultReason::Canceled {
            RecognitionEvent::Canceled(result.clone())
        } else {
            RecognitionEvent::Recognized(result.clone())
        };
        self.events.dispatch(event);
        self.events.dispatch(RecognitionEvent::SessionStopped { session_id });
        Ok(result)
    }
}

fn with_utterance(result: RecognitionResult, utterance: Utterance) -> RecognitionResult {
    RecognitionResult {
        text: utterance.text,
        offset: utterance.offset,
        duration: utterance.duration,
        translations: utterance.translations,
        ..result
    }
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Clears the in-flight flag when a recognition ends, even if the backend panicked.
struct InFlight {
    shared: Arc<Shared>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock().unwrap();
        if *state == RecognizerState::Recognizing {
            tracing::debug!(kind = %self.shared.kind, "recognition finished");
            *state = RecognizerState::Ready;
        }
        self.shared.in_flight.store(false, Ordering::SeqCst);
    }
}

/// The part common to all recognizers.
///
/// A recognizer owns a session with the recognition backend and the audio input it listens to.
/// Both are released by [`close`](Self::close), which should always be called; dropping an open
/// recognizer closes it as well.
pub struct Recognizer {
    shared: Arc<Shared>,
}

impl Recognizer {
    pub(super) fn open(
        platform: &Platform,
        kind: RecognizerKind,
        config: &SpeechConfig,
        input: Option<RecognitionInput>,
    ) -> Result<Self> {
        tracing::debug!(%kind, state = %RecognizerState::Unvalidated, "building recognizer");
        let spec = validation::validate(kind, config, platform.language_policy())?;
        tracing::debug!(
            %kind,
            state = %RecognizerState::Validated,
            language = %spec.language,
            "configuration accepted"
        );

        let mut session = platform.backend().connect(&spec).map_err(|err| {
            tracing::warn!(%kind, error = %err, "backend session could not be opened");
            err
        })?;
        let mut audio = input.unwrap_or_default();
        if let Err(err) = audio.bind() {
            tracing::warn!(%kind, error = %err, "audio input could not be bound");
            session.close();
            return Err(err);
        }

        let resources = Handle::new("recognizer", Resources { session, audio });
        tracing::debug!(
            %kind,
            state = %RecognizerState::Ready,
            handle = resources.id(),
            "recognizer ready"
        );
        Ok(Self {
            shared: Arc::new(Shared {
                kind,
                language: spec.language,
                target_languages: spec.target_languages,
                state: Mutex::new(RecognizerState::Ready),
                in_flight: AtomicBool::new(false),
                cancel: Mutex::new(CancellationToken::new()),
                events: EventHub::default(),
                properties: Mutex::new(spec.properties),
                intents: Mutex::new(Vec::new()),
                resources: Mutex::new(resources),
            }),
        })
    }

    /// The kind of this recognizer.
    pub fn kind(&self) -> RecognizerKind {
        self.shared.kind
    }

    /// The current lifecycle state.
    pub fn state(&self) -> RecognizerState {
        self.shared.state()
    }

    /// Returns `true` once the recognizer has been released.
    pub fn is_closed(&self) -> bool {
        self.state() == RecognizerState::Closed
    }

    /// The language speech is recognized in.
    pub fn language(&self) -> &str {
        &self.shared.language
    }

    pub(super) fn target_languages(&self) -> &[String] {
        &self.shared.target_languages
    }

    /// Performs a single recognition and blocks until its result is available.
    ///
    /// The exchange with the backend runs on a worker thread, which also delivers the events of
    /// the recognition. Fails with [`Error::OperationInProgress`] if another recognition is in
    /// flight on this recognizer. Failures of the service do not fail the call; they produce a
    /// result with [`ResultReason::Canceled`] instead.
    pub fn recognize_once(&self) -> Result<RecognitionResult> {
        let (tx, rx) = mpsc::channel();
        self.start(move |result| {
            let _ = tx.send(result);
        })?;
        rx.recv().map_err(|_| {
            Error::Resource("the recognition worker terminated unexpectedly".to_owned())
        })?
    }

    /// Starts a recognition on a worker thread and hands its outcome to `reply`.
    pub(super) fn start<F>(&self, reply: F) -> Result<()>
    where
        F: FnOnce(Result<RecognitionResult>) + Send + 'static,
    {
        self.check_open()?;
        // the token is swapped under the same lock a canceller checks `in_flight` under
        let cancel = {
            let mut current = self.shared.cancel.lock().unwrap();
            if self
                .shared
                .in_flight
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_err()
            {
                return Err(Error::OperationInProgress);
            }
            *current = CancellationToken::new();
            current.clone()
        };
        let guard = InFlight {
            shared: self.shared.clone(),
        };
        self.shared.set_state(RecognizerState::Recognizing);

        let shared = self.shared.clone();
        thread::Builder::new()
            .name(format!("spx-{}", self.shared.kind).to_lowercase())
            .spawn(move || {
                let result = shared.run_once(&cancel);
                drop(guard);
                reply(result);
            })
            .map(drop)
            .map_err(|err| Error::Resource(format!("cannot start a recognition worker: {}", err)))
    }

    /// Registers a handler for the events selected by `filter`.
    pub fn subscribe<E: EventHandler + 'static>(
        &self,
        filter: EventFilter,
        handler: E,
    ) -> Result<SubscriptionId> {
        self.check_open()?;
        Ok(self.shared.events.subscribe(filter, handler))
    }

    /// Removes a handler. Returns `false` if the subscription did not exist.
    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<bool> {
        self.check_open()?;
        Ok(self.shared.events.unsubscribe(id))
    }

    /// Returns a handle that cancels the recognition in flight from any thread.
    pub fn canceller(&self) -> Canceller {
        Canceller {
            shared: self.shared.clone(),
        }
    }

    /// A copy of the properties the recognizer was built with.
    pub fn properties(&self) -> Result<PropertyBag> {
        self.check_open()?;
        Ok(self.shared.properties.lock().unwrap().clone())
    }

    /// Returns the value of one of the properties the recognizer was built with, or `default`.
    pub fn property<'k, K: Into<PropertyKey<'k>>>(
        &self,
        key: K,
        default: Option<&str>,
    ) -> Result<Option<String>> {
        self.check_open()?;
        Ok(self.shared.properties.lock().unwrap().get(key, default).map(str::to_owned))
    }

    /// The authorization token sent with the next recognition, if any.
    pub fn authorization_token(&self) -> Result<Option<String>> {
        self.property(PropertyId::SpeechServiceAuthorizationToken, None)
    }

    /// Replaces the authorization token. Takes effect with the next recognition.
    pub fn set_authorization_token(&self, token: &str) -> Result<()> {
        self.check_open()?;
        let token = crate::config::required("token", token)?;
        self.shared
            .properties
            .lock()
            .unwrap()
            .set(PropertyId::SpeechServiceAuthorizationToken, token);
        Ok(())
    }

    pub(super) fn register_intent(&self, id: &str, phrase: &str) -> Result<()> {
        self.check_open()?;
        let id = crate::config::required("intent_id", id)?;
        let phrase = crate::config::required("phrase", phrase)?;
        let mut intents = self.shared.intents.lock().unwrap();
        match intents.iter_mut().find(|(existing, _)| existing == id) {
            Some(entry) => entry.1 = phrase.to_owned(),
            None => intents.push((id.to_owned(), phrase.to_owned())),
        }
        Ok(())
    }

    /// Releases the backend session, the audio input and all event subscriptions.
    ///
    /// A recognition in flight is canceled first. Succeeds once; every later call, and every other
    /// use of the recognizer, fails with [`Error::AlreadyReleased`].
    pub fn close(&mut self) -> Result<()> {
        self.shared.cancel.lock().unwrap().cancel();
        let mut resources = self.shared.resources.lock().unwrap().release()?;
        resources.session.close();
        resources.audio.release();
        self.shared.events.clear();
        self.shared.set_state(RecognizerState::Closed);
        Ok(())
    }

    fn check_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(Error::AlreadyReleased("recognizer"))
        } else {
            Ok(())
        }
    }
}

impl Drop for Recognizer {
    fn drop(&mut self) {
        if !self.is_closed() {
            tracing::trace!(kind = %self.shared.kind, "recognizer closed on drop");
            let _ = self.close();
        }
    }
}

impl std::fmt::Debug for Recognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recognizer")
            .field("kind", &self.shared.kind)
            .field("state", &self.state())
            .field("language", &self.shared.language)
            .finish()
    }
}

/// Cancels the recognition in flight on the recognizer it was obtained from.
#[derive(Clone)]
pub struct Canceller {
    shared: Arc<Shared>,
}

impl Canceller {
    /// Cancels the recognition in flight. Does nothing when the recognizer is idle or when the
    /// recognition was already canceled.
    pub fn cancel(&self) {
        let token = self.shared.cancel.lock().unwrap();
        if self.shared.in_flight.load(Ordering::SeqCst) {
            tracing::debug!(kind = %self.shared.kind, "recognition canceled");
            token.cancel();
        }
    }
}

impl std::fmt::Debug for Canceller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canceller").field("kind", &self.shared.kind).finish()
    }
}
