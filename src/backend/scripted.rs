use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use crate::stt::CancellationErrorCode;
use crate::{Error, Result};

use super::{
    BackendError, BackendSession, CancellationToken, RecognitionBackend, RecognitionRequest, Reply,
    SessionSpec, Utterance,
};

/// A backend that answers recognition requests with prepared replies, in order.
///
/// Useful for tests and demos, and as a template for real backends. Clones share the same queue
/// of scripts and the same records of sessions and requests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    state: Arc<State>,
}

#[derive(Debug, Default)]
struct State {
    scripts: Mutex<VecDeque<Script>>,
    refusal: Mutex<Option<String>>,
    sessions: Mutex<Vec<SessionSpec>>,
    requests: Mutex<Vec<RequestRecord>>,
    next_session: AtomicU64,
    open_sessions: AtomicUsize,
}

/// What a [`ScriptedBackend`] saw of a recognition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    /// Identifier of the session the request was made on.
    pub session_id: String,
    /// Phrase hints sent with the request.
    pub phrase_hints: Vec<String>,
    /// Authorization token sent with the request.
    pub authorization_token: Option<String>,
    /// Number of audio bytes read from the recognizer's input.
    pub audio_bytes: usize,
}

impl ScriptedBackend {
    /// Creates a backend with an empty queue. Requests made while the queue is empty are answered
    /// with [`Reply::NoMatch`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a script for the next recognition request.
    pub fn push(&self, script: Script) -> &Self {
        self.state.scripts.lock().unwrap().push_back(script);
        self
    }

    /// Makes every following `connect` fail with [`Error::Resource`].
    pub fn refuse_connections<S: Into<String>>(&self, reason: S) {
        *self.state.refusal.lock().unwrap() = Some(reason.into());
    }

    /// The session specifications received so far, oldest first.
    pub fn sessions(&self) -> Vec<SessionSpec> {
        self.state.sessions.lock().unwrap().clone()
    }

    /// The recognition requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RequestRecord> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Number of sessions that were opened and not closed yet.
    pub fn open_sessions(&self) -> usize {
        self.state.open_sessions.load(Ordering::SeqCst)
    }
}

impl RecognitionBackend for ScriptedBackend {
    fn connect(&self, spec: &SessionSpec) -> Result<Box<dyn BackendSession>> {
        if let Some(reason) = self.state.refusal.lock().unwrap().as_ref() {
            return Err(Error::Resource(reason.clone()));
        }
        let n = self.state.next_session.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.sessions.lock().unwrap().push(spec.clone());
        self.state.open_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedSession {
            id: format!("scripted-{}", n),
            state: self.state.clone(),
            closed: false,
        }))
    }
}

struct ScriptedSession {
    id: String,
    state: Arc<State>,
    closed: bool,
}

impl BackendSession for ScriptedSession {
    fn session_id(&self) -> &str {
        &self.id
    }

    fn recognize(
        &mut self,
        mut request: RecognitionRequest<'_>,
    ) -> std::result::Result<Reply, BackendError> {
        let audio_bytes = drain(&mut request)?;
        self.state.requests.lock().unwrap().push(RequestRecord {
            session_id: self.id.clone(),
            phrase_hints: request.phrase_hints.to_vec(),
            authorization_token: request.authorization_token.map(str::to_owned),
            audio_bytes,
        });

        let script = self.state.scripts.lock().unwrap().pop_front();
        let script = match script {
            Some(script) => script,
            None => return Ok(Reply::NoMatch),
        };
        for hypothesis in script.hypotheses {
            request.report(hypothesis);
        }
        if let Some(gate) = script.gate {
            if !gate.wait(request.cancel) {
                return Err(BackendError::new(
                    CancellationErrorCode::NoError,
                    "canceled while waiting",
                ));
            }
        }
        script.outcome
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.state.open_sessions.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

fn drain(request: &mut RecognitionRequest<'_>) -> std::result::Result<usize, BackendError> {
    let stream = match request.audio.stream_mut() {
        Some(stream) => stream,
        None => return Ok(0),
    };
    let mut buf = [0u8; 4096];
    let mut total = 0;
    loop {
        let count = stream
            .read(&mut buf)
            .map_err(|err| {
                BackendError::new(CancellationErrorCode::RuntimeError, err.to_string())
            })?;
        if count == 0 {
            return Ok(total);
        }
        total += count;
    }
}

/// One prepared answer of a [`ScriptedBackend`].
#[derive(Debug, Clone)]
pub struct Script {
    hypotheses: Vec<Utterance>,
    gate: Option<Gate>,
    outcome: std::result::Result<Reply, BackendError>,
}

impl Script {
    /// Answers with the given reply.
    pub fn reply(reply: Reply) -> Self {
        Self {
            hypotheses: Vec::new(),
            gate: None,
            outcome: Ok(reply),
        }
    }

    /// Answers with the given recognized text.
    pub fn recognized<S: Into<String>>(text: S) -> Self {
        Self::reply(Reply::Recognized(Utterance::text(text)))
    }

    /// Answers with the given utterance.
    pub fn utterance(utterance: Utterance) -> Self {
        Self::reply(Reply::Recognized(utterance))
    }

    /// Answers that nothing was recognized.
    pub fn no_match() -> Self {
        Self::reply(Reply::NoMatch)
    }

    /// Fails the request with the given error.
    pub fn error<S: Into<String>>(code: CancellationErrorCode, message: S) -> Self {
        Self {
            hypotheses: Vec::new(),
            gate: None,
            outcome: Err(BackendError::new(code, message)),
        }
    }

    /// Reports an intermediate hypothesis before answering.
    pub fn with_hypothesis<S: Into<String>>(mut self, text: S) -> Self {
        self.hypotheses.push(Utterance::text(text));
        self
    }

    /// Holds the answer back until the gate is opened or the request is canceled.
    pub fn wait_for(mut self, gate: &Gate) -> Self {
        self.gate = Some(gate.clone());
        self
    }
}

/// A latch that holds back a [`Script`] until it is opened.
#[derive(Debug, Clone, Default)]
pub struct Gate {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl Gate {
    /// Creates a closed gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the gate, releasing every script waiting on it.
    pub fn open(&self) {
        let (opened, cond) = &*self.inner;
        *opened.lock().unwrap() = true;
        cond.notify_all();
    }

    /// Returns `true` when the gate opened, `false` when the request was canceled first.
    fn wait(&self, cancel: &CancellationToken) -> bool {
        let (opened, cond) = &*self.inner;
        let mut guard = opened.lock().unwrap();
        while !*guard {
            if cancel.is_cancelled() {
                return false;
            }
            guard = cond.wait_timeout(guard, Duration::from_millis(10)).unwrap().0;
        }
        true
    }
}
