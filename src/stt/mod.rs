//! Speech recognition.
//!
//! Recognizers are built from a configuration and an optional audio input. Construction validates
//! the configuration against the recognizer's requirements, opens a session with the recognition
//! backend and binds the audio input; a recognizer value is only returned once all of that
//! succeeded.
//!
//! There are four recognizer types, one per kind of exchange with the service:
//!
//! * [`SpeechRecognizer`] transcribes speech.
//! * [`IntentRecognizer`] transcribes speech and matches the text against registered intents.
//! * [`TranslationRecognizer`] transcribes speech and translates it into the target languages.
//! * [`DialogServiceConnector`] talks to a bot or a Speech Commands application.
//!
//! All of them dereference to [`Recognizer`], which provides the single recognition operation,
//! event subscription, cancellation and release.

use crate::audio::AudioStream;
use crate::Result;

mod dialog;
mod event;
mod intent;
mod recognizer;
mod result;
mod speech;
mod translation;
mod validation;

#[cfg(feature = "tokio-stt")]
mod tokio;

pub use dialog::DialogServiceConnector;
pub use event::{EventFilter, EventHandler, RecognitionEvent, SubscriptionId};
pub use intent::IntentRecognizer;
pub use recognizer::{Canceller, Recognizer, RecognizerState};
pub use result::{
    CancellationDetails, CancellationErrorCode, CancellationReason, RecognitionResult,
    ResultReason,
};
pub use speech::SpeechRecognizer;
pub use translation::TranslationRecognizer;
pub use validation::RecognizerKind;

/// The audio a recognizer listens to.
#[derive(Debug)]
pub enum RecognitionInput {
    /// The default capture device, as understood by the recognition backend.
    Default,
    /// A stream supplied by the caller.
    Stream(AudioStream),
}

impl RecognitionInput {
    /// The caller-supplied stream, or `None` for the default device.
    pub fn stream_mut(&mut self) -> Option<&mut AudioStream> {
        match self {
            Self::Default => None,
            Self::Stream(stream) => Some(stream),
        }
    }

    pub(crate) fn bind(&mut self) -> Result<()> {
        match self {
            Self::Default => Ok(()),
            Self::Stream(stream) => stream.open(),
        }
    }

    pub(crate) fn release(&mut self) {
        if let Self::Stream(stream) = self {
            stream.close();
        }
    }
}

impl Default for RecognitionInput {
    fn default() -> Self {
        Self::Default
    }
}

impl From<AudioStream> for RecognitionInput {
    fn from(stream: AudioStream) -> Self {
        Self::Stream(stream)
    }
}
