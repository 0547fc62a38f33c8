use std::ops::{Deref, DerefMut};

use crate::config::SpeechConfig;
use crate::platform::Platform;
use crate::Result;

use super::{RecognitionInput, Recognizer, RecognizerKind};

/// A recognizer that matches recognized speech against a table of intents.
///
/// Every intent is a phrase with an identifier. When the recognized text contains the phrase,
/// compared without regard to case and on word boundaries, the result carries the identifier and
/// the reason [`RecognizedIntent`](super::ResultReason::RecognizedIntent). Intents are tried in the
/// order they were first registered. The phrases are also sent to the backend as hints.
///
/// The recognition language must be set on the configuration.
#[derive(Debug)]
pub struct IntentRecognizer {
    base: Recognizer,
}

impl IntentRecognizer {
    /// Creates a recognizer on the installed platform.
    pub fn new(config: &SpeechConfig, input: Option<RecognitionInput>) -> Result<Self> {
        Self::with_platform(&Platform::installed()?, config, input)
    }

    /// Creates a recognizer on the given platform.
    pub fn with_platform(
        platform: &Platform,
        config: &SpeechConfig,
        input: Option<RecognitionInput>,
    ) -> Result<Self> {
        Ok(Self {
            base: Recognizer::open(platform, RecognizerKind::Intent, config, input)?,
        })
    }

    /// Registers a phrase under the given intent identifier, replacing the phrase previously
    /// registered under the same identifier.
    pub fn add_intent(&self, intent_id: &str, phrase: &str) -> Result<()> {
        self.base.register_intent(intent_id, phrase)
    }

    /// Registers a phrase that is its own intent identifier.
    pub fn add_phrase(&self, phrase: &str) -> Result<()> {
        self.base.register_intent(phrase, phrase)
    }
}

impl Deref for IntentRecognizer {
    type Target = Recognizer;
    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl DerefMut for IntentRecognizer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}
