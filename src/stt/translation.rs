use std::ops::{Deref, DerefMut};

use crate::config::SpeechTranslationConfig;
use crate::platform::Platform;
use crate::Result;

use super::{RecognitionInput, Recognizer, RecognizerKind};

/// A recognizer that translates recognized speech.
///
/// The configuration must name the recognition language and at least one target language. Final
/// results carry one translation per target language.
#[derive(Debug)]
pub struct TranslationRecognizer {
    base: Recognizer,
}

impl TranslationRecognizer {
    /// Creates a recognizer on the installed platform.
    pub fn new(config: &SpeechTranslationConfig, input: Option<RecognitionInput>) -> Result<Self> {
        Self::with_platform(&Platform::installed()?, config, input)
    }

    /// Creates a recognizer on the given platform.
    pub fn with_platform(
        platform: &Platform,
        config: &SpeechTranslationConfig,
        input: Option<RecognitionInput>,
    ) -> Result<Self> {
        Ok(Self {
            base: Recognizer::open(platform, RecognizerKind::Translation, config, input)?,
        })
    }

    /// The languages speech is translated into, as they were configured when the recognizer was
    /// built.
    pub fn target_languages(&self) -> &[String] {
        self.base.target_languages()
    }
}

impl Deref for TranslationRecognizer {
    type Target = Recognizer;
    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl DerefMut for TranslationRecognizer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}
