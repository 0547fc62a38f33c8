use std::ops::{Deref, DerefMut};

use crate::config::SpeechConfig;
use crate::platform::Platform;
use crate::Result;

use super::{RecognitionInput, Recognizer, RecognizerKind};

/// A recognizer that transcribes speech.
///
/// Whether the recognition language may be left unset is decided by the platform's
/// [`LanguagePolicy`](crate::platform::LanguagePolicy).
#[derive(Debug)]
pub struct SpeechRecognizer {
    base: Recognizer,
}

impl SpeechRecognizer {
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
            base: Recognizer::open(platform, RecognizerKind::Speech, config, input)?,
        })
    }
}

impl Deref for SpeechRecognizer {
    type Target = Recognizer;
    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl DerefMut for SpeechRecognizer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}
