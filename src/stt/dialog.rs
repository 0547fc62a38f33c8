use std::ops::{Deref, DerefMut};

use crate::config::DialogServiceConfig;
use crate::platform::Platform;
use crate::Result;

use super::{RecognitionInput, RecognitionResult, Recognizer, RecognizerKind};

/// A connection to a bot or a Speech Commands application.
///
/// The recognition language is optional and defaults to `en-US`.
#[derive(Debug)]
pub struct DialogServiceConnector {
    base: Recognizer,
}

impl DialogServiceConnector {
    /// Creates a connector on the installed platform.
    pub fn new(config: &DialogServiceConfig, input: Option<RecognitionInput>) -> Result<Self> {
        Self::with_platform(&Platform::installed()?, config, input)
    }

    /// Creates a connector on the given platform.
    pub fn with_platform(
        platform: &Platform,
        config: &DialogServiceConfig,
        input: Option<RecognitionInput>,
    ) -> Result<Self> {
        Ok(Self {
            base: Recognizer::open(platform, RecognizerKind::DialogService, config, input)?,
        })
    }

    /// Listens for a single utterance and sends it to the dialog backend.
    pub fn listen_once(&self) -> Result<RecognitionResult> {
        self.base.recognize_once()
    }
}

impl Deref for DialogServiceConnector {
    type Target = Recognizer;
    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl DerefMut for DialogServiceConnector {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}
