//! Runtime settings read from the environment.

use std::env;

use crate::backend::RecognitionBackend;
use crate::config::{SpeechConfig, SpeechTranslationConfig};
use crate::platform::{LanguagePolicy, Platform};
use crate::{Error, Result};

/// Connection settings for the speech service.
///
/// | Variable               | Meaning                                             |
/// |------------------------|-----------------------------------------------------|
/// | `SPX_SUBSCRIPTION_KEY` | subscription key                                    |
/// | `SPX_REGION`           | service region                                      |
/// | `SPX_ENDPOINT`         | explicit endpoint, takes precedence over the region |
/// | `SPX_LANGUAGE`         | recognition language                                |
/// | `SPX_LANGUAGE_POLICY`  | `required` (default) or `fallback:<language>`       |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Subscription key.
    pub subscription_key: Option<String>,
    /// Service region.
    pub region: Option<String>,
    /// Explicit service endpoint.
    pub endpoint: Option<String>,
    /// Recognition language.
    pub language: Option<String>,
    /// What plain speech recognizers do without a recognition language.
    pub language_policy: LanguagePolicy,
}

impl Settings {
    /// Reads the settings from the process environment. Unset and blank variables are treated
    /// alike.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the settings through the given lookup function.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let language_policy = match var("SPX_LANGUAGE_POLICY") {
            Some(policy) => policy.parse()?,
            None => LanguagePolicy::default(),
        };
        Ok(Self {
            subscription_key: var("SPX_SUBSCRIPTION_KEY"),
            region: var("SPX_REGION"),
            endpoint: var("SPX_ENDPOINT"),
            language: var("SPX_LANGUAGE"),
            language_policy,
        })
    }

    /// Builds a speech configuration from the settings.
    pub fn speech_config(&self) -> Result<SpeechConfig> {
        let key = self
            .subscription_key
            .as_deref()
            .ok_or_else(|| Error::missing_argument("subscription_key"))?;
        let mut config = match (&self.endpoint, &self.region) {
            (Some(endpoint), _) => SpeechConfig::from_endpoint(endpoint, key)?,
            (None, Some(region)) => SpeechConfig::from_subscription(key, region)?,
            (None, None) => return Err(Error::missing_argument("region")),
        };
        if let Some(language) = &self.language {
            config.set_speech_recognition_language(language.as_str())?;
        }
        Ok(config)
    }

    /// Builds a translation configuration from the settings. Target languages still have to be
    /// added.
    pub fn translation_config(&self) -> Result<SpeechTranslationConfig> {
        let key = self
            .subscription_key
            .as_deref()
            .ok_or_else(|| Error::missing_argument("subscription_key"))?;
        let mut config = match (&self.endpoint, &self.region) {
            (Some(endpoint), _) => SpeechTranslationConfig::from_endpoint(endpoint, key)?,
            (None, Some(region)) => SpeechTranslationConfig::from_subscription(key, region)?,
            (None, None) => return Err(Error::missing_argument("region")),
        };
        if let Some(language) = &self.language {
            config.set_speech_recognition_language(language.as_str())?;
        }
        Ok(config)
    }

    /// Builds a platform on the given backend with the configured policies.
    pub fn platform<B: RecognitionBackend + 'static>(&self, backend: B) -> Platform {
        Platform::new(backend).with_language_policy(self.language_policy.clone())
    }
}
