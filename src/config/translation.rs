use std::ops::{Deref, DerefMut};

use crate::language;
use crate::properties::PropertyId;
use crate::{Error, Result};

use super::{required, string_property, ConfigKind, SpeechConfig};

/// Configuration for translation recognizers.
///
/// Dereferences to [`SpeechConfig`] for the settings shared with plain speech recognition.
#[derive(Debug)]
pub struct SpeechTranslationConfig {
    base: SpeechConfig,
}

impl SpeechTranslationConfig {
    /// Creates a configuration that authenticates with a subscription key in the given region.
    pub fn from_subscription(subscription_key: &str, region: &str) -> Result<Self> {
        SpeechConfig::subscription(ConfigKind::SpeechTranslation, subscription_key, region)
            .map(Self::wrap)
    }

    /// Creates a configuration that connects to an explicit service endpoint.
    pub fn from_endpoint(endpoint: &str, subscription_key: &str) -> Result<Self> {
        SpeechConfig::endpoint_in(ConfigKind::SpeechTranslation, endpoint, subscription_key)
            .map(Self::wrap)
    }

    /// Creates a configuration that authenticates with an authorization token in the given region.
    pub fn from_authorization_token(token: &str, region: &str) -> Result<Self> {
        SpeechConfig::authorization_token_in(ConfigKind::SpeechTranslation, token, region)
            .map(Self::wrap)
    }

    fn wrap(base: SpeechConfig) -> Self {
        Self { base }
    }

    /// Appends a language to the list of languages speech is translated into.
    ///
    /// Duplicates are kept and the insertion order is preserved. A comma separated list is
    /// rejected; add each language on its own.
    pub fn add_target_language(&mut self, language: &str) -> Result<()> {
        let language = required("language", language)?;
        if language.contains(',') {
            return Err(Error::invalid_argument("language", "expected a single language"));
        }
        let key = PropertyId::SpeechServiceConnectionTranslationToLanguages;
        let list = match self.property(key, None)? {
            Some(list) if !list.trim().is_empty() => format!("{},{}", list, language),
            _ => language.to_owned(),
        };
        self.set_property(key, list.as_str())
    }

    /// Removes the first occurrence of a language from the list of target languages. Returns
    /// `false` if the language was not in the list.
    pub fn remove_target_language(&mut self, language: &str) -> Result<bool> {
        let mut languages = self.target_languages()?;
        let position = match languages.iter().position(|l| l == language.trim()) {
            Some(position) => position,
            None => return Ok(false),
        };
        languages.remove(position);
        let list = languages.join(",");
        let list = if list.is_empty() {
            None
        } else {
            Some(list.as_str())
        };
        self.set_property(PropertyId::SpeechServiceConnectionTranslationToLanguages, list)?;
        Ok(true)
    }

    /// Returns the languages speech is translated into, in the order they were added.
    pub fn target_languages(&self) -> Result<Vec<String>> {
        Ok(self
            .property(PropertyId::SpeechServiceConnectionTranslationToLanguages, None)?
            .map(|list| language::split_list(&list).map(str::to_owned).collect())
            .unwrap_or_default())
    }

    string_property!(
        "the name of the voice that speaks the translations",
        voice_name,
        set_voice_name,
        PropertyId::SpeechServiceConnectionTranslationVoice
    );
}

impl Deref for SpeechTranslationConfig {
    type Target = SpeechConfig;
    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl DerefMut for SpeechTranslationConfig {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}
