use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use strum_macros::{EnumString, IntoStaticStr};

use crate::properties::PropertyId;
use crate::Result;

use super::{required, string_property, AuthMethod, ConfigKind, SpeechConfig};

/// The kind of dialog backend a [`DialogServiceConfig`] connects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
pub enum DialogType {
    /// A bot reached through the speech channel.
    #[strum(serialize = "bot_framework")]
    BotFramework,
    /// A Speech Commands application.
    #[strum(serialize = "custom_commands")]
    CustomCommands,
}

/// Configuration for dialog service connections.
///
/// Dereferences to [`SpeechConfig`] for the settings shared with speech recognition.
#[derive(Debug)]
pub struct DialogServiceConfig {
    base: SpeechConfig,
}

impl DialogServiceConfig {
    /// Creates a configuration that connects to a bot with the given speech channel secret.
    pub fn from_bot_secret(secret_key: &str, subscription_key: &str, region: &str) -> Result<Self> {
        let secret_key = required("secret_key", secret_key)?;
        let subscription_key = required("subscription_key", subscription_key)?;
        let region = required("region", region)?;
        Ok(Self::new(
            AuthMethod::BotSecret,
            DialogType::BotFramework,
            &[
                (PropertyId::ConversationSecretKey, secret_key),
                (PropertyId::SpeechServiceConnectionKey, subscription_key),
                (PropertyId::SpeechServiceConnectionRegion, region),
            ],
        ))
    }

    /// Creates a configuration that connects to the Speech Commands application with the given
    /// id.
    pub fn from_speech_commands_app_id(
        application_id: &str,
        subscription_key: &str,
        region: &str,
    ) -> Result<Self> {
        let application_id = required("application_id", application_id)?;
        let subscription_key = required("subscription_key", subscription_key)?;
        let region = required("region", region)?;
        Ok(Self::new(
            AuthMethod::SpeechCommandsApp,
            DialogType::CustomCommands,
            &[
                (PropertyId::ConversationApplicationId, application_id),
                (PropertyId::SpeechServiceConnectionKey, subscription_key),
                (PropertyId::SpeechServiceConnectionRegion, region),
            ],
        ))
    }

    fn new(auth: AuthMethod, dialog_type: DialogType, entries: &[(PropertyId, &str)]) -> Self {
        let mut entries = entries.to_vec();
        entries.push((PropertyId::ConversationDialogType, dialog_type.into()));
        Self {
            base: SpeechConfig::with_auth(ConfigKind::DialogService, auth, &entries),
        }
    }

    /// The kind of dialog backend this configuration connects to.
    pub fn dialog_type(&self) -> Result<Option<DialogType>> {
        Ok(self
            .property(PropertyId::ConversationDialogType, None)?
            .and_then(|v| DialogType::from_str(&v).ok()))
    }

    string_property!(
        "the identifier used to connect to the backend application",
        application_id,
        set_application_id,
        PropertyId::ConversationApplicationId
    );

    string_property!(
        "the initial silence timeout of the connection",
        initial_silence_timeout,
        set_initial_silence_timeout,
        PropertyId::ConversationInitialSilenceTimeout
    );

    string_property!(
        "the format of the audio returned by text to speech",
        text_to_speech_audio_format,
        set_text_to_speech_audio_format,
        PropertyId::SpeechServiceConnectionSynthOutputFormat
    );
}

impl Deref for DialogServiceConfig {
    type Target = SpeechConfig;
    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl DerefMut for DialogServiceConfig {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}
