use std::borrow::Cow;

use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Well-known property identifiers.
///
/// Every identifier is registered under a fixed string name, the same name the speech service
/// and the other SDK bindings use. Reading or writing a property through its identifier or
/// through its name reaches the same entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[allow(missing_docs)]
pub enum PropertyId {
    #[strum(serialize = "SpeechServiceConnection_Key")]
    SpeechServiceConnectionKey,
    #[strum(serialize = "SpeechServiceConnection_Endpoint")]
    SpeechServiceConnectionEndpoint,
    #[strum(serialize = "SpeechServiceConnection_Region")]
    SpeechServiceConnectionRegion,
    #[strum(serialize = "SpeechServiceAuthorization_Token")]
    SpeechServiceAuthorizationToken,
    #[strum(serialize = "SpeechServiceAuthorization_Type")]
    SpeechServiceAuthorizationType,
    #[strum(serialize = "SpeechServiceConnection_EndpointId")]
    SpeechServiceConnectionEndpointId,
    #[strum(serialize = "SpeechServiceConnection_ProxyHostName")]
    SpeechServiceConnectionProxyHostName,
    #[strum(serialize = "SpeechServiceConnection_ProxyPort")]
    SpeechServiceConnectionProxyPort,
    #[strum(serialize = "SpeechServiceConnection_ProxyUserName")]
    SpeechServiceConnectionProxyUserName,
    #[strum(serialize = "SpeechServiceConnection_ProxyPassword")]
    SpeechServiceConnectionProxyPassword,
    #[strum(serialize = "SpeechServiceConnection_TranslationToLanguages")]
    SpeechServiceConnectionTranslationToLanguages,
    #[strum(serialize = "SpeechServiceConnection_TranslationVoice")]
    SpeechServiceConnectionTranslationVoice,
    #[strum(serialize = "SpeechServiceConnection_RecoLanguage")]
    SpeechServiceConnectionRecoLanguage,
    #[strum(serialize = "SpeechServiceConnection_SynthOutputFormat")]
    SpeechServiceConnectionSynthOutputFormat,
    #[strum(serialize = "SpeechServiceConnection_InitialSilenceTimeoutMs")]
    SpeechServiceConnectionInitialSilenceTimeoutMs,
    #[strum(serialize = "SpeechServiceResponse_RequestDetailedResultTrueFalse")]
    SpeechServiceResponseRequestDetailedResultTrueFalse,
    #[strum(serialize = "SpeechServiceResponse_ProfanityOption")]
    SpeechServiceResponseProfanityOption,
    #[strum(serialize = "SpeechServiceResponse_OutputFormatOption")]
    SpeechServiceResponseOutputFormatOption,
    #[strum(serialize = "SpeechServiceResponse_JsonErrorDetails")]
    SpeechServiceResponseJsonErrorDetails,
    #[strum(serialize = "Speech_SessionId")]
    SpeechSessionId,
    #[strum(serialize = "Conversation_ApplicationId")]
    ConversationApplicationId,
    #[strum(serialize = "Conversation_DialogType")]
    ConversationDialogType,
    #[strum(serialize = "Conversation_Initial_Silence_Timeout")]
    ConversationInitialSilenceTimeout,
    #[strum(serialize = "Conversation_Secret_Key")]
    ConversationSecretKey,
}

impl PropertyId {
    /// The string name this identifier is registered under.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// A key into a [`PropertyBag`](super::PropertyBag): either a well-known identifier or an arbitrary
/// string name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKey<'a> {
    /// A well-known identifier.
    Id(PropertyId),
    /// An arbitrary name. Names of well-known identifiers address the same entries as the
    /// identifiers themselves.
    Name(Cow<'a, str>),
}

impl<'a> PropertyKey<'a> {
    /// The string the key resolves to.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Id(id) => id.name(),
            Self::Name(name) => name,
        }
    }
}

impl From<PropertyId> for PropertyKey<'static> {
    fn from(id: PropertyId) -> Self {
        Self::Id(id)
    }
}

impl<'a> From<&'a str> for PropertyKey<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(Cow::Borrowed(name))
    }
}

impl From<String> for PropertyKey<'static> {
    fn from(name: String) -> Self {
        Self::Name(Cow::Owned(name))
    }
}
