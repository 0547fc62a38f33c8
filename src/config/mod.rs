//! Configuration objects that recognizers are built from.
//!
//! Every configuration is created by one of the named factories, which validate their arguments
//! and record exactly one authentication method. After that the configuration can be adjusted
//! through typed accessors or through the raw [`PropertyBag`] interface until it is handed to a
//! recognizer constructor. Recognizers copy the properties they need, so the configuration can be
//! changed, reused or released afterwards without affecting recognizers already built from it.
//!
//! Configurations hold their properties in an owned handle that must be released with `close()`.

use std::str::FromStr;

use strum_macros::{Display, EnumString, IntoStaticStr};
use url::Url;

use crate::handle::Handle;
use crate::properties::{PropertyBag, PropertyId, PropertyKey};
use crate::{Error, Result};

mod dialog;
mod translation;

pub use dialog::{DialogServiceConfig, DialogType};
pub use translation::SpeechTranslationConfig;

/// Generates a getter and a pass-through setter for a string property with a well-known id.
macro_rules! string_property {
    ($what:literal, $get:ident, $set:ident, $id:expr) => {
        #[doc = concat!("Returns ", $what, ", if set.")]
        pub fn $get(&self) -> $crate::Result<Option<String>> {
            self.property($id, None)
        }

        #[doc = concat!("Sets ", $what, ". Passing `None` clears it.")]
        pub fn $set<'v, V: Into<Option<&'v str>>>(&mut self, value: V) -> $crate::Result<()> {
            self.set_property($id, value)
        }
    };
}

pub(crate) use string_property;

/// Which family of configuration an object belongs to. Fixed for the lifetime of the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ConfigKind {
    /// Plain speech recognition and intent recognition.
    Speech,
    /// Speech translation.
    SpeechTranslation,
    /// Dialog service connections.
    DialogService,
}

/// The authentication method a configuration was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AuthMethod {
    /// Subscription key and service region.
    Subscription,
    /// Explicit service endpoint and subscription key.
    Endpoint,
    /// Authorization token and service region.
    AuthorizationToken,
    /// Bot secret, subscription key and region.
    BotSecret,
    /// Speech Commands application id, subscription key and region.
    SpeechCommandsApp,
}

/// Detail level of the recognition results returned by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Only the recognized text.
    Simple,
    /// Text plus n-best alternatives and timing details.
    Detailed,
}

/// How the service treats profanity in recognized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum ProfanityOption {
    /// Replace profane words with asterisks.
    Masked,
    /// Remove profane words.
    Removed,
    /// Leave profane words as they are.
    Raw,
}

/// Proxy used to reach the speech service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Host name of the proxy.
    pub host_name: String,
    /// Port of the proxy.
    pub port: u16,
    /// Optional user name.
    pub user_name: Option<String>,
    /// Optional password.
    pub password: Option<String>,
}

/// Configuration for speech and intent recognizers.
#[derive(Debug)]
pub struct SpeechConfig {
    kind: ConfigKind,
    auth: AuthMethod,
    props: Handle<PropertyBag>,
}

impl SpeechConfig {
    /// Creates a configuration that authenticates with a subscription key in the given region.
    pub fn from_subscription(subscription_key: &str, region: &str) -> Result<Self> {
        Self::subscription(ConfigKind::Speech, subscription_key, region)
    }

    /// Creates a configuration that connects to an explicit service endpoint.
    ///
    /// The endpoint must be an absolute `ws`, `wss`, `http` or `https` URL.
    pub fn from_endpoint(endpoint: &str, subscription_key: &str) -> Result<Self> {
        Self::endpoint_in(ConfigKind::Speech, endpoint, subscription_key)
    }

    /// Creates a configuration that authenticates with an authorization token in the given region.
    ///
    /// Tokens expire; renew them with
    /// [`set_authorization_token`](Self::set_authorization_token), or on recognizers that were
    /// already created.
    pub fn from_authorization_token(token: &str, region: &str) -> Result<Self> {
        Self::authorization_token_in(ConfigKind::Speech, token, region)
    }

    pub(crate) fn subscription(kind: ConfigKind, key: &str, region: &str) -> Result<Self> {
        let key = required("subscription_key", key)?;
        let region = required("region", region)?;
        Ok(Self::with_auth(
            kind,
            AuthMethod::Subscription,
            &[
                (PropertyId::SpeechServiceConnectionKey, key),
                (PropertyId::SpeechServiceConnectionRegion, region),
            ],
        ))
    }

    pub(crate) fn endpoint_in(kind: ConfigKind, endpoint: &str, key: &str) -> Result<Self> {
        let endpoint = required("endpoint", endpoint)?;
        let url = Url::parse(endpoint)
            .map_err(|err| Error::invalid_argument("endpoint", err.to_string()))?;
        if !matches!(url.scheme(), "ws" | "wss" | "http" | "https") {
            return Err(Error::invalid_argument(
                "endpoint",
                format!("unsupported scheme `{}`", url.scheme()),
            ));
        }
        let key = required("subscription_key", key)?;
        Ok(Self::with_auth(
            kind,
            AuthMethod::Endpoint,
            &[
                (PropertyId::SpeechServiceConnectionEndpoint, endpoint),
                (PropertyId::SpeechServiceConnectionKey, key),
            ],
        ))
    }

    pub(crate) fn authorization_token_in(
        kind: ConfigKind,
        token: &str,
        region: &str,
    ) -> Result<Self> {
        let token = required("token", token)?;
        let region = required("region", region)?;
        Ok(Self::with_auth(
            kind,
            AuthMethod::AuthorizationToken,
            &[
                (PropertyId::SpeechServiceAuthorizationToken, token),
                (PropertyId::SpeechServiceConnectionRegion, region),
            ],
        ))
    }

    pub(crate) fn with_auth(
        kind: ConfigKind,
        auth: AuthMethod,
        entries: &[(PropertyId, &str)],
    ) -> Self {
        let mut props = PropertyBag::new();
        for (id, value) in entries {
            props.set(*id, *value);
        }
        let props = Handle::new("configuration", props);
        tracing::debug!(%kind, %auth, handle = props.id(), "configuration created");
        Self { kind, auth, props }
    }

    /// The configuration family this object belongs to.
    pub fn kind(&self) -> ConfigKind {
        self.kind
    }

    /// The authentication method chosen by the factory that created this object.
    pub fn auth_method(&self) -> AuthMethod {
        self.auth
    }

    /// Returns the value of a property, or `default` if it is not set.
    ///
    /// Keys that are not well-known are accepted and treated as opaque names.
    pub fn property<'k, K: Into<PropertyKey<'k>>>(
        &self,
        key: K,
        default: Option<&str>,
    ) -> Result<Option<String>> {
        Ok(self.props.get()?.get(key, default).map(str::to_owned))
    }

    /// Sets the value of a property. Passing `None` clears it.
    pub fn set_property<'k, 'v, K, V>(&mut self, key: K, value: V) -> Result<()>
    where
        K: Into<PropertyKey<'k>>,
        V: Into<Option<&'v str>>,
    {
        self.props.get_mut()?.set(key, value);
        Ok(())
    }

    /// Read-only view of all properties.
    pub fn properties(&self) -> Result<&PropertyBag> {
        self.props.get()
    }

    /// Returns the subscription key, if the configuration has one.
    pub fn subscription_key(&self) -> Result<Option<String>> {
        self.property(PropertyId::SpeechServiceConnectionKey, None)
    }

    /// Returns the service region, if the configuration has one.
    pub fn region(&self) -> Result<Option<String>> {
        self.property(PropertyId::SpeechServiceConnectionRegion, None)
    }

    /// Returns the explicit service endpoint, if the configuration has one.
    pub fn endpoint(&self) -> Result<Option<String>> {
        self.property(PropertyId::SpeechServiceConnectionEndpoint, None)
    }

    string_property!(
        "the authorization token",
        authorization_token,
        set_authorization_token,
        PropertyId::SpeechServiceAuthorizationToken
    );

    string_property!(
        "the id of the custom speech model endpoint",
        endpoint_id,
        set_endpoint_id,
        PropertyId::SpeechServiceConnectionEndpointId
    );

    /// Returns the language speech is recognized in, if set.
    pub fn speech_recognition_language(&self) -> Result<Option<String>> {
        self.property(PropertyId::SpeechServiceConnectionRecoLanguage, None)
    }

    /// Sets the language speech is recognized in.
    ///
    /// The language cannot be cleared: passing `None` or a blank string fails with
    /// [`Error::InvalidArgument`] right here rather than when a recognizer is built.
    pub fn set_speech_recognition_language<'v, V: Into<Option<&'v str>>>(
        &mut self,
        language: V,
    ) -> Result<()> {
        let language = language
            .into()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or_else(|| Error::missing_argument("language"))?;
        self.set_property(PropertyId::SpeechServiceConnectionRecoLanguage, language)
    }

    /// Returns the requested result detail level. Defaults to [`OutputFormat::Simple`].
    pub fn output_format(&self) -> Result<OutputFormat> {
        Ok(self
            .property(PropertyId::SpeechServiceResponseOutputFormatOption, None)?
            .and_then(|v| OutputFormat::from_str(&v).ok())
            .unwrap_or(OutputFormat::Simple))
    }

    /// Sets the requested result detail level.
    pub fn set_output_format(&mut self, format: OutputFormat) -> Result<()> {
        let detailed = if format == OutputFormat::Detailed {
            "true"
        } else {
            "false"
        };
        self.set_property(
            PropertyId::SpeechServiceResponseOutputFormatOption,
            <&'static str>::from(format),
        )?;
        self.set_property(PropertyId::SpeechServiceResponseRequestDetailedResultTrueFalse, detailed)
    }

    /// Returns the profanity handling option, if set.
    pub fn profanity(&self) -> Result<Option<ProfanityOption>> {
        Ok(self
            .property(PropertyId::SpeechServiceResponseProfanityOption, None)?
            .and_then(|v| ProfanityOption::from_str(&v).ok()))
    }

    /// Sets the profanity handling option.
    pub fn set_profanity(&mut self, option: ProfanityOption) -> Result<()> {
        self.set_property(
            PropertyId::SpeechServiceResponseProfanityOption,
            <&'static str>::from(option),
        )
    }

    /// Routes the connection to the service through a proxy.
    pub fn set_proxy(&mut self, proxy: &ProxyConfig) -> Result<()> {
        let host_name = required("host_name", &proxy.host_name)?;
        if proxy.port == 0 {
            return Err(Error::invalid_argument("port", "port must be non-zero"));
        }
        self.set_property(PropertyId::SpeechServiceConnectionProxyHostName, host_name)?;
        self.set_property(
            PropertyId::SpeechServiceConnectionProxyPort,
            proxy.port.to_string().as_str(),
        )?;
        self.set_property(
            PropertyId::SpeechServiceConnectionProxyUserName,
            proxy.user_name.as_deref(),
        )?;
        self.set_property(
            PropertyId::SpeechServiceConnectionProxyPassword,
            proxy.password.as_deref(),
        )
    }

    /// Returns `true` once the configuration has been released.
    pub fn is_closed(&self) -> bool {
        self.props.is_released()
    }

    /// Releases the configuration and its properties.
    ///
    /// Succeeds once; every later call, and every other use of the configuration, fails with
    /// [`Error::AlreadyReleased`].
    pub fn close(&mut self) -> Result<()> {
        self.props.release().map(drop)
    }

    pub(crate) fn snapshot(&self) -> Result<PropertyBag> {
        self.props.get().cloned()
    }
}

pub(crate) fn required<'a>(name: &'static str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(Error::missing_argument(name))
    } else {
        Ok(value)
    }
}
