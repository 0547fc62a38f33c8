use strum_macros::Display;

use crate::backend::SessionSpec;
use crate::config::{AuthMethod, ConfigKind, SpeechConfig};
use crate::language;
use crate::platform::LanguagePolicy;
use crate::properties::{PropertyBag, PropertyId};
use crate::{Error, Result};

/// The kinds of recognizers, each with its own configuration requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RecognizerKind {
    /// Plain speech recognition.
    Speech,
    /// Speech recognition with intent matching.
    Intent,
    /// Speech recognition with translation.
    Translation,
    /// Dialog service connection.
    DialogService,
}

enum LanguageRule {
    /// Decided by the platform's [`LanguagePolicy`].
    Policy,
    Required,
    Defaults(&'static str),
}

struct Requirements {
    kind: RecognizerKind,
    configs: &'static [ConfigKind],
    language: LanguageRule,
    target_languages: bool,
}

const REQUIREMENTS: &[Requirements] = &[
    Requirements {
        kind: RecognizerKind::Speech,
        configs: &[ConfigKind::Speech, ConfigKind::SpeechTranslation],
        language: LanguageRule::Policy,
        target_languages: false,
    },
    Requirements {
        kind: RecognizerKind::Intent,
        configs: &[ConfigKind::Speech],
        language: LanguageRule::Required,
        target_languages: false,
    },
    Requirements {
        kind: RecognizerKind::Translation,
        configs: &[ConfigKind::SpeechTranslation],
        language: LanguageRule::Required,
        target_languages: true,
    },
    Requirements {
        kind: RecognizerKind::DialogService,
        configs: &[ConfigKind::DialogService],
        language: LanguageRule::Defaults("en-US"),
        target_languages: false,
    },
];

fn auth_keys(auth: AuthMethod) -> &'static [PropertyId] {
    match auth {
        AuthMethod::Subscription => &[
            PropertyId::SpeechServiceConnectionKey,
            PropertyId::SpeechServiceConnectionRegion,
        ],
        AuthMethod::Endpoint => &[
            PropertyId::SpeechServiceConnectionEndpoint,
            PropertyId::SpeechServiceConnectionKey,
        ],
        AuthMethod::AuthorizationToken => &[
            PropertyId::SpeechServiceAuthorizationToken,
            PropertyId::SpeechServiceConnectionRegion,
        ],
        AuthMethod::BotSecret => &[
            PropertyId::ConversationSecretKey,
            PropertyId::SpeechServiceConnectionKey,
            PropertyId::SpeechServiceConnectionRegion,
        ],
        AuthMethod::SpeechCommandsApp => &[
            PropertyId::ConversationApplicationId,
            PropertyId::SpeechServiceConnectionKey,
            PropertyId::SpeechServiceConnectionRegion,
        ],
    }
}

/// Checks a configuration against the requirements of a recognizer kind and resolves everything
/// the backend needs to open a session. The first violation found is reported.
pub(crate) fn validate(
    kind: RecognizerKind,
    config: &SpeechConfig,
    policy: &LanguagePolicy,
) -> Result<SessionSpec> {
    let requirements = REQUIREMENTS
        .iter()
        .find(|r| r.kind == kind)
        .ok_or_else(|| Error::InvalidConfiguration(format!("no requirements for {}", kind)))?;
    let properties = config.snapshot()?;

    if !requirements.configs.contains(&config.kind()) {
        return Err(violation(
            kind,
            format!("a {} recognizer cannot be built from a {} configuration", kind, config.kind()),
        ));
    }

    for id in auth_keys(config.auth_method()) {
        if properties.non_blank(*id).is_none() {
            return Err(violation(
                kind,
                format!("{} authentication requires `{}`", config.auth_method(), id.name()),
            ));
        }
    }

    let language = resolve_language(kind, requirements, &properties, policy)?;
    if !language::is_well_formed(&language) {
        return Err(violation(kind, format!("`{}` is not a valid recognition language", language)));
    }

    let target_languages = if requirements.target_languages {
        target_languages(kind, &properties)?
    } else {
        Vec::new()
    };

    Ok(SessionSpec {
        recognizer: kind,
        config: config.kind(),
        auth: config.auth_method(),
        language,
        target_languages,
        properties,
    })
}

fn resolve_language(
    kind: RecognizerKind,
    requirements: &Requirements,
    properties: &PropertyBag,
    policy: &LanguagePolicy,
) -> Result<String> {
    if let Some(language) = properties.non_blank(PropertyId::SpeechServiceConnectionRecoLanguage) {
        return Ok(language.to_owned());
    }
    match (&requirements.language, policy) {
        (LanguageRule::Policy, LanguagePolicy::Fallback(language)) => Ok(language.clone()),
        (LanguageRule::Defaults(language), _) => Ok((*language).to_owned()),
        _ => Err(violation(kind, "the recognition language is not set".to_owned())),
    }
}

fn target_languages(kind: RecognizerKind, properties: &PropertyBag) -> Result<Vec<String>> {
    let languages: Vec<String> = properties
        .get(PropertyId::SpeechServiceConnectionTranslationToLanguages, None)
        .map(|list| language::split_list(list).map(str::to_owned).collect())
        .unwrap_or_default();
    if languages.is_empty() {
        return Err(violation(kind, "no target languages are set".to_owned()));
    }
    if let Some(bad) = languages.iter().find(|l| !language::is_well_formed(l)) {
        return Err(violation(kind, format!("`{}` is not a valid target language", bad)));
    }
    Ok(languages)
}

fn violation(kind: RecognizerKind, reason: String) -> Error {
    tracing::warn!(%kind, %reason, "configuration rejected");
    Error::InvalidConfiguration(reason)
}
