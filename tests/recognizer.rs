use spx_lite::backend::ScriptedBackend;
use spx_lite::config::{DialogServiceConfig, SpeechConfig, SpeechTranslationConfig};
use spx_lite::platform::{LanguagePolicy, Platform};
use spx_lite::properties::PropertyId;
use spx_lite::stt::{
    DialogServiceConnector, IntentRecognizer, RecognizerKind, RecognizerState, SpeechRecognizer,
    TranslationRecognizer,
};
use spx_lite::Error;

const KEY: &str = "0123456789abcdef";
const REGION: &str = "westus";

fn assert_invalid_configuration<T: std::fmt::Debug>(result: spx_lite::Result<T>) {
    match result {
        Err(Error::InvalidConfiguration(_)) => {}
        other => panic!("expected InvalidConfiguration, got {:?}", other),
    }
}

fn platform() -> (ScriptedBackend, Platform) {
    let backend = ScriptedBackend::new();
    (backend.clone(), Platform::new(backend))
}

#[test]
fn test_speech_requires_language() {
    let (backend, platform) = platform();
    let mut config = SpeechConfig::from_subscription(KEY, REGION).unwrap();

    assert_invalid_configuration(SpeechRecognizer::with_platform(&platform, &config, None));
    assert!(backend.sessions().is_empty());

    config.set_speech_recognition_language("en-US").unwrap();
    let mut reco = SpeechRecognizer::with_platform(&platform, &config, None).unwrap();
    assert_eq!(RecognizerState::Ready, reco.state());
    assert_eq!(RecognizerKind::Speech, reco.kind());
    assert_eq!("en-US", reco.language());
    reco.close().unwrap();
}

#[test]
fn test_speech_language_fallback() {
    let (backend, platform) = platform();
    let platform = platform.with_language_policy(LanguagePolicy::Fallback("en-GB".to_owned()));
    let config = SpeechConfig::from_subscription(KEY, REGION).unwrap();

    let mut reco = SpeechRecognizer::with_platform(&platform, &config, None).unwrap();
    assert_eq!("en-GB", reco.language());
    assert_eq!("en-GB", backend.sessions()[0].language);
    reco.close().unwrap();
}

#[test]
fn test_malformed_languages_are_rejected() {
    let (_, platform) = platform();
    for language in &["illegal", "illegal-illegal", "null", "e", "en_US"] {
        let mut config = SpeechConfig::from_subscription(KEY, REGION).unwrap();
        config.set_speech_recognition_language(*language).unwrap();
        assert_invalid_configuration(SpeechRecognizer::with_platform(&platform, &config, None));
        assert_invalid_configuration(IntentRecognizer::with_platform(&platform, &config, None));
    }

    let mut config = SpeechConfig::from_subscription(KEY, REGION).unwrap();
    config.set_speech_recognition_language("en-EN").unwrap();
    SpeechRecognizer::with_platform(&platform, &config, None).unwrap();
}

#[test]
fn test_intent_requires_language() {
    let (_, platform) = platform();
    let platform = platform.with_language_policy(LanguagePolicy::Fallback("en-US".to_owned()));
    let mut config = SpeechConfig::from_subscription(KEY, REGION).unwrap();

    assert_invalid_configuration(IntentRecognizer::with_platform(&platform, &config, None));

    config.set_speech_recognition_language("en-US").unwrap();
    let reco = IntentRecognizer::with_platform(&platform, &config, None).unwrap();
    assert_eq!(RecognizerKind::Intent, reco.kind());
}

#[test]
fn test_translation_requires_targets() {
    let (backend, platform) = platform();
    let mut config = SpeechTranslationConfig::from_subscription(KEY, REGION).unwrap();
    config.set_speech_recognition_language("en-US").unwrap();

    assert_invalid_configuration(TranslationRecognizer::with_platform(&platform, &config, None));

    config
        .set_property(PropertyId::SpeechServiceConnectionTranslationToLanguages, "")
        .unwrap();
    assert_invalid_configuration(TranslationRecognizer::with_platform(&platform, &config, None));

    config.add_target_language("illegal-illegal").unwrap();
    assert_invalid_configuration(TranslationRecognizer::with_platform(&platform, &config, None));
    config.remove_target_language("illegal-illegal").unwrap();

    config.add_target_language("de-DE").unwrap();
    config.add_target_language("fr-FR").unwrap();
    let reco = TranslationRecognizer::with_platform(&platform, &config, None).unwrap();
    assert_eq!(&["de-DE".to_owned(), "fr-FR".to_owned()], reco.target_languages());
    assert_eq!(1, backend.sessions().len());
    assert_eq!(vec!["de-DE", "fr-FR"], backend.sessions()[0].target_languages);
}

#[test]
fn test_translation_requires_language_regardless_of_targets() {
    let (_, platform) = platform();
    let platform = platform.with_language_policy(LanguagePolicy::Fallback("en-US".to_owned()));
    let mut config = SpeechTranslationConfig::from_subscription(KEY, REGION).unwrap();
    config.add_target_language("de-DE").unwrap();

    assert_invalid_configuration(TranslationRecognizer::with_platform(&platform, &config, None));
}

#[test]
fn test_voice_is_optional_for_translation() {
    let (_, platform) = platform();
    let mut config = SpeechTranslationConfig::from_subscription(KEY, REGION).unwrap();
    config.set_speech_recognition_language("en-US").unwrap();
    config.add_target_language("de-DE").unwrap();
    config.set_voice_name(None).unwrap();

    TranslationRecognizer::with_platform(&platform, &config, None).unwrap();
}

#[test]
fn test_dialog_language_defaults() {
    let (backend, platform) = platform();
    let config = DialogServiceConfig::from_bot_secret("secret", KEY, REGION).unwrap();

    let reco = DialogServiceConnector::with_platform(&platform, &config, None).unwrap();
    assert_eq!("en-US", reco.language());
    assert_eq!(RecognizerKind::DialogService, backend.sessions()[0].recognizer);
}

#[test]
fn test_recognizer_requires_matching_config() {
    let (_, platform) = platform();
    let mut config = DialogServiceConfig::from_bot_secret("secret", KEY, REGION).unwrap();
    config.set_speech_recognition_language("en-US").unwrap();

    assert_invalid_configuration(SpeechRecognizer::with_platform(&platform, &config, None));

    let mut config = SpeechTranslationConfig::from_subscription(KEY, REGION).unwrap();
    config.set_speech_recognition_language("en-US").unwrap();
    SpeechRecognizer::with_platform(&platform, &config, None).unwrap();
}

#[test]
fn test_authentication_must_remain_present() {
    let (_, platform) = platform();
    let mut config = SpeechConfig::from_subscription(KEY, REGION).unwrap();
    config.set_speech_recognition_language("en-US").unwrap();
    config.set_property(PropertyId::SpeechServiceConnectionKey, None).unwrap();

    assert_invalid_configuration(SpeechRecognizer::with_platform(&platform, &config, None));
}

#[test]
fn test_recognizer_copies_properties() {
    let (backend, platform) = platform();
    let mut config = SpeechConfig::from_subscription(KEY, REGION).unwrap();
    config.set_speech_recognition_language("en-US").unwrap();
    config.set_property("custom.key", "before").unwrap();

    let reco = SpeechRecognizer::with_platform(&platform, &config, None).unwrap();
    config.set_property("custom.key", "after").unwrap();
    config.close().unwrap();

    assert_eq!(Some("before".to_owned()), reco.property("custom.key", None).unwrap());
    assert_eq!(Some("before"), backend.sessions()[0].properties.get("custom.key", None));

    let properties = reco.properties().unwrap();
    assert_eq!(Some(KEY), properties.get(PropertyId::SpeechServiceConnectionKey, None));
}

#[test]
fn test_released_config_cannot_build_recognizers() {
    let (_, platform) = platform();
    let mut config = SpeechConfig::from_subscription(KEY, REGION).unwrap();
    config.set_speech_recognition_language("en-US").unwrap();
    config.close().unwrap();

    assert!(matches!(
        SpeechRecognizer::with_platform(&platform, &config, None),
        Err(Error::AlreadyReleased(_))
    ));
}

#[test]
fn test_backend_refusal_is_a_resource_error() {
    let (backend, platform) = platform();
    backend.refuse_connections("service unreachable");
    let mut config = SpeechConfig::from_subscription(KEY, REGION).unwrap();
    config.set_speech_recognition_language("en-US").unwrap();

    assert!(matches!(
        SpeechRecognizer::with_platform(&platform, &config, None),
        Err(Error::Resource(_))
    ));
}
