use std::collections::HashMap;

use spx_lite::backend::{Script, ScriptedBackend};
use spx_lite::config::{AuthMethod, SpeechConfig};
use spx_lite::platform::{LanguagePolicy, Platform};
use spx_lite::settings::Settings;
use spx_lite::stt::SpeechRecognizer;
use spx_lite::Error;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> =
        vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name| vars.get(name).cloned()
}

// The only test in this binary that touches the installed platform.
#[test]
fn test_installed_platform() {
    let mut config = SpeechConfig::from_subscription("key", "westus").unwrap();
    config.set_speech_recognition_language("en-US").unwrap();

    spx_lite::finalize();
    assert!(matches!(SpeechRecognizer::new(&config, None), Err(Error::Resource(_))));

    let backend = ScriptedBackend::new();
    backend.push(Script::recognized("installed"));
    spx_lite::initialize(Platform::new(backend.clone()));
    let reco = SpeechRecognizer::new(&config, None).unwrap();

    spx_lite::finalize();
    assert!(matches!(Platform::installed(), Err(Error::Resource(_))));
    assert_eq!("installed", reco.recognize_once().unwrap().text);
}

#[test]
fn test_language_policy_parsing() {
    assert_eq!(LanguagePolicy::Required, "required".parse::<LanguagePolicy>().unwrap());
    assert_eq!(LanguagePolicy::Required, " Required ".parse::<LanguagePolicy>().unwrap());
    assert_eq!(
        LanguagePolicy::Fallback("en-US".to_owned()),
        "fallback:en-US".parse::<LanguagePolicy>().unwrap()
    );
    assert!(matches!(
        "fallback:illegal".parse::<LanguagePolicy>(),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!("lenient".parse::<LanguagePolicy>(), Err(Error::InvalidArgument { .. })));
    assert_eq!(LanguagePolicy::Required, LanguagePolicy::default());
}

#[test]
fn test_settings_from_lookup() {
    let settings = Settings::from_lookup(lookup(&[
        ("SPX_SUBSCRIPTION_KEY", "key"),
        ("SPX_REGION", "westeurope"),
        ("SPX_LANGUAGE", "de-DE"),
        ("SPX_LANGUAGE_POLICY", "fallback:en-US"),
        ("SPX_ENDPOINT", "  "),
    ]))
    .unwrap();
    assert_eq!(None, settings.endpoint);
    assert_eq!(LanguagePolicy::Fallback("en-US".to_owned()), settings.language_policy);

    let config = settings.speech_config().unwrap();
    assert_eq!(AuthMethod::Subscription, config.auth_method());
    assert_eq!(Some("westeurope".to_owned()), config.region().unwrap());
    assert_eq!(Some("de-DE".to_owned()), config.speech_recognition_language().unwrap());

    let platform = settings.platform(ScriptedBackend::new());
    assert_eq!(&settings.language_policy, platform.language_policy());

    let translation = settings.translation_config().unwrap();
    assert!(translation.target_languages().unwrap().is_empty());
}

#[test]
fn test_settings_prefer_endpoint() {
    let settings = Settings::from_lookup(lookup(&[
        ("SPX_SUBSCRIPTION_KEY", "key"),
        ("SPX_REGION", "westeurope"),
        ("SPX_ENDPOINT", "wss://westeurope.stt.speech.example.com/v1"),
    ]))
    .unwrap();
    let config = settings.speech_config().unwrap();
    assert_eq!(AuthMethod::Endpoint, config.auth_method());
    assert_eq!(None, config.speech_recognition_language().unwrap());
}

#[test]
fn test_incomplete_settings() {
    let settings = Settings::from_lookup(lookup(&[("SPX_REGION", "westeurope")])).unwrap();
    assert!(matches!(settings.speech_config(), Err(Error::InvalidArgument { .. })));

    let settings = Settings::from_lookup(lookup(&[("SPX_SUBSCRIPTION_KEY", "key")])).unwrap();
    assert!(matches!(settings.speech_config(), Err(Error::InvalidArgument { .. })));

    assert!(matches!(
        Settings::from_lookup(lookup(&[("SPX_LANGUAGE_POLICY", "sometimes")])),
        Err(Error::InvalidArgument { .. })
    ));
}
