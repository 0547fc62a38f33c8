//! This example shows how to translate speech without blocking an async runtime, and how to
//! receive the events of a recognizer through a channel.

use spx_lite::backend::{Script, ScriptedBackend, Utterance};
use spx_lite::config::SpeechTranslationConfig;
use spx_lite::platform::Platform;
use spx_lite::stt::{EventFilter, RecognitionEvent, TranslationRecognizer};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // The scripted backend plays the part of the translation service.
    let backend = ScriptedBackend::new();
    backend.push(
        Script::utterance(
            Utterance::text("Where is the train station?")
                .translated("de-DE", "Wo ist der Bahnhof?")
                .translated("fr-FR", "Où est la gare ?"),
        )
        .with_hypothesis("where is")
        .with_hypothesis("where is the train"),
    );
    let platform = Platform::new(backend);

    // Translate from English into German and French.
    let mut config =
        SpeechTranslationConfig::from_subscription("<subscription key>", "westus").unwrap();
    config.set_speech_recognition_language("en-US").unwrap();
    config.add_target_language("de-DE").unwrap();
    config.add_target_language("fr-FR").unwrap();

    let mut reco = TranslationRecognizer::with_platform(&platform, &config, None).unwrap();
    config.close().unwrap();

    // Print the intermediate hypotheses as they arrive.
    let (_, mut events) = reco.subscribe_channel(EventFilter::RECOGNIZING, 16).unwrap();
    let printer = tokio::spawn(async move {
        while let Some(RecognitionEvent::Recognizing(result)) = events.recv().await {
            println!("translating: {}", result.text);
        }
    });

    let result = reco.recognize_once_async().await.unwrap();
    println!("{}: {}", result.reason, result.text);
    for language in reco.target_languages() {
        if let Some(translation) = result.translations.get(language) {
            println!("  {}: {}", language, translation);
        }
    }

    // Closing the recognizer drops the subscription, which ends the printer task.
    reco.close().unwrap();
    printer.await.unwrap();
}
