//! This example shows how to wire up an intent recognizer: subscribe to its events, register an
//! intent, recognize one utterance and release everything again.
//!
//! The recognition service is played by the scripted backend, so the example runs without a
//! subscription. Pass the path of a raw 16 kHz, 16-bit mono PCM file to listen to it instead of
//! the default device; the scripted backend reads it but answers the same either way.
//!
//! Set `RUST_LOG=spx_lite=trace` to watch the handles being acquired and released.

use std::env;

use spx_lite::audio::{AudioFormat, AudioStream};
use spx_lite::backend::{Script, ScriptedBackend};
use spx_lite::config::SpeechConfig;
use spx_lite::platform::Platform;
use spx_lite::settings::Settings;
use spx_lite::stt::{EventFilter, IntentRecognizer, RecognitionEvent, RecognitionInput};
use tracing_subscriber::prelude::*;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Prepare what the service is going to say.
    let backend = ScriptedBackend::new();
    backend.push(
        Script::recognized("What's the weather like tomorrow?")
            .with_hypothesis("what's the")
            .with_hypothesis("what's the weather"),
    );
    spx_lite::initialize(Platform::new(backend));

    // Use the settings from the environment if there are any.
    let settings = Settings::from_env().unwrap();
    let mut config = settings.speech_config().unwrap_or_else(|_| {
        SpeechConfig::from_subscription("<subscription key>", "westus").unwrap()
    });
    if config.speech_recognition_language().unwrap().is_none() {
        config.set_speech_recognition_language("en-US").unwrap();
    }

    // Listen to a file if one was given.
    let input = env::args().nth(1).map(|path| {
        RecognitionInput::Stream(AudioStream::open_file(path, &AudioFormat::default()))
    });

    let mut reco = IntentRecognizer::new(&config, input).unwrap();

    // Subscribe to events.
    let id = reco
        .subscribe(EventFilter::ALL, |event: RecognitionEvent| match event {
            RecognitionEvent::SessionStarted { session_id } => {
                println!("Intent recognition: session {} started.", session_id)
            }
            RecognitionEvent::SessionStopped { session_id } => {
                println!("Intent recognition: session {} stopped.", session_id)
            }
            RecognitionEvent::Recognizing(result) => {
                println!("Intent recognition: intermediate result: {}", result.text)
            }
            RecognitionEvent::Recognized(result) => {
                println!("Intent recognition: final result: {}", result.text)
            }
            RecognitionEvent::Canceled(result) => {
                println!("Intent recognition: canceled: {:?}", result.cancellation)
            }
        })
        .unwrap();

    reco.add_intent("WeatherIntent", "weather").unwrap();

    // Recognize a single utterance.
    let result = reco.recognize_once().unwrap();
    println!(
        "Intent recognition: {} \"{}\", intent: {}",
        result.reason,
        result.text,
        result.intent_id.as_deref().unwrap_or("none")
    );

    // Unsubscribe and release everything.
    reco.unsubscribe(id).unwrap();
    reco.close().unwrap();
    config.close().unwrap();
    spx_lite::finalize();
}
