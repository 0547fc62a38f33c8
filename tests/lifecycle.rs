use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use spx_lite::audio::{AudioFormat, AudioSource, AudioStream};
use spx_lite::backend::{Script, ScriptedBackend};
use spx_lite::config::SpeechConfig;
use spx_lite::platform::Platform;
use spx_lite::stt::{
    EventFilter, RecognitionEvent, RecognitionInput, RecognizerState, SpeechRecognizer,
};
use spx_lite::Error;

#[derive(Default)]
struct Counters {
    opened: AtomicUsize,
    closed: AtomicUsize,
}

struct CountingSource {
    counters: Arc<Counters>,
    fail_open: bool,
}

impl AudioSource for CountingSource {
    fn open(&mut self) -> spx_lite::Result<AudioFormat> {
        if self.fail_open {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such device",
            )));
        }
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(AudioFormat::default())
    }

    fn read(&mut self, _buf: &mut [u8]) -> spx_lite::Result<usize> {
        Ok(0)
    }

    fn close(&mut self) {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
    }
}

fn speech_config() -> SpeechConfig {
    let mut config = SpeechConfig::from_subscription("key", "westus").unwrap();
    config.set_speech_recognition_language("en-US").unwrap();
    config
}

fn counting_input(counters: &Arc<Counters>, fail_open: bool) -> RecognitionInput {
    RecognitionInput::Stream(AudioStream::from_source(CountingSource {
        counters: counters.clone(),
        fail_open,
    }))
}

#[test]
fn test_close_releases_everything_once() {
    let backend = ScriptedBackend::new();
    let platform = Platform::new(backend.clone());
    let counters = Arc::new(Counters::default());
    let input = counting_input(&counters, false);

    let mut reco =
        SpeechRecognizer::with_platform(&platform, &speech_config(), Some(input)).unwrap();
    assert_eq!(1, counters.opened.load(Ordering::SeqCst));
    assert_eq!(1, backend.open_sessions());

    reco.close().unwrap();
    assert!(reco.is_closed());
    assert_eq!(RecognizerState::Closed, reco.state());
    assert_eq!(1, counters.closed.load(Ordering::SeqCst));
    assert_eq!(0, backend.open_sessions());

    assert!(matches!(reco.close(), Err(Error::AlreadyReleased(_))));
    assert_eq!(1, counters.closed.load(Ordering::SeqCst));
    assert_eq!(0, backend.open_sessions());
}

#[test]
fn test_released_recognizer_rejects_use() {
    let backend = ScriptedBackend::new();
    backend.push(Script::recognized("unused"));
    let platform = Platform::new(backend.clone());
    let mut reco = SpeechRecognizer::with_platform(&platform, &speech_config(), None).unwrap();
    reco.close().unwrap();

    assert!(matches!(reco.recognize_once(), Err(Error::AlreadyReleased(_))));
    assert!(matches!(
        reco.subscribe(EventFilter::ALL, |_: RecognitionEvent| {}),
        Err(Error::AlreadyReleased(_))
    ));
    assert!(matches!(reco.properties(), Err(Error::AlreadyReleased(_))));
    assert!(matches!(reco.set_authorization_token("token"), Err(Error::AlreadyReleased(_))));
    assert!(backend.requests().is_empty());

    // cancelling a released recognizer is harmless
    reco.canceller().cancel();
}

#[test]
fn test_drop_releases_open_recognizer() {
    let backend = ScriptedBackend::new();
    let platform = Platform::new(backend.clone());
    let counters = Arc::new(Counters::default());
    let input = counting_input(&counters, false);

    let reco = SpeechRecognizer::with_platform(&platform, &speech_config(), Some(input)).unwrap();
    drop(reco);
    assert_eq!(1, counters.closed.load(Ordering::SeqCst));
    assert_eq!(0, backend.open_sessions());
}

#[test]
fn test_failed_audio_binding_releases_session() {
    let backend = ScriptedBackend::new();
    let platform = Platform::new(backend.clone());
    let counters = Arc::new(Counters::default());
    let input = counting_input(&counters, true);

    let result = SpeechRecognizer::with_platform(&platform, &speech_config(), Some(input));
    assert!(matches!(result, Err(Error::Io(_))));
    assert_eq!(1, backend.sessions().len());
    assert_eq!(0, backend.open_sessions());
}

#[test]
fn test_missing_audio_file() {
    let backend = ScriptedBackend::new();
    let platform = Platform::new(backend.clone());
    let input = RecognitionInput::Stream(AudioStream::open_file(
        "/nonexistent/spx-lite/audio.raw",
        &AudioFormat::default(),
    ));

    let result = SpeechRecognizer::with_platform(&platform, &speech_config(), Some(input));
    assert!(matches!(result, Err(Error::Io(_))));
    assert_eq!(0, backend.open_sessions());
}

#[test]
fn test_failed_validation_allocates_nothing() {
    let backend = ScriptedBackend::new();
    let platform = Platform::new(backend.clone());
    let counters = Arc::new(Counters::default());
    let input = counting_input(&counters, false);
    let config = SpeechConfig::from_subscription("key", "westus").unwrap();

    let result = SpeechRecognizer::with_platform(&platform, &config, Some(input));
    assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    assert!(backend.sessions().is_empty());
    assert_eq!(0, counters.opened.load(Ordering::SeqCst));
}

#[test]
fn test_config_outlives_recognizer_independently() {
    let backend = ScriptedBackend::new();
    let platform = Platform::new(backend.clone());
    let mut config = speech_config();

    let mut first = SpeechRecognizer::with_platform(&platform, &config, None).unwrap();
    first.close().unwrap();
    let mut second = SpeechRecognizer::with_platform(&platform, &config, None).unwrap();
    config.close().unwrap();

    backend.push(Script::recognized("still works"));
    assert_eq!("still works", second.recognize_once().unwrap().text);
    second.close().unwrap();
    assert!(matches!(config.close(), Err(Error::AlreadyReleased(_))));
}
