#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A simplified, handle-safe configuration and recognizer lifecycle layer for speech service
//! clients.
//!
//! # Features
//!
//! The goal of this crate is to make the configuration side of a speech SDK easy and safe to use
//! from Rust: creating configurations, adjusting their properties, validating them, building
//! recognizers from them and releasing everything again. The recognition service itself is not
//! part of this crate. It is reached through the
//! [`RecognitionBackend`](backend::RecognitionBackend) trait, and
//! [`ScriptedBackend`](backend::ScriptedBackend) replays prepared answers for tests and demos.
//!
//! ## Configuration
//!
//! The [config] module provides [`SpeechConfig`](config::SpeechConfig),
//! [`SpeechTranslationConfig`](config::SpeechTranslationConfig) and
//! [`DialogServiceConfig`](config::DialogServiceConfig). Each is created by a named factory that
//! records one authentication method, and is backed by a [`PropertyBag`](properties::PropertyBag)
//! that can be addressed with well-known [`PropertyId`](properties::PropertyId)s or arbitrary
//! string names.
//!
//! ## Speech recognition
//!
//! The [stt] module provides the recognizers. A recognizer checks its configuration when it is
//! built and refuses to exist if the configuration is incomplete. Once built, it performs single
//! recognitions, raises events on a worker thread, can be canceled from any thread, and releases
//! its backend session and audio input when it is closed.
//!
//! With the `tokio-stt` feature, recognitions can also be awaited and events received through a
//! channel.
//!
//! # Releasing Resources
//!
//! Configurations and recognizers hold resources that should be released explicitly with
//! `close()`. Releasing succeeds exactly once; a second release, or any other use of a released
//! object, fails with [`Error::AlreadyReleased`]. Dropping an object that was not released releases
//! it too, but the crate never relies on that.
//!
//! # Platform
//!
//! Recognizers are built against a [`Platform`](platform::Platform): a backend plus the policies
//! that apply to it. Either pass one to the `with_platform` constructors, or install one for the
//! whole process with [`initialize`] and use the plain constructors.

pub mod audio;
pub mod backend;
pub mod config;
mod error;
mod handle;
pub mod language;
pub mod platform;
pub mod properties;
pub mod settings;
pub mod stt;

pub use error::Error;

/// The type returned by the functions and methods of this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Installs the platform used by recognizer constructors that do not take one, replacing any
/// platform installed before.
pub fn initialize(platform: platform::Platform) {
    tracing::debug!(?platform, "platform installed");
    platform::Platform::install(Some(platform));
}

/// Removes the installed platform. Recognizers that were already built keep working.
pub fn finalize() {
    if platform::Platform::install(None).is_some() {
        tracing::debug!("platform removed");
    }
}
