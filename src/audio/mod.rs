//! Audio sources a recognizer can listen to.
//!
//! Capturing and decoding audio is outside the scope of this crate. What it provides is the
//! lifecycle around a source: a recognizer opens its source when it is built and closes it when it
//! is released. Sources deliver raw PCM bytes in the [`AudioFormat`] they report when opened.

mod format;
mod source;

pub use format::{AudioFormat, BitRate, Channels, SampleRate};
pub use source::{AudioSource, AudioStream, MemoryStream};
