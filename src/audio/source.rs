use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::Result;

use super::AudioFormat;

/// A producer of raw audio frames.
///
/// Implement this trait to feed audio from a device, a network stream or a decoder into a
/// recognizer. The recognizer calls `open` once when it is built, `read` while it recognizes, and
/// `close` once when it is released.
pub trait AudioSource: Send {
    /// Prepares the source and reports the format of the data it will deliver.
    fn open(&mut self) -> Result<AudioFormat>;

    /// Fills `buf` with audio data and returns the number of bytes written. Returns `0` once the
    /// source is exhausted.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Releases whatever the source holds. Called exactly once.
    fn close(&mut self);
}

/// An audio source bound to a recognizer.
pub struct AudioStream {
    source: Box<dyn AudioSource>,
    format: Option<AudioFormat>,
}

impl AudioStream {
    /// Wraps a custom audio source.
    pub fn from_source<S: AudioSource + 'static>(source: S) -> Self {
        Self {
            source: Box::new(source),
            format: None,
        }
    }

    /// Reads raw PCM data in the given format from a memory stream.
    pub fn from_stream(stream: MemoryStream, format: &AudioFormat) -> Self {
        Self::from_source(FormattedSource {
            inner: stream,
            format: format.clone(),
        })
    }

    /// Reads raw PCM data in the given format from a file. The file is opened when the stream is
    /// bound to a recognizer.
    pub fn open_file<P: AsRef<Path>>(path: P, format: &AudioFormat) -> Self {
        Self::from_source(FileSource {
            path: path.as_ref().to_path_buf(),
            file: None,
            format: format.clone(),
        })
    }

    /// The format reported by the source, once it has been opened.
    pub fn format(&self) -> Option<&AudioFormat> {
        self.format.as_ref()
    }

    /// Reads the next chunk of audio. Returns `0` when the source is exhausted.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.source.read(buf)
    }

    pub(crate) fn open(&mut self) -> Result<()> {
        self.format = Some(self.source.open()?);
        Ok(())
    }

    pub(crate) fn close(&mut self) {
        self.source.close();
        self.format = None;
    }
}

impl fmt::Debug for AudioStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioStream").field("format", &self.format).finish()
    }
}

/// A growable in-memory buffer of audio data.
///
/// Clones share the same buffer but read from their own position, so one clone can be written to
/// while another one is handed to a recognizer.
#[derive(Debug, Clone, Default)]
pub struct MemoryStream {
    data: Arc<Mutex<Vec<u8>>>,
    position: usize,
}

impl MemoryStream {
    /// Creates a stream, optionally pre-filled with data.
    pub fn new(init_data: Option<&[u8]>) -> Self {
        Self {
            data: Arc::new(Mutex::new(init_data.map(<[u8]>::to_vec).unwrap_or_default())),
            position: 0,
        }
    }

    /// Appends data to the shared buffer.
    pub fn write(&self, bytes: &[u8]) {
        self.data.lock().unwrap().extend_from_slice(bytes);
    }

    /// Total number of bytes in the shared buffer.
    pub fn len(&self) -> usize {
        self.data.lock().unwrap().len()
    }

    /// Returns `true` if the shared buffer holds no data.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_into(&mut self, buf: &mut [u8]) -> usize {
        let data = self.data.lock().unwrap();
        let available = data.len().saturating_sub(self.position);
        let count = available.min(buf.len());
        buf[..count].copy_from_slice(&data[self.position..self.position + count]);
        self.position += count;
        count
    }
}

struct FormattedSource {
    inner: MemoryStream,
    format: AudioFormat,
}

impl AudioSource for FormattedSource {
    fn open(&mut self) -> Result<AudioFormat> {
        Ok(self.format.clone())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.inner.read_into(buf))
    }

    fn close(&mut self) {}
}

struct FileSource {
    path: PathBuf,
    file: Option<File>,
    format: AudioFormat,
}

impl AudioSource for FileSource {
    fn open(&mut self) -> Result<AudioFormat> {
        self.file = Some(File::open(&self.path)?);
        Ok(self.format.clone())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        match self.file.as_mut() {
            Some(file) => Ok(file.read(buf)?),
            None => Ok(0),
        }
    }

    fn close(&mut self) {
        self.file = None;
    }
}
