/// Sample rate, in samples per second, at which audio is recorded.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[allow(missing_docs)]
pub enum SampleRate {
    Hz8000 = 8000,
    Hz11025 = 11025,
    Hz12000 = 12000,
    Hz16000 = 16000,
    Hz22050 = 22050,
    Hz24000 = 24000,
    Hz32000 = 32000,
    Hz44100 = 44100,
    Hz48000 = 48000,
}

/// How many bits each sample has.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[allow(missing_docs)]
pub enum BitRate {
    Bits8 = 8,
    Bits16 = 16,
}

/// Number of audio channels.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[allow(missing_docs)]
pub enum Channels {
    Mono = 1,
    Stereo = 2,
}

/// Specifies the format of the PCM data delivered by an audio source.
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub struct AudioFormat {
    /// Sample rate at which the audio was recorded.
    pub sample_rate: SampleRate,
    /// How many bits each sample has.
    pub bit_rate: BitRate,
    /// Number of channels.
    pub channels: Channels,
}

impl AudioFormat {
    /// Size of one frame (one sample for every channel), in bytes.
    pub fn block_align(&self) -> u32 {
        (self.channels as u32) * (self.bit_rate as u32) / 8
    }

    /// Number of bytes one second of audio takes.
    pub fn bytes_per_second(&self) -> u32 {
        (self.sample_rate as u32) * self.block_align()
    }
}

impl Default for AudioFormat {
    /// 16 kHz, 16-bit mono, the format the speech service expects by default.
    fn default() -> Self {
        Self {
            sample_rate: SampleRate::Hz16000,
            bit_rate: BitRate::Bits16,
            channels: Channels::Mono,
        }
    }
}
