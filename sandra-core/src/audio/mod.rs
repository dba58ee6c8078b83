//! Decoding of synthesized PCM and encoding into playable WAV containers

pub mod pcm;
pub mod wav;

use thiserror::Error;

pub use pcm::{decode_base64, samples_from_le_bytes, PcmFormat};
pub use wav::{decode_wav, encode_wav, try_encode_wav, WavClip, WavHeader};

/// Audio format profile specifying sample rate and channel count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioProfile {
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioProfile {
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("invalid base64 audio payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("PCM payload of {0} bytes is not a whole number of 16-bit samples")]
    OddByteCount(usize),

    #[error("unsupported audio MIME type: {0}")]
    UnsupportedMime(String),

    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(String),

    #[error("{0} samples do not fit a WAV container")]
    PayloadTooLarge(usize),

    #[error("malformed WAV container: {0}")]
    MalformedContainer(String),
}
