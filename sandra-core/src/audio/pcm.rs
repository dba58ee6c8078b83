//! Raw PCM handling for synthesized speech.
//!
//! The TTS endpoint returns base64 text carrying signed 16-bit little-endian
//! mono samples, together with a MIME type such as
//! `audio/L16;codec=pcm;rate=24000`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::{AudioError, AudioProfile};

/// Decode standard (padded) base64 into the exact bytes it represents.
pub fn decode_base64(data: &str) -> Result<Vec<u8>, AudioError> {
    Ok(STANDARD.decode(data.trim())?)
}

/// View little-endian bytes as 16-bit signed samples, in order.
pub fn samples_from_le_bytes(bytes: &[u8]) -> Result<Vec<i16>, AudioError> {
    if bytes.len() % 2 != 0 {
        return Err(AudioError::OddByteCount(bytes.len()));
    }

    Ok(bytes
        .chunks_exact(2)
        .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
        .collect())
}

/// Sample format described by the MIME type of a synthesis response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub sample_rate: u32,
    /// False when the MIME type carried no `rate` parameter and the
    /// caller-supplied default was used.
    pub rate_declared: bool,
}

impl PcmFormat {
    /// Parse a linear 16-bit PCM MIME type. `default_rate` applies only when
    /// the MIME type omits `rate=`; a declared rate always wins.
    pub fn from_mime(mime_type: &str, default_rate: u32) -> Result<Self, AudioError> {
        let mut segments = mime_type.split(';').map(str::trim);
        let essence = segments.next().unwrap_or_default().to_ascii_lowercase();

        if essence != "audio/l16" && essence != "audio/pcm" {
            return Err(AudioError::UnsupportedMime(mime_type.to_string()));
        }

        let mut sample_rate = None;
        for param in segments.filter(|s| !s.is_empty()) {
            let Some((key, value)) = param.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"');
            match key.trim().to_ascii_lowercase().as_str() {
                "rate" => {
                    let rate: u32 = value
                        .parse()
                        .map_err(|_| AudioError::InvalidSampleRate(mime_type.to_string()))?;
                    if rate == 0 {
                        return Err(AudioError::InvalidSampleRate(mime_type.to_string()));
                    }
                    sample_rate = Some(rate);
                }
                "channels" if value != "1" => {
                    return Err(AudioError::UnsupportedMime(mime_type.to_string()));
                }
                "codec" if !value.eq_ignore_ascii_case("pcm") => {
                    return Err(AudioError::UnsupportedMime(mime_type.to_string()));
                }
                _ => {}
            }
        }

        match sample_rate {
            Some(sample_rate) => Ok(Self {
                sample_rate,
                rate_declared: true,
            }),
            None if default_rate > 0 => Ok(Self {
                sample_rate: default_rate,
                rate_declared: false,
            }),
            None => Err(AudioError::InvalidSampleRate(mime_type.to_string())),
        }
    }

    pub fn profile(&self) -> AudioProfile {
        AudioProfile::mono(self.sample_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_decode_base64_exact_bytes() {
        // 0, -1, 32767, -32768 little-endian
        let bytes = decode_base64("AAD///9/AIA=").unwrap();
        assert_eq!(bytes, vec![0x00, 0x00, 0xFF, 0xFF, 0xFF, 0x7F, 0x00, 0x80]);

        let samples = samples_from_le_bytes(&bytes).unwrap();
        assert_eq!(samples, vec![0, -1, 32767, -32768]);
    }

    #[test]
    fn test_decode_base64_empty() {
        assert!(decode_base64("").unwrap().is_empty());
    }

    #[test]
    fn test_decode_base64_rejects_malformed() {
        let err = decode_base64("not*base64!").unwrap_err();
        assert!(matches!(err, AudioError::InvalidBase64(_)));
    }

    #[test]
    fn test_odd_byte_count_rejected() {
        let err = samples_from_le_bytes(&[0x01, 0x02, 0x03]).unwrap_err();
        assert!(matches!(err, AudioError::OddByteCount(3)));
    }

    #[rstest]
    #[case("audio/L16;codec=pcm;rate=24000", 24000, true)]
    #[case("audio/l16; rate=16000", 16000, true)]
    #[case("audio/L16;codec=pcm", 16000, false)]
    #[case("audio/pcm", 16000, false)]
    #[case("audio/L16;rate=8000;channels=1", 8000, true)]
    fn test_mime_sample_rate(
        #[case] mime: &str,
        #[case] expected_rate: u32,
        #[case] declared: bool,
    ) {
        let format = PcmFormat::from_mime(mime, 16000).unwrap();
        assert_eq!(format.sample_rate, expected_rate);
        assert_eq!(format.rate_declared, declared);
        assert_eq!(format.profile().channels, 1);
    }

    #[rstest]
    #[case("audio/mpeg")]
    #[case("audio/L16;channels=2")]
    #[case("audio/L16;codec=opus")]
    #[case("audio/L16;rate=0")]
    #[case("audio/L16;rate=fast")]
    fn test_mime_rejected(#[case] mime: &str) {
        assert!(PcmFormat::from_mime(mime, 16000).is_err());
    }

    #[test]
    fn test_missing_rate_without_default_is_rejected() {
        let err = PcmFormat::from_mime("audio/L16", 0).unwrap_err();
        assert!(matches!(err, AudioError::InvalidSampleRate(_)));
    }
}
