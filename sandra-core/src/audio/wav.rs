//! Mono 16-bit PCM WAV containers

use std::time::Duration;

use super::{AudioError, AudioProfile};

pub const HEADER_LEN: usize = 44;
const FMT_CHUNK_LEN: u32 = 16;
const FORMAT_PCM: u16 = 1;
const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;
const BYTES_PER_SAMPLE: u32 = (BITS_PER_SAMPLE / 8) as u32;
const MAX_SAMPLES: usize = (u32::MAX as usize - 36) / BYTES_PER_SAMPLE as usize;
const MAX_SAMPLE_RATE: u32 = u32::MAX / BYTES_PER_SAMPLE;

/// A complete, playable WAV container. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavClip {
    bytes: Vec<u8>,
    sample_rate: u32,
}

impl WavClip {
    /// Wrap an existing container after checking it holds mono 16-bit PCM
    /// behind a canonical 44-byte header.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, AudioError> {
        let (sample_rate, _) = decode_wav(&bytes)?;
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate(sample_rate.to_string()));
        }
        Ok(Self { bytes, sample_rate })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }

    pub fn sample_count(&self) -> usize {
        (self.bytes.len() - HEADER_LEN) / BYTES_PER_SAMPLE as usize
    }

    pub fn profile(&self) -> AudioProfile {
        AudioProfile::mono(self.sample_rate)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.sample_count() as f64 / self.sample_rate as f64)
    }
}

impl AsRef<[u8]> for WavClip {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Encode samples as a mono, 16-bit, little-endian WAV container.
///
/// # Panics
///
/// Panics if `sample_rate` is zero or the rate or payload would not fit the
/// 32-bit fields of the header. [`try_encode_wav`] reports these as errors.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> WavClip {
    assert!(sample_rate > 0, "sample rate must be positive");
    assert!(
        sample_rate <= MAX_SAMPLE_RATE,
        "sample rate too large for a WAV container"
    );
    assert!(
        samples.len() <= MAX_SAMPLES,
        "too many samples for a WAV container"
    );

    let byte_rate = sample_rate * u32::from(CHANNELS) * BYTES_PER_SAMPLE;
    let block_align = CHANNELS * BITS_PER_SAMPLE / 8;
    let data_len = samples.len() as u32 * BYTES_PER_SAMPLE;

    let mut bytes = Vec::with_capacity(HEADER_LEN + data_len as usize);

    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
    bytes.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    bytes.extend_from_slice(&CHANNELS.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&byte_rate.to_le_bytes());
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }

    WavClip { bytes, sample_rate }
}

/// Checked form of [`encode_wav`] for audio whose rate comes from outside
/// the crate.
pub fn try_encode_wav(samples: &[i16], sample_rate: u32) -> Result<WavClip, AudioError> {
    if sample_rate == 0 || sample_rate > MAX_SAMPLE_RATE {
        return Err(AudioError::InvalidSampleRate(sample_rate.to_string()));
    }
    if samples.len() > MAX_SAMPLES {
        return Err(AudioError::PayloadTooLarge(samples.len()));
    }
    Ok(encode_wav(samples, sample_rate))
}

/// Header fields of a canonical 44-byte WAV header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub riff_len: u32,
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_len: u32,
}

impl WavHeader {
    pub fn parse(bytes: &[u8]) -> Result<Self, AudioError> {
        if bytes.len() < HEADER_LEN {
            return Err(malformed(format!(
                "{} bytes is shorter than the {HEADER_LEN}-byte header",
                bytes.len()
            )));
        }

        expect_tag(bytes, 0, b"RIFF")?;
        expect_tag(bytes, 8, b"WAVE")?;
        expect_tag(bytes, 12, b"fmt ")?;
        expect_tag(bytes, 36, b"data")?;

        let fmt_len = read_u32(bytes, 16);
        if fmt_len != FMT_CHUNK_LEN {
            return Err(malformed(format!("fmt chunk length {fmt_len}")));
        }

        Ok(Self {
            riff_len: read_u32(bytes, 4),
            audio_format: read_u16(bytes, 20),
            channels: read_u16(bytes, 22),
            sample_rate: read_u32(bytes, 24),
            byte_rate: read_u32(bytes, 28),
            block_align: read_u16(bytes, 32),
            bits_per_sample: read_u16(bytes, 34),
            data_len: read_u32(bytes, 40),
        })
    }

    pub fn sample_count(&self) -> usize {
        self.data_len as usize / BYTES_PER_SAMPLE as usize
    }
}

/// Read back a container produced by [`encode_wav`], returning the sample
/// rate and samples.
pub fn decode_wav(bytes: &[u8]) -> Result<(u32, Vec<i16>), AudioError> {
    let header = WavHeader::parse(bytes)?;

    if header.audio_format != FORMAT_PCM
        || header.channels != CHANNELS
        || header.bits_per_sample != BITS_PER_SAMPLE
    {
        return Err(malformed(format!(
            "expected mono 16-bit PCM, found format {} with {} channels at {} bits",
            header.audio_format, header.channels, header.bits_per_sample
        )));
    }

    let payload = &bytes[HEADER_LEN..];
    if header.data_len as usize != payload.len() {
        return Err(malformed(format!(
            "declared payload {} bytes, found {}",
            header.data_len,
            payload.len()
        )));
    }
    if header.riff_len != 36 + header.data_len {
        return Err(malformed(format!("RIFF length {}", header.riff_len)));
    }

    let samples = super::samples_from_le_bytes(payload)?;
    Ok((header.sample_rate, samples))
}

fn expect_tag(bytes: &[u8], offset: usize, tag: &[u8; 4]) -> Result<(), AudioError> {
    if &bytes[offset..offset + 4] != tag {
        return Err(malformed(format!(
            "expected {:?} at offset {offset}",
            String::from_utf8_lossy(tag)
        )));
    }
    Ok(())
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn malformed(reason: String) -> AudioError {
    AudioError::MalformedContainer(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_known_samples_layout() {
        let clip = encode_wav(&[0, -1, 32767, -32768], 16000);
        let bytes = clip.as_bytes();

        assert_eq!(bytes.len(), 52);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[4..8], &44u32.to_le_bytes());
        assert_eq!(&bytes[8..16], b"WAVEfmt ");
        assert_eq!(&bytes[16..20], &16u32.to_le_bytes());
        assert_eq!(&bytes[20..22], &[1, 0]);
        assert_eq!(&bytes[22..24], &[1, 0]);
        assert_eq!(&bytes[24..28], &[0x80, 0x3E, 0x00, 0x00]);
        assert_eq!(&bytes[28..32], &32000u32.to_le_bytes());
        assert_eq!(&bytes[32..34], &[2, 0]);
        assert_eq!(&bytes[34..36], &[16, 0]);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(&bytes[40..44], &8u32.to_le_bytes());
        assert_eq!(&bytes[44..46], &[0x00, 0x00]);
        assert_eq!(&bytes[46..48], &[0xFF, 0xFF]);
        assert_eq!(&bytes[48..50], &[0xFF, 0x7F]);
        assert_eq!(&bytes[50..52], &[0x00, 0x80]);
    }

    #[test]
    fn test_empty_samples_produce_header_only() {
        let clip = encode_wav(&[], 16000);
        let header = WavHeader::parse(clip.as_bytes()).unwrap();

        assert_eq!(clip.len(), HEADER_LEN);
        assert!(clip.is_empty());
        assert_eq!(header.data_len, 0);
        assert_eq!(header.riff_len, 36);
    }

    #[test]
    fn test_size_fields_track_sample_count() {
        for (count, rate) in [(1usize, 8000u32), (7, 16000), (480, 24000), (1001, 44100)] {
            let samples: Vec<i16> = (0..count).map(|i| (i as i16).wrapping_mul(97)).collect();
            let clip = encode_wav(&samples, rate);
            let header = WavHeader::parse(clip.as_bytes()).unwrap();

            assert_eq!(clip.len(), 44 + 2 * count);
            assert_eq!(header.riff_len as usize, 36 + 2 * count);
            assert_eq!(header.data_len as usize, 2 * count);
            assert_eq!(header.byte_rate, 2 * rate);
            assert_eq!(header.block_align, 2);
            assert_eq!(header.sample_count(), count);
        }
    }

    #[test]
    fn test_decode_returns_rate_and_samples() {
        let samples = vec![12, -340, i16::MAX, i16::MIN, 0, 5];
        let clip = encode_wav(&samples, 24000);

        let (rate, decoded) = decode_wav(clip.as_bytes()).unwrap();
        assert_eq!(rate, 24000);
        assert_eq!(decoded, samples);
        assert_eq!(clip.sample_count(), samples.len());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let samples = vec![3, 1, 4, 1, 5, 9, 2, 6];
        assert_eq!(encode_wav(&samples, 16000), encode_wav(&samples, 16000));
    }

    #[test]
    fn test_duration() {
        let clip = encode_wav(&vec![0; 8000], 16000);
        assert_eq!(clip.duration(), Duration::from_millis(500));
    }

    #[test]
    #[should_panic(expected = "sample rate must be positive")]
    fn test_zero_sample_rate_panics() {
        encode_wav(&[1, 2, 3], 0);
    }

    #[test]
    fn test_checked_encode_rejects_unusable_rates() {
        assert!(matches!(
            try_encode_wav(&[1, 2], 0),
            Err(AudioError::InvalidSampleRate(_))
        ));
        assert!(matches!(
            try_encode_wav(&[1, 2], u32::MAX),
            Err(AudioError::InvalidSampleRate(_))
        ));
        assert_eq!(
            try_encode_wav(&[1, 2], 16000).unwrap(),
            encode_wav(&[1, 2], 16000)
        );
    }

    #[test]
    fn test_from_bytes_accepts_encoded_container() {
        let clip = encode_wav(&[7, -7, 70], 8000);
        let wrapped = WavClip::from_bytes(clip.as_bytes().to_vec()).unwrap();

        assert_eq!(wrapped, clip);
        assert_eq!(wrapped.profile().sample_rate, 8000);
    }

    #[test]
    fn test_from_bytes_rejects_zero_rate_header() {
        let mut bytes = encode_wav(&[1, 2], 16000).into_bytes();
        bytes[24..28].copy_from_slice(&0u32.to_le_bytes());

        assert!(matches!(
            WavClip::from_bytes(bytes),
            Err(AudioError::InvalidSampleRate(_))
        ));
        assert!(WavClip::from_bytes(b"not a wav file".to_vec()).is_err());
    }

    #[test]
    fn test_decode_rejects_truncated_payload() {
        let clip = encode_wav(&[1, 2, 3], 16000);
        let bytes = &clip.as_bytes()[..clip.len() - 2];

        let err = decode_wav(bytes).unwrap_err();
        assert!(matches!(err, AudioError::MalformedContainer(_)));
    }

    #[test]
    fn test_parse_rejects_wrong_tag() {
        let mut bytes = encode_wav(&[1], 16000).into_bytes();
        bytes[0..4].copy_from_slice(b"RIFX");

        assert!(WavHeader::parse(&bytes).is_err());
        assert!(WavHeader::parse(&bytes[..20]).is_err());
    }

    #[test]
    fn test_standard_reader_opens_container() {
        let samples = vec![0, -1, 32767, -32768, 1234];
        let clip = encode_wav(&samples, 16000);

        let reader = hound::WavReader::new(Cursor::new(clip.into_bytes())).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);

        let read: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(read, samples);
    }
}
