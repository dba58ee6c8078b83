//! Hand-off of finished audio to the platform's playback facility

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::audio::WavClip;

/// Plays encoded containers. The clip is moved in and not touched again by
/// the caller.
pub trait PlaybackSink: Send {
    fn play(&mut self, clip: WavClip) -> Result<()>;

    /// Stop whatever is currently playing. Must be harmless when idle.
    fn stop(&mut self);
}

/// Local speech synthesis used when remote audio is unavailable
pub trait FallbackSpeaker: Send {
    fn speak(&mut self, text: &str, language: &str) -> Result<()>;

    fn cancel(&mut self);
}

/// Writes every clip as a numbered `.wav` file in a directory
pub struct WavFileSink {
    dir: PathBuf,
    next_index: usize,
    last_written: Option<PathBuf>,
}

impl WavFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create audio output directory: {dir:?}"))?;

        Ok(Self {
            dir,
            next_index: 1,
            last_written: None,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }
}

impl PlaybackSink for WavFileSink {
    fn play(&mut self, clip: WavClip) -> Result<()> {
        let path = self.dir.join(format!("sandra-{:04}.wav", self.next_index));
        fs::write(&path, clip.as_bytes())
            .with_context(|| format!("Failed to write audio to {path:?}"))?;

        info!(
            ?path,
            bytes = clip.len(),
            duration_ms = clip.duration().as_millis() as u64,
            "Reply audio written"
        );
        self.next_index += 1;
        self.last_written = Some(path);
        Ok(())
    }

    fn stop(&mut self) {
        debug!("Nothing to stop for file playback");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{decode_wav, encode_wav};
    use tempfile::TempDir;

    #[test]
    fn test_file_sink_writes_numbered_clips() {
        let temp_dir = TempDir::new().unwrap();
        let mut sink = WavFileSink::new(temp_dir.path().join("audio")).unwrap();

        sink.play(encode_wav(&[1, 2, 3], 16000)).unwrap();
        sink.play(encode_wav(&[4, 5], 24000)).unwrap();

        let second = sink.last_written().unwrap().to_path_buf();
        assert_eq!(second.file_name().unwrap(), "sandra-0002.wav");

        let first = std::fs::read(sink.dir().join("sandra-0001.wav")).unwrap();
        assert_eq!(decode_wav(&first).unwrap(), (16000, vec![1, 2, 3]));

        let second = std::fs::read(second).unwrap();
        assert_eq!(decode_wav(&second).unwrap(), (24000, vec![4, 5]));
    }
}
