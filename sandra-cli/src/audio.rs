//! Process-backed playback and local speech for the terminal

use anyhow::{Context, Result};
use sandra_core::audio::WavClip;
use sandra_core::{FallbackSpeaker, PlaybackSink, WavFileSink};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

type SharedChild = Arc<Mutex<Option<Child>>>;

/// Reports whether the last started process has exited
#[derive(Clone, Default)]
pub struct CompletionMonitor {
    children: Vec<SharedChild>,
}

impl CompletionMonitor {
    pub fn is_idle(&self) -> bool {
        self.children.iter().all(|child| {
            let mut guard = child.lock().unwrap();
            let finished = match guard.as_mut() {
                Some(process) => !matches!(process.try_wait(), Ok(None)),
                None => return true,
            };
            if finished {
                *guard = None;
            }
            finished
        })
    }

    fn watch(&mut self, child: SharedChild) {
        self.children.push(child);
    }
}

fn kill(child: &SharedChild) {
    if let Some(mut process) = child.lock().unwrap().take() {
        if let Err(e) = process.kill() {
            debug!(error = ?e, "Process already exited");
        }
        let _ = process.wait();
    }
}

/// Writes each clip to disk and, when a player command is configured,
/// plays the file with it
pub struct FilePlayer {
    files: WavFileSink,
    player: Option<String>,
    current: SharedChild,
}

impl FilePlayer {
    pub fn new(dir: PathBuf, player: Option<String>, monitor: &mut CompletionMonitor) -> Result<Self> {
        let current = SharedChild::default();
        monitor.watch(current.clone());

        Ok(Self {
            files: WavFileSink::new(dir)?,
            player,
            current,
        })
    }
}

impl PlaybackSink for FilePlayer {
    fn play(&mut self, clip: WavClip) -> Result<()> {
        self.files.play(clip)?;

        let (Some(player), Some(path)) = (&self.player, self.files.last_written()) else {
            return Ok(());
        };

        let child = Command::new(player)
            .arg(path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start audio player {player:?}"))?;
        *self.current.lock().unwrap() = Some(child);
        Ok(())
    }

    fn stop(&mut self) {
        kill(&self.current);
    }
}

/// Speaks with the first installed command-line synthesizer
pub struct LocalVoice {
    current: SharedChild,
}

impl LocalVoice {
    pub fn new(monitor: &mut CompletionMonitor) -> Self {
        let current = SharedChild::default();
        monitor.watch(current.clone());
        Self { current }
    }

    fn spawn(text: &str, language: &str) -> Result<Child> {
        let short_language = language.split('-').next().unwrap_or(language);

        let espeak = Command::new("espeak-ng")
            .args(["-v", short_language, text])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        if let Ok(child) = espeak {
            return Ok(child);
        }

        Command::new("say")
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context("No local speech synthesizer found (tried espeak-ng and say)")
    }
}

impl FallbackSpeaker for LocalVoice {
    fn speak(&mut self, text: &str, language: &str) -> Result<()> {
        kill(&self.current);
        let child = Self::spawn(text, language).map_err(|e| {
            warn!(error = ?e, "Local speech unavailable");
            e
        })?;
        *self.current.lock().unwrap() = Some(child);
        Ok(())
    }

    fn cancel(&mut self) {
        kill(&self.current);
    }
}
