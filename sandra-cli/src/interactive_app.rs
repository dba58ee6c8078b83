use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use sandra_core::ai::{GeminiClient, GeminiProvider};
use sandra_core::audio::WavClip;
use sandra_core::chat::{FeatureReply, Reply, Session, SpeechDelivery, Status};
use sandra_core::prompt::ASSISTANT_NAME;
use sandra_core::settings::config::API_KEY_ENV;
use sandra_core::stt::GeminiStt;
use sandra_core::tts::GeminiTts;
use sandra_core::{SettingsManager, TextToSpeech};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::audio::{CompletionMonitor, FilePlayer, LocalVoice};
use crate::commands::{parse_command, CliCommand, HELP};

pub struct AppOptions {
    pub settings_path: Option<PathBuf>,
    pub muted: bool,
    pub output_dir: Option<PathBuf>,
    pub player: Option<String>,
}

pub struct InteractiveApp {
    session: Session,
    tts: Arc<dyn TextToSpeech>,
    monitor: CompletionMonitor,
}

impl InteractiveApp {
    pub fn new(options: AppOptions) -> Result<Self> {
        let settings_manager = match options.settings_path {
            Some(path) => SettingsManager::from_path(path)?,
            None => SettingsManager::new()?,
        };
        if options.muted {
            settings_manager.update_setting(|s| s.voice.muted = true);
        }
        let settings = settings_manager.settings();

        let api_key = settings.api_key().with_context(|| {
            format!(
                "No Gemini API key: set {API_KEY_ENV} or gemini.api_key in {:?}",
                settings_manager.path()
            )
        })?;

        let client = GeminiClient::new(settings.gemini_config(api_key))?;
        let model = Arc::new(GeminiProvider::new(
            client.clone(),
            settings.gemini.text_model.clone(),
        ));
        let tts: Arc<dyn TextToSpeech> =
            Arc::new(GeminiTts::new(client.clone(), settings.tts_config()));
        let stt = Arc::new(GeminiStt::new(client, settings.stt_config()));

        let output_dir = options
            .output_dir
            .unwrap_or_else(|| settings.output_dir());
        let mut monitor = CompletionMonitor::default();
        let player = FilePlayer::new(output_dir.clone(), options.player, &mut monitor)?;
        let voice = LocalVoice::new(&mut monitor);

        info!(?output_dir, model = %settings.gemini.text_model, "Session starting");

        let session = Session::new(
            model,
            tts.clone(),
            Box::new(player),
            Box::new(voice),
            settings.session_options(),
        )
        .with_listener(stt);

        Ok(Self {
            session,
            tts,
            monitor,
        })
    }

    /// Answer a single message and exit
    pub async fn run_once(&mut self, text: &str) -> Result<()> {
        if let Some(reply) = self.session.handle_utterance(text).await {
            print_reply(&reply);
        }
        Ok(())
    }

    /// Answer a single recorded WAV file and exit
    pub async fn run_audio_once(&mut self, path: &Path) -> Result<()> {
        let clip = read_recording(path)?;
        self.listen(&clip).await;
        self.print_status();
        Ok(())
    }

    async fn listen(&mut self, clip: &WavClip) {
        match self.session.listen(clip).await {
            Some(heard) => {
                println!("Tú (voz): {}", heard.transcript);
                print_reply(&heard.reply);
            }
            None if self.session.status() == Status::Ready => {
                println!("No se reconoció ninguna voz en la grabación.");
            }
            // the status line explains the failure
            None => {}
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(greeting) = self.session.state().greeting() {
            println!("{ASSISTANT_NAME}: {greeting}");
        }
        println!("(/help para ver los comandos)");
        self.print_status();

        loop {
            let line = match rl.readline("\x1b[35mTú>\x1b[0m ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(_) => break,
            };

            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            rl.add_history_entry(input)?;

            match parse_command(input) {
                CliCommand::Say(text) => {
                    if let Some(reply) = self.session.handle_utterance(&text).await {
                        print_reply(&reply);
                    }
                }
                CliCommand::Listen(path) => match read_recording(&path) {
                    Ok(clip) => self.listen(&clip).await,
                    Err(e) => {
                        warn!(error = ?e, ?path, "Unreadable recording");
                        println!("No se pudo leer la grabación: {e:#}");
                    }
                },
                CliCommand::Feature(feature) => {
                    let reply = self.session.run_feature(feature).await;
                    print_feature(&reply);
                }
                CliCommand::ToggleMute => {
                    let muted = self.session.toggle_mute();
                    println!("Voz {}", if muted { "silenciada" } else { "activada" });
                }
                CliCommand::Voices => match self.tts.list_voices().await {
                    Ok(voices) => {
                        for voice in voices {
                            println!("  {} ({})", voice.name, voice.language_code);
                        }
                    }
                    Err(e) => println!("No se pudieron listar las voces: {e:#}"),
                },
                CliCommand::Help => println!("{HELP}"),
                CliCommand::Quit => break,
                CliCommand::MissingDetails("/listen") => {
                    println!("/listen necesita la ruta de un archivo WAV mono de 16 bits");
                }
                CliCommand::MissingDetails(command) => {
                    println!("{command} necesita un texto, por ejemplo: {command} 2 adultos, 3 noches");
                }
                CliCommand::Unknown(command) => {
                    println!("Comando desconocido: {command}. Escribe /help.");
                }
            }

            self.print_status();
        }

        println!("\n¡Hasta pronto!");
        Ok(())
    }

    fn print_status(&mut self) {
        if self.session.state().is_speaking && self.monitor.is_idle() {
            self.session.finish_playback();
        }
        println!("\x1b[2m[{}]\x1b[0m", self.session.status());
    }
}

fn read_recording(path: &Path) -> Result<WavClip> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {path:?}"))?;
    WavClip::from_bytes(bytes).with_context(|| format!("{path:?} is not a mono 16-bit WAV file"))
}

fn print_reply(reply: &Reply) {
    println!("{ASSISTANT_NAME}: {}", reply.text);
    match &reply.speech {
        Some(SpeechDelivery::Played { duration, .. }) => {
            println!("\x1b[2m(audio {:.1}s)\x1b[0m", duration.as_secs_f64());
        }
        Some(SpeechDelivery::LocalFallback { .. }) => {
            println!("\x1b[2m(voz local)\x1b[0m");
        }
        Some(SpeechDelivery::Unavailable { .. }) | None => {}
    }
}

fn print_feature(reply: &FeatureReply) {
    println!("Tú: {}", reply.user_line);
    println!("{ASSISTANT_NAME}:\n{}", reply.text);
}
