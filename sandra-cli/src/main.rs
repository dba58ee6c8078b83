use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod audio;
mod commands;
mod interactive_app;

use crate::interactive_app::{AppOptions, InteractiveApp};

#[derive(Parser, Debug)]
#[command(name = "sandra")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sandra - receptionist chat assistant with synthesized speech")]
struct Args {
    /// Settings file (defaults to ~/.sandra/settings.toml)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Start with speech output muted
    #[arg(long)]
    mute: bool,

    /// Answer a single message and exit
    #[arg(long, conflicts_with = "audio")]
    text: Option<String>,

    /// Answer a single recorded WAV file (mono, 16-bit) and exit
    #[arg(long, value_name = "FILE")]
    audio: Option<PathBuf>,

    /// Directory for reply audio files
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Command used to play reply audio files (e.g. aplay, afplay)
    #[arg(long, value_name = "COMMAND")]
    player: Option<String>,
}

fn main() -> Result<()> {
    setup_tracing()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let args = Args::parse();

    info!(
        "CLI startup: mute={}, settings={:?}, one_shot={}",
        args.mute,
        args.settings,
        args.text.is_some() || args.audio.is_some()
    );

    let mut app = InteractiveApp::new(AppOptions {
        settings_path: args.settings,
        muted: args.mute,
        output_dir: args.output_dir,
        player: args.player,
    })?;

    match (args.text, args.audio) {
        (Some(text), _) => app.run_once(&text).await,
        (None, Some(audio)) => app.run_audio_once(&audio).await,
        (None, None) => app.run().await,
    }
}

fn setup_tracing() -> Result<()> {
    use std::fs;
    use tracing_subscriber::fmt;

    let home = dirs::home_dir().unwrap_or_else(std::env::temp_dir);
    let trace_dir = home.join(".sandra").join("trace");
    fs::create_dir_all(&trace_dir)?;

    let log_file = trace_dir.join("sandra.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();

    info!("Tracing initialized to {:?}", log_file);
    Ok(())
}
