pub mod ai;
pub mod audio;
pub mod chat;
pub mod playback;
pub mod prompt;
pub mod settings;
pub mod stt;
pub mod tts;

pub use ai::GenerativeModel;
pub use audio::{encode_wav, WavClip};
pub use chat::{
    FeatureRequest, HeardReply, Reply, Session, SessionOptions, SpeechDelivery, Status,
};
pub use playback::{FallbackSpeaker, PlaybackSink, WavFileSink};
pub use settings::{Settings, SettingsManager};
pub use stt::SpeechToText;
pub use tts::{SpeechOutcome, TextToSpeech};
