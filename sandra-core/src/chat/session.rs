use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::ai::{GenerateRequest, GenerativeModel, Message};
use crate::audio::WavClip;
use crate::chat::features::{FeatureReply, FeatureRequest, PropertyRecommendation};
use crate::chat::state::{SessionState, Status};
use crate::playback::{FallbackSpeaker, PlaybackSink};
use crate::prompt;
use crate::stt::SpeechToText;
use crate::tts::{SpeechOutcome, TextToSpeech, Voice};

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub system_prompt: String,
    pub greeting: String,
    /// BCP 47 tag handed to the local fallback speaker
    pub language: String,
    pub voice: Option<Voice>,
    pub muted: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            system_prompt: prompt::SYSTEM_PROMPT.to_string(),
            greeting: prompt::GREETING.to_string(),
            language: prompt::DEFAULT_LANGUAGE.to_string(),
            voice: None,
            muted: false,
        }
    }
}

/// How a reply ended up being voiced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechDelivery {
    /// Remote audio handed to the playback sink
    Played { sample_rate: u32, duration: Duration },
    /// Remote audio failed; the local speaker took over
    LocalFallback { reason: String },
    /// Neither remote nor local speech worked
    Unavailable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// `None` when muted
    pub speech: Option<SpeechDelivery>,
}

/// A recorded turn: what was recognized and how it was answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeardReply {
    pub transcript: String,
    pub reply: Reply,
}

/// Synthesize `text` and encode it, mapping every failure to the fallback
/// variant.
pub async fn synthesize_speech(
    tts: &dyn TextToSpeech,
    text: &str,
    voice: Option<&Voice>,
) -> SpeechOutcome {
    let clip = tts
        .synthesize(text, voice)
        .await
        .and_then(|audio| audio.into_wav().map_err(Into::into));

    match clip {
        Ok(clip) => SpeechOutcome::Audio(clip),
        Err(e) => {
            warn!(error = ?e, provider = tts.name(), "Remote speech failed, using local speech");
            SpeechOutcome::Fallback {
                text: text.to_string(),
                reason: format!("{e:#}"),
            }
        }
    }
}

/// A single conversation with the assistant
pub struct Session {
    model: Arc<dyn GenerativeModel>,
    tts: Arc<dyn TextToSpeech>,
    playback: Box<dyn PlaybackSink>,
    fallback: Box<dyn FallbackSpeaker>,
    listener: Option<Arc<dyn SpeechToText>>,
    options: SessionOptions,
    state: SessionState,
}

impl Session {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        tts: Arc<dyn TextToSpeech>,
        playback: Box<dyn PlaybackSink>,
        fallback: Box<dyn FallbackSpeaker>,
        options: SessionOptions,
    ) -> Self {
        let mut state = SessionState::new(&options.greeting);
        state.is_muted = options.muted;

        Self {
            model,
            tts,
            playback,
            fallback,
            listener: None,
            options,
            state,
        }
    }

    /// Accept recorded speech through `listener`.
    pub fn with_listener(mut self, listener: Arc<dyn SpeechToText>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    /// Answer one user turn and voice the answer. Blank input is ignored.
    pub async fn handle_utterance(&mut self, text: &str) -> Option<Reply> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let reply = self.generate_reply(text).await;
        self.state.record_exchange(text, &reply);
        let speech = self.speak(&reply).await;

        Some(Reply {
            text: reply,
            speech,
        })
    }

    /// Transcribe a recorded turn and answer it like typed input. Returns
    /// `None` when nothing usable was heard; the status says why.
    pub async fn listen(&mut self, clip: &WavClip) -> Option<HeardReply> {
        let Some(listener) = self.listener.clone() else {
            self.state.status = Status::ListenUnavailable;
            return None;
        };
        if clip.is_empty() {
            warn!("Recording has no samples");
            self.state.status = Status::ListenError;
            return None;
        }

        self.state.status = Status::Listening;
        let transcript = match listener.transcribe(clip, &self.options.language).await {
            Ok(transcript) if !transcript.is_blank() => transcript,
            Ok(_) => {
                debug!("No speech recognized");
                self.state.status = Status::Ready;
                return None;
            }
            Err(e) => {
                warn!(error = ?e, provider = listener.name(), "Speech recognition failed");
                self.state.status = Status::ListenError;
                return None;
            }
        };

        let reply = self.handle_utterance(&transcript.text).await?;
        Some(HeardReply {
            transcript: transcript.text,
            reply,
        })
    }

    /// Ask the text model for a reply in the context of the conversation so
    /// far. Failures become an apology rather than an error.
    pub async fn generate_reply(&mut self, prompt_text: &str) -> String {
        self.state.status = Status::Thinking;

        let mut messages = Vec::with_capacity(self.state.history().len() + 3);
        messages.push(Message::user(&self.options.system_prompt));
        messages.push(Message::model(prompt::SYSTEM_ACK));
        messages.extend(self.state.history().iter().cloned());
        messages.push(Message::user(prompt_text));

        debug!(turns = messages.len(), "Generating reply");

        match self.model.generate(GenerateRequest::new(messages)).await {
            Ok(response) => match response.text {
                Some(text) if !text.trim().is_empty() => text,
                _ => {
                    warn!("Model returned no text");
                    prompt::EMPTY_REPLY_APOLOGY.to_string()
                }
            },
            Err(e) => {
                warn!(error = ?e, provider = self.model.name(), "Failed to generate reply");
                prompt::CONNECTION_APOLOGY.to_string()
            }
        }
    }

    /// Voice `text`, superseding anything still playing. Returns `None` when
    /// muted.
    pub async fn speak(&mut self, text: &str) -> Option<SpeechDelivery> {
        if self.state.is_muted {
            self.state.status = Status::Muted;
            return None;
        }

        self.stop_speech();
        self.state.status = Status::Speaking;

        let outcome = synthesize_speech(self.tts.as_ref(), text, self.options.voice.as_ref()).await;
        let delivery = match outcome {
            SpeechOutcome::Audio(clip) => {
                let sample_rate = clip.profile().sample_rate;
                let duration = clip.duration();
                match self.playback.play(clip) {
                    Ok(()) => SpeechDelivery::Played {
                        sample_rate,
                        duration,
                    },
                    Err(e) => {
                        warn!(error = ?e, "Playback failed, using local speech");
                        self.speak_locally(text, format!("{e:#}"))
                    }
                }
            }
            SpeechOutcome::Fallback { text, reason } => self.speak_locally(&text, reason),
        };

        match &delivery {
            SpeechDelivery::Played { .. } | SpeechDelivery::LocalFallback { .. } => {
                self.state.is_speaking = true;
            }
            SpeechDelivery::Unavailable { .. } => {
                self.state.is_speaking = false;
                self.state.status = Status::AudioUnavailable;
            }
        }

        Some(delivery)
    }

    fn speak_locally(&mut self, text: &str, reason: String) -> SpeechDelivery {
        match self.fallback.speak(text, &self.options.language) {
            Ok(()) => SpeechDelivery::LocalFallback { reason },
            Err(e) => {
                warn!(error = ?e, "Local speech failed");
                SpeechDelivery::Unavailable {
                    reason: format!("{reason}; local speech: {e:#}"),
                }
            }
        }
    }

    /// Called by the playback side when the current utterance has finished.
    pub fn finish_playback(&mut self) {
        self.state.is_speaking = false;
        self.state.status = Status::Ready;
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.state.is_muted = muted;
        if muted {
            self.stop_speech();
            self.state.is_speaking = false;
        }
        info!(muted, "Speech output toggled");
    }

    /// Flip the mute flag, returning the new value.
    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.state.is_muted;
        self.set_muted(muted);
        muted
    }

    fn stop_speech(&mut self) {
        self.playback.stop();
        self.fallback.cancel();
    }

    /// Run a one-shot helper. Results are shown to the user but do not join
    /// the conversation history.
    pub async fn run_feature(&mut self, feature: FeatureRequest) -> FeatureReply {
        let user_line = feature.user_line();
        info!(?feature, "Running feature request");

        if feature == FeatureRequest::RecommendProperty {
            self.state.status = Status::Searching;
            return match self.recommend_property(&feature).await {
                Some(recommendation) => {
                    self.state.status = Status::RecommendationReady;
                    FeatureReply {
                        user_line,
                        text: recommendation.to_markdown(),
                        succeeded: true,
                        recommendation: Some(recommendation),
                    }
                }
                None => {
                    self.state.status = Status::Error;
                    FeatureReply {
                        user_line,
                        text: prompt::RECOMMENDATION_APOLOGY.to_string(),
                        succeeded: false,
                        recommendation: None,
                    }
                }
            };
        }

        self.state.status = Status::Thinking;
        let result = self
            .model
            .generate(GenerateRequest::single(feature.prompt()))
            .await;

        match result {
            Ok(response) if response.text.as_deref().is_some_and(|t| !t.trim().is_empty()) => {
                self.state.status = Status::Ready;
                FeatureReply {
                    user_line,
                    text: response.text.unwrap_or_default(),
                    succeeded: true,
                    recommendation: None,
                }
            }
            other => {
                if let Err(e) = other {
                    warn!(error = ?e, "Feature request failed");
                }
                self.state.status = Status::Error;
                FeatureReply {
                    user_line,
                    text: prompt::FEATURE_APOLOGY.to_string(),
                    succeeded: false,
                    recommendation: None,
                }
            }
        }
    }

    async fn recommend_property(&self, feature: &FeatureRequest) -> Option<PropertyRecommendation> {
        let mut request = GenerateRequest::single(feature.prompt());
        if let Some(schema) = feature.response_schema() {
            request = request.with_json_schema(schema);
        }

        let response = match self.model.generate(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = ?e, "Failed to get a property recommendation");
                return None;
            }
        };

        let json = response.text?;
        serde_json::from_str(&json)
            .map_err(|e| warn!(error = ?e, %json, "Recommendation was not valid JSON"))
            .ok()
    }
}
