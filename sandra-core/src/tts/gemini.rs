//! Gemini text-to-speech implementation

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

use super::provider::TextToSpeech;
use super::types::{AudioData, Voice};
use crate::ai::gemini::{
    GeminiClient, GeminiContent, GeminiPart, GeminiRequest, GeminiResponse, GenerationConfig,
    PrebuiltVoiceConfig, SpeechConfig, VoiceConfig, DEFAULT_TTS_MODEL,
};
use crate::audio::{decode_base64, samples_from_le_bytes, PcmFormat};

/// Prebuilt voices offered by the Gemini speech models
const PREBUILT_VOICES: &[&str] = &[
    "Kore", "Puck", "Charon", "Fenrir", "Aoede", "Leda", "Orus", "Zephyr",
];

#[derive(Debug, Clone)]
pub struct GeminiTtsConfig {
    pub model: String,
    pub voice_name: String,
    pub language_code: String,
    /// Used only when the response MIME type carries no `rate=` parameter
    pub default_sample_rate: u32,
}

impl Default for GeminiTtsConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_TTS_MODEL.to_string(),
            voice_name: "Kore".to_string(),
            language_code: "es-ES".to_string(),
            default_sample_rate: 16000,
        }
    }
}

pub struct GeminiTts {
    client: GeminiClient,
    config: GeminiTtsConfig,
}

impl GeminiTts {
    pub fn new(client: GeminiClient, config: GeminiTtsConfig) -> Self {
        Self { client, config }
    }

    fn voice(&self, name: &str) -> Voice {
        Voice {
            id: name.to_string(),
            name: name.to_string(),
            language_code: self.config.language_code.clone(),
        }
    }
}

pub(crate) fn build_speech_request(text: &str, voice_name: &str) -> GeminiRequest {
    GeminiRequest {
        contents: vec![GeminiContent {
            role: None,
            parts: vec![GeminiPart::text(text)],
        }],
        generation_config: Some(GenerationConfig {
            response_modalities: Some(vec!["AUDIO".to_string()]),
            speech_config: Some(SpeechConfig {
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig {
                        voice_name: voice_name.to_string(),
                    },
                },
            }),
            ..Default::default()
        }),
    }
}

/// Pull the inline PCM out of a speech response and decode it.
pub(crate) fn extract_audio(response: &GeminiResponse, default_rate: u32) -> Result<AudioData> {
    let inline = response
        .first_part()
        .and_then(|part| part.inline_data.as_ref())
        .context("No audio in Gemini speech response")?;
    let data = inline.data.as_deref().context("Audio part has no data")?;
    let mime_type = inline
        .mime_type
        .as_deref()
        .context("Audio part has no MIME type")?;

    let format = PcmFormat::from_mime(mime_type, default_rate)?;
    if !format.rate_declared {
        warn!(
            mime_type,
            sample_rate = format.sample_rate,
            "Speech MIME type declares no rate, assuming default"
        );
    }

    let bytes = decode_base64(data)?;
    let samples = samples_from_le_bytes(&bytes)?;

    Ok(AudioData {
        samples,
        sample_rate: format.sample_rate,
    })
}

#[async_trait]
impl TextToSpeech for GeminiTts {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    fn default_voice(&self) -> Voice {
        self.voice(&self.config.voice_name)
    }

    async fn synthesize(&self, text: &str, voice: Option<&Voice>) -> Result<AudioData> {
        let voice_name = voice
            .map(|v| v.id.as_str())
            .unwrap_or(&self.config.voice_name);

        let request = build_speech_request(text, voice_name);
        let response = self
            .client
            .generate_content(&self.config.model, &request)
            .await
            .context("Failed to synthesize speech with Gemini")?;

        let audio = extract_audio(&response, self.config.default_sample_rate)?;
        debug!(
            samples = audio.samples.len(),
            sample_rate = audio.sample_rate,
            voice = voice_name,
            "Gemini speech synthesized"
        );
        Ok(audio)
    }

    async fn list_voices(&self) -> Result<Vec<Voice>> {
        Ok(PREBUILT_VOICES.iter().map(|name| self.voice(name)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::parse_response;
    use serde_json::json;

    fn audio_response(mime: &str, data: &str) -> GeminiResponse {
        let body = json!({
            "candidates": [{ "content": { "parts": [{
                "inlineData": { "mimeType": mime, "data": data }
            }] } }]
        });
        parse_response(&body.to_string()).unwrap()
    }

    #[test]
    fn test_speech_request_shape() {
        let value = serde_json::to_value(build_speech_request("Hola", "Kore")).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{ "parts": [{ "text": "Hola" }] }],
                "generationConfig": {
                    "responseModalities": ["AUDIO"],
                    "speechConfig": {
                        "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": "Kore" } }
                    }
                }
            })
        );
    }

    #[test]
    fn test_extract_uses_declared_rate() {
        let response = audio_response("audio/L16;codec=pcm;rate=24000", "AAD///9/AIA=");
        let audio = extract_audio(&response, 16000).unwrap();

        assert_eq!(audio.sample_rate, 24000);
        assert_eq!(audio.samples, vec![0, -1, 32767, -32768]);
    }

    #[test]
    fn test_extract_falls_back_to_default_rate() {
        let response = audio_response("audio/L16;codec=pcm", "AAA=");
        let audio = extract_audio(&response, 16000).unwrap();

        assert_eq!(audio.sample_rate, 16000);
        assert_eq!(audio.samples, vec![0]);
    }

    #[test]
    fn test_extract_rejects_bad_payloads() {
        assert!(extract_audio(&audio_response("audio/L16;rate=24000", "@@@"), 16000).is_err());
        // three bytes cannot be 16-bit samples
        assert!(extract_audio(&audio_response("audio/L16;rate=24000", "AAAA"), 16000).is_err());
        assert!(extract_audio(&audio_response("audio/mpeg", "AAA="), 16000).is_err());
    }

    #[tokio::test]
    async fn test_voices_use_configured_language() {
        let client = GeminiClient::new(crate::ai::GeminiConfig::new("key".to_string())).unwrap();
        let tts = GeminiTts::new(client, GeminiTtsConfig::default());

        assert_eq!(tts.default_voice().id, "Kore");
        let voices = tts.list_voices().await.unwrap();
        assert_eq!(voices.len(), PREBUILT_VOICES.len());
        assert!(voices.iter().all(|v| v.language_code == "es-ES"));
    }

    #[test]
    fn test_extract_requires_inline_data() {
        let response =
            parse_response(r#"{"candidates":[{"content":{"parts":[{"text":"hola"}]}}]}"#)
                .unwrap();
        assert!(extract_audio(&response, 16000).is_err());
    }
}
