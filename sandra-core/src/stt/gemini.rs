//! Gemini speech recognition: the recording travels inline with an
//! instruction to transcribe it.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use super::provider::SpeechToText;
use super::types::Transcript;
use crate::ai::gemini::{
    GeminiClient, GeminiContent, GeminiPart, GeminiRequest, GeminiResponse, DEFAULT_TEXT_MODEL,
};
use crate::ai::MessageRole;
use crate::audio::WavClip;

const WAV_MIME_TYPE: &str = "audio/wav";

#[derive(Debug, Clone)]
pub struct GeminiSttConfig {
    pub model: String,
}

impl Default for GeminiSttConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_TEXT_MODEL.to_string(),
        }
    }
}

pub struct GeminiStt {
    client: GeminiClient,
    config: GeminiSttConfig,
}

impl GeminiStt {
    pub fn new(client: GeminiClient, config: GeminiSttConfig) -> Self {
        Self { client, config }
    }
}

fn transcription_prompt(language: &str) -> String {
    format!(
        "Transcribe literalmente el audio adjunto, hablado en {language}. \
Responde únicamente con el texto transcrito, sin comillas ni comentarios. \
Si no se oye ninguna voz, responde con una línea vacía."
    )
}

pub(crate) fn build_transcription_request(clip: &WavClip, language: &str) -> GeminiRequest {
    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some(MessageRole::User),
            parts: vec![
                GeminiPart::text(&transcription_prompt(language)),
                GeminiPart::inline(WAV_MIME_TYPE, STANDARD.encode(clip.as_bytes())),
            ],
        }],
        generation_config: None,
    }
}

pub(crate) fn extract_transcript(response: &GeminiResponse, language: &str) -> Result<Transcript> {
    let candidate = response
        .candidates
        .first()
        .context("No candidates in Gemini transcription response")?;

    // an empty reply means silence
    let text = candidate
        .content
        .as_ref()
        .and_then(|content| content.parts.iter().find_map(|p| p.text.as_deref()))
        .unwrap_or_default();

    Ok(Transcript {
        text: text.trim().to_string(),
        language_code: language.to_string(),
    })
}

#[async_trait]
impl SpeechToText for GeminiStt {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn transcribe(&self, clip: &WavClip, language: &str) -> Result<Transcript> {
        let request = build_transcription_request(clip, language);
        let response = self
            .client
            .generate_content(&self.config.model, &request)
            .await
            .context("Failed to transcribe speech with Gemini")?;

        let transcript = extract_transcript(&response, language)?;
        debug!(
            chars = transcript.text.len(),
            duration = ?clip.duration(),
            "Gemini transcription complete"
        );
        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::parse_response;
    use crate::audio::encode_wav;
    use serde_json::json;

    #[test]
    fn test_transcription_request_carries_wav_inline() {
        let clip = encode_wav(&[0, -1, 32767, -32768], 16000);
        let value = serde_json::to_value(build_transcription_request(&clip, "es-ES")).unwrap();

        let parts = &value["contents"][0]["parts"];
        assert_eq!(value["contents"][0]["role"], "user");
        assert!(parts[0]["text"].as_str().unwrap().contains("es-ES"));
        assert_eq!(parts[1]["inlineData"]["mimeType"], "audio/wav");

        let data = parts[1]["inlineData"]["data"].as_str().unwrap();
        assert_eq!(STANDARD.decode(data).unwrap(), clip.as_bytes());
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_extract_transcript_trims_text() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "  Quiero un piso en Ruzafa\n" }] } }]
        });
        let response = parse_response(&body.to_string()).unwrap();
        let transcript = extract_transcript(&response, "es-ES").unwrap();

        assert_eq!(transcript.text, "Quiero un piso en Ruzafa");
        assert_eq!(transcript.language_code, "es-ES");
    }

    #[test]
    fn test_empty_candidate_is_silence() {
        let response = parse_response(r#"{"candidates":[{"content":{"parts":[]}}]}"#).unwrap();
        assert!(extract_transcript(&response, "es-ES").unwrap().is_blank());
    }

    #[test]
    fn test_missing_candidates_is_an_error() {
        let response = parse_response(r#"{"candidates":[]}"#).unwrap();
        assert!(extract_transcript(&response, "es-ES").is_err());
    }
}
