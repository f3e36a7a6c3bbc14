use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument};

use crate::config::GenAiConfig;
use super::error::GenAiError;
use super::wav::pcm_base64_to_data_uri;

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[allow(dead_code)]
    mime_type: Option<String>,
    data: String,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
    }

    fn first_text(&self) -> Option<&str> {
        self.parts()
            .filter_map(|p| p.text.as_deref())
            .find(|t| !t.trim().is_empty())
    }

    fn first_audio(&self) -> Option<&str> {
        self.parts()
            .filter_map(|p| p.inline_data.as_ref())
            .map(|d| d.data.as_str())
            .find(|d| !d.is_empty())
    }
}

/// Client for the hosted text and speech models.
#[derive(Clone)]
pub struct GenAiClient {
    http: Client,
    api_key: String,
    base_url: String,
    text_model: String,
    speech_model: String,
    default_voice: String,
}

impl GenAiClient {
    pub fn new(config: &GenAiConfig) -> Result<Self, GenAiError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(GenAiError::MissingCredential)?;
        Ok(Self {
            http: Client::new(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            speech_model: config.speech_model.clone(),
            default_voice: config.default_voice.clone(),
        })
    }

    /// Single-shot text completion.
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GenAiError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });
        let response = self.generate_content(&self.text_model, &body).await?;
        let text = response.first_text().ok_or(GenAiError::EmptyText)?;
        info!(chars = text.len(), "Text generated");
        Ok(text.to_string())
    }

    /// Narrates `text` and returns a `data:audio/wav;base64,...` URI.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn generate_speech(&self, text: &str, voice: Option<&str>) -> Result<String, GenAiError> {
        let voice = voice.filter(|v| !v.is_empty()).unwrap_or(self.default_voice.as_str());
        debug!(voice, "Requesting speech");
        let body = json!({
            "contents": [{ "parts": [{ "text": text }] }],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": { "voiceName": voice }
                    }
                }
            }
        });
        let response = self.generate_content(&self.speech_model, &body).await?;
        let audio = response.first_audio().ok_or_else(|| {
            error!("Speech response carried no audio payload");
            GenAiError::MissingAudio
        })?;
        let uri = pcm_base64_to_data_uri(audio)?;
        info!(uri_len = uri.len(), "Speech generated");
        Ok(uri)
    }

    /// Drafts a script for the order form from a short brief.
    pub async fn suggest_script(&self, brief: &str, style_tags: &[String]) -> Result<String, GenAiError> {
        let styles = if style_tags.is_empty() {
            "neutral".to_string()
        } else {
            style_tags.join(", ")
        };
        let prompt = format!(
            "Write a voice-over script for a professional narrator.\n\
             Tone: {}.\nBrief: {}\n\
             Return only the text to be read aloud, without stage directions.",
            styles,
            brief.trim()
        );
        self.generate_text(&prompt).await
    }

    async fn generate_content(&self, model: &str, body: &Value) -> Result<GenerateContentResponse, GenAiError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or(text);
            error!(status = status.as_u16(), %message, "Generation API returned an error");
            return Err(GenAiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GenAiError::MalformedResponse(e.to_string()))
    }
}
