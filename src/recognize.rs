//! Recognition adapter.
//!
//! Boundary to the external vision model. The request pins decoding to a
//! deterministic configuration (temperature 0, top-p 1, seed 0) and
//! constrains the output to a JSON array of candidate objects, so repeated
//! calls on the same photo produce the same candidates. Service failures
//! surface as [`BinderError::Recognition`]; a payload violating the schema
//! surfaces as a JSON error. No retry happens here -- model calls are costly
//! and retry policy belongs to the caller.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::json;

use crate::config;
use crate::error::{BinderError, Result};
use crate::models::RawCandidate;

/// Anything that can turn a photo into card candidates.
pub trait Recognizer: Send + Sync {
    fn identify(&self, image: &[u8]) -> Result<Vec<RawCandidate>>;
}

// ---------------------------------------------------------------------------
// GeminiRecognizer
// ---------------------------------------------------------------------------

/// Recognizer backed by the Gemini `generateContent` REST endpoint.
pub struct GeminiRecognizer {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
    /// Full endpoint override, used by tests to point at a local server.
    endpoint: Option<String>,
}

impl GeminiRecognizer {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key: api_key.into(),
            model: config::DETECTION_MODEL.to_string(),
            endpoint: None,
        }
    }

    /// Use a different model than [`config::DETECTION_MODEL`].
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Replace the generated endpoint URL entirely.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    fn request_body(&self, image: &[u8]) -> serde_json::Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [
                    {
                        "inline_data": {
                            "mime_type": "image/jpeg",
                            "data": BASE64.encode(image),
                        }
                    },
                    { "text": "extract the cards of this picture" }
                ]
            }],
            "systemInstruction": {
                "parts": [{ "text": config::CARD_DETECTION_PROMPT }]
            },
            "generationConfig": {
                "temperature": 0,
                "topP": 1,
                "seed": 0,
                "maxOutputTokens": 65535,
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "license": { "type": "STRING" },
                            "set_id": { "type": "STRING" },
                            "card_number": { "type": "STRING" },
                            "card_name": { "type": "STRING" }
                        }
                    }
                }
            }
        })
    }
}

impl Recognizer for GeminiRecognizer {
    fn identify(&self, image: &[u8]) -> Result<Vec<RawCandidate>> {
        let url = match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => config::generate_url(&self.model),
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&self.request_body(image))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(BinderError::Recognition(format!(
                "recognition service returned {status}: {body}"
            )));
        }

        let payload: serde_json::Value = response.json()?;
        let text = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                BinderError::Recognition("response contains no candidate text".into())
            })?;

        // The model was asked for a JSON array of candidates; anything else
        // is a schema violation and fails deserialization.
        let candidates: Vec<RawCandidate> = serde_json::from_str(text)?;
        Ok(candidates)
    }
}
