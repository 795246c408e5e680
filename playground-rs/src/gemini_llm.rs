use async_trait::async_trait;
use base64::{Engine, engine::general_purpose};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{AdapterError, AdapterResult};
use crate::llm_client::LLMClient;
use crate::llm_types::{GenerateRequest, Part};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// [`LLMClient`] implementation backed by the Gemini `generateContent`
/// REST endpoint.
///
/// The client authenticates with a `key` query parameter and speaks the
/// camelCase JSON envelope of the generative language API. Binary parts
/// are base64-encoded at request-build time.
#[derive(Clone, Debug)]
pub struct GeminiLLM {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl GeminiLLM {
    /// Creates a client for the hosted endpoint.
    ///
    /// A blank API key is rejected as a configuration error.
    pub fn new(api_key: impl Into<String>) -> AdapterResult<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL, used by tests and
    /// proxy deployments.
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> AdapterResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AdapterError::Configuration("API key is not set".into()));
        }
        let base_url = Url::parse(base_url)
            .map_err(|e| AdapterError::Configuration(format!("invalid base url: {e}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        })
    }

    fn endpoint(&self, model: &str) -> AdapterResult<Url> {
        let mut url = self
            .base_url
            .join(&format!("v1beta/models/{model}:generateContent"))
            .map_err(|e| AdapterError::Configuration(format!("invalid model path: {e}")))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl LLMClient for GeminiLLM {
    async fn generate(&self, request: GenerateRequest) -> AdapterResult<String> {
        let url = self.endpoint(&request.model)?;
        let body = WireRequest::from(&request);
        tracing::debug!(
            model = %request.model,
            parts = request.parts.len(),
            structured = request.response_schema.is_some(),
            "dispatching generateContent"
        );

        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AdapterError::Service(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(%status, %detail, "model endpoint returned an error");
            return Err(AdapterError::Service(format!(
                "model endpoint returned {status}: {detail}"
            )));
        }

        let envelope: WireResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::Service(e.to_string()))?;
        Ok(envelope.into_text())
    }
}

// Request envelope. Field names follow the REST contract, hence the
// camelCase renames.

#[derive(Serialize)]
struct WireRequest {
    contents: Vec<WireContent>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct WireContent {
    parts: Vec<WirePart>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum WirePart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

impl From<&GenerateRequest> for WireRequest {
    fn from(request: &GenerateRequest) -> Self {
        let parts = request
            .parts
            .iter()
            .map(|part| match part {
                Part::Text(text) => WirePart::Text { text: text.clone() },
                Part::Blob { mime_type, data } => WirePart::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.clone(),
                        data: general_purpose::STANDARD.encode(data),
                    },
                },
            })
            .collect();
        WireRequest {
            contents: vec![WireContent { parts }],
            system_instruction: request.system_instruction.as_ref().map(|text| WireContent {
                parts: vec![WirePart::Text { text: text.clone() }],
            }),
            generation_config: request.response_schema.as_ref().map(|schema| {
                GenerationConfig {
                    response_mime_type: "application/json".into(),
                    response_schema: schema.clone(),
                }
            }),
        }
    }
}

// Response envelope. Kept deliberately loose: a safety-blocked candidate
// arrives with no content, and future part kinds must not break decoding.

#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Deserialize)]
struct WireCandidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl WireResponse {
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn reply(text: &str) -> Value {
        json!({
            "candidates": [
                {"content": {"parts": [{"text": text}]}}
            ]
        })
    }

    #[tokio::test]
    async fn sends_key_and_returns_text() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1beta/models/gemini-2.5-flash:generateContent")
                    .query_param("key", "secret")
                    .body_contains("\"contents\"");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(reply("hello"));
            })
            .await;

        let llm = GeminiLLM::with_base_url("secret", &server.base_url()).unwrap();
        let out = llm
            .generate(GenerateRequest::new("gemini-2.5-flash", "hi"))
            .await
            .unwrap();
        assert_eq!(out, "hello");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn encodes_binary_parts_as_inline_data() {
        let server = MockServer::start_async().await;
        let encoded = general_purpose::STANDARD.encode(b"PNGdata");
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .body_contains("\"inlineData\"")
                    .body_contains(&encoded)
                    .body_contains("image/png");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(reply("a cat"));
            })
            .await;

        let llm = GeminiLLM::with_base_url("secret", &server.base_url()).unwrap();
        let request = GenerateRequest::from_parts(
            "gemini-2.5-flash",
            vec![
                Part::Blob {
                    mime_type: "image/png".into(),
                    data: b"PNGdata".to_vec(),
                },
                Part::Text("describe".into()),
            ],
        );
        assert_eq!(llm.generate(request).await.unwrap(), "a cat");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn structured_requests_carry_schema_and_mime() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .body_contains("\"responseSchema\"")
                    .body_contains("application/json")
                    .body_contains("\"systemInstruction\"");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(reply("[]"));
            })
            .await;

        let llm = GeminiLLM::with_base_url("secret", &server.base_url()).unwrap();
        let request = GenerateRequest::new("gemini-2.5-flash", "parse")
            .system("you are a robot")
            .schema(json!({"type": "ARRAY"}));
        assert_eq!(llm.generate(request).await.unwrap(), "[]");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_a_service_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(429).body("quota exhausted");
            })
            .await;

        let llm = GeminiLLM::with_base_url("secret", &server.base_url()).unwrap();
        let err = llm
            .generate(GenerateRequest::new("gemini-2.5-flash", "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::Service(_)));
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn missing_candidates_decode_to_empty_text() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({}));
            })
            .await;

        let llm = GeminiLLM::with_base_url("secret", &server.base_url()).unwrap();
        let out = llm
            .generate(GenerateRequest::new("gemini-2.5-flash", "hi"))
            .await
            .unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn blank_key_is_a_configuration_error() {
        let err = GeminiLLM::new("  ").unwrap_err();
        assert!(matches!(err, AdapterError::Configuration(_)));
    }
}
