use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::{Engine, engine::general_purpose};
use serde::{Deserialize, Serialize};

use playground_rs::{
    AdapterError, CommandParser, ImageDescriber, LLMClient, NlpTask, TextAnalyzer,
};

/// Shared handles to the three panel adapters.
///
/// The adapters are stateless; one model client is shared across all of
/// them and panels stay independently concurrent.
pub struct AppState {
    pub analyzer: TextAnalyzer,
    pub describer: ImageDescriber,
    pub parser: CommandParser,
}

impl AppState {
    pub fn new(llm: Arc<dyn LLMClient>, model: &str) -> Self {
        Self {
            analyzer: TextAnalyzer::new(llm.clone(), model),
            describer: ImageDescriber::new(llm.clone(), model),
            parser: CommandParser::new(llm, model),
        }
    }
}

/// Builds the router exposing the three panel endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/api/nlp", post(analyze_text))
        .route("/api/vision", post(describe_image))
        .route("/api/robotics", post(parse_command))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Deserialize)]
struct NlpRequest {
    task: NlpTask,
    text: String,
    #[serde(default, alias = "targetLanguage")]
    target_language: Option<String>,
}

#[derive(Deserialize)]
struct VisionRequest {
    /// Base64 image payload; a `data:` URL prefix is tolerated.
    data: String,
    #[serde(alias = "mimeType")]
    mime_type: String,
}

#[derive(Deserialize)]
struct RoboticsRequest {
    command: String,
}

#[derive(Serialize)]
#[serde(untagged)]
enum PanelReply {
    Output { output: String },
    Error { error: String },
}

async fn analyze_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NlpRequest>,
) -> Json<PanelReply> {
    match state
        .analyzer
        .analyze(req.task, &req.text, req.target_language.as_deref())
        .await
    {
        Ok(output) => Json(PanelReply::Output { output }),
        // Pre-dispatch rejections read as instructions, not failures.
        Err(e @ AdapterError::Validation(_)) => Json(PanelReply::Error {
            error: e.to_string(),
        }),
        Err(e) => Json(PanelReply::Error {
            error: format!("Analysis Failed: {e}"),
        }),
    }
}

async fn describe_image(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VisionRequest>,
) -> Response {
    let encoded = req
        .data
        .split_once("base64,")
        .map(|(_, rest)| rest.to_owned())
        .unwrap_or(req.data);
    let bytes = match general_purpose::STANDARD.decode(encoded.trim()) {
        Ok(bytes) => bytes,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(PanelReply::Error {
                    error: format!("invalid base64 payload: {e}"),
                }),
            )
                .into_response();
        }
    };
    let output = state
        .describer
        .describe_or_apologize(&bytes, &req.mime_type)
        .await;
    Json(PanelReply::Output { output }).into_response()
}

async fn parse_command(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RoboticsRequest>,
) -> Json<PanelReply> {
    Json(PanelReply::Output {
        output: state.parser.parse(&req.command).await,
    })
}
