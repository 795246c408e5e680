use serde_json::Value;

/// One piece of content in a model request.
///
/// Requests are ordered lists of parts so that multimodal calls can
/// interleave binary payloads with instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// Plain prompt text.
    Text(String),
    /// Raw binary payload plus the MIME type it was uploaded with.
    Blob { mime_type: String, data: Vec<u8> },
}

/// Model-agnostic description of a single-turn generation request.
///
/// Built by the adapters, consumed by an [`LLMClient`](crate::LLMClient)
/// implementation. Binary parts are carried as raw bytes; any transfer
/// encoding is the backend's concern.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Model identifier, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// Ordered request content.
    pub parts: Vec<Part>,
    /// Optional system instruction sent alongside the content.
    pub system_instruction: Option<String>,
    /// Optional schema constraining the model to structured JSON output.
    pub response_schema: Option<Value>,
}

impl GenerateRequest {
    /// Creates a single-part text request.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::from_parts(model, vec![Part::Text(prompt.into())])
    }

    /// Creates a request from pre-assembled parts.
    pub fn from_parts(model: impl Into<String>, parts: Vec<Part>) -> Self {
        Self {
            model: model.into(),
            parts,
            system_instruction: None,
            response_schema: None,
        }
    }

    /// Attaches a system instruction.
    pub fn system(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Constrains the response to JSON matching `schema`.
    pub fn schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    /// Returns the concatenated text parts, used in logging and tests.
    pub fn prompt_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::Text(t) => Some(t.as_str()),
                Part::Blob { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
