use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{AdapterError, AdapterResult};
use crate::llm_client::LLMClient;
use crate::llm_types::GenerateRequest;

/// Message shown when the command box is empty.
pub const PLEASE_ENTER_COMMAND: &str = "Please enter a command.";

/// Message folded into the ERROR record on any dispatch or decode failure.
pub const PARSE_FAILURE_NOTICE: &str = "Failed to parse command due to an API error.";

/// System instruction naming the closed object vocabulary and action set.
pub const SYSTEM_INSTRUCTION: &str = "You are a robotics control system. Your task is to translate natural language commands into a structured list of actions. The available objects are: 'red cube', 'green sphere', 'blue cylinder'. The only actions are 'PICK' and 'PLACE'. If a command cannot be parsed, use the 'UNKNOWN' action and describe the issue in the target field.";

/// The closed action vocabulary the model is allowed to emit.
///
/// Anything else in the `action` field fails decoding as a schema
/// violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionKind {
    Pick,
    Place,
    Unknown,
}

/// One step of an execution plan.
///
/// Field declaration order is the serialization order; the UI depends on
/// `action`, `target`, `destination` appearing exactly like that, with
/// `destination` present as `null` when the model omitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotAction {
    pub action: ActionKind,
    pub target: String,
    #[serde(default)]
    pub destination: Option<String>,
}

// Degrade records share the plan's shape but carry ERROR/INFO pseudo
// actions, so the caller renders one JSON blob either way.
#[derive(Serialize)]
struct StatusRecord<'a> {
    action: &'a str,
    target: &'a str,
    destination: Option<&'a str>,
}

fn status_json(action: &str, message: &str) -> String {
    let record = [StatusRecord {
        action,
        target: message,
        destination: None,
    }];
    serde_json::to_string_pretty(&record).unwrap_or_else(|_| "[]".into())
}

fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "action": {
                    "type": "STRING",
                    "description": "The action to perform: \"PICK\", \"PLACE\", or \"UNKNOWN\"."
                },
                "target": {
                    "type": "STRING",
                    "description": "The object to interact with (e.g., \"red cube\")."
                },
                "destination": {
                    "type": "STRING",
                    "description": "The destination for the PLACE action (e.g., \"blue cylinder\"). Can be null for PICK actions."
                }
            },
            "required": ["action", "target"]
        }
    })
}

fn decode_plan(reply: &str) -> AdapterResult<Vec<RobotAction>> {
    serde_json::from_str(reply.trim()).map_err(|e| AdapterError::SchemaViolation(e.to_string()))
}

/// Adapter for the robotics command panel.
pub struct CommandParser {
    llm: Arc<dyn LLMClient>,
    model: String,
}

impl CommandParser {
    /// Creates a parser dispatching to `llm` with the given model name.
    pub fn new(llm: Arc<dyn LLMClient>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    /// Translates `command` into an ordered execution plan.
    ///
    /// The request constrains the model with [`SYSTEM_INSTRUCTION`] and a
    /// strict response schema, and the returned text is re-validated here
    /// rather than trusted to conform.
    pub async fn plan(&self, command: &str) -> AdapterResult<Vec<RobotAction>> {
        let request = GenerateRequest::new(&self.model, format!("Parse this command: \"{command}\""))
            .system(SYSTEM_INSTRUCTION)
            .schema(response_schema());
        tracing::debug!(%command, "dispatching robotics command");
        let reply = self.llm.generate(request).await?;
        decode_plan(&reply)
    }

    /// Presentation surface: always returns pretty-printed JSON in the
    /// plan schema, encoding failures as data.
    ///
    /// A blank command short-circuits to an INFO record without invoking
    /// the model; every other failure becomes the fixed ERROR record.
    pub async fn parse(&self, command: &str) -> String {
        if command.trim().is_empty() {
            return status_json("INFO", PLEASE_ENTER_COMMAND);
        }
        match self.plan(command).await {
            Ok(plan) => serde_json::to_string_pretty(&plan)
                .unwrap_or_else(|_| status_json("ERROR", PARSE_FAILURE_NOTICE)),
            Err(e) => {
                tracing::warn!(error = %e, "robotics command parse failed");
                status_json("ERROR", PARSE_FAILURE_NOTICE)
            }
        }
    }
}
