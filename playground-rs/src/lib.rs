//! Adapter layer between playground panels and a hosted generative model.
//!
//! Three independent request flows share one model-client collaborator:
//! [`TextAnalyzer`] builds task-specific instruction prompts,
//! [`ImageDescriber`] submits multimodal image-plus-instruction requests,
//! and [`CommandParser`] constrains the model with a structured-output
//! schema and re-validates what comes back. All three converge on
//! [`AdapterResult`]; presentation policy lives with the caller.

mod error;
mod gemini_llm;
mod llm_client;
mod llm_types;
mod nlp;
mod robotics;
mod template;
#[cfg(test)]
pub mod test_helpers;
pub mod text_util;
mod vision;

pub use error::{AdapterError, AdapterResult};
pub use gemini_llm::GeminiLLM;
pub use llm_client::LLMClient;
pub use llm_types::{GenerateRequest, Part};
pub use nlp::{DEFAULT_TARGET_LANGUAGE, NlpTask, TextAnalyzer, prompt_for};
pub use robotics::{
    ActionKind, CommandParser, PARSE_FAILURE_NOTICE, PLEASE_ENTER_COMMAND, RobotAction,
    SYSTEM_INSTRUCTION,
};
pub use template::render_prompt;
pub use vision::{ACCEPTED_MIME_TYPES, DESCRIBE_APOLOGY, DESCRIBE_INSTRUCTION, ImageDescriber};
