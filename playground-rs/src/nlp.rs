use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{AdapterError, AdapterResult};
use crate::llm_client::LLMClient;
use crate::llm_types::GenerateRequest;
use crate::template::render_prompt;
use crate::text_util::strip_markup;

/// Target language used when a Translate request does not name one.
pub const DEFAULT_TARGET_LANGUAGE: &str = "Spanish";

const EMPTY_REPLY_NOTICE: &str = "The model returned an empty response. This may be due to the prompt, or the content violating safety policies.";

/// The text-panel operations.
///
/// Wire names match the original panel protocol (`ner` for named entity
/// recognition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NlpTask {
    Summarize,
    Sentiment,
    Keywords,
    Translate,
    #[serde(rename = "ner")]
    NamedEntityRecognition,
    Generate,
}

impl NlpTask {
    /// All variants, in panel order. Handy for exhaustive property tests.
    pub const ALL: [NlpTask; 6] = [
        NlpTask::Summarize,
        NlpTask::Sentiment,
        NlpTask::Keywords,
        NlpTask::Translate,
        NlpTask::NamedEntityRecognition,
        NlpTask::Generate,
    ];
}

const SUMMARIZE_TPL: &str = "Summarize the following text concisely in 1-3 sentences:\n\n\"{text}\"";
const SENTIMENT_TPL: &str = "Analyze the sentiment of the following text. Respond with only one word: POSITIVE, NEGATIVE, or NEUTRAL.\n\nText: \"{text}\"";
const KEYWORDS_TPL: &str = "Extract the main keywords from the following text. Return them as a comma-separated list.\n\nText: \"{text}\"";
const TRANSLATE_TPL: &str = "Translate the following text to {language}:\n\n\"{text}\"";
const NER_TPL: &str = "Extract named entities (like people, organizations, locations, dates) from the following text. List each entity and its type.\n\nText: \"{text}\"";
const GENERATE_TPL: &str = "You are a creative assistant. Please continue the following text or fulfill the instruction given:\n\n\"{text}\"";

#[derive(Serialize)]
struct PromptCtx<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
}

/// Builds the instruction prompt for `task`.
///
/// The match is exhaustive over the closed enum, so an unhandled task is a
/// compile error rather than a runtime fallback. `target_language` only
/// participates in Translate prompts.
pub fn prompt_for(
    task: NlpTask,
    text: &str,
    target_language: Option<&str>,
) -> AdapterResult<String> {
    let template = match task {
        NlpTask::Summarize => SUMMARIZE_TPL,
        NlpTask::Sentiment => SENTIMENT_TPL,
        NlpTask::Keywords => KEYWORDS_TPL,
        NlpTask::Translate => TRANSLATE_TPL,
        NlpTask::NamedEntityRecognition => NER_TPL,
        NlpTask::Generate => GENERATE_TPL,
    };
    let language = match task {
        NlpTask::Translate => Some(target_language.unwrap_or(DEFAULT_TARGET_LANGUAGE)),
        _ => None,
    };
    render_prompt(template, &PromptCtx { text, language })
        .map_err(|e| AdapterError::Configuration(format!("invalid prompt template: {e}")))
}

/// Adapter for the text analysis/generation panel.
pub struct TextAnalyzer {
    llm: Arc<dyn LLMClient>,
    model: String,
}

impl TextAnalyzer {
    /// Creates an analyzer dispatching to `llm` with the given model name.
    pub fn new(llm: Arc<dyn LLMClient>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    /// Runs one text task and returns the trimmed model reply.
    ///
    /// Input that strips down to nothing is rejected before any model
    /// call. A reply that trims down to nothing is an
    /// [`AdapterError::EmptyResponse`], not a service failure.
    pub async fn analyze(
        &self,
        task: NlpTask,
        input: &str,
        target_language: Option<&str>,
    ) -> AdapterResult<String> {
        if strip_markup(input).is_empty() {
            return Err(AdapterError::Validation(
                "Please enter some text to analyze.".into(),
            ));
        }

        let prompt = prompt_for(task, input, target_language)?;
        tracing::debug!(?task, "dispatching text task");
        let reply = self
            .llm
            .generate(GenerateRequest::new(&self.model, prompt))
            .await?;

        let trimmed = reply.trim();
        if trimmed.is_empty() {
            return Err(AdapterError::EmptyResponse(EMPTY_REPLY_NOTICE.into()));
        }
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{FailingLLM, StaticLLM};

    #[test]
    fn translate_defaults_to_spanish() {
        let prompt = prompt_for(NlpTask::Translate, "hello", None).unwrap();
        assert!(prompt.contains("to Spanish:"));
        let prompt = prompt_for(NlpTask::Translate, "hello", Some("French")).unwrap();
        assert!(prompt.contains("to French:"));
    }

    #[test]
    fn target_language_only_affects_translate() {
        for task in NlpTask::ALL {
            if task == NlpTask::Translate {
                continue;
            }
            let without = prompt_for(task, "sample", None).unwrap();
            let with = prompt_for(task, "sample", Some("Japanese")).unwrap();
            assert_eq!(without, with, "{task:?} prompt varied with language");
        }
    }

    #[test]
    fn each_task_embeds_the_input() {
        for task in NlpTask::ALL {
            let prompt = prompt_for(task, "the quick brown fox", None).unwrap();
            assert!(prompt.contains("the quick brown fox"), "{task:?}");
        }
    }

    #[tokio::test]
    async fn markup_only_input_never_reaches_the_model() {
        let llm = Arc::new(StaticLLM::new("should not be seen"));
        let analyzer = TextAnalyzer::new(llm.clone(), "m");
        let err = analyzer
            .analyze(NlpTask::Summarize, "<p><br></p>", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::Validation(_)));
        assert_eq!(err.to_string(), "Please enter some text to analyze.");
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn reply_is_trimmed() {
        let llm = Arc::new(StaticLLM::new("  POSITIVE \n"));
        let analyzer = TextAnalyzer::new(llm, "m");
        let out = analyzer
            .analyze(NlpTask::Sentiment, "great stuff", None)
            .await
            .unwrap();
        assert_eq!(out, "POSITIVE");
    }

    #[tokio::test]
    async fn blank_reply_mentions_safety_filtering() {
        let llm = Arc::new(StaticLLM::new("   "));
        let analyzer = TextAnalyzer::new(llm, "m");
        let err = analyzer
            .analyze(NlpTask::Summarize, "some text", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::EmptyResponse(_)));
        assert!(err.to_string().contains("safety policies"));
    }

    #[tokio::test]
    async fn service_errors_propagate_unchanged() {
        let llm = Arc::new(FailingLLM::new("connection refused"));
        let analyzer = TextAnalyzer::new(llm, "m");
        let err = analyzer
            .analyze(NlpTask::Keywords, "some text", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::Service(_)));
        assert_eq!(err.to_string(), "connection refused");
    }
}
