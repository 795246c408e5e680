use async_trait::async_trait;

use crate::error::AdapterResult;
use crate::llm_types::GenerateRequest;

/// Common interface for single-turn generative model backends.
///
/// Implementations perform one remote call per [`GenerateRequest`] and
/// return the model's text untrimmed. They do not retry, batch or pool
/// beyond what their transport already does.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use playground_rs::{AdapterResult, GenerateRequest, LLMClient};
///
/// struct Canned;
///
/// #[async_trait]
/// impl LLMClient for Canned {
///     async fn generate(&self, _request: GenerateRequest) -> AdapterResult<String> {
///         Ok("POSITIVE".into())
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let llm: Arc<dyn LLMClient> = Arc::new(Canned);
/// let req = GenerateRequest::new("gemini-2.5-flash", "Analyze the sentiment of: great!");
/// assert_eq!(llm.generate(req).await.unwrap(), "POSITIVE");
/// # });
/// ```
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Produces the model's full text response to `request`.
    async fn generate(&self, request: GenerateRequest) -> AdapterResult<String>;
}
