use std::sync::Arc;

use crate::error::{AdapterError, AdapterResult};
use crate::llm_client::LLMClient;
use crate::llm_types::{GenerateRequest, Part};

/// Fixed instruction sent with every image.
pub const DESCRIBE_INSTRUCTION: &str = "Describe this image in detail. What objects are present, what is happening, and what is the overall mood or style of the image?";

/// Fixed user-facing string substituted for any failure by
/// [`ImageDescriber::describe_or_apologize`].
pub const DESCRIBE_APOLOGY: &str = "Sorry, I couldn't analyze that image. Please try another one.";

/// Image payload types the panel accepts.
pub const ACCEPTED_MIME_TYPES: [&str; 4] =
    ["image/png", "image/jpeg", "image/webp", "image/gif"];

/// Adapter for the image description panel.
pub struct ImageDescriber {
    llm: Arc<dyn LLMClient>,
    model: String,
}

impl ImageDescriber {
    /// Creates a describer dispatching to `llm` with the given model name.
    pub fn new(llm: Arc<dyn LLMClient>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    /// Describes `image`, returning the trimmed model reply.
    ///
    /// The payload must be non-empty and carry an accepted MIME type;
    /// whether the bytes really are that type is the caller's problem.
    pub async fn describe(&self, image: &[u8], mime_type: &str) -> AdapterResult<String> {
        if image.is_empty() {
            return Err(AdapterError::Validation("the image payload is empty".into()));
        }
        if !ACCEPTED_MIME_TYPES.contains(&mime_type) {
            return Err(AdapterError::Validation(format!(
                "unsupported image type: {mime_type}"
            )));
        }

        let request = GenerateRequest::from_parts(
            &self.model,
            vec![
                Part::Blob {
                    mime_type: mime_type.into(),
                    data: image.to_vec(),
                },
                Part::Text(DESCRIBE_INSTRUCTION.into()),
            ],
        );
        tracing::debug!(%mime_type, bytes = image.len(), "dispatching image description");
        let reply = self.llm.generate(request).await?;
        Ok(reply.trim().to_string())
    }

    /// Degrading wrapper around [`describe`](Self::describe): every
    /// failure becomes [`DESCRIBE_APOLOGY`], so callers can treat this
    /// panel as never failing.
    pub async fn describe_or_apologize(&self, image: &[u8], mime_type: &str) -> String {
        match self.describe(image, mime_type).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "image description failed");
                DESCRIBE_APOLOGY.to_string()
            }
        }
    }
}
