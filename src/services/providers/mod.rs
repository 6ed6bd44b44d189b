/// Generative model abstraction
///
/// The recommendation service only needs one call: send a prompt, get back
/// the raw response envelope. Transport, credentials and request shape are
/// the provider's concern.
use crate::{error::AppResult, models::ModelEnvelope};

pub mod gemini;

pub use gemini::GeminiProvider;

/// Trait for text generation backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationModel: Send + Sync {
    /// Sends a prompt and returns the raw response envelope
    ///
    /// A non-success status or transport failure is an upstream error. The
    /// call is made once; there is no retry.
    async fn generate(&self, prompt: &str) -> AppResult<ModelEnvelope>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
