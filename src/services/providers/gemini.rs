/// Gemini generateContent provider
///
/// API Flow:
/// POST {api_url}/v1beta/models/{model}:generateContent?key={api_key}
/// with a single user turn holding the prompt text.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::envelope::{
        Content, GenerateContentRequest, GenerationConfig, ModelEnvelope, Part, ThinkingConfig,
    },
    services::providers::RecommendationModel,
};
use reqwest::Client as HttpClient;

#[derive(Clone)]
pub struct GeminiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiProvider {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
            temperature: 0.6,
            max_output_tokens: 512,
        }
    }

    /// Builds a provider when the configuration carries a model credential
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.ai_credential()?;
        Some(
            Self::new(
                api_key.to_string(),
                config.ai_api_url.clone(),
                config.ai_model.clone(),
            )
            .with_generation(config.ai_temperature, config.ai_max_output_tokens),
        )
    }

    pub fn with_generation(mut self, temperature: f32, max_output_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_output_tokens = max_output_tokens;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        }
    }
}

#[async_trait::async_trait]
impl RecommendationModel for GeminiProvider {
    async fn generate(&self, prompt: &str) -> AppResult<ModelEnvelope> {
        let response = self
            .http_client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&self.build_request(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                provider = self.name(),
                "Model request failed"
            );
            return Err(AppError::Upstream(format!(
                "AI request failed: {} - {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw model response");

        let envelope: ModelEnvelope = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(error = %e, "Failed to deserialize model response");
            AppError::Upstream(format!("Failed to parse model response: {}", e))
        })?;

        tracing::info!(
            candidates = envelope.candidates.len(),
            provider = self.name(),
            "Model response received"
        );

        Ok(envelope)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
