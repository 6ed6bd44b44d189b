use crate::{
    db::BookStore,
    error::{AppError, AppResult},
    models::RecommendationResponse,
    services::providers::RecommendationModel,
};

pub mod extract;
pub mod heuristic;
pub mod json;
pub mod pipeline;
pub mod prompt;
pub mod sanitize;

pub use extract::extract_text;
pub use heuristic::{classify_line, BlockParser, HeuristicConfig, LineKind};
pub use pipeline::{ParseFailure, ParseOutcome, PipelineState, RecommendationPipeline};
pub use prompt::build_prompt;
pub use sanitize::{sanitize, MAX_RECOMMENDATIONS};

/// Error shown when no model credential is configured
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "AI_API_KEY missing. Set it in the environment and restart the server.";

/// Generates book recommendations from the user's reading history
///
/// `model` is `None` when no credential is configured; that is reported as a
/// configuration error before anything else happens. A failed model call is
/// an upstream error. Unusable model output is a parse error carrying the
/// raw text.
pub async fn recommend(
    books: &dyn BookStore,
    model: Option<&dyn RecommendationModel>,
    pipeline: &RecommendationPipeline,
) -> AppResult<RecommendationResponse> {
    let model =
        model.ok_or_else(|| AppError::Configuration(MISSING_CREDENTIAL_MESSAGE.to_string()))?;

    let history = books.recently_updated().await?;
    let prompt = build_prompt(&history);

    tracing::info!(
        used_books = history.len(),
        provider = model.name(),
        "Requesting recommendations"
    );

    let envelope = model.generate(&prompt).await?;
    let raw_output = extract_text(&envelope);

    match pipeline.run(&raw_output) {
        Ok(outcome) => Ok(RecommendationResponse {
            recommendations: outcome.recommendations,
            source: outcome.source,
            raw_output,
            used_books: history.len(),
        }),
        Err(ParseFailure { raw_output }) => Err(AppError::Parse { raw_output }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryBookStore;
    use crate::models::{ModelEnvelope, NewBook, Recommendation, RecommendationSource};
    use crate::services::providers::MockRecommendationModel;

    async fn store_with_books(titles: &[&str]) -> MemoryBookStore {
        let store = MemoryBookStore::new();
        for title in titles {
            store
                .create_book(NewBook {
                    title: title.to_string(),
                    author: "Ursula K. Le Guin".to_string(),
                    year: None,
                    rating: Some(5.0),
                })
                .await
                .unwrap();
        }
        store
    }

    fn model_returning(text: &'static str) -> MockRecommendationModel {
        let mut model = MockRecommendationModel::new();
        model.expect_name().return_const("mock");
        model
            .expect_generate()
            .times(1)
            .returning(move |_| Ok(ModelEnvelope::from_text(text)));
        model
    }

    #[tokio::test]
    async fn test_missing_model_is_configuration_error() {
        let store = store_with_books(&["A Wizard of Earthsea"]).await;
        let result = recommend(&store, None, &RecommendationPipeline::default()).await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_json_recommendations() {
        let store = store_with_books(&["A Wizard of Earthsea", "The Dispossessed"]).await;
        let model = model_returning(
            r#"[{"title":"Piranesi","author":"Susanna Clarke","reason":"Dreamlike"}]"#,
        );

        let response = recommend(&store, Some(&model), &RecommendationPipeline::default())
            .await
            .unwrap();

        assert_eq!(response.source, RecommendationSource::Json);
        assert_eq!(response.used_books, 2);
        assert_eq!(
            response.recommendations,
            vec![Recommendation::new("Piranesi", "Susanna Clarke", "Dreamlike")]
        );
        assert!(response.raw_output.contains("Piranesi"));
    }

    #[tokio::test]
    async fn test_prompt_includes_history() {
        let store = store_with_books(&["The Dispossessed"]).await;
        let mut model = MockRecommendationModel::new();
        model.expect_name().return_const("mock");
        model
            .expect_generate()
            .withf(|prompt: &str| prompt.contains("\"The Dispossessed\" by Ursula K. Le Guin"))
            .times(1)
            .returning(|_| Ok(ModelEnvelope::from_text("1. Piranesi\nSusanna Clarke")));

        let response = recommend(&store, Some(&model), &RecommendationPipeline::default())
            .await
            .unwrap();
        assert_eq!(response.source, RecommendationSource::Structured);
        assert_eq!(response.recommendations[0].author, "Susanna Clarke");
    }

    #[tokio::test]
    async fn test_unparseable_output_is_parse_error() {
        let store = store_with_books(&[]).await;
        let model = model_returning("I don't have any recommendations right now.");

        let result = recommend(&store, Some(&model), &RecommendationPipeline::default()).await;
        match result {
            Err(AppError::Parse { raw_output }) => {
                assert_eq!(raw_output, "I don't have any recommendations right now.")
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upstream_error_propagates() {
        let store = store_with_books(&[]).await;
        let mut model = MockRecommendationModel::new();
        model.expect_name().return_const("mock");
        model
            .expect_generate()
            .returning(|_| Err(AppError::Upstream("AI request failed: 503".to_string())));

        let result = recommend(&store, Some(&model), &RecommendationPipeline::default()).await;
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }
}
