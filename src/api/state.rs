use std::sync::Arc;

use crate::db::BookStore;
use crate::services::providers::RecommendationModel;
use crate::services::recommendations::RecommendationPipeline;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookStore>,
    /// `None` when no model credential is configured
    pub model: Option<Arc<dyn RecommendationModel>>,
    pub pipeline: Arc<RecommendationPipeline>,
}

impl AppState {
    /// Creates state with the default list-parsing heuristics
    pub fn new(books: Arc<dyn BookStore>, model: Option<Arc<dyn RecommendationModel>>) -> Self {
        Self::with_pipeline(books, model, RecommendationPipeline::default())
    }

    pub fn with_pipeline(
        books: Arc<dyn BookStore>,
        model: Option<Arc<dyn RecommendationModel>>,
        pipeline: RecommendationPipeline,
    ) -> Self {
        Self {
            books,
            model,
            pipeline: Arc::new(pipeline),
        }
    }
}
