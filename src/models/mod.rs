pub mod book;
pub mod envelope;
pub mod recommendation;

pub use book::{Book, BookUpdate, NewBook};
pub use envelope::ModelEnvelope;
pub use recommendation::{Recommendation, RecommendationResponse, RecommendationSource};
