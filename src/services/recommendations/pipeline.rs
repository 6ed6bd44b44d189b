use crate::models::{Recommendation, RecommendationSource};

use super::heuristic::{BlockParser, HeuristicConfig};
use super::json::parse_json_candidates;
use super::sanitize::{coerce, sanitize};

/// Successful normalization of one model response
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub recommendations: Vec<Recommendation>,
    pub source: RecommendationSource,
}

/// No parse path produced a usable recommendation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// The extracted model text, kept for diagnosing prompt or format drift
    pub raw_output: String,
}

/// States of a single pipeline run
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    Started,
    Fallback,
    Sanitize {
        candidates: Vec<Recommendation>,
        source: RecommendationSource,
    },
    Success(ParseOutcome),
    Failed,
}

/// Turns extracted model text into a bounded, validated recommendation list
///
/// Strict JSON is tried first; list-like prose is the fallback. Neither
/// parser errors: an empty result moves the run to the next state.
#[derive(Debug, Clone, Default)]
pub struct RecommendationPipeline {
    block_parser: BlockParser,
}

impl RecommendationPipeline {
    pub fn new(heuristics: HeuristicConfig) -> Self {
        Self {
            block_parser: BlockParser::new(heuristics),
        }
    }

    /// Runs the state machine to a terminal state
    pub fn run(&self, raw_output: &str) -> Result<ParseOutcome, ParseFailure> {
        let mut state = PipelineState::Started;
        loop {
            state = match self.step(state, raw_output) {
                PipelineState::Success(outcome) => {
                    tracing::info!(
                        source = %outcome.source,
                        count = outcome.recommendations.len(),
                        "Parsed model recommendations"
                    );
                    return Ok(outcome);
                }
                PipelineState::Failed => {
                    tracing::warn!(
                        raw_len = raw_output.len(),
                        "Model output did not include valid recommendations"
                    );
                    return Err(ParseFailure {
                        raw_output: raw_output.to_string(),
                    });
                }
                next => next,
            };
        }
    }

    /// Advances one transition; terminal states map to themselves
    pub fn step(&self, state: PipelineState, raw_output: &str) -> PipelineState {
        match state {
            PipelineState::Started => {
                let values = parse_json_candidates(raw_output);
                if values.is_empty() {
                    PipelineState::Fallback
                } else {
                    PipelineState::Sanitize {
                        candidates: values.iter().map(coerce).collect(),
                        source: RecommendationSource::Json,
                    }
                }
            }
            PipelineState::Fallback => {
                let candidates = self.block_parser.parse(raw_output);
                tracing::debug!(blocks = candidates.len(), "Heuristic list parse");
                if candidates.is_empty() {
                    PipelineState::Failed
                } else {
                    PipelineState::Sanitize {
                        candidates,
                        source: RecommendationSource::Structured,
                    }
                }
            }
            PipelineState::Sanitize { candidates, source } => {
                let recommendations = sanitize(candidates);
                if recommendations.is_empty() {
                    PipelineState::Failed
                } else {
                    PipelineState::Success(ParseOutcome {
                        recommendations,
                        source,
                    })
                }
            }
            terminal => terminal,
        }
    }
}
