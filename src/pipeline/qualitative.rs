//! Qualitative ratings: LLM-backed clarity/coherence/conciseness scores plus
//! a local grammar heuristic, all on the 1-5 scale.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use tracing::warn;

use crate::ai_client::DynGenerator;
use crate::schema::{EvalParameter, Metric, RawScore};

use super::strip_code_fences;

const RATING_TEMPERATURE: f32 = 0.1;
const RATING_MAX_TOKENS: u32 = 50;

/// Neutral score assigned when a rating call fails or returns garbage.
/// Failure isolation is per parameter; the rest of the batch proceeds.
pub const NEUTRAL_RATING: f64 = 2.5;

pub struct QualitativeAnalyzer {
    generator: DynGenerator,
}

impl QualitativeAnalyzer {
    pub fn new(generator: DynGenerator) -> Self {
        Self { generator }
    }

    /// Rates the summary on each requested parameter. LLM-backed ratings run
    /// concurrently as spawned tasks; grammar is computed inline and never
    /// suspends. Returns exactly one score per requested parameter.
    pub async fn analyze(
        &self,
        summary: &str,
        transcript: &str,
        parameters: &[EvalParameter],
    ) -> HashMap<Metric, RawScore> {
        let mut scores = HashMap::new();
        let mut pending = Vec::new();

        for &param in parameters {
            let question = match param {
                EvalParameter::Grammar => {
                    scores.insert(Metric::Grammar, RawScore::FivePoint(grammar_score(summary)));
                    continue;
                }
                EvalParameter::Clarity => {
                    "How clear and easy to understand is the student's summary?"
                }
                EvalParameter::Coherence => {
                    "Does the summary flow logically and connect ideas smoothly?"
                }
                EvalParameter::Conciseness => {
                    "Does the summary capture the main points without unnecessary words or repetition?"
                }
            };

            let metric = param.metric();
            let prompt = rating_prompt(metric, question, summary, transcript);
            let generator = Arc::clone(&self.generator);
            pending.push((
                metric,
                tokio::spawn(async move { request_rating(generator, metric, prompt).await }),
            ));
        }

        for (metric, handle) in pending {
            let score = match handle.await {
                Ok(score) => score,
                Err(err) => {
                    warn!(%metric, error = %err, "rating task did not complete; using neutral score");
                    NEUTRAL_RATING
                }
            };
            scores.insert(metric, RawScore::FivePoint(score));
        }
        scores
    }
}

async fn request_rating(generator: DynGenerator, metric: Metric, prompt: String) -> f64 {
    let raw = match generator
        .generate(&prompt, RATING_TEMPERATURE, RATING_MAX_TOKENS)
        .await
    {
        Ok(text) => text,
        Err(err) => {
            warn!(%metric, error = %err, "rating call failed; using neutral score");
            return NEUTRAL_RATING;
        }
    };
    match parse_rating(&raw) {
        Some(score) => score.clamp(1.0, 5.0),
        None => {
            warn!(%metric, "rating response was malformed; using neutral score");
            NEUTRAL_RATING
        }
    }
}

fn rating_prompt(metric: Metric, question: &str, summary: &str, transcript: &str) -> String {
    format!(
        r#"You are an expert evaluator. Analyze the student's summary in the context of the original lecture transcript.

Original Transcript:
"""{transcript}"""

Student Summary:
"""{summary}"""

Evaluation Question: {question}

Rate the summary on a scale from 1 (very poor) to 5 (excellent) for the specific quality of '{metric}'.

Respond with ONLY a JSON object containing a single key 'score' with your numeric rating.
Example: {{"score": 4.5}}"#
    )
}

/// Expects `{"score": <number>}`; anything else is a parse failure.
fn parse_rating(raw: &str) -> Option<f64> {
    #[derive(Deserialize)]
    struct Rating {
        score: f64,
    }
    let cleaned = strip_code_fences(raw);
    serde_json::from_str::<Rating>(cleaned.trim())
        .ok()
        .map(|r| r.score)
}

/// Placeholder grammar heuristic; stands in for a real grammar checker.
/// Short summaries get a flat 3.0; otherwise a mock error count is derived
/// from the word count and converted to a 1-5 score.
pub fn grammar_score(summary: &str) -> f64 {
    let word_count = summary.split_whitespace().count();
    if word_count < 25 {
        return 3.0;
    }
    let mock_errors = 10usize.saturating_sub(word_count / 10);
    let score = 5.0 - (mock_errors as f64 / 2.0);
    score.clamp(1.0, 5.0)
}
