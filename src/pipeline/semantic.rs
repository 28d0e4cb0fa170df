//! Semantic coverage and relevance scoring via the embedding port.

use crate::ai_client::DynEmbedder;
use crate::error::EmbeddingError;

use super::round3;

/// A concept counts as covered when its similarity to the summary exceeds
/// this threshold. Binary by design: a 0.49 near-miss scores like a 0.0.
pub const COVERAGE_THRESHOLD: f32 = 0.5;

/// Coverage and relevance, both on [0, 1], rounded to 3 decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemanticScores {
    pub coverage: f64,
    pub relevance: f64,
}

/// Computes how much of the transcript's key material the summary captures
/// (coverage) and how close the summary is to the transcript overall
/// (relevance). Embedding failures propagate; there is no fallback score.
pub struct SemanticAnalyzer {
    embedder: DynEmbedder,
}

impl SemanticAnalyzer {
    pub fn new(embedder: DynEmbedder) -> Self {
        Self { embedder }
    }

    pub async fn analyze(
        &self,
        summary: &str,
        transcript: &str,
        concepts: &[String],
    ) -> Result<SemanticScores, EmbeddingError> {
        // Degenerate case: nothing to cover, and no embedding calls issued.
        if concepts.is_empty() {
            return Ok(SemanticScores {
                coverage: 0.0,
                relevance: 0.0,
            });
        }

        let texts = [summary.to_string(), transcript.to_string()];
        let mut pair = self.embedder.embed(&texts).await?;
        if pair.len() != 2 {
            return Err(EmbeddingError::CountMismatch {
                expected: 2,
                got: pair.len(),
            });
        }
        let transcript_vec = pair.pop().unwrap_or_default();
        let summary_vec = pair.pop().unwrap_or_default();

        // All concepts in one batch call.
        let concept_vecs = self.embedder.embed(concepts).await?;
        if concept_vecs.len() != concepts.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: concepts.len(),
                got: concept_vecs.len(),
            });
        }

        // Relevance: summary-to-transcript similarity, floored at 0 so a
        // dissimilar summary scores zero rather than contributing negatively.
        let relevance = cosine_similarity(&summary_vec, &transcript_vec).max(0.0);

        // Coverage: count-over-total of concepts above the threshold.
        let covered = concept_vecs
            .iter()
            .filter(|v| cosine_similarity(&summary_vec, v) > f64::from(COVERAGE_THRESHOLD))
            .count();
        let coverage = covered as f64 / concepts.len() as f64;

        Ok(SemanticScores {
            coverage: round3(coverage),
            relevance: round3(relevance),
        })
    }
}

/// Cosine similarity of two vectors; 0.0 when either has zero norm or the
/// dimensions differ.
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += f64::from(x) * f64::from(y);
        norm_a += f64::from(x) * f64::from(x);
        norm_b += f64::from(y) * f64::from(y);
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}
