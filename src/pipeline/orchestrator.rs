//! End-to-end evaluation sequencing.

use tracing::debug;

use crate::ai_client::{DynEmbedder, DynGenerator};
use crate::error::EvalError;
use crate::schema::{EvaluationRequest, EvaluationResult, IndividualScore, Metric, RawScore};

use super::{
    ConceptExtractor, FeedbackGenerator, QualitativeAnalyzer, ScoringEngine, SemanticAnalyzer,
    WeightTable,
};

/// Owns the pipeline stages and runs them in order:
/// concepts, then semantic and qualitative analysis concurrently, then
/// aggregation and feedback. Holds no per-request state; safe to share
/// behind an `Arc` across concurrent requests.
pub struct EvaluationOrchestrator {
    concepts: ConceptExtractor,
    semantic: SemanticAnalyzer,
    qualitative: QualitativeAnalyzer,
    scoring: ScoringEngine,
    feedback: FeedbackGenerator,
}

impl EvaluationOrchestrator {
    pub fn new(generator: DynGenerator, embedder: DynEmbedder, weights: WeightTable) -> Self {
        Self {
            concepts: ConceptExtractor::new(generator.clone()),
            semantic: SemanticAnalyzer::new(embedder),
            qualitative: QualitativeAnalyzer::new(generator.clone()),
            scoring: ScoringEngine::new(weights),
            feedback: FeedbackGenerator::new(generator),
        }
    }

    /// The evaluation entry point. Validation failures never reach the
    /// pipeline; the only unrecovered stage failure is the embedding port.
    pub async fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationResult, EvalError> {
        request.validate()?;

        let key_concepts = self.concepts.extract(&request.lecture_transcript).await;
        debug!(count = key_concepts.len(), "extracted key concepts");

        // The two analyzers are independent; run them concurrently.
        let (semantic, qualitative) = tokio::join!(
            self.semantic.analyze(
                &request.student_summary,
                &request.lecture_transcript,
                &key_concepts,
            ),
            self.qualitative.analyze(
                &request.student_summary,
                &request.lecture_transcript,
                &request.evaluation_parameters,
            ),
        );
        let semantic = semantic?;

        // Key union; the analyzers produce disjoint metric sets by design.
        let mut raw_scores = qualitative;
        raw_scores.insert(Metric::Coverage, RawScore::Unit(semantic.coverage));
        raw_scores.insert(Metric::Relevance, RawScore::Unit(semantic.relevance));

        let (final_score, normalized) = self.scoring.calculate_final_score(&raw_scores);

        let feedback = self
            .feedback
            .generate(
                &normalized,
                &request.student_summary,
                &request.lecture_transcript,
            )
            .await;

        let individual_scores = normalized
            .into_iter()
            .map(|(metric, score)| {
                (
                    metric,
                    IndividualScore {
                        score,
                        explanation: String::new(),
                    },
                )
            })
            .collect();

        Ok(EvaluationResult {
            final_score,
            feedback,
            individual_scores,
        })
    }
}
