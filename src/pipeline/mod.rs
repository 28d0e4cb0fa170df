//! Evaluation pipeline: concept extraction, semantic and qualitative
//! analysis, score aggregation, feedback synthesis, and the orchestrator
//! that sequences them.

pub mod concepts;
pub mod feedback;
pub mod orchestrator;
pub mod qualitative;
pub mod scoring;
pub mod semantic;

pub use concepts::ConceptExtractor;
pub use feedback::FeedbackGenerator;
pub use orchestrator::EvaluationOrchestrator;
pub use qualitative::QualitativeAnalyzer;
pub use scoring::{ScoringEngine, WeightTable};
pub use semantic::SemanticAnalyzer;

/// Strips markdown code-fence markers LLMs like to wrap JSON in.
/// Removes any backtick and any "json" label directly following one.
pub(crate) fn strip_code_fences(raw: &str) -> String {
    raw.trim().replace("`json", "").replace('`', "")
}

#[inline]
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[inline]
pub(crate) fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
