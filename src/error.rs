//! Error taxonomy for the evaluation pipeline.
//!
//! Generation failures are always recovered locally by the stage that issued
//! the call (empty concept list, neutral rating, fallback feedback), so
//! `GenerationError` never crosses the orchestrator boundary. Embedding
//! failures have no fallback and surface as a pipeline failure.

use thiserror::Error;

/// Malformed request, rejected before the pipeline runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("lecture_transcript must be at least {min} characters, got {got}")]
    TranscriptTooShort { min: usize, got: usize },
    #[error("student_summary must be at least {min} characters, got {got}")]
    SummaryTooShort { min: usize, got: usize },
}

/// Failure of the text generation port.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("text generation request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("text generation backend returned HTTP {0}")]
    Status(u16),
    #[error("text generation backend returned no choices")]
    EmptyResponse,
}

/// Failure of the embedding port.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("embedding backend returned HTTP {0}")]
    Status(u16),
    #[error("embedding backend returned {got} vectors for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },
}

/// Everything the evaluation entry point can fail with.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}
