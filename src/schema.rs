//! Request/response types for the evaluation API.
//!
//! Field names on the wire (`lecture_transcript`, `student_summary`,
//! `evaluation_parameters`) are part of the public contract.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Qualitative aspects a caller may ask to have rated (1-5 scale upstream).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalParameter {
    Clarity,
    Coherence,
    Conciseness,
    Grammar,
}

impl EvalParameter {
    /// The metric key this parameter's score is reported under.
    pub fn metric(self) -> Metric {
        match self {
            EvalParameter::Clarity => Metric::Clarity,
            EvalParameter::Coherence => Metric::Coherence,
            EvalParameter::Conciseness => Metric::Conciseness,
            EvalParameter::Grammar => Metric::Grammar,
        }
    }
}

/// Every score key the pipeline can produce. Used as the map key in
/// `individual_scores` and in the weight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Coverage,
    Relevance,
    Clarity,
    Coherence,
    Conciseness,
    Grammar,
}

impl Metric {
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Coverage => "coverage",
            Metric::Relevance => "relevance",
            Metric::Clarity => "clarity",
            Metric::Coherence => "coherence",
            Metric::Conciseness => "conciseness",
            Metric::Grammar => "grammar",
        }
    }

    /// Capitalized form for human-facing text (feedback prompts).
    pub fn display_name(self) -> &'static str {
        match self {
            Metric::Coverage => "Coverage",
            Metric::Relevance => "Relevance",
            Metric::Clarity => "Clarity",
            Metric::Coherence => "Coherence",
            Metric::Conciseness => "Conciseness",
            Metric::Grammar => "Grammar",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw stage output, tagged with the scale it was produced on.
///
/// The tag travels with the value so normalization never has to infer the
/// scale from the metric name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawScore {
    /// Value on [0, 1] (coverage, relevance).
    Unit(f64),
    /// Value on [1, 5] (qualitative ratings).
    FivePoint(f64),
}

/// One evaluation request. Immutable once deserialized.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationRequest {
    /// The full text of the lecture transcript.
    pub lecture_transcript: String,
    /// The summary written by the student.
    pub student_summary: String,
    /// Which qualitative parameters to rate.
    pub evaluation_parameters: Vec<EvalParameter>,
}

impl EvaluationRequest {
    pub const MIN_TRANSCRIPT_CHARS: usize = 100;
    pub const MIN_SUMMARY_CHARS: usize = 20;

    /// Checks the length constraints. Invalid parameter identifiers are
    /// already rejected at deserialization since `EvalParameter` is an enum.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let transcript_len = self.lecture_transcript.chars().count();
        if transcript_len < Self::MIN_TRANSCRIPT_CHARS {
            return Err(ValidationError::TranscriptTooShort {
                min: Self::MIN_TRANSCRIPT_CHARS,
                got: transcript_len,
            });
        }
        let summary_len = self.student_summary.chars().count();
        if summary_len < Self::MIN_SUMMARY_CHARS {
            return Err(ValidationError::SummaryTooShort {
                min: Self::MIN_SUMMARY_CHARS,
                got: summary_len,
            });
        }
        Ok(())
    }
}

/// Per-metric score on the normalized 0-10 scale.
#[derive(Debug, Clone, Serialize)]
pub struct IndividualScore {
    pub score: f64,
    /// Reserved for a per-metric explanation; currently always empty.
    pub explanation: String,
}

/// Final structured result, built once per request.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    /// Weighted aggregate on [0, 10], rounded to 2 decimals.
    pub final_score: f64,
    /// Human-readable feedback paragraph.
    pub feedback: String,
    /// Normalized per-metric breakdown.
    pub individual_scores: HashMap<Metric, IndividualScore>,
}
