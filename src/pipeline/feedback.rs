//! Human-readable feedback synthesis from the normalized scores.

use std::collections::HashMap;
use std::fmt::Write as _;

use tracing::warn;

use crate::ai_client::DynGenerator;
use crate::schema::Metric;

const FEEDBACK_TEMPERATURE: f32 = 0.7;
const FEEDBACK_MAX_TOKENS: u32 = 250;

/// Returned when the generation port fails; the evaluation still succeeds.
pub const FALLBACK_FEEDBACK: &str = "Feedback could not be generated due to an internal error. \
     Please check the individual scores for details.";

pub struct FeedbackGenerator {
    generator: DynGenerator,
}

impl FeedbackGenerator {
    pub fn new(generator: DynGenerator) -> Self {
        Self { generator }
    }

    /// One paragraph: a strength first, then one or two improvement areas.
    /// Sampling is looser here than in the extraction/rating stages.
    pub async fn generate(
        &self,
        normalized_scores: &HashMap<Metric, f64>,
        summary: &str,
        transcript: &str,
    ) -> String {
        let prompt = feedback_prompt(normalized_scores, summary, transcript);
        match self
            .generator
            .generate(&prompt, FEEDBACK_TEMPERATURE, FEEDBACK_MAX_TOKENS)
            .await
        {
            Ok(text) => text.trim().to_string(),
            Err(err) => {
                warn!(error = %err, "feedback generation failed; returning fallback text");
                FALLBACK_FEEDBACK.to_string()
            }
        }
    }
}

fn feedback_prompt(
    normalized_scores: &HashMap<Metric, f64>,
    summary: &str,
    transcript: &str,
) -> String {
    // Stable line order keeps the prompt deterministic for a given score set.
    let mut entries: Vec<_> = normalized_scores.iter().collect();
    entries.sort_by_key(|(metric, _)| metric.as_str());
    let mut scores_block = String::new();
    for (metric, score) in entries {
        let _ = writeln!(scores_block, "- {}: {score:.1}/10", metric.display_name());
    }

    format!(
        r#"You are an encouraging and constructive teaching assistant.

Based on the following evaluation scores for a student's summary of a lecture, provide a concise, helpful feedback paragraph.

The feedback should start by highlighting a key strength, then constructively point out one or two main areas for improvement. Keep the tone positive and action-oriented. Do not simply list the scores.

Evaluation Scores (out of 10):
{scores_block}
For context, here is the student's summary:
"""{summary}"""

And the original transcript:
"""{transcript}"""

Provide the feedback as a single paragraph of text."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_renders_scores_to_one_decimal_in_stable_order() {
        let scores = HashMap::from([
            (Metric::Relevance, 8.0),
            (Metric::Coverage, 6.67),
            (Metric::Grammar, 2.5),
        ]);
        let prompt = feedback_prompt(&scores, "the summary", "the transcript");
        assert!(prompt.contains("- Coverage: 6.7/10"));
        assert!(prompt.contains("- Relevance: 8.0/10"));
        assert!(prompt.contains("- Grammar: 2.5/10"));
        // Exactly one blank line separates the score block from the context.
        assert!(prompt.contains("- Relevance: 8.0/10\n\nFor context"));
        // coverage < grammar < relevance, alphabetically
        let c = prompt.find("Coverage").expect("coverage line");
        let g = prompt.find("Grammar").expect("grammar line");
        let r = prompt.find("Relevance").expect("relevance line");
        assert!(c < g && g < r);
    }
}
