//! Key-concept extraction from the lecture transcript.

use tracing::warn;

use crate::ai_client::DynGenerator;

use super::strip_code_fences;

const EXTRACTION_TEMPERATURE: f32 = 0.1;
const EXTRACTION_MAX_TOKENS: u32 = 500;

/// Derives a short list of key concepts from a transcript via the text
/// generation port. Extraction is an auxiliary signal: any upstream or parse
/// failure degrades to an empty list instead of failing the evaluation.
pub struct ConceptExtractor {
    generator: DynGenerator,
}

impl ConceptExtractor {
    pub fn new(generator: DynGenerator) -> Self {
        Self { generator }
    }

    pub async fn extract(&self, transcript: &str) -> Vec<String> {
        let prompt = extraction_prompt(transcript);
        let raw = match self
            .generator
            .generate(&prompt, EXTRACTION_TEMPERATURE, EXTRACTION_MAX_TOKENS)
            .await
        {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "concept extraction call failed; continuing with no concepts");
                return Vec::new();
            }
        };
        match parse_concepts(&raw) {
            Some(concepts) => concepts,
            None => {
                warn!("concept extraction returned malformed JSON; continuing with no concepts");
                Vec::new()
            }
        }
    }
}

fn extraction_prompt(transcript: &str) -> String {
    format!(
        r#"Analyze the following lecture transcript and identify the main topics, key arguments, and critical conclusions.

Please provide a concise list of these key concepts.

Respond with ONLY a JSON array of strings, where each string is a key concept. Do not include any other text or explanation.

Example response format:
[
  "The theory of relativity's impact on classical physics",
  "The role of gravitational lensing in verifying Einstein's predictions",
  "Key differences between special and general relativity"
]

Transcript:
"""{transcript}""""#
    )
}

/// Accepts only a JSON array of strings; anything else is `None`.
fn parse_concepts(raw: &str) -> Option<Vec<String>> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str::<Vec<String>>(cleaned.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_array() {
        let got = parse_concepts(r#"["photosynthesis", "chlorophyll"]"#);
        assert_eq!(
            got,
            Some(vec!["photosynthesis".to_string(), "chlorophyll".to_string()])
        );
    }

    #[test]
    fn parses_fenced_array() {
        let got = parse_concepts("```json\n[\"a\", \"b\"]\n```");
        assert_eq!(got, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn rejects_non_json() {
        assert_eq!(parse_concepts("the concepts are: a, b"), None);
    }

    #[test]
    fn rejects_non_string_elements() {
        assert_eq!(parse_concepts("[1, 2, 3]"), None);
        assert_eq!(parse_concepts(r#"{"concepts": ["a"]}"#), None);
    }

    #[test]
    fn empty_array_is_valid() {
        assert_eq!(parse_concepts("[]"), Some(Vec::new()));
    }
}
