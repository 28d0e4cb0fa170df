// tests/api_http.rs
//
// HTTP-level tests for the public Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - POST /evaluate (happy path, validation failure, unrecovered failure)

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{self, Body},
    http::Request,
    Router,
};
use http::StatusCode;
use serde_json::{json, Value as Json};
use tower::ServiceExt as _; // for `oneshot`

use summary_evaluator::ai_client::{DynEmbedder, Embedding, TextGeneration};
use summary_evaluator::api::{create_router, AppState};
use summary_evaluator::error::{EmbeddingError, GenerationError};
use summary_evaluator::pipeline::scoring::DEFAULT_WEIGHTS;
use summary_evaluator::pipeline::EvaluationOrchestrator;

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

struct CannedGenerator;

#[async_trait]
impl TextGeneration for CannedGenerator {
    async fn generate(
        &self,
        prompt: &str,
        _temperature: f32,
        _max_tokens: u32,
    ) -> Result<String, GenerationError> {
        if prompt.contains("JSON array of strings") {
            Ok(r#"["the water cycle", "evaporation"]"#.to_string())
        } else if prompt.contains("Evaluation Question:") {
            Ok(r#"{"score": 4.0}"#.to_string())
        } else {
            Ok("A solid summary; tighten up the middle section.".to_string())
        }
    }
}

/// Every text embeds to the same vector: full relevance, full coverage.
struct ConstantEmbedder;

#[async_trait]
impl Embedding for ConstantEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
    }
}

struct FailingEmbedder;

#[async_trait]
impl Embedding for FailingEmbedder {
    async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Err(EmbeddingError::Status(503))
    }
}

fn test_router(embedder: DynEmbedder) -> Router {
    let orchestrator =
        EvaluationOrchestrator::new(Arc::new(CannedGenerator), embedder, DEFAULT_WEIGHTS.clone());
    create_router(AppState {
        orchestrator: Arc::new(orchestrator),
    })
}

fn evaluate_body() -> String {
    json!({
        "lecture_transcript": "The water cycle lecture explained evaporation, condensation, and \
            precipitation, and how energy from the sun drives each phase of the cycle.",
        "student_summary": "The lecture explained how the sun drives evaporation, condensation, \
            and precipitation in the water cycle.",
        "evaluation_parameters": ["clarity", "grammar"]
    })
    .to_string()
}

fn post_evaluate(payload: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/evaluate")
        .header("content-type", "application/json")
        .body(Body::from(payload))
        .expect("build POST /evaluate")
}

#[tokio::test]
async fn api_health_returns_200_and_status_ok() {
    let app = test_router(Arc::new(ConstantEmbedder));

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let v: Json = serde_json::from_slice(&bytes).expect("parse health json");
    assert_eq!(v["status"], "ok");
}

#[tokio::test]
async fn api_evaluate_returns_structured_result() {
    let app = test_router(Arc::new(ConstantEmbedder));

    let resp = app
        .oneshot(post_evaluate(evaluate_body()))
        .await
        .expect("oneshot /evaluate");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read json");
    let v: Json = serde_json::from_slice(&bytes).expect("parse evaluate json");

    let final_score = v["final_score"].as_f64().expect("final_score present");
    assert!((0.0..=10.0).contains(&final_score));
    assert!(v["feedback"].as_str().is_some_and(|s| !s.is_empty()));

    let scores = v["individual_scores"]
        .as_object()
        .expect("individual_scores present");
    for key in ["coverage", "relevance", "clarity", "grammar"] {
        let entry = scores.get(key).unwrap_or_else(|| panic!("missing '{key}'"));
        assert!(entry["score"].as_f64().is_some(), "'{key}' has no score");
    }
    // Identical embeddings: both concepts covered and full relevance.
    assert_eq!(scores["coverage"]["score"], 10.0);
    assert_eq!(scores["relevance"]["score"], 10.0);
}

#[tokio::test]
async fn api_evaluate_rejects_short_summary_with_422() {
    let app = test_router(Arc::new(ConstantEmbedder));

    let payload = json!({
        "lecture_transcript": "The water cycle lecture explained evaporation, condensation, and \
            precipitation, and how energy from the sun drives each phase of the cycle.",
        "student_summary": "too short",
        "evaluation_parameters": ["clarity"]
    })
    .to_string();

    let resp = app
        .oneshot(post_evaluate(payload))
        .await
        .expect("oneshot /evaluate");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read json");
    let v: Json = serde_json::from_slice(&bytes).expect("parse error json");
    let detail = v["detail"].as_str().expect("detail present");
    assert!(
        detail.contains("student_summary"),
        "detail should name the field"
    );
}

#[tokio::test]
async fn api_evaluate_rejects_unknown_parameter() {
    let app = test_router(Arc::new(ConstantEmbedder));

    let payload = json!({
        "lecture_transcript": "The water cycle lecture explained evaporation, condensation, and \
            precipitation, and how energy from the sun drives each phase of the cycle.",
        "student_summary": "A perfectly reasonable summary of the lecture.",
        "evaluation_parameters": ["eloquence"]
    })
    .to_string();

    let resp = app
        .oneshot(post_evaluate(payload))
        .await
        .expect("oneshot /evaluate");
    assert!(
        resp.status().is_client_error(),
        "unknown parameter must be a client error, got {}",
        resp.status()
    );
}

#[tokio::test]
async fn api_evaluate_hides_internal_failures_behind_500() {
    let app = test_router(Arc::new(FailingEmbedder));

    let resp = app
        .oneshot(post_evaluate(evaluate_body()))
        .await
        .expect("oneshot /evaluate");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read json");
    let v: Json = serde_json::from_slice(&bytes).expect("parse error json");
    assert_eq!(v["detail"], "An internal error occurred.");
}
