// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod ai_client;
pub mod api;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod schema;

// ---- Re-exports for stable public API ----
pub use crate::ai_client::{DynEmbedder, DynGenerator, Embedding, TextGeneration};
pub use crate::api::{create_router, AppState};
pub use crate::pipeline::EvaluationOrchestrator;
pub use crate::schema::{EvaluationRequest, EvaluationResult};
