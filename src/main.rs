//! Summary Evaluation Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring the capability ports, the evaluation
//! orchestrator, and the routes.

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use summary_evaluator::ai_client::{DynEmbedder, DynGenerator, OpenAiClient};
use summary_evaluator::api::{self, AppState};
use summary_evaluator::config::Settings;
use summary_evaluator::pipeline::scoring::{weight_table_from_disk, DEFAULT_WEIGHTS_PATH};
use summary_evaluator::pipeline::EvaluationOrchestrator;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("summary_evaluator=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let settings = Settings::from_env()?;

    // One OpenAI client serves both capability ports.
    let client = Arc::new(OpenAiClient::new(&settings)?);
    let generator: DynGenerator = client.clone();
    let embedder: DynEmbedder = client;

    let weights = weight_table_from_disk(Path::new(DEFAULT_WEIGHTS_PATH));
    let orchestrator = EvaluationOrchestrator::new(generator, embedder, weights);
    let state = AppState {
        orchestrator: Arc::new(orchestrator),
    };
    let router = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    info!(addr = %settings.bind_addr, "summary evaluator listening");
    axum::serve(listener, router).await?;
    Ok(())
}
