//! Process configuration, read once at startup.
//!
//! `OPENAI_API_KEY` is required; model names and the bind address have
//! sensible defaults. A `.env` file is honored in dev (loaded in `main`).

use std::env;

const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Clone)]
pub struct Settings {
    pub openai_api_key: String,
    /// Chat model used for extraction, ratings, and feedback.
    pub llm_model: String,
    /// Model used for the embedding port.
    pub embedding_model: String,
    pub bind_addr: String,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("Missing OPENAI_API_KEY env var"))?;
        if openai_api_key.trim().is_empty() {
            anyhow::bail!("OPENAI_API_KEY must not be empty");
        }
        Ok(Self {
            openai_api_key,
            llm_model: env::var("LLM_MODEL_NAME").unwrap_or_else(|_| DEFAULT_LLM_MODEL.into()),
            embedding_model: env::var("EMBEDDING_MODEL_NAME")
                .unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.into()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into()),
        })
    }
}
