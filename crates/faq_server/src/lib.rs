pub mod config;
pub mod routes;
pub mod tts;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use faq_core::{QueryMatcher, Responder, load_faq_file};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::ServerConfig;
pub use routes::{AppState, build_router};
pub use tts::GoogleTranslateTts;

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Loads the FAQ file, fits the matcher and wires the speech backend.
pub fn build_state(config: &ServerConfig) -> anyhow::Result<AppState> {
    let data = load_faq_file(&config.faq_path)
        .with_context(|| format!("load FAQ data from {}", config.faq_path.display()))?;
    let matcher = QueryMatcher::build(&data.faqs, config.threshold).context("build question index")?;
    info!(
        entries = data.faqs.len(),
        phrasings = matcher.phrasings().len(),
        vocabulary = matcher.vocabulary_size(),
        threshold = matcher.threshold(),
        "Question index ready"
    );

    let timeout: Duration = config.tts_timeout.into();
    let tts = GoogleTranslateTts::new(config.tts_base_url.clone(), timeout)?;

    Ok(AppState {
        responder: Responder::new(Arc::new(matcher), Arc::new(tts)),
    })
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let state = build_state(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("bind {}", config.bind))?;
    info!("Starting FAQ server on {}", config.bind);

    axum::serve(listener, app).await?;
    Ok(())
}
