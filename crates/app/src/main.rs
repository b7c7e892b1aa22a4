use chrono::Utc;
use clap::Parser;
use pdf_qa_core::{AnswerService, HttpQaModel, LopdfExtractor};
use pdf_qa_server::{router, AppState, ServerConfig};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let config = ServerConfig::parse();

    let model_config = config
        .model_config()
        .map_err(|error| anyhow::anyhow!("invalid qa model configuration: {error}"))?;
    info!(
        model = %model_config.model,
        endpoint = %model_config.endpoint,
        threshold = config.confidence_threshold,
        "qa model configured"
    );

    let model = Arc::new(HttpQaModel::new(model_config));
    let answers = AnswerService::new(model).with_threshold(config.confidence_threshold);
    let state = AppState::new(answers, Arc::new(LopdfExtractor), config.upload_dir.clone())
        .with_max_upload_bytes(config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    info!(
        version = app_version,
        bind = %config.bind,
        upload_dir = %config.upload_dir.display(),
        started_at = %Utc::now().to_rfc3339(),
        "pdf-qa-server boot"
    );

    axum::serve(listener, router(state)).await?;
    Ok(())
}
