//! AI Insights Metrics API - Main Entry Point

use std::sync::Arc;

use tokio::net::TcpListener;

use ai_insights_api::domain::gateways::{SectionClassifier, SectionRepository};
use ai_insights_api::infrastructure::driven_adapters::config::AppConfig;
use ai_insights_api::infrastructure::driven_adapters::section_classifier::OpenAiSectionClassifier;
use ai_insights_api::infrastructure::driven_adapters::section_repository::JsonFileSectionRepository;
use ai_insights_api::infrastructure::driving_adapters::api_rest::{build_router, AppState};
use ai_insights_api::shared::telemetry;

fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    telemetry::init_tracing(&config.logging.filter, config.logging.json);
    tracing::info!(workers = config.server.workers, "Configuration loaded successfully");

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.workers.max(1))
        .thread_name("insights-worker")
        .enable_all()
        .build()?
        .block_on(serve(config))
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    // Load section data
    let section_repository: Arc<dyn SectionRepository> =
        Arc::new(JsonFileSectionRepository::load(&config.data.path).await?);

    // Create classifier
    let classifier: Option<Arc<dyn SectionClassifier>> = if config.llm.enabled() {
        tracing::info!(model = %config.llm.model, "LLM section routing enabled");
        Some(Arc::new(OpenAiSectionClassifier::new(&config.llm)?))
    } else {
        tracing::info!("LLM section routing disabled, no API key configured");
        None
    };

    let addr = config.bind_address();
    let app = build_router(AppState::new(config, section_repository, classifier));

    // Start server
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("Unable to listen for shutdown signal: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!("Unable to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Received shutdown signal");
}
