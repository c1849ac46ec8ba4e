use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use newssense::application::services::{AnalysisOrchestrator, TextNormalizer};
use newssense::infrastructure::extraction::ExtractorFactory;
use newssense::infrastructure::models::ModelFactory;
use newssense::infrastructure::observability::{TracingConfig, init_tracing};
use newssense::infrastructure::report::PdfReportExporter;
use newssense::infrastructure::translation::TranslatorFactory;
use newssense::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load_for(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(
        environment,
        &settings.logging,
    ));

    if settings.scaffold_mode {
        tracing::warn!("Scaffold mode enabled: all collaborators are mocks");
    }

    let extractor = ExtractorFactory::create(&settings.extraction, settings.scaffold_mode)?;
    let translator = TranslatorFactory::create(&settings.translation, settings.scaffold_mode)?;
    let models = ModelFactory::create(&settings.models, settings.scaffold_mode)?;
    let exporter = Arc::new(
        PdfReportExporter::new(&settings.export.output_dir)
            .with_title(&settings.export.report_title),
    );
    let policy = settings.analysis_policy()?;

    tracing::info!(
        required_facets = ?policy.required_facets,
        on_chunk_failure = ?policy.chunk_failure_policy,
        output_dir = %settings.export.output_dir.display(),
        "Analysis pipeline configured"
    );

    let orchestrator = Arc::new(AnalysisOrchestrator::new(
        extractor,
        translator,
        Arc::new(TextNormalizer::new()),
        models,
        exporter,
        policy,
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server host/port")?;

    let router = create_router(AppState::new(orchestrator, settings));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, router).await?;

    Ok(())
}
