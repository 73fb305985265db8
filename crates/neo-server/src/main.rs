//! Prediction service binary.

use anyhow::{Context, Result};
use clap::Parser;
use neo_server::{AppState, Classifier, ForestClassifier, router};
use neo_validation::{CoercionMode, PipelineConfig, ValidationPipeline};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(version, about = "NEO hazard prediction service")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Path to the JSON forest model
    #[arg(short, long, default_value = "models/hazard_forest.json")]
    model: PathBuf,

    /// Attempt numeric coercion instead of rejecting non-numeric columns
    #[arg(long)]
    coerce: bool,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, default_value = "neo_server=info,neo_validation=info,tower_http=debug")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.log_level.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The model loads exactly once; a broken model file is fatal.
    let classifier = ForestClassifier::from_file(&args.model)
        .with_context(|| format!("failed to load model from {}", args.model.display()))?;
    info!(
        "model loaded: {} features from {}",
        classifier.feature_names().len(),
        args.model.display()
    );

    let config = PipelineConfig::builder()
        .coercion_mode(if args.coerce {
            CoercionMode::Coerce
        } else {
            CoercionMode::Strict
        })
        .build()?;
    let pipeline = ValidationPipeline::new(neo_validation::FeatureSchema::neo_hazard(), config);

    let state = AppState::new(Arc::new(classifier), pipeline);
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("listening on http://{}", addr);
    info!("POST /predict  - score a CSV or trusted payload");
    info!("GET  /health   - liveness check");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
