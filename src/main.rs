use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use lusog::api::triage_router;
use lusog::config;
use lusog::service::TriageService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let service = Arc::new(build_service());

    let addr = config::server_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, version = config::APP_VERSION, "{} listening", config::APP_NAME);

    axum::serve(listener, triage_router(service)).await?;
    Ok(())
}

/// Load the ONNX classifier pair when built with `onnx-models` and the
/// exports are installed; otherwise fall back to the keyword mocks so the
/// service stays usable for development.
fn build_service() -> TriageService {
    #[cfg(feature = "onnx-models")]
    {
        use lusog::model::OnnxOracle;

        let english = OnnxOracle::load("BioClinical ModernBERT", &config::english_model_dir());
        let tagalog = OnnxOracle::load("RoBERTa Tagalog", &config::tagalog_model_dir());
        match (english, tagalog) {
            (Ok(en), Ok(tl)) => return TriageService::new(Arc::new(en), Arc::new(tl)),
            (en, tl) => {
                for err in [en.err(), tl.err()].into_iter().flatten() {
                    tracing::warn!(%err, "ONNX model unavailable");
                }
            }
        }
    }

    tracing::warn!(
        "running with keyword mock oracles; install model exports under {}",
        config::models_dir().display()
    );
    TriageService::with_mock_oracles()
}
