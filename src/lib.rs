pub mod analysis;
pub mod api;
pub mod config;
pub mod formulary;
pub mod report;
pub mod session;
pub mod turkish;
pub mod vision;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::analysis::{DrugAnalyzer, GeminiClient};
use crate::api::server::ServeError;
use crate::api::types::ApiContext;
use crate::formulary::Formulary;
use crate::vision::BoxIdentifier;

/// Build every component from the environment and serve the API until
/// a shutdown signal arrives.
pub fn run() -> Result<(), ServeError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("LatiMed starting v{}", config::APP_VERSION);

    let settings = config::Settings::from_env()?;

    let formulary = Formulary::load(&settings.formulary_path)?;
    tracing::info!(
        drugs = formulary.len(),
        path = %settings.formulary_path.display(),
        "Formulary loaded"
    );

    let analyzer = Arc::new(DrugAnalyzer::new(
        formulary,
        Box::new(GeminiClient::new(&settings.gemini)),
    ));
    let identifier = Arc::new(BoxIdentifier::new(Arc::new(GeminiClient::new(
        &settings.gemini,
    ))));
    let ctx = ApiContext::new(analyzer, identifier);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(api::server::serve(ctx, settings.bind_addr))
}
