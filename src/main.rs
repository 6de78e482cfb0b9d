use std::sync::Arc;
use tokio::net::TcpListener;
use news_summarizer::{
    api::routes::create_router,
    bart::BartBackend,
    config::Config,
    dataset::DatasetStore,
    rouge::RougeScorer,
    summarizer::Summarizer,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;

    // The model and dataset are process-wide resources, loaded once and
    // injected into the handlers through the application state.
    let backend = BartBackend::load()?;
    let summarizer = Summarizer::new(Arc::new(backend));

    let dataset = match &config.data_dir {
        Some(dir) => Some(Arc::new(DatasetStore::load(dir)?)),
        None => {
            tracing::warn!("DATA_DIR not set; evaluation endpoints are disabled");
            None
        }
    };

    let scorer = Arc::new(RougeScorer::new(config.use_stemmer));

    let app_state = AppState {
        summarizer,
        dataset,
        scorer,
    };

    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;
    tracing::info!("listening on {}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
