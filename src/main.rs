use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use yatra_translate::{
    api::{self, AppState},
    config::Config,
    db::Database,
    translation::{GoogleTranslateClient, MemoryStore, TranslationService, TranslationStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("yatra_translate=info".parse()?),
        )
        .init();

    info!("Starting translation service");

    let config = Config::from_env()?;

    let provider = GoogleTranslateClient::new(config.provider_config())?;
    if !provider.has_credential() {
        warn!("TRANSLATION_API_KEY not set, content will be served untranslated");
    }

    let store: Arc<dyn TranslationStore> = match &config.database_url {
        Some(url) => {
            let db = Database::new(url, config.database_max_connections).await?;
            info!(
                "✓ Connected to database ({} cached translations)",
                db.count_entries().await?
            );
            Arc::new(db)
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory translation cache");
            Arc::new(MemoryStore::new())
        }
    };

    if !config.verify_source_text {
        info!("Source text verification disabled, cached entries are served as-is");
    }

    let service = TranslationService::new(Arc::new(provider), store)
        .with_source_verification(config.verify_source_text);

    if config.api_key.is_none() {
        warn!("API_KEY not set, cache invalidation endpoint is disabled");
    }

    let state = Arc::new(AppState {
        service,
        api_key: config.api_key.clone(),
    });

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("✓ Listening on {}", addr);

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
