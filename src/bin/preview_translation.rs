//! Preview binary - translates one string through the provider, bypassing the cache.
//!
//! Usage:
//!   cargo run --bin preview -- hi "Welcome to Rishikesh"
//!
//! Required environment variables:
//! - TRANSLATION_API_KEY
//!
//! Optional:
//! - TRANSLATION_API_URL
//! - TRANSLATION_TIMEOUT_SECS (defaults to 5)

use anyhow::{bail, Context, Result};
use tracing::info;
use yatra_translate::{
    config::Config,
    i18n::Language,
    translation::{GoogleTranslateClient, TranslationProvider},
};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("preview=info".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let code = args
        .next()
        .context("Usage: preview <language> <text...>")?;
    let text = args.collect::<Vec<_>>().join(" ");
    if text.trim().is_empty() {
        bail!("Usage: preview <language> <text...>");
    }

    let language = Language::from_code(&code)?;
    let config = Config::from_env()?;
    let client = GoogleTranslateClient::new(config.provider_config())?;

    info!(
        "Translating {} chars to {} ({})",
        text.chars().count(),
        language.name(),
        language.provider_code()
    );

    let translated = client
        .translate(&text, language.code())
        .await
        .with_context(|| format!("Translation to {} failed", language.name()))?;

    println!("{}", translated);
    Ok(())
}
