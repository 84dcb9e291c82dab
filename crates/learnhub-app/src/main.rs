//! LearnHub server binary - composition root.
//!
//! 1. Parse CLI flags and load configuration from TOML
//! 2. Initialize tracing
//! 3. Build the chat and course services
//! 4. Start the axum REST API server

mod cli;

use clap::Parser;

use learnhub_api::routes;
use learnhub_api::state::AppState;
use learnhub_chat::ChatbotService;
use learnhub_core::config::LearnHubConfig;
use learnhub_courses::CourseService;

use crate::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read before tracing so its log level can seed the filter.
    let config_file = args.resolve_config_path();
    let (mut config, load_error) = match LearnHubConfig::load(&config_file) {
        Ok(config) => (config, None),
        Err(e) => (LearnHubConfig::default(), Some(e)),
    };

    // Tracing. RUST_LOG takes precedence over the resolved level.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .init();

    tracing::info!("Starting LearnHub v{}", env!("CARGO_PKG_VERSION"));
    match load_error {
        None => tracing::info!(path = %config_file.display(), "Configuration loaded"),
        Some(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Failed to load config, using defaults"
        ),
    }

    config.apply_env_overrides();
    config.general.port = args.resolve_port(config.general.port);
    config.validate()?;

    // Services.
    let chat = ChatbotService::from_config(&config)?;
    if !chat.has_remote() {
        tracing::info!("No remote AI backend configured, using keyword replies");
    }
    let courses = CourseService::new();

    // === API server ===
    let state = AppState::new(config.clone(), chat, courses);
    routes::start_server(&config, state).await?;

    Ok(())
}
