//! Glitchline Server Binary
//!
//! Process bootstrap for the timeline generation service.

use clap::Parser;
use glitchline::config::GlitchlineConfig;
use glitchline::logging::init_logging;
use glitchline::orchestrator::Orchestrator;
use glitchline::provider::{GeminiImageClient, GeminiTextClient};
use glitchline::server::{serve, AppState};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "glitchline", about = "Alternate-timeline landmark imagery server")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind (overrides configuration)
    #[arg(short, long)]
    bind: Option<String>,

    /// Include raw prompts and landmark selection in success payloads
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match GlitchlineConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }
    if cli.debug {
        config.debug = true;
    }

    if let Err(e) = init_logging(Some(&config.logging)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Glitchline server starting");

    let orchestrator = match GlitchlineConfig::api_key() {
        Some(api_key) => {
            let text = GeminiTextClient::new(
                api_key.clone(),
                config.models.text.clone(),
                config.retry.text_policy(),
            )
            .with_api_base(config.models.api_base.clone());
            let image = GeminiImageClient::new(
                api_key,
                config.models.image.clone(),
                config.retry.image_policy(),
            )
            .with_api_base(config.models.api_base.clone());
            Some(Arc::new(
                Orchestrator::new(Arc::new(text), Arc::new(image))
                    .with_image_timeout(config.retry.image_timeout()),
            ))
        }
        None => {
            // Server still starts so the liveness probe answers; generation
            // requests fail with a configuration error.
            warn!("GEMINI_API_KEY is not set; generation requests will fail");
            None
        }
    };

    let state = AppState {
        orchestrator,
        debug: config.debug,
    };

    if let Err(e) = serve(state, &config.bind_addr).await {
        eprintln!("Server error: {}", e);
        process::exit(1);
    }
}
