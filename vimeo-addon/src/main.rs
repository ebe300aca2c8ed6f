use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use vimeo_addon_core::{logging, Config, VimeoAddon};

#[derive(Parser, Debug)]
#[command(name = "vimeo-addon")]
#[command(about = "Vimeo catalog addon server", long_about = None)]
struct Args {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, env = "VIMEO_ADDON_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load configuration
    let config = Config::load(args.config.as_deref())?;

    // 2. Validate configuration (fail fast on misconfigurations)
    if let Err(errors) = config.validate() {
        for e in &errors {
            eprintln!("Config validation error: {e}");
        }
        return Err(anyhow::anyhow!(
            "Configuration validation failed with {} error(s)",
            errors.len()
        ));
    }

    // 3. Initialize logging
    logging::init_logging(&config.logging)?;
    info!("Vimeo addon starting...");
    info!("HTTP address: {}", config.http_address());
    info!(
        variant = ?config.vimeo.variant,
        authenticated = config.vimeo.token.is_some(),
        "Vimeo API: {}",
        config.vimeo.api_url
    );

    // 4. Build the addon and serve
    let addon = VimeoAddon::from_config(&config.vimeo)?;
    vimeo_addon::server::serve(&config.http_address(), Arc::new(addon)).await
}
